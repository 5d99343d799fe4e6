//! Arena-backed MCTS tree.
//!
//! Nodes live in one `Vec` and refer to each other by index; the root is
//! index 0 and has neither a move nor a parent. Dropping the tree drops every
//! node, so the chosen move is taken out of its node first.

use crate::moves::chess_move::ChessMove;

pub type NodeId = usize;

pub const ROOT: NodeId = 0;

#[derive(Debug, Clone)]
pub struct Node {
    /// Unapplied move leading here from the parent.
    pub mv: Option<ChessMove>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub visits: u32,
    /// Sum of rollout scores, from the favored color's perspective.
    pub total_score: f64,
    /// `(parent visits, opponent_choice, ucb)` as of the last computation.
    ucb_cache: Option<(u32, bool, f64)>,
}

impl Node {
    fn new(mv: Option<ChessMove>, parent: Option<NodeId>) -> Self {
        Self {
            mv,
            parent,
            children: Vec::new(),
            visits: 0,
            total_score: 0.0,
            ucb_cache: None,
        }
    }

    #[inline]
    pub fn average_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_score / f64::from(self.visits)
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchTree {
    nodes: Vec<Node>,
}

impl Default for SearchTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None, None)],
        }
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_child(&mut self, parent: NodeId, mv: ChessMove) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(Some(mv), Some(parent)));
        self.nodes[parent].children.push(id);
        id
    }

    /// Upper confidence bound of `id`: `total/visits + C * sqrt(ln(parent_visits)/visits)`.
    /// Unvisited nodes are `+inf`.
    ///
    /// This differs from the plain formula when `opponent_choice` is set. The
    /// exploitation term becomes `-total/visits`, because scores are stored
    /// for the favored color and the parent's mover wants them low. Without
    /// `opponent_choice` the plain formula applies unchanged.
    pub fn ucb(&mut self, id: NodeId, exploration: f64, opponent_choice: bool) -> f64 {
        let parent_visits = self.nodes[id]
            .parent
            .map_or(0, |parent| self.nodes[parent].visits);
        let node = &mut self.nodes[id];
        if node.visits == 0 {
            return f64::INFINITY;
        }
        if let Some((cached_parent_visits, cached_choice, value)) = node.ucb_cache {
            if cached_parent_visits == parent_visits && cached_choice == opponent_choice {
                return value;
            }
        }

        let exploitation = if opponent_choice {
            -node.average_score()
        } else {
            node.average_score()
        };
        let visits = f64::from(node.visits);
        let explore_term = f64::from(parent_visits.max(1)).ln() / visits;
        let value = exploitation + exploration * explore_term.sqrt();
        node.ucb_cache = Some((parent_visits, opponent_choice, value));
        value
    }

    /// Child of `parent` with the highest UCB; the first one wins ties.
    pub fn select_child(
        &mut self,
        parent: NodeId,
        exploration: f64,
        opponent_choice: bool,
    ) -> Option<NodeId> {
        let children = self.nodes[parent].children.clone();
        let mut best: Option<(NodeId, f64)> = None;
        for child in children {
            let value = self.ucb(child, exploration, opponent_choice);
            if best.map_or(true, |(_, best_value)| value > best_value) {
                best = Some((child, value));
            }
        }
        best.map(|(child, _)| child)
    }

    /// Adds `score` to `id` and every ancestor. Returns the number of
    /// non-root nodes on the path, i.e. how many moves were pushed to reach `id`.
    pub fn backpropagate(&mut self, id: NodeId, score: f64) -> usize {
        let mut depth = 0;
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = &mut self.nodes[current];
            node.visits += 1;
            node.total_score += score;
            node.ucb_cache = None;
            if node.parent.is_some() {
                depth += 1;
            }
            cursor = node.parent;
        }
        depth
    }

    /// Root child with the highest accumulated total score.
    pub fn best_root_child(&self) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child in &self.nodes[ROOT].children {
            let better = best.map_or(true, |current| {
                self.nodes[child].total_score > self.nodes[current].total_score
            });
            if better {
                best = Some(child);
            }
        }
        best
    }

    /// Moves the node's move out of the tree.
    pub fn take_move(&mut self, id: NodeId) -> Option<ChessMove> {
        self.nodes[id].mv.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board_location::Location;

    fn dummy_move(file: i8) -> ChessMove {
        ChessMove::travel(Location::new(file, 1), Location::new(file, 2))
    }

    #[test]
    fn unvisited_children_are_selected_first() {
        let mut tree = SearchTree::new();
        let a = tree.add_child(ROOT, dummy_move(0));
        let b = tree.add_child(ROOT, dummy_move(1));
        tree.backpropagate(a, 100.0);
        assert_eq!(tree.select_child(ROOT, 1.4, false), Some(b));
        assert!(tree.ucb(b, 1.4, false).is_infinite());
    }

    #[test]
    fn backpropagation_reaches_the_root_and_reports_depth() {
        let mut tree = SearchTree::new();
        let a = tree.add_child(ROOT, dummy_move(0));
        let a1 = tree.add_child(a, dummy_move(1));
        assert_eq!(tree.backpropagate(a1, 5.0), 2);
        assert_eq!(tree.backpropagate(ROOT, 1.0), 0);
        assert_eq!(tree.node(ROOT).visits, 2);
        assert_eq!(tree.node(ROOT).total_score, 6.0);
        assert_eq!(tree.node(a).visits, 1);
        assert_eq!(tree.node(a1).average_score(), 5.0);
    }

    #[test]
    fn opponent_nodes_prefer_low_scores() {
        let mut tree = SearchTree::new();
        let good = tree.add_child(ROOT, dummy_move(0));
        let bad = tree.add_child(ROOT, dummy_move(1));
        tree.backpropagate(good, 50.0);
        tree.backpropagate(bad, -50.0);
        assert_eq!(tree.select_child(ROOT, 0.0, false), Some(good));
        assert_eq!(tree.select_child(ROOT, 0.0, true), Some(bad));
    }

    #[test]
    fn ucb_cache_tracks_parent_visits() {
        let mut tree = SearchTree::new();
        let a = tree.add_child(ROOT, dummy_move(0));
        let b = tree.add_child(ROOT, dummy_move(1));
        tree.backpropagate(a, 10.0);
        tree.backpropagate(b, 10.0);
        let before = tree.ucb(a, 2.0, false);
        tree.backpropagate(b, 10.0);
        let after = tree.ucb(a, 2.0, false);
        assert!(after > before);
    }

    #[test]
    fn best_child_is_by_total_and_move_can_be_taken() {
        let mut tree = SearchTree::new();
        let a = tree.add_child(ROOT, dummy_move(0));
        let b = tree.add_child(ROOT, dummy_move(1));
        tree.backpropagate(a, 30.0);
        tree.backpropagate(b, 20.0);
        tree.backpropagate(b, 20.0);
        assert_eq!(tree.best_root_child(), Some(b));
        assert_eq!(tree.take_move(b), Some(dummy_move(1)));
        assert_eq!(tree.take_move(b), None);
    }
}
