//! Integer (file, rank) board coordinates.
//!
//! A `Location` doubles as a square reference and as a direction/offset
//! vector, so ray stepping is plain arithmetic: `origin + direction * n`.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

pub const BOARD_FILES: i8 = 8;
pub const BOARD_RANKS: i8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: i8,
    pub rank: i8,
}

impl Location {
    /// Sentinel outside the board, used for "no selection".
    pub const INVALID: Location = Location { file: -1, rank: -1 };

    #[inline]
    pub const fn new(file: i8, rank: i8) -> Self {
        Self { file, rank }
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.file >= 0 && self.file < BOARD_FILES && self.rank >= 0 && self.rank < BOARD_RANKS
    }

    /// `|file| + |rank|` of this location read as a vector.
    #[inline]
    pub fn taxicab_length(self) -> i32 {
        i32::from(self.file).abs() + i32::from(self.rank).abs()
    }

    /// Minimum over the four distances to a board edge (0 on the rim, 3 in the centre).
    #[inline]
    pub fn shortest_distance_to_edge(self) -> i32 {
        let file = i32::from(self.file);
        let rank = i32::from(self.rank);
        let to_left = file;
        let to_right = i32::from(BOARD_FILES) - 1 - file;
        let to_bottom = rank;
        let to_top = i32::from(BOARD_RANKS) - 1 - rank;
        to_left.min(to_right).min(to_bottom).min(to_top)
    }

    /// Iterates every board square in file-major, rank-minor order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..BOARD_FILES)
            .flat_map(|file| (0..BOARD_RANKS).map(move |rank| Location::new(file, rank)))
    }

    /// Parses `"e4"`/`"E4"` style coordinates.
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Location::new((file as u8 - b'a') as i8, (rank as u8 - b'1') as i8))
    }
}

impl Default for Location {
    fn default() -> Self {
        Location::INVALID
    }
}

impl Add for Location {
    type Output = Location;

    #[inline]
    fn add(self, rhs: Location) -> Location {
        Location::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl Sub for Location {
    type Output = Location;

    #[inline]
    fn sub(self, rhs: Location) -> Location {
        Location::new(self.file - rhs.file, self.rank - rhs.rank)
    }
}

impl Mul<i8> for Location {
    type Output = Location;

    #[inline]
    fn mul(self, scalar: i8) -> Location {
        Location::new(self.file * scalar, self.rank * scalar)
    }
}

impl Neg for Location {
    type Output = Location;

    #[inline]
    fn neg(self) -> Location {
        Location::new(-self.file, -self.rank)
    }
}

/// Uppercase square name ("E4"), or `"--"` for off-board locations.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "--");
        }
        write!(
            f,
            "{}{}",
            char::from(b'A' + self.file as u8),
            char::from(b'1' + self.rank as u8)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_steps_along_rays() {
        let origin = Location::new(2, 3);
        let direction = Location::new(1, -1);
        assert_eq!(origin + direction * 2, Location::new(4, 1));
        assert_eq!(origin - direction, Location::new(1, 4));
        assert_eq!(-direction, Location::new(-1, 1));
        assert_eq!(Location::new(-2, 1).taxicab_length(), 3);
    }

    #[test]
    fn edge_distance_is_a_centralization_metric() {
        assert_eq!(Location::new(0, 0).shortest_distance_to_edge(), 0);
        assert_eq!(Location::new(7, 4).shortest_distance_to_edge(), 0);
        assert_eq!(Location::new(1, 6).shortest_distance_to_edge(), 1);
        assert_eq!(Location::new(3, 4).shortest_distance_to_edge(), 3);
    }

    #[test]
    fn invalid_sentinel_and_display() {
        assert!(!Location::INVALID.is_valid());
        assert!(!Location::new(8, 0).is_valid());
        assert_eq!(Location::new(0, 1).to_string(), "A2");
        assert_eq!(Location::INVALID.to_string(), "--");
        assert_eq!(Location::from_algebraic("h8"), Some(Location::new(7, 7)));
        assert_eq!(Location::from_algebraic("i1"), None);
    }

    #[test]
    fn all_squares_are_file_major() {
        let squares: Vec<Location> = Location::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Location::new(0, 0));
        assert_eq!(squares[1], Location::new(0, 1));
        assert_eq!(squares[8], Location::new(1, 0));
    }
}
