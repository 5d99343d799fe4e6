//! Rollout worker pool for parallel MCTS.
//!
//! Workers pull jobs from a shared crossbeam channel. Every job carries its
//! own clone of the game, so workers never share board state. The only shared
//! mutable value is the per-iteration `RolloutTally`, behind a mutex. The
//! search thread waits on one `Event` per job before backpropagating, and
//! dropping the pool sends each worker a `Shutdown` job and joins it.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{trace, warn};

use crate::chess_errors::ChessResult;
use crate::game_state::chess_types::Color;
use crate::game_state::game_state::ChessGame;
use crate::search::mcts::{rollout, RolloutSettings};

/// One-shot completion flag.
#[derive(Debug, Default)]
pub struct Event {
    signaled: Mutex<bool>,
    condvar: Condvar,
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        let mut signaled = self.signaled.lock();
        *signaled = true;
        self.condvar.notify_all();
    }

    pub fn is_set(&self) -> bool {
        *self.signaled.lock()
    }

    pub fn wait(&self) {
        let mut signaled = self.signaled.lock();
        while !*signaled {
            self.condvar.wait(&mut signaled);
        }
    }

    pub fn wait_all(events: &[Arc<Event>]) {
        for event in events {
            event.wait();
        }
    }
}

/// Sets the event when dropped, including while unwinding from a panic.
struct SignalOnDrop(Arc<Event>);

impl Drop for SignalOnDrop {
    fn drop(&mut self) {
        self.0.set();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RolloutTally {
    pub sum: f64,
    pub count: u32,
}

impl RolloutTally {
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }
}

struct RolloutJob {
    game: ChessGame,
    to_move: Color,
    seed: u64,
    rollouts: u32,
    tally: Arc<Mutex<RolloutTally>>,
    done: Arc<Event>,
}

enum Job {
    Rollout(Box<RolloutJob>),
    Shutdown,
}

pub struct RolloutPool {
    sender: Sender<Job>,
    workers: Vec<JoinHandle<()>>,
    rollouts_per_worker: u32,
}

impl RolloutPool {
    pub fn new(
        worker_threads: usize,
        rollouts_per_worker: u32,
        settings: RolloutSettings,
    ) -> ChessResult<Self> {
        let (sender, receiver) = unbounded::<Job>();
        let mut pool = Self {
            sender,
            workers: Vec::with_capacity(worker_threads),
            rollouts_per_worker: rollouts_per_worker.max(1),
        };
        for worker_id in 0..worker_threads.max(1) {
            let jobs = receiver.clone();
            let settings = settings.clone();
            let handle = thread::Builder::new()
                .name(format!("rollout-{worker_id}"))
                .spawn(move || worker_loop(jobs, settings))?;
            pool.workers.push(handle);
        }
        Ok(pool)
    }

    #[inline]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Fans one job per worker out over the pool, waits for all of them and
    /// returns the mean rollout score. `None` if no rollout completed.
    pub fn evaluate<R: Rng + ?Sized>(
        &self,
        game: &ChessGame,
        to_move: Color,
        rng: &mut R,
    ) -> Option<f64> {
        let tally = Arc::new(Mutex::new(RolloutTally::default()));
        let mut events = Vec::with_capacity(self.workers.len());
        for _ in 0..self.workers.len() {
            let done = Arc::new(Event::new());
            let job = RolloutJob {
                game: game.clone(),
                to_move,
                seed: rng.random(),
                rollouts: self.rollouts_per_worker,
                tally: Arc::clone(&tally),
                done: Arc::clone(&done),
            };
            if self.sender.send(Job::Rollout(Box::new(job))).is_ok() {
                events.push(done);
            }
        }
        Event::wait_all(&events);

        let tally = *tally.lock();
        trace!(count = tally.count, sum = tally.sum, "rollout batch finished");
        tally.average()
    }
}

impl Drop for RolloutPool {
    fn drop(&mut self) {
        for _ in 0..self.workers.len() {
            let _ = self.sender.send(Job::Shutdown);
        }
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                warn!("rollout worker panicked");
            }
        }
    }
}

fn worker_loop(jobs: Receiver<Job>, settings: RolloutSettings) {
    while let Ok(job) = jobs.recv() {
        match job {
            Job::Shutdown => break,
            Job::Rollout(job) => run_job(*job, &settings),
        }
    }
}

fn run_job(job: RolloutJob, settings: &RolloutSettings) {
    let RolloutJob {
        mut game,
        to_move,
        seed,
        rollouts,
        tally,
        done,
    } = job;
    let _signal = SignalOnDrop(done);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut local = RolloutTally::default();
    for _ in 0..rollouts {
        local.sum += rollout(&mut game, to_move, settings, &mut rng);
        local.count += 1;
    }

    let mut shared = tally.lock();
    shared.sum += local.sum;
    shared.count += local.count;
}
