#![allow(dead_code)]
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use replab_core::{Env, Step};

pub const N_ROWS: usize = 4;
pub const N_COLS: usize = 12;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Grid of 4 x 12 cells. The agent starts in the left column and the goal
/// is the bottom-right corner. The cells between them on the bottom row are
/// a cliff: stepping there gives -100 and ends the episode. Every other step
/// gives -1.
pub struct CliffWalking {
    x: usize,
    y: usize,
    start_rng: Option<StdRng>,
}

impl CliffWalking {
    /// Episodes start at the bottom-left corner.
    pub fn new() -> Self {
        Self {
            x: 0,
            y: N_ROWS - 1,
            start_rng: None,
        }
    }

    /// Episodes start in a row of the left column drawn uniformly.
    pub fn with_random_start(seed: u64) -> Self {
        Self {
            start_rng: Some(StdRng::seed_from_u64(seed)),
            ..Self::new()
        }
    }

    fn state(&self) -> usize {
        self.y * N_COLS + self.x
    }
}

impl Env for CliffWalking {
    type Obs = usize;
    type Act = usize;

    fn reset(&mut self) -> Result<usize> {
        self.x = 0;
        self.y = match self.start_rng.as_mut() {
            Some(rng) => rng.gen_range(0..N_ROWS),
            None => N_ROWS - 1,
        };
        Ok(self.state())
    }

    /// Actions are up, down, left and right.
    fn step(&mut self, a: &usize) -> Result<Step<Self>> {
        match a {
            0 => self.y = self.y.saturating_sub(1),
            1 => self.y = (self.y + 1).min(N_ROWS - 1),
            2 => self.x = self.x.saturating_sub(1),
            _ => self.x = (self.x + 1).min(N_COLS - 1),
        }

        let on_bottom = self.y == N_ROWS - 1;
        if on_bottom && self.x > 0 && self.x < N_COLS - 1 {
            Ok(Step::new(self.state(), -100.0, true))
        } else {
            Ok(Step::new(self.state(), -1.0, on_bottom && self.x == N_COLS - 1))
        }
    }
}

/// Episodes of a fixed length with reward 1 per step.
///
/// The observation is the index of the step within the episode.
pub struct FixedLength {
    len: usize,
    t: usize,
}

impl FixedLength {
    pub fn new(len: usize) -> Self {
        Self { len, t: 0 }
    }
}

impl Env for FixedLength {
    type Obs = usize;
    type Act = usize;

    fn reset(&mut self) -> Result<usize> {
        self.t = 0;
        Ok(0)
    }

    fn step(&mut self, _a: &usize) -> Result<Step<Self>> {
        self.t += 1;
        Ok(Step::new(self.t, 1.0, self.t >= self.len))
    }
}
