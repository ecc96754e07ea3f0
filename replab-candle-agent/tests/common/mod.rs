#![allow(dead_code)]
use anyhow::Result;
use rand::{rngs::StdRng, Rng, SeedableRng};
use replab_core::{Env, Step};
use std::f32::consts::PI;

const GRAVITY: f32 = 9.8;
const MASS_CART: f32 = 1.0;
const MASS_POLE: f32 = 0.1;
const TOTAL_MASS: f32 = MASS_CART + MASS_POLE;
const LENGTH: f32 = 0.5;
const POLE_MASS_LENGTH: f32 = MASS_POLE * LENGTH;
const FORCE_MAG: f32 = 10.0;
const TAU: f32 = 0.02;
const THETA_THRESHOLD: f32 = 12.0 * 2.0 * PI / 360.0;
const X_THRESHOLD: f32 = 2.4;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Cart-pole balancing with the classic control dynamics.
///
/// The observation is `[x, x_dot, theta, theta_dot]`, action 0 pushes the
/// cart to the left and action 1 to the right. Reward is 1 per step.
pub struct CartPole {
    state: [f32; 4],
    rng: StdRng,
}

impl CartPole {
    pub fn new(seed: u64) -> Self {
        Self {
            state: [0.0; 4],
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Env for CartPole {
    type Obs = [f32; 4];
    type Act = usize;

    fn reset(&mut self) -> Result<[f32; 4]> {
        for v in self.state.iter_mut() {
            *v = self.rng.gen_range(-0.05..0.05);
        }
        Ok(self.state)
    }

    fn step(&mut self, a: &usize) -> Result<Step<Self>> {
        let [x, x_dot, theta, theta_dot] = self.state;
        let force = if *a == 1 { FORCE_MAG } else { -FORCE_MAG };
        let (sin, cos) = theta.sin_cos();

        let temp = (force + POLE_MASS_LENGTH * theta_dot * theta_dot * sin) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin - cos * temp)
            / (LENGTH * (4.0 / 3.0 - MASS_POLE * cos * cos / TOTAL_MASS));
        let x_acc = temp - POLE_MASS_LENGTH * theta_acc * cos / TOTAL_MASS;

        self.state = [
            x + TAU * x_dot,
            x_dot + TAU * x_acc,
            theta + TAU * theta_dot,
            theta_dot + TAU * theta_acc,
        ];

        let is_done = self.state[0].abs() > X_THRESHOLD || self.state[2].abs() > THETA_THRESHOLD;
        Ok(Step::new(self.state, 1.0, is_done))
    }
}
