use std::f32::consts::PI;

use rand::{Rng, SeedableRng, rngs::StdRng};
use shared_state::{Shape, storage::SizeMismatchErr};

use super::{Environment, Result, Step};

const MAX_SPEED: f32 = 8.;
const MAX_TORQUE: f32 = 2.;
const DT: f32 = 0.05;
const GRAVITY: f32 = 10.;
const MASS: f32 = 1.;
const LENGTH: f32 = 1.;
const SOLVED_COS: f32 = 0.9;

/// Swing a pendulum up and keep it upright.
///
/// The state is `(cos theta, sin theta, theta_dot)`, the action a single torque
/// in `[-1, 1]` scaled to the maximum torque. Rewards are negative costs, the
/// episode never terminates early, and it's solved when it ends close to upright.
pub struct Pendulum {
    rng: StdRng,
    theta: f32,
    theta_dot: f32,
    steps: usize,
    max_steps: usize,
}

impl Pendulum {
    /// Creates a new `Pendulum` environment.
    ///
    /// # Arguments
    /// * `max_steps` - The length of an episode.
    /// * `seed` - The seed of the initial state noise.
    pub fn new(max_steps: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            theta: 0.,
            theta_dot: 0.,
            steps: 0,
            max_steps,
        }
    }

    fn observe(&self) -> Vec<f32> {
        vec![self.theta.cos(), self.theta.sin(), self.theta_dot]
    }
}

/// Wraps an angle to `[-pi, pi)`.
fn normalize_angle(theta: f32) -> f32 {
    (theta + PI).rem_euclid(2. * PI) - PI
}

impl Environment for Pendulum {
    fn state_shape(&self) -> Shape {
        Shape::from([3])
    }

    fn action_shape(&self) -> Shape {
        Shape::from([1])
    }

    fn reset(&mut self) -> Vec<f32> {
        self.theta = self.rng.random_range(-PI..PI);
        self.theta_dot = self.rng.random_range(-1.0..1.0);
        self.steps = 0;
        self.observe()
    }

    fn step(&mut self, action: &[f32]) -> Result<Step> {
        SizeMismatchErr::check(1, action.len())?;

        let torque = (action[0] * MAX_TORQUE).clamp(-MAX_TORQUE, MAX_TORQUE);
        let theta = normalize_angle(self.theta);
        let cost = theta * theta + 0.1 * self.theta_dot * self.theta_dot + 0.001 * torque * torque;

        let theta_acc = 3. * GRAVITY / (2. * LENGTH) * self.theta.sin()
            + 3. / (MASS * LENGTH * LENGTH) * torque;
        self.theta_dot = (self.theta_dot + theta_acc * DT).clamp(-MAX_SPEED, MAX_SPEED);
        self.theta += self.theta_dot * DT;
        self.steps += 1;

        Ok(Step {
            state: self.observe(),
            reward: -cost,
            terminal: false,
            truncated: self.steps >= self.max_steps,
        })
    }

    fn is_solved(&self) -> bool {
        self.steps >= self.max_steps && self.theta.cos() > SOLVED_COS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angles_wrap_around() {
        assert!((normalize_angle(3. * PI / 2.) + PI / 2.).abs() < 1e-5);
        assert!((normalize_angle(0.25) - 0.25).abs() < 1e-5);
    }

    #[test]
    fn rewards_are_costs_and_episodes_only_truncate() {
        let mut env = Pendulum::new(5, 3);
        let state = env.reset();
        assert_eq!(state.len(), 3);

        for i in 0..5 {
            let step = env.step(&[0.5]).unwrap();
            assert!(step.reward <= 0.);
            assert!(!step.terminal);
            assert_eq!(step.truncated, i == 4);
        }
    }

    #[test]
    fn upright_and_still_is_solved() {
        let mut env = Pendulum::new(1, 0);
        env.reset();
        env.theta = 0.;
        env.theta_dot = 0.;

        let step = env.step(&[0.]).unwrap();
        assert_eq!(step.reward, 0.);
        assert!(env.is_solved());
    }
}
