use rand::{Rng, SeedableRng, rngs::StdRng};
use shared_state::{Shape, storage::SizeMismatchErr};

use super::{Environment, Result, Step};

const GRAVITY: f32 = 9.8;
const CART_MASS: f32 = 1.0;
const POLE_MASS: f32 = 0.1;
const TOTAL_MASS: f32 = CART_MASS + POLE_MASS;
const POLE_HALF_LENGTH: f32 = 0.5;
const POLE_MOMENT: f32 = POLE_MASS * POLE_HALF_LENGTH;
const FORCE: f32 = 10.0;
const DT: f32 = 0.02;
const X_LIMIT: f32 = 2.4;
const THETA_LIMIT: f32 = 12. * std::f32::consts::PI / 180.;

/// Balance a pole on a cart by pushing it left or right.
///
/// The state is `(x, x_dot, theta, theta_dot)`. The action holds one preference
/// score per direction `(left, right)`, the highest one wins. Every step the pole
/// stays up is worth `1`, and an episode is solved when it lasts the whole length limit.
pub struct CartPole {
    rng: StdRng,
    state: [f32; 4],
    steps: usize,
    max_steps: usize,
    fell: bool,
}

impl CartPole {
    /// Creates a new `CartPole` environment.
    ///
    /// # Arguments
    /// * `max_steps` - The length limit of an episode.
    /// * `seed` - The seed of the initial state noise.
    pub fn new(max_steps: usize, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            state: [0.; 4],
            steps: 0,
            max_steps,
            fell: false,
        }
    }
}

impl Environment for CartPole {
    fn state_shape(&self) -> Shape {
        Shape::from([4])
    }

    fn action_shape(&self) -> Shape {
        Shape::from([2])
    }

    fn reset(&mut self) -> Vec<f32> {
        for s in self.state.iter_mut() {
            *s = self.rng.random_range(-0.05..0.05);
        }

        self.steps = 0;
        self.fell = false;
        self.state.to_vec()
    }

    fn step(&mut self, action: &[f32]) -> Result<Step> {
        SizeMismatchErr::check(2, action.len())?;

        let force = if action[1] > action[0] { FORCE } else { -FORCE };
        let [x, x_dot, theta, theta_dot] = self.state;
        let (sin, cos) = theta.sin_cos();

        let temp = (force + POLE_MOMENT * theta_dot * theta_dot * sin) / TOTAL_MASS;
        let theta_acc = (GRAVITY * sin - cos * temp)
            / (POLE_HALF_LENGTH * (4. / 3. - POLE_MASS * cos * cos / TOTAL_MASS));
        let x_acc = temp - POLE_MOMENT * theta_acc * cos / TOTAL_MASS;

        self.state = [
            x + DT * x_dot,
            x_dot + DT * x_acc,
            theta + DT * theta_dot,
            theta_dot + DT * theta_acc,
        ];
        self.steps += 1;

        let [x, _, theta, _] = self.state;
        self.fell = x.abs() > X_LIMIT || theta.abs() > THETA_LIMIT;

        Ok(Step {
            state: self.state.to_vec(),
            reward: 1.,
            terminal: self.fell,
            truncated: !self.fell && self.steps >= self.max_steps,
        })
    }

    fn is_solved(&self) -> bool {
        !self.fell && self.steps >= self.max_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_starts_near_upright() {
        let mut env = CartPole::new(200, 0);
        let state = env.reset();

        assert_eq!(state.len(), env.state_shape().numel());
        assert!(state.iter().all(|s| s.abs() < 0.05));
    }

    #[test]
    fn always_pushing_one_way_drops_the_pole() {
        let mut env = CartPole::new(500, 1);
        env.reset();

        let mut steps = 0;
        loop {
            let step = env.step(&[1., 0.]).unwrap();
            steps += 1;
            if step.is_done() {
                assert!(step.terminal);
                break;
            }
        }

        assert!(steps < 500);
        assert!(!env.is_solved());
    }

    #[test]
    fn short_episodes_are_truncated_and_solved() {
        let mut env = CartPole::new(3, 2);
        env.reset();

        let actions = [[0., 1.], [1., 0.], [0., 1.]];
        let last = actions.iter().map(|a| env.step(a).unwrap()).last().unwrap();

        assert!(last.truncated);
        assert!(!last.terminal);
        assert!(env.is_solved());
    }

    #[test]
    fn wrong_action_size_is_an_error() {
        let mut env = CartPole::new(10, 0);
        env.reset();
        assert!(env.step(&[1.]).is_err());
    }
}
