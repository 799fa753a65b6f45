use crate::Shape;

/// How the flat parameter subsets of the linear actor-critic are laid out.
///
/// Every layer maps a row of inputs with `x W + b`:
/// * actor: `W_a` (`state x action`, row major) followed by `b_a` (`action`).
/// * critic: `W_c` (`(state + action) x tasks`, row major) followed by `b_c` (`tasks`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelLayout {
    pub state: Shape,
    pub action: Shape,
    pub num_tasks: usize,
}

impl ModelLayout {
    pub fn new(state: Shape, action: Shape, num_tasks: usize) -> Self {
        Self {
            state,
            action,
            num_tasks,
        }
    }

    pub fn state_dim(&self) -> usize {
        self.state.numel()
    }

    pub fn action_dim(&self) -> usize {
        self.action.numel()
    }

    /// Inputs of the critic, the state concatenated with the action.
    pub fn critic_inputs(&self) -> usize {
        self.state_dim() + self.action_dim()
    }

    pub fn actor_len(&self) -> usize {
        self.action_dim() * (self.state_dim() + 1)
    }

    pub fn critic_len(&self) -> usize {
        self.num_tasks * (self.critic_inputs() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subset_lengths() {
        let layout = ModelLayout::new(Shape::from([4]), Shape::from([2]), 1);

        assert_eq!(layout.actor_len(), 2 * 5);
        assert_eq!(layout.critic_len(), 7);
    }
}
