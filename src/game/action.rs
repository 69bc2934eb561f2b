use anyhow::{Result, bail};

/// Horizontal movement input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Horizontal {
    Left,
    #[default]
    Still,
    Right,
}

impl Horizontal {
    /// Sign of the horizontal input (-1, 0, +1)
    pub fn sign(&self) -> i32 {
        match self {
            Horizontal::Left => -1,
            Horizontal::Still => 0,
            Horizontal::Right => 1,
        }
    }
}

/// One tick's worth of player input
///
/// The physics core is input-model agnostic: the keyboard adapter and the
/// discrete-action adapter both reduce to an `Intent` per tick. `jump` is a
/// press edge (true only on the tick the jump input transitions to pressed),
/// not a held state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub horizontal: Horizontal,
    pub jump: bool,
}

impl Intent {
    /// An intent with no input at all
    pub fn idle() -> Self {
        Self::default()
    }
}

/// Discrete action for the environment adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// No input this tick
    Idle,
    /// Move left
    Left,
    /// Move right
    Right,
    /// Jump (delivered as a press edge)
    Jump,
}

impl Action {
    /// Number of discrete actions
    pub const COUNT: usize = 4;

    /// Map an action index (0=idle, 1=left, 2=right, 3=jump) to an action
    ///
    /// Out-of-range indices are an error rather than being silently clamped.
    pub fn from_index(index: usize) -> Result<Self> {
        match index {
            0 => Ok(Action::Idle),
            1 => Ok(Action::Left),
            2 => Ok(Action::Right),
            3 => Ok(Action::Jump),
            _ => bail!(
                "invalid action index {index}, expected 0..={}",
                Self::COUNT - 1
            ),
        }
    }
}

impl From<Action> for Intent {
    fn from(action: Action) -> Self {
        match action {
            Action::Idle => Intent::idle(),
            Action::Left => Intent {
                horizontal: Horizontal::Left,
                jump: false,
            },
            Action::Right => Intent {
                horizontal: Horizontal::Right,
                jump: false,
            },
            Action::Jump => Intent {
                horizontal: Horizontal::Still,
                jump: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_sign() {
        assert_eq!(Horizontal::Left.sign(), -1);
        assert_eq!(Horizontal::Still.sign(), 0);
        assert_eq!(Horizontal::Right.sign(), 1);
    }

    #[test]
    fn test_action_index_mapping() {
        assert_eq!(Action::from_index(0).unwrap(), Action::Idle);
        assert_eq!(Action::from_index(1).unwrap(), Action::Left);
        assert_eq!(Action::from_index(2).unwrap(), Action::Right);
        assert_eq!(Action::from_index(3).unwrap(), Action::Jump);
    }

    #[test]
    fn test_invalid_action_index() {
        assert!(Action::from_index(4).is_err());
        assert!(Action::from_index(999).is_err());
    }

    #[test]
    fn test_action_to_intent() {
        let jump: Intent = Action::Jump.into();
        assert!(jump.jump);
        assert_eq!(jump.horizontal, Horizontal::Still);

        let left: Intent = Action::Left.into();
        assert!(!left.jump);
        assert_eq!(left.horizontal, Horizontal::Left);

        assert_eq!(Intent::from(Action::Idle), Intent::idle());
    }
}
