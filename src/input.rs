/// Device-independent input: discrete events plus the set of held keys.
///
/// The terminal front-end translates key presses into these; tests feed
/// them directly.

use crate::error::GameError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Confirm,
    Fire,
    Quit,
    /// New logical viewport size.
    Resize { width: i32, height: i32 },
}

/// Continuous "is the key down right now" state used for movement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

/// Everything the input device reported for one tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

pub trait InputSource {
    /// Drain pending events without blocking.
    fn poll(&mut self) -> Result<InputFrame, GameError>;
}
