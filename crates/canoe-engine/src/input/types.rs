/// Keys the harness reacts to.
///
/// The runtime maps platform key codes into these variants; everything else
/// becomes `Other` and is ignored.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    W,
    A,
    S,
    D,
    Digit1,
    Other,
}

/// Key transition, GLFW-style: auto-repeat is its own action.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

impl KeyAction {
    /// Press or repeat.
    pub fn is_held(self) -> bool {
        matches!(self, KeyAction::Press | KeyAction::Repeat)
    }
}

/// Four independent movement flags.
///
/// Opposite flags may both be set; both then apply and cancel out.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Movement {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Movement {
    pub const NONE: Movement = Movement {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Input consumed by one update tick.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct FrameInput {
    pub movement: Movement,
    /// A new entity was requested since the previous tick.
    pub spawn: bool,
}

/// What the runtime should do after a key was applied.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyResponse {
    Continue,
    RequestClose,
}
