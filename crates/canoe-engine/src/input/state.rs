use super::types::{FrameInput, Key, KeyAction, KeyResponse, Movement};

/// Keyboard state for the session window.
///
/// Written synchronously while events are dispatched, read once per frame via
/// [`InputState::begin_frame`].
#[derive(Debug, Default)]
pub struct InputState {
    movement: Movement,
    spawn_pending: bool,
    focused: bool,
}

impl InputState {
    /// Applies one key transition.
    ///
    /// - W/S/A/D hold up/down/left/right while pressed or repeating
    /// - `1` requests a spawn when released (never on press)
    /// - Escape asks to close when released
    pub fn apply_key(&mut self, key: Key, action: KeyAction) -> KeyResponse {
        let held = action.is_held();
        match key {
            Key::W => self.movement.up = held,
            Key::S => self.movement.down = held,
            Key::A => self.movement.left = held,
            Key::D => self.movement.right = held,
            Key::Digit1 => {
                if action == KeyAction::Release {
                    self.spawn_pending = true;
                }
            }
            Key::Escape => {
                if action == KeyAction::Release {
                    return KeyResponse::RequestClose;
                }
            }
            Key::Other => {}
        }
        KeyResponse::Continue
    }

    /// Tracks window focus. Losing focus drops every held direction so no key
    /// stays stuck when its release goes to another window.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.movement = Movement::NONE;
        }
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn movement(&self) -> Movement {
        self.movement
    }

    pub fn spawn_pending(&self) -> bool {
        self.spawn_pending
    }

    /// Snapshot for this frame's update; consumes the pending spawn request.
    pub fn begin_frame(&mut self) -> FrameInput {
        FrameInput {
            movement: self.movement,
            spawn: std::mem::take(&mut self.spawn_pending),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_set_on_press_and_repeat_clear_on_release() {
        let mut input = InputState::default();

        input.apply_key(Key::W, KeyAction::Press);
        input.apply_key(Key::A, KeyAction::Repeat);
        assert_eq!(
            input.movement(),
            Movement { up: true, down: false, left: true, right: false }
        );

        input.apply_key(Key::W, KeyAction::Release);
        input.apply_key(Key::S, KeyAction::Press);
        input.apply_key(Key::D, KeyAction::Press);
        assert_eq!(
            input.movement(),
            Movement { up: false, down: true, left: true, right: true }
        );
    }

    #[test]
    fn opposite_keys_can_both_be_held() {
        let mut input = InputState::default();
        input.apply_key(Key::W, KeyAction::Press);
        input.apply_key(Key::S, KeyAction::Press);
        let m = input.movement();
        assert!(m.up && m.down);
    }

    #[test]
    fn spawn_is_requested_on_release_only() {
        let mut input = InputState::default();

        input.apply_key(Key::Digit1, KeyAction::Press);
        input.apply_key(Key::Digit1, KeyAction::Repeat);
        assert!(!input.spawn_pending());

        input.apply_key(Key::Digit1, KeyAction::Release);
        assert!(input.spawn_pending());
    }

    #[test]
    fn begin_frame_consumes_the_spawn_edge() {
        let mut input = InputState::default();
        input.apply_key(Key::Digit1, KeyAction::Release);
        input.apply_key(Key::D, KeyAction::Press);

        let first = input.begin_frame();
        assert!(first.spawn);
        assert!(first.movement.right);

        let second = input.begin_frame();
        assert!(!second.spawn);
        assert!(second.movement.right);
    }

    #[test]
    fn escape_requests_close_on_release() {
        let mut input = InputState::default();
        assert_eq!(input.apply_key(Key::Escape, KeyAction::Press), KeyResponse::Continue);
        assert_eq!(input.apply_key(Key::Escape, KeyAction::Release), KeyResponse::RequestClose);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut input = InputState::default();
        assert_eq!(input.apply_key(Key::Other, KeyAction::Press), KeyResponse::Continue);
        assert_eq!(input.begin_frame(), FrameInput::default());
    }

    #[test]
    fn focus_loss_releases_held_directions() {
        let mut input = InputState::default();
        input.set_focused(true);
        input.apply_key(Key::W, KeyAction::Press);
        input.apply_key(Key::Digit1, KeyAction::Release);

        input.set_focused(false);
        assert!(!input.movement().any());
        // A completed spawn request is not a held key and survives.
        assert!(input.spawn_pending());
    }
}
