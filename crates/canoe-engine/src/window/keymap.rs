use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{Key, KeyAction};

/// Maps a physical key to the harness key set.
///
/// Physical codes are layout-independent, so WASD stays in place on AZERTY.
pub fn map_key(pk: PhysicalKey) -> Key {
    match pk {
        PhysicalKey::Code(code) => match code {
            KeyCode::Escape => Key::Escape,
            KeyCode::KeyW => Key::W,
            KeyCode::KeyA => Key::A,
            KeyCode::KeyS => Key::S,
            KeyCode::KeyD => Key::D,
            KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
            _ => Key::Other,
        },
        PhysicalKey::Unidentified(_) => Key::Other,
    }
}

/// winit reports auto-repeat as a flag on `Pressed`.
pub fn map_action(state: ElementState, repeat: bool) -> KeyAction {
    match state {
        ElementState::Pressed if repeat => KeyAction::Repeat,
        ElementState::Pressed => KeyAction::Press,
        ElementState::Released => KeyAction::Release,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn movement_and_control_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyW)), Key::W);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyA)), Key::A);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyS)), Key::S);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyD)), Key::D);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Digit1)), Key::Digit1);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
    }

    #[test]
    fn everything_else_is_other() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyQ)), Key::Other);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowUp)), Key::Other);
        assert_eq!(
            map_key(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            Key::Other
        );
    }

    #[test]
    fn repeat_flag_becomes_its_own_action() {
        assert_eq!(map_action(ElementState::Pressed, false), KeyAction::Press);
        assert_eq!(map_action(ElementState::Pressed, true), KeyAction::Repeat);
        assert_eq!(map_action(ElementState::Released, false), KeyAction::Release);
    }
}
