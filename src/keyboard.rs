//! Keyboard keys and the keyboard device.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::device::{impl_input_device, ControllerType, DeviceCore, DeviceId};
use crate::error::Result;
use crate::event::EventKind;
use crate::metadata::DeviceMeta;
use crate::registry::{Completion, Registry};

/// Layout-independent physical key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Unknown,

    Backspace,
    Tab,
    Enter,
    Escape,
    Space,
    CapsLock,
    NumLock,
    ScrollLock,
    PrintScreen,
    Pause,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Left,
    Right,
    Up,
    Down,
    Menu,

    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,

    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,

    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,

    Grave,
    Minus,
    Equal,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Quote,
    Comma,
    Period,
    Slash,

    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    NumpadDecimal,
    NumpadDivide,
    NumpadMultiply,
    NumpadMinus,
    NumpadPlus,
    NumpadEnter,
    NumpadEqual,

    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,

    VolumeUp,
    VolumeDown,
    Mute,
}

/// Keyboard device object.
///
/// Press/release are edge events: each call produces exactly one event.
/// Key repeat is the platform's business; this type does not filter
/// a second press of a key that is already down.
pub struct KeyboardDevice {
    core: DeviceCore,
}

impl KeyboardDevice {
    pub fn new(registry: Arc<Registry>, id: DeviceId) -> Result<Self> {
        Self::with_meta(registry, id, DeviceMeta::named("Keyboard"))
    }

    pub fn with_meta(registry: Arc<Registry>, id: DeviceId, meta: DeviceMeta) -> Result<Self> {
        let core = DeviceCore::attach(registry, id, ControllerType::Keyboard, meta)?;
        Ok(Self { core })
    }

    pub fn handle_key_press(&mut self, key: Key) -> Completion {
        self.core.submit(EventKind::KeyPress { key })
    }

    pub fn handle_key_release(&mut self, key: Key) -> Completion {
        self.core.submit(EventKind::KeyRelease { key })
    }
}

impl_input_device!(KeyboardDevice);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{InputDevice, Lifecycle};

    #[test]
    fn repeated_press_is_not_filtered() {
        let registry = Arc::new(Registry::new());
        let mut keyboard = KeyboardDevice::new(registry.clone(), registry.next_device_id()).unwrap();
        assert_eq!(keyboard.lifecycle(), Lifecycle::Connected);

        keyboard.handle_key_press(Key::W);
        keyboard.handle_key_press(Key::W);
        keyboard.handle_key_release(Key::W);
        assert_eq!(keyboard.lifecycle(), Lifecycle::Active);

        let kinds: Vec<_> = registry
            .drain_events()
            .into_iter()
            .skip(1)
            .map(|(e, _)| e.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::KeyPress { key: Key::W },
                EventKind::KeyPress { key: Key::W },
                EventKind::KeyRelease { key: Key::W },
            ]
        );
    }
}
