//! IO device interface
//!
//! The VM does not own any host devices. The driver passes its keyboard
//! state and sound output into every `step` or `tick` call.
use std::collections::HashSet;

/// Key on the host keyboard, identified by its label.
pub type HostKey = char;

/// Keyboard state provided by the host.
///
/// Queried through the [`KeyMap`](crate::keymap::KeyMap), so only the
/// 16 mapped host keys are ever asked about.
pub trait Keypad {
    /// Checks immediately whether the given key is currently pressed.
    fn is_key_held(&self, key: HostKey) -> bool;

    /// Checks whether the given key went up since the last poll.
    fn was_key_released(&self, key: HostKey) -> bool;
}

/// Hooks to turn the sound buzzer on or off.
pub trait Buzzer {
    fn start_tone(&mut self);

    fn stop_tone(&mut self);
}

/// Silent buzzer.
impl Buzzer for () {
    fn start_tone(&mut self) {}

    fn stop_tone(&mut self) {}
}

/// Keyboard state owned by the driver loop.
///
/// Feed it key events as they arrive, and call [`InputState::end_poll`]
/// once the VM has been updated for the frame.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    held: HashSet<HostKey>,
    released: HashSet<HostKey>,
}

impl InputState {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn press(&mut self, key: HostKey) {
        self.held.insert(key.to_ascii_uppercase());
    }

    pub fn release(&mut self, key: HostKey) {
        let key = key.to_ascii_uppercase();
        if self.held.remove(&key) {
            self.released.insert(key);
        }
    }

    /// Forget which keys were released during this poll.
    ///
    /// Held keys stay held.
    pub fn end_poll(&mut self) {
        self.released.clear();
    }
}

impl Keypad for InputState {
    fn is_key_held(&self, key: HostKey) -> bool {
        self.held.contains(&key.to_ascii_uppercase())
    }

    fn was_key_released(&self, key: HostKey) -> bool {
        self.released.contains(&key.to_ascii_uppercase())
    }
}

/// The 16 keys of the COSMAC VIP hexadecimal keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum KeyCode {
    Key0 = 0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF = 0xF,
}

impl KeyCode {
    pub const ALL: [KeyCode; 16] = [
        Self::Key0,
        Self::Key1,
        Self::Key2,
        Self::Key3,
        Self::Key4,
        Self::Key5,
        Self::Key6,
        Self::Key7,
        Self::Key8,
        Self::Key9,
        Self::KeyA,
        Self::KeyB,
        Self::KeyC,
        Self::KeyD,
        Self::KeyE,
        Self::KeyF,
    ];

    #[inline]
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let key_id = self.as_u8();
        write!(f, "k{key_id:x}")
    }
}

impl From<KeyCode> for u8 {
    fn from(keycode: KeyCode) -> Self {
        keycode.as_u8()
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = InvalidKeyCode;

    fn try_from(key_id: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(key_id as usize)
            .copied()
            .ok_or(InvalidKeyCode)
    }
}

#[derive(Debug)]
pub struct InvalidKeyCode;

impl std::error::Error for InvalidKeyCode {}

impl std::fmt::Display for InvalidKeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "keycode must be in range 0 <= keycode < 16")
    }
}

#[cfg(feature = "serde")]
mod de {
    use std::fmt::Display;

    use serde::de::{Deserialize, Error, Expected, Unexpected, Visitor};

    use super::*;

    impl Expected for InvalidKeyCode {
        fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            <Self as Display>::fmt(self, f)
        }
    }

    impl<'de> Deserialize<'de> for KeyCode {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            // Integer, or a single hexadecimal digit
            deserializer.deserialize_any(KeyCodeVisitor)
        }
    }

    struct KeyCodeVisitor;

    impl<'de> Visitor<'de> for KeyCodeVisitor {
        type Value = KeyCode;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "an integer between 0 and 15, or a hexadecimal digit")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            u8::try_from(v)
                .ok()
                .and_then(|key_id| KeyCode::try_from(key_id).ok())
                .ok_or_else(|| E::invalid_value(Unexpected::Unsigned(v), &InvalidKeyCode))
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            u64::try_from(v)
                .map_err(|_| E::invalid_value(Unexpected::Signed(v), &InvalidKeyCode))
                .and_then(|v| self.visit_u64(v))
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            let mut chars = v.trim().chars();
            match (chars.next().and_then(|c| c.to_digit(16)), chars.next()) {
                (Some(digit), None) => self.visit_u64(digit as u64),
                _ => Err(E::invalid_value(Unexpected::Str(v), &InvalidKeyCode)),
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_keycode_conversion() {
        for key_id in 0..16u8 {
            let keycode = KeyCode::try_from(key_id).unwrap();
            assert_eq!(keycode.as_u8(), key_id);
        }
        assert!(KeyCode::try_from(16).is_err());
        assert_eq!(KeyCode::KeyA.to_string(), "ka");
    }

    #[test]
    fn test_input_state() {
        let mut input = InputState::new();

        input.press('q');
        assert!(input.is_key_held('Q'));
        assert!(!input.was_key_released('Q'));

        input.release('Q');
        assert!(!input.is_key_held('Q'));
        assert!(input.was_key_released('q'));

        input.end_poll();
        assert!(!input.was_key_released('Q'));
    }

    /// A key that was never pressed can't be released.
    #[test]
    fn test_input_release_without_press() {
        let mut input = InputState::new();
        input.release('W');
        assert!(!input.was_key_released('W'));
    }
}
