//! Mapping of Chip8 keys to host keyboard keys.
use crate::{
    constants::KEY_COUNT,
    devices::{HostKey, KeyCode, Keypad},
    error::{Chip8Error, Chip8Result},
};

/// Lookup table from the 16 Chip8 keys to host keys, indexed by key value.
///
/// The default layout maps the hexadecimal keypad onto the left-hand
/// side of a QWERTY keyboard:
///
/// ```text
/// 1 2 3 C      1 2 3 4
/// 4 5 6 D  ->  Q W E R
/// 7 8 9 E      A S D F
/// A 0 B F      Z X C V
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    keys: [HostKey; KEY_COUNT as usize],
}

#[rustfmt::skip]
const DEFAULT_LAYOUT: [HostKey; KEY_COUNT as usize] = [
    'X', // 0
    '1', '2', '3', // 1 2 3
    'Q', 'W', 'E', // 4 5 6
    'A', 'S', 'D', // 7 8 9
    'Z', 'C',      // A B
    '4', 'R', 'F', 'V', // C D E F
];

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            keys: DEFAULT_LAYOUT,
        }
    }
}

/// Single entry in a key map definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct KeyBinding {
    pub chip8: KeyCode,
    pub key: HostKey,
}

impl KeyMap {
    /// Build a key map from a list of bindings.
    ///
    /// Chip8 keys without a binding keep their default host key. Two Chip8 keys
    /// can't share a host key, and a Chip8 key can't be bound twice.
    pub fn from_bindings(bindings: &[KeyBinding]) -> Chip8Result<Self> {
        let mut keys = DEFAULT_LAYOUT;
        let mut bound = [false; KEY_COUNT as usize];

        for binding in bindings {
            let index = binding.chip8.as_u8() as usize;
            if bound[index] {
                return Err(Chip8Error::KeyMap(format!(
                    "{} is bound more than once",
                    binding.chip8
                )));
            }
            bound[index] = true;
            keys[index] = binding.key.to_ascii_uppercase();
        }

        for (index, key) in keys.iter().enumerate() {
            if let Some(other) = keys[index + 1..].iter().position(|k| k == key) {
                return Err(Chip8Error::KeyMap(format!(
                    "host key '{key}' is mapped to both k{:x} and k{:x}",
                    index,
                    index + 1 + other
                )));
            }
        }

        log::debug!("key map: {keys:?}");

        Ok(Self { keys })
    }

    /// Host key that stands in for the given Chip8 key.
    #[inline]
    pub fn host_key(&self, key: KeyCode) -> HostKey {
        self.keys[key.as_u8() as usize]
    }

    /// Whether the host key mapped to the given Chip8 key is pressed down.
    ///
    /// Values beyond the 16 keys are never pressed.
    pub fn is_held(&self, keypad: &impl Keypad, key_id: u8) -> bool {
        match KeyCode::try_from(key_id) {
            Ok(key) => keypad.is_key_held(self.host_key(key)),
            Err(_) => false,
        }
    }

    /// Lowest Chip8 key whose host key was released during this poll.
    pub fn first_released(&self, keypad: &impl Keypad) -> Option<KeyCode> {
        KeyCode::ALL
            .into_iter()
            .find(|key| keypad.was_key_released(self.host_key(*key)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::devices::InputState;

    #[test]
    fn test_default_layout() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.host_key(KeyCode::Key1), '1');
        assert_eq!(keymap.host_key(KeyCode::KeyC), '4');
        assert_eq!(keymap.host_key(KeyCode::Key4), 'Q');
        assert_eq!(keymap.host_key(KeyCode::KeyD), 'R');
        assert_eq!(keymap.host_key(KeyCode::Key0), 'X');
        assert_eq!(keymap.host_key(KeyCode::KeyF), 'V');
    }

    #[test]
    fn test_bindings_override() {
        let keymap = KeyMap::from_bindings(&[
            KeyBinding { chip8: KeyCode::Key5, key: 'i' },
            KeyBinding { chip8: KeyCode::Key8, key: 'k' },
        ])
        .unwrap();
        assert_eq!(keymap.host_key(KeyCode::Key5), 'I');
        assert_eq!(keymap.host_key(KeyCode::Key8), 'K');
        assert_eq!(keymap.host_key(KeyCode::Key6), 'E');
    }

    #[test]
    fn test_bindings_conflict() {
        // Q is the default for k4
        let result = KeyMap::from_bindings(&[KeyBinding { chip8: KeyCode::Key5, key: 'Q' }]);
        assert!(matches!(result, Err(Chip8Error::KeyMap(_))));

        let result = KeyMap::from_bindings(&[
            KeyBinding { chip8: KeyCode::Key5, key: 'I' },
            KeyBinding { chip8: KeyCode::Key5, key: 'K' },
        ]);
        assert!(matches!(result, Err(Chip8Error::KeyMap(_))));
    }

    #[test]
    fn test_first_released() {
        let keymap = KeyMap::default();
        let mut input = InputState::new();
        assert_eq!(keymap.first_released(&input), None);

        input.press('V');
        input.press('W');
        input.release('V');
        input.release('W');
        assert_eq!(keymap.first_released(&input), Some(KeyCode::Key5));
    }

    #[test]
    fn test_is_held() {
        let keymap = KeyMap::default();
        let mut input = InputState::new();
        input.press('s');
        assert!(keymap.is_held(&input, 8));
        assert!(!keymap.is_held(&input, 7));
        assert!(!keymap.is_held(&input, 0x28));
    }
}
