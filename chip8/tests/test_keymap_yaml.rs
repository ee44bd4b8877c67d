#![cfg(feature = "serde")]
use chip8::prelude::*;

#[test]
fn test_keymap_from_yaml() {
    let yaml = r#"
- chip8: 5
  key: i
- chip8: "8"
  key: k
- chip8: c
  key: o
"#;
    let bindings: Vec<KeyBinding> = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(bindings[0].chip8, KeyCode::Key5);
    assert_eq!(bindings[1].chip8, KeyCode::Key8);
    assert_eq!(bindings[2].chip8, KeyCode::KeyC);

    let keymap = KeyMap::from_bindings(&bindings).unwrap();
    assert_eq!(keymap.host_key(KeyCode::Key5), 'I');
    assert_eq!(keymap.host_key(KeyCode::KeyC), 'O');
}

#[test]
fn test_keycode_out_of_range() {
    assert!(serde_yaml::from_str::<KeyCode>("16").is_err());
    assert!(serde_yaml::from_str::<KeyCode>("-1").is_err());
    assert!(serde_yaml::from_str::<KeyCode>("g").is_err());
    assert!(serde_yaml::from_str::<KeyCode>("10").is_ok());
}
