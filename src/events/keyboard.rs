use crate::error::{PickerError, Result};
use crate::mappings::KeyNameToEvdevCode;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::fmt;

/// Состояние клавиши
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyState {
    Pressed,
    Released,
    Repeat,
}

impl KeyState {
    /// Значение поля value у EV_KEY событий
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(KeyState::Released),
            1 => Some(KeyState::Pressed),
            2 => Some(KeyState::Repeat),
            _ => None,
        }
    }

    pub fn value(&self) -> i32 {
        match self {
            KeyState::Released => 0,
            KeyState::Pressed => 1,
            KeyState::Repeat => 2,
        }
    }
}

/// Код клавиши (evdev коды)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u16);

impl KeyCode {
    pub const LEFTCTRL: KeyCode = KeyCode(29);
    pub const LEFTSHIFT: KeyCode = KeyCode(42);
    pub const LEFTALT: KeyCode = KeyCode(56);
    pub const LEFTMETA: KeyCode = KeyCode(125);
    pub const ENTER: KeyCode = KeyCode(28);
    pub const V: KeyCode = KeyCode(47);

    pub fn new(code: u16) -> Self {
        Self(code)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    /// Правые модификаторы сводятся к левым, остальные коды не меняются
    pub fn normalized(self) -> Self {
        match self.0 {
            97 => Self::LEFTCTRL,   // KEY_RIGHTCTRL
            54 => Self::LEFTSHIFT,  // KEY_RIGHTSHIFT
            100 => Self::LEFTALT,   // KEY_RIGHTALT
            126 => Self::LEFTMETA,  // KEY_RIGHTMETA
            _ => self,
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match KeyNameToEvdevCode::reverse_translate(self.0) {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "KEY_{}", self.0),
        }
    }
}

/// Событие клавиатуры от физического устройства
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key_code: KeyCode,
    pub state: KeyState,
    pub device_name: String,
}

impl KeyEvent {
    pub fn new(key_code: KeyCode, state: KeyState, device_name: impl Into<String>) -> Self {
        Self {
            key_code,
            state,
            device_name: device_name.into(),
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}] {:?}", self.key_code, self.device_name, self.state)
    }
}

/// Сочетание клавиш вида "ctrl+alt+shift+q"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    keys: SmallVec<[KeyCode; 4]>,
}

impl Chord {
    pub fn parse(spec: &str) -> Result<Self> {
        let mut keys: SmallVec<[KeyCode; 4]> = SmallVec::new();

        for part in spec.split('+') {
            let name = part.trim();
            if name.is_empty() {
                return Err(PickerError::InvalidHotkey(format!(
                    "пустая клавиша в сочетании '{}'",
                    spec
                )));
            }
            let code = KeyNameToEvdevCode::translate(name).map_err(PickerError::InvalidHotkey)?;
            let code = KeyCode(code).normalized();
            if !keys.contains(&code) {
                keys.push(code);
            }
        }

        Ok(Self { keys })
    }

    #[allow(dead_code)]
    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    /// Сочетание срабатывает на нажатии клавиши, которая его завершает
    pub fn fires_on(&self, pressed_key: KeyCode, held: &HashSet<KeyCode>) -> bool {
        let pressed_key = pressed_key.normalized();
        self.keys.contains(&pressed_key) && self.keys.iter().all(|key| held.contains(key))
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.keys.iter().map(|key| key.to_string()).collect();
        write!(f, "{}", names.join("+"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(codes: &[u16]) -> HashSet<KeyCode> {
        codes.iter().map(|&c| KeyCode(c)).collect()
    }

    #[test]
    fn test_chord_parse() {
        let chord = Chord::parse("ctrl+alt+shift+q").unwrap();
        assert_eq!(
            chord.keys(),
            &[KeyCode(29), KeyCode(56), KeyCode(42), KeyCode(16)]
        );
        assert_eq!(chord.to_string(), "ctrl+alt+shift+q");
    }

    #[test]
    fn test_chord_parse_is_case_insensitive() {
        assert_eq!(
            Chord::parse("Alt + Shift + K").unwrap(),
            Chord::parse("alt+shift+k").unwrap()
        );
    }

    #[test]
    fn test_chord_parse_errors() {
        assert!(Chord::parse("ctrl+").is_err());
        assert!(Chord::parse("ctrl+hyper").is_err());
    }

    #[test]
    fn test_chord_fires_only_when_complete() {
        let chord = Chord::parse("alt+shift+k").unwrap();

        assert!(chord.fires_on(KeyCode(37), &held(&[56, 42, 37])));
        assert!(!chord.fires_on(KeyCode(37), &held(&[56, 37])));
        // Клавиша не из сочетания не должна его запускать
        assert!(!chord.fires_on(KeyCode(30), &held(&[56, 42, 37, 30])));
    }

    #[test]
    fn test_right_modifiers_match() {
        let chord = Chord::parse("ctrl+q").unwrap();
        let pressed: HashSet<KeyCode> = [KeyCode(97).normalized(), KeyCode(16)].into_iter().collect();
        assert!(chord.fires_on(KeyCode(16), &pressed));
    }

    #[test]
    fn test_key_state_from_value() {
        assert_eq!(KeyState::from_value(1), Some(KeyState::Pressed));
        assert_eq!(KeyState::from_value(0), Some(KeyState::Released));
        assert_eq!(KeyState::from_value(2), Some(KeyState::Repeat));
        assert_eq!(KeyState::from_value(7), None);
        assert_eq!(KeyState::Pressed.value(), 1);
    }
}
