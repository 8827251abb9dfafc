use crate::events::{Chord, KeyCode, KeyEvent, KeyState, PickerEvent};
use std::collections::HashSet;

/// Привязка сочетания к событию пикера
#[derive(Debug, Clone)]
pub struct HotkeyBinding {
    pub chord: Chord,
    pub event: PickerEvent,
}

impl HotkeyBinding {
    pub fn new(chord: Chord, event: PickerEvent) -> Self {
        Self { chord, event }
    }
}

/// Зажатые клавиши одного устройства
#[derive(Debug, Default)]
pub struct HeldKeys {
    held: HashSet<KeyCode>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Обновить состояние и вернуть события сработавших сочетаний.
    /// Автоповтор клавиши сочетание повторно не запускает.
    pub fn update(&mut self, event: &KeyEvent, bindings: &[HotkeyBinding]) -> Vec<PickerEvent> {
        let key = event.key_code.normalized();
        match event.state {
            KeyState::Pressed => {
                self.held.insert(key);
                bindings
                    .iter()
                    .filter(|binding| binding.chord.fires_on(key, &self.held))
                    .map(|binding| binding.event.clone())
                    .collect()
            }
            KeyState::Released => {
                self.held.remove(&key);
                Vec::new()
            }
            KeyState::Repeat => Vec::new(),
        }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: u16) -> KeyEvent {
        KeyEvent::new(KeyCode(code), KeyState::Pressed, "test")
    }

    fn release(code: u16) -> KeyEvent {
        KeyEvent::new(KeyCode(code), KeyState::Released, "test")
    }

    fn bindings() -> Vec<HotkeyBinding> {
        vec![
            HotkeyBinding::new(Chord::parse("ctrl+alt+shift+q").unwrap(), PickerEvent::Activate),
            HotkeyBinding::new(Chord::parse("alt+shift+k").unwrap(), PickerEvent::Kill),
        ]
    }

    #[test]
    fn test_activation_chord() {
        let bindings = bindings();
        let mut held = HeldKeys::new();

        assert!(held.update(&press(29), &bindings).is_empty());
        assert!(held.update(&press(56), &bindings).is_empty());
        assert!(held.update(&press(42), &bindings).is_empty());
        assert_eq!(held.update(&press(16), &bindings), vec![PickerEvent::Activate]);
    }

    #[test]
    fn test_order_of_presses_does_not_matter() {
        let bindings = bindings();
        let mut held = HeldKeys::new();

        held.update(&press(37), &bindings);
        held.update(&press(42), &bindings);
        assert_eq!(held.update(&press(56), &bindings), vec![PickerEvent::Kill]);
    }

    #[test]
    fn test_repeat_does_not_refire() {
        let bindings = bindings();
        let mut held = HeldKeys::new();
        for code in [56, 42, 37] {
            held.update(&press(code), &bindings);
        }
        let repeat = KeyEvent::new(KeyCode(37), KeyState::Repeat, "test");
        assert!(held.update(&repeat, &bindings).is_empty());
    }

    #[test]
    fn test_release_breaks_chord() {
        let bindings = bindings();
        let mut held = HeldKeys::new();
        held.update(&press(56), &bindings);
        held.update(&press(42), &bindings);
        held.update(&release(42), &bindings);
        assert!(held.update(&press(37), &bindings).is_empty());

        held.update(&release(56), &bindings);
        held.update(&release(37), &bindings);
        assert!(held.is_empty());
    }

    #[test]
    fn test_right_hand_modifiers() {
        let bindings = bindings();
        let mut held = HeldKeys::new();
        // KEY_RIGHTALT + KEY_RIGHTSHIFT + k
        held.update(&press(100), &bindings);
        held.update(&press(54), &bindings);
        assert_eq!(held.update(&press(37), &bindings), vec![PickerEvent::Kill]);
    }
}
