pub mod keyboard;

pub use keyboard::{Chord, KeyCode, KeyEvent, KeyState};

use std::fmt;

/// Событие пикера. Все источники (горячие клавиши, stdin) сводятся к этому типу
/// и обрабатываются единым циклом диспетчеризации.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// Переключить видимость
    Activate,
    Show,
    Hide,
    /// Выбор картинки по имени файла
    Select(String),
    /// Штатное завершение
    Exit,
    /// Аварийное завершение с ненулевым кодом
    Kill,
}

impl PickerEvent {
    /// Разбор текстовой команды: show/hide/toggle/exit/kill, иначе выбор по имени
    pub fn from_command(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let event = match line.to_lowercase().as_str() {
            "show" => PickerEvent::Show,
            "hide" => PickerEvent::Hide,
            "toggle" => PickerEvent::Activate,
            "exit" | "quit" => PickerEvent::Exit,
            "kill" => PickerEvent::Kill,
            _ => PickerEvent::Select(line.to_string()),
        };
        Some(event)
    }
}

impl fmt::Display for PickerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickerEvent::Select(name) => write!(f, "Select({})", name),
            other => write!(f, "{:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command() {
        assert_eq!(PickerEvent::from_command("show"), Some(PickerEvent::Show));
        assert_eq!(PickerEvent::from_command(" HIDE "), Some(PickerEvent::Hide));
        assert_eq!(PickerEvent::from_command("toggle"), Some(PickerEvent::Activate));
        assert_eq!(PickerEvent::from_command("quit"), Some(PickerEvent::Exit));
        assert_eq!(PickerEvent::from_command("kill"), Some(PickerEvent::Kill));
        assert_eq!(
            PickerEvent::from_command("Pog.png"),
            Some(PickerEvent::Select("Pog.png".to_string()))
        );
        assert_eq!(PickerEvent::from_command("   "), None);
    }
}
