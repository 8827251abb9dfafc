use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Имена клавиш, допустимые в сочетаниях из конфигурации, и их evdev коды.
/// Первое имя для кода считается каноническим при обратном преобразовании.
static KEY_NAMES: &[(&str, u16)] = &[
    // Модификаторы
    ("ctrl", 29), ("control", 29),
    ("shift", 42),
    ("alt", 56),
    ("super", 125), ("meta", 125), ("win", 125), ("cmd", 125), ("command", 125),
    // Буквы
    ("a", 30), ("b", 48), ("c", 46), ("d", 32), ("e", 18), ("f", 33), ("g", 34),
    ("h", 35), ("i", 23), ("j", 36), ("k", 37), ("l", 38), ("m", 50), ("n", 49),
    ("o", 24), ("p", 25), ("q", 16), ("r", 19), ("s", 31), ("t", 20), ("u", 22),
    ("v", 47), ("w", 17), ("x", 45), ("y", 21), ("z", 44),
    // Цифры (верхний ряд)
    ("1", 2), ("2", 3), ("3", 4), ("4", 5), ("5", 6),
    ("6", 7), ("7", 8), ("8", 9), ("9", 10), ("0", 11),
    // Специальные
    ("space", 57), ("enter", 28), ("return", 28), ("escape", 1), ("esc", 1),
    ("backspace", 14), ("tab", 15), ("capslock", 58),
    // Пунктуация
    ("minus", 12), ("equal", 13), ("leftbrace", 26), ("rightbrace", 27),
    ("backslash", 43), ("semicolon", 39), ("apostrophe", 40), ("grave", 41),
    ("comma", 51), ("dot", 52), ("slash", 53),
    // Навигация
    ("insert", 110), ("delete", 111), ("home", 102), ("end", 107),
    ("pageup", 104), ("pagedown", 109),
    ("up", 103), ("down", 108), ("left", 105), ("right", 106),
    // Функциональные
    ("f1", 59), ("f2", 60), ("f3", 61), ("f4", 62), ("f5", 63), ("f6", 64),
    ("f7", 65), ("f8", 66), ("f9", 67), ("f10", 68), ("f11", 87), ("f12", 88),
];

static NAME_TO_CODE: Lazy<HashMap<&'static str, u16>> =
    Lazy::new(|| KEY_NAMES.iter().copied().collect());

static CODE_TO_NAME: Lazy<HashMap<u16, &'static str>> = Lazy::new(|| {
    let mut map = HashMap::new();
    for &(name, code) in KEY_NAMES {
        map.entry(code).or_insert(name);
    }
    map
});

/// Преобразование имён клавиш в evdev коды
pub struct KeyNameToEvdevCode;

impl KeyNameToEvdevCode {
    /// Получить evdev код клавиши по её имени (регистронезависимо)
    pub fn translate(key_name: &str) -> Result<u16, String> {
        let normalized = key_name.trim().to_lowercase();
        NAME_TO_CODE
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| format!("Неизвестная клавиша: {}", key_name))
    }

    /// Получить каноническое имя клавиши по evdev коду
    pub fn reverse_translate(keycode: u16) -> Option<&'static str> {
        CODE_TO_NAME.get(&keycode).copied()
    }
}
