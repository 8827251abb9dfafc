/// Преобразование символов в нажатия для посимвольного ввода текста (раскладка US)
pub struct CharToEvdevCode;

/// Нажатие, необходимое для ввода одного символа
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub code: u16,
    pub shift: bool,
}

impl Keystroke {
    const fn plain(code: u16) -> Self {
        Self { code, shift: false }
    }

    const fn shifted(code: u16) -> Self {
        Self { code, shift: true }
    }
}

impl CharToEvdevCode {
    pub fn translate(ch: char) -> Option<Keystroke> {
        if ch.is_ascii_alphabetic() {
            let code = Self::letter_code(ch.to_ascii_lowercase())?;
            return Some(Keystroke { code, shift: ch.is_ascii_uppercase() });
        }

        let stroke = match ch {
            '1' => Keystroke::plain(2),
            '2' => Keystroke::plain(3),
            '3' => Keystroke::plain(4),
            '4' => Keystroke::plain(5),
            '5' => Keystroke::plain(6),
            '6' => Keystroke::plain(7),
            '7' => Keystroke::plain(8),
            '8' => Keystroke::plain(9),
            '9' => Keystroke::plain(10),
            '0' => Keystroke::plain(11),
            '!' => Keystroke::shifted(2),
            '@' => Keystroke::shifted(3),
            '#' => Keystroke::shifted(4),
            '$' => Keystroke::shifted(5),
            '%' => Keystroke::shifted(6),
            '^' => Keystroke::shifted(7),
            '&' => Keystroke::shifted(8),
            '*' => Keystroke::shifted(9),
            '(' => Keystroke::shifted(10),
            ')' => Keystroke::shifted(11),
            '-' => Keystroke::plain(12),
            '_' => Keystroke::shifted(12),
            '=' => Keystroke::plain(13),
            '+' => Keystroke::shifted(13),
            '[' => Keystroke::plain(26),
            '{' => Keystroke::shifted(26),
            ']' => Keystroke::plain(27),
            '}' => Keystroke::shifted(27),
            ';' => Keystroke::plain(39),
            ':' => Keystroke::shifted(39),
            '\'' => Keystroke::plain(40),
            '"' => Keystroke::shifted(40),
            '`' => Keystroke::plain(41),
            '~' => Keystroke::shifted(41),
            '\\' => Keystroke::plain(43),
            '|' => Keystroke::shifted(43),
            ',' => Keystroke::plain(51),
            '<' => Keystroke::shifted(51),
            '.' => Keystroke::plain(52),
            '>' => Keystroke::shifted(52),
            '/' => Keystroke::plain(53),
            '?' => Keystroke::shifted(53),
            ' ' => Keystroke::plain(57),
            _ => return None,
        };

        Some(stroke)
    }

    fn letter_code(ch: char) -> Option<u16> {
        let code = match ch {
            'a' => 30, 'b' => 48, 'c' => 46, 'd' => 32, 'e' => 18, 'f' => 33,
            'g' => 34, 'h' => 35, 'i' => 23, 'j' => 36, 'k' => 37, 'l' => 38,
            'm' => 50, 'n' => 49, 'o' => 24, 'p' => 25, 'q' => 16, 'r' => 19,
            's' => 31, 't' => 20, 'u' => 22, 'v' => 47, 'w' => 17, 'x' => 45,
            'y' => 21, 'z' => 44,
            _ => return None,
        };
        Some(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_characters() {
        assert_eq!(CharToEvdevCode::translate('h'), Some(Keystroke { code: 35, shift: false }));
        assert_eq!(CharToEvdevCode::translate('H'), Some(Keystroke { code: 35, shift: true }));
        assert_eq!(CharToEvdevCode::translate(':'), Some(Keystroke { code: 39, shift: true }));
        assert_eq!(CharToEvdevCode::translate('/'), Some(Keystroke { code: 53, shift: false }));
        assert_eq!(CharToEvdevCode::translate('?'), Some(Keystroke { code: 53, shift: true }));
    }

    #[test]
    fn test_every_url_char_is_typeable() {
        let url = "https://cdn.example.com/emojis/Pog_2-x.png?size=48&v=1#a";
        assert!(url.chars().all(|c| CharToEvdevCode::translate(c).is_some()));
    }

    #[test]
    fn test_non_ascii_unsupported() {
        assert_eq!(CharToEvdevCode::translate('ж'), None);
    }
}
