use crate::error::Result;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Проблема в строке links.txt. Такие строки пропускаются, без попыток починки.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    /// Ссылка заканчивается на '/', имя файла получить нельзя
    EmptyName { line: usize, url: String },
    /// Имя файла не похоже на "имя.расширение"
    MalformedName { line: usize, name: String },
    /// Повтор имени: побеждает более поздняя строка
    Duplicate { line: usize, name: String },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogWarning::EmptyName { line, url } => {
                write!(f, "строка {}: не удалось выделить имя файла из '{}'", line, url)
            }
            CatalogWarning::MalformedName { line, name } => {
                write!(f, "строка {}: имя '{}' не содержит расширения", line, name)
            }
            CatalogWarning::Duplicate { line, name } => {
                write!(f, "строка {}: повтор имени '{}', используется последняя ссылка", line, name)
            }
        }
    }
}

/// Соответствие имени файла картинки и её ссылки. Загружается один раз при старте.
#[derive(Debug, Clone, Default)]
pub struct LinkCatalog {
    links: HashMap<String, String>,
}

impl LinkCatalog {
    pub fn load(path: &Path) -> Result<(Self, Vec<CatalogWarning>)> {
        let text = fs::read_to_string(path)?;
        let (catalog, warnings) = Self::parse(&text);

        for warning in &warnings {
            warn!("links.txt: {}", warning);
        }
        info!("Загружено {} ссылок из {:?}", catalog.len(), path);

        Ok((catalog, warnings))
    }

    /// Разбор построчного списка ссылок: ключ - подстрока после последнего '/'
    pub fn parse(text: &str) -> (Self, Vec<CatalogWarning>) {
        let mut links = HashMap::new();
        let mut warnings = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let url = raw.trim();
            if url.is_empty() {
                continue;
            }

            let name = url.rsplit('/').next().unwrap_or(url);
            if name.is_empty() {
                warnings.push(CatalogWarning::EmptyName { line, url: url.to_string() });
                continue;
            }
            if !Self::is_file_name(name) {
                warnings.push(CatalogWarning::MalformedName { line, name: name.to_string() });
                continue;
            }

            if links.insert(name.to_string(), url.to_string()).is_some() {
                warnings.push(CatalogWarning::Duplicate { line, name: name.to_string() });
            }
        }

        (Self { links }, warnings)
    }

    fn is_file_name(name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((stem, ext)) => {
                !stem.is_empty() && !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric())
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn contains(&self, name: &str) -> bool {
        self.links.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl FromIterator<(String, String)> for LinkCatalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { links: iter.into_iter().collect() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_takes_name_after_last_slash() {
        let (catalog, warnings) = LinkCatalog::parse(
            "https://cdn.example.com/emojis/Pog.png\nhttps://e/x/catJAM.gif\n",
        );
        assert!(warnings.is_empty());
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Pog.png"), Some("https://cdn.example.com/emojis/Pog.png"));
        assert_eq!(catalog.get("catJAM.gif"), Some("https://e/x/catJAM.gif"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let (catalog, warnings) = LinkCatalog::parse("\n  \nhttp://e/img1.png\r\n\n");
        assert!(warnings.is_empty());
        assert_eq!(catalog.get("img1.png"), Some("http://e/img1.png"));
    }

    #[test]
    fn test_malformed_entries_reported() {
        let (catalog, warnings) = LinkCatalog::parse(
            "http://e/folder/\nhttp://e/noext\nhttp://e/a.png?size=48\nhttp://e/ok.webp\n",
        );
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("ok.webp"));
        assert_eq!(
            warnings,
            vec![
                CatalogWarning::EmptyName { line: 1, url: "http://e/folder/".to_string() },
                CatalogWarning::MalformedName { line: 2, name: "noext".to_string() },
                CatalogWarning::MalformedName { line: 3, name: "a.png?size=48".to_string() },
            ]
        );
    }

    #[test]
    fn test_duplicate_last_wins() {
        let (catalog, warnings) = LinkCatalog::parse("http://a/x.png\nhttp://b/x.png\n");
        assert_eq!(catalog.get("x.png"), Some("http://b/x.png"));
        assert_eq!(
            warnings,
            vec![CatalogWarning::Duplicate { line: 2, name: "x.png".to_string() }]
        );
    }

    #[test]
    fn test_long_extensions_accepted() {
        let (catalog, warnings) = LinkCatalog::parse("http://e/party.jpeg\nhttp://e/wave.webm\n");
        assert!(warnings.is_empty());
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LinkCatalog::load(&dir.path().join("links.txt")).is_err());
    }
}
