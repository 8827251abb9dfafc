use crate::error::Result;
use crate::ranking;
use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Имя картинки -> сколько раз её выбирали. Порядок итерации - порядок вставки.
pub type FrequencyTable = IndexMap<String, u64>;

/// Счётчики использования картинок с сохранением в frequencies.json.
///
/// Файл перезаписывается целиком при каждом изменении. Вызовы `record`
/// сериализуются внутренним мьютексом: горячие клавиши читаются в отдельных
/// потоках, и read-modify-write не должен терять обновления.
pub struct UsageTracker {
    path: PathBuf,
    table: Mutex<FrequencyTable>,
}

impl UsageTracker {
    /// Загрузить счётчики, удалить записи о картинках, которых больше нет на
    /// диске, и записать очищенную таблицу обратно.
    ///
    /// Отсутствующий или повреждённый файл - фатальная ошибка.
    pub fn reconcile(path: impl Into<PathBuf>, present: &HashSet<String>) -> Result<Self> {
        let path = path.into();
        let mut table = load_table(&path)?;

        let removed = prune(&mut table, present);
        if !removed.is_empty() {
            info!("Удалено {} записей о пропавших картинках: {:?}", removed.len(), removed);
        }
        write_table(&path, &table)?;

        info!("Загружено {} счётчиков из {:?}", table.len(), path);
        Ok(Self {
            path,
            table: Mutex::new(table),
        })
    }

    /// Увеличить счётчик картинки на 1 и сохранить таблицу. Возвращает новое значение.
    pub fn record(&self, name: &str) -> Result<u64> {
        let mut table = self.table.lock();
        let count = {
            let count = table.entry(name.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        write_table(&self.path, &table)?;

        debug!("Счётчик {} = {}", name, count);
        Ok(count)
    }

    /// Текущий рейтинг часто используемых
    pub fn frequent(&self, limit: usize) -> Vec<String> {
        ranking::frequent(&self.table.lock(), limit)
    }

    #[allow(dead_code)]
    pub fn counts(&self) -> FrequencyTable {
        self.table.lock().clone()
    }
}

/// Удалить из таблицы ключи, которых нет среди файлов. Возвращает удалённые имена.
pub fn prune(table: &mut FrequencyTable, present: &HashSet<String>) -> Vec<String> {
    let removed: Vec<String> = table
        .keys()
        .filter(|name| !present.contains(*name))
        .cloned()
        .collect();
    // retain сохраняет порядок оставшихся записей
    table.retain(|name, _| present.contains(name));
    removed
}

pub fn load_table(path: &Path) -> Result<FrequencyTable> {
    let file = File::open(path)?;
    let table = serde_json::from_reader(BufReader::new(file))?;
    Ok(table)
}

/// Атомарная запись: временный файл рядом с целевым, затем rename
pub fn write_table(path: &Path, table: &FrequencyTable) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        table.serialize(&mut serializer)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn setup(json: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frequencies.json");
        fs::write(&path, json).unwrap();
        (dir, path)
    }

    #[test]
    fn test_reconcile_prunes_missing_files() {
        let (_dir, path) = setup(r#"{"a": 3, "b": 1, "c": 5}"#);
        let tracker = UsageTracker::reconcile(&path, &names(&["a", "c"])).unwrap();

        let expected: FrequencyTable = [("a".to_string(), 3), ("c".to_string(), 5)].into_iter().collect();
        assert_eq!(tracker.counts(), expected);

        // Очищенная таблица записана обратно
        assert_eq!(load_table(&path).unwrap(), expected);
    }

    #[test]
    fn test_reconcile_keeps_file_order() {
        let (_dir, path) = setup(r#"{"z": 1, "a": 1, "m": 1}"#);
        let tracker = UsageTracker::reconcile(&path, &names(&["z", "a", "m"])).unwrap();
        let order: Vec<String> = tracker.counts().keys().cloned().collect();
        assert_eq!(order, vec!["z", "a", "m"]);
        assert_eq!(tracker.frequent(2), vec!["z", "a"]);
    }

    #[test]
    fn test_reconcile_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = UsageTracker::reconcile(dir.path().join("frequencies.json"), &names(&["a"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_reconcile_malformed_file_is_error() {
        let (_dir, path) = setup("{not json");
        assert!(UsageTracker::reconcile(&path, &names(&["a"])).is_err());

        let (_dir, path) = setup(r#"{"a": -1}"#);
        assert!(UsageTracker::reconcile(&path, &names(&["a"])).is_err());
    }

    #[test]
    fn test_record_increments_and_persists() {
        let (_dir, path) = setup("{}");
        let tracker = UsageTracker::reconcile(&path, &names(&["x"])).unwrap();

        assert_eq!(tracker.record("x").unwrap(), 1);
        let expected: FrequencyTable = [("x".to_string(), 1)].into_iter().collect();
        assert_eq!(load_table(&path).unwrap(), expected);

        assert_eq!(tracker.record("x").unwrap(), 2);
        let expected: FrequencyTable = [("x".to_string(), 2)].into_iter().collect();
        assert_eq!(load_table(&path).unwrap(), expected);
    }

    #[test]
    fn test_written_file_is_pretty_printed() {
        let (_dir, path) = setup("{}");
        let tracker = UsageTracker::reconcile(&path, &names(&["x"])).unwrap();
        tracker.record("x").unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n    \"x\": 1\n}");
    }

    #[test]
    fn test_concurrent_records_not_lost() {
        let (_dir, path) = setup("{}");
        let tracker = std::sync::Arc::new(UsageTracker::reconcile(&path, &names(&["x"])).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tracker = tracker.clone();
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        tracker.record("x").unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(tracker.counts()["x"], 40);
        assert_eq!(load_table(&path).unwrap()["x"], 40);
    }
}
