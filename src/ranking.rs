use crate::tracker::FrequencyTable;

/// Имена `limit` картинок с наибольшими счётчиками, по убыванию.
///
/// Сортировка стабильная: при равных счётчиках сохраняется порядок таблицы
/// (порядок в файле, затем порядок добавления).
pub fn frequent(table: &FrequencyTable, limit: usize) -> Vec<String> {
    let mut entries: Vec<(&String, u64)> = table.iter().map(|(name, &count)| (name, count)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    entries
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.clone())
        .collect()
}
