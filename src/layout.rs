use crate::assets::{ImageAsset, ImageKind};
use crate::error::Result;
use crate::picker_error;
use std::collections::HashSet;

/// Строки таблицы, каждая не длиннее заданного числа колонок
pub type Grid<T> = Vec<Vec<T>>;

/// Разбить последовательность на строки по `num_cols` элементов.
///
/// Порядок сохраняется, последняя строка может быть короче. `num_cols == 0`
/// отклоняется ошибкой.
///
/// ```text
/// [1, 2, 3, 4, 5], num_cols = 2  ->  [[1, 2], [3, 4], [5]]
/// ```
pub fn to_grid<T: Clone>(items: &[T], num_cols: usize) -> Result<Grid<T>> {
    if num_cols == 0 {
        return Err(picker_error!(invalid_layout, "число колонок должно быть больше 0"));
    }
    Ok(items.chunks(num_cols).map(<[T]>::to_vec).collect())
}

/// Параметры построения пикера
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    pub num_cols: usize,
    pub show_labels: bool,
    pub separate_gifs: bool,
    pub show_frequents: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Frequent,
    Static,
    Animated,
    All,
}

impl SectionKind {
    fn label(&self) -> &'static str {
        match self {
            SectionKind::Frequent => "Frequently Used",
            SectionKind::Static => "Images",
            SectionKind::Animated => "GIFs",
            SectionKind::All => "Emotes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub label: Option<String>,
    pub rows: Grid<String>,
}

impl Section {
    fn new(kind: SectionKind, names: &[String], options: &ViewOptions) -> Result<Self> {
        // Без разделения на статику/гифки основная секция идёт без заголовка
        let label = (options.show_labels && kind != SectionKind::All).then(|| kind.label().to_string());
        Ok(Self {
            kind,
            label,
            rows: to_grid(names, options.num_cols)?,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Содержимое окна пикера: секции в порядке отображения
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerView {
    pub sections: Vec<Section>,
}

impl PickerView {
    /// Все имена в порядке отображения
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|section| section.rows.iter().flatten())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(Section::len).sum()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

/// Построить пикер: часто используемые (в порядке рейтинга), затем остальные
/// картинки в порядке `images`. Картинка из секции частых в основную не попадает.
pub fn build_view(images: &[ImageAsset], frequents: &[String], options: &ViewOptions) -> Result<PickerView> {
    let mut sections = Vec::new();

    let excluded: HashSet<&str> = if options.show_frequents {
        sections.push(Section::new(SectionKind::Frequent, frequents, options)?);
        frequents.iter().map(String::as_str).collect()
    } else {
        HashSet::new()
    };

    let remaining = images.iter().filter(|image| !excluded.contains(image.name.as_str()));

    if options.separate_gifs {
        let (statics, animated): (Vec<&ImageAsset>, Vec<&ImageAsset>) =
            remaining.partition(|image| image.kind == ImageKind::Static);
        let statics: Vec<String> = statics.into_iter().map(|i| i.name.clone()).collect();
        let animated: Vec<String> = animated.into_iter().map(|i| i.name.clone()).collect();
        sections.push(Section::new(SectionKind::Static, &statics, options)?);
        sections.push(Section::new(SectionKind::Animated, &animated, options)?);
    } else {
        let all: Vec<String> = remaining.map(|i| i.name.clone()).collect();
        sections.push(Section::new(SectionKind::All, &all, options)?);
    }

    Ok(PickerView { sections })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(num_cols: usize) -> ViewOptions {
        ViewOptions {
            num_cols,
            show_labels: true,
            separate_gifs: true,
            show_frequents: true,
        }
    }

    fn assets(names: &[&str]) -> Vec<ImageAsset> {
        names.iter().map(|n| ImageAsset::new(*n)).collect()
    }

    fn strings(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_to_grid_example() {
        let grid = to_grid(&[1, 2, 3, 4, 5], 2).unwrap();
        assert_eq!(grid, vec![vec![1, 2], vec![3, 4], vec![5]]);
    }

    #[test]
    fn test_to_grid_exact_multiple() {
        let grid = to_grid(&[1, 2, 3, 4], 2).unwrap();
        assert_eq!(grid, vec![vec![1, 2], vec![3, 4]]);
    }

    #[test]
    fn test_to_grid_flatten_restores_input() {
        for len in 0..20 {
            let items: Vec<usize> = (0..len).collect();
            for cols in 1..8 {
                let grid = to_grid(&items, cols).unwrap();
                assert!(grid.iter().all(|row| !row.is_empty() && row.len() <= cols));
                let flat: Vec<usize> = grid.into_iter().flatten().collect();
                assert_eq!(flat, items, "len={} cols={}", len, cols);
            }
        }
    }

    #[test]
    fn test_to_grid_zero_columns_rejected() {
        assert!(to_grid(&[1, 2, 3], 0).is_err());
    }

    #[test]
    fn test_view_sections_and_exclusion() {
        let images = assets(&["a.png", "b.gif", "c.png", "d.gif", "e.png"]);
        let frequents = strings(&["d.gif", "a.png"]);
        let view = build_view(&images, &frequents, &options(2)).unwrap();

        let frequent = view.section(SectionKind::Frequent).unwrap();
        assert_eq!(frequent.label.as_deref(), Some("Frequently Used"));
        assert_eq!(frequent.rows, vec![strings(&["d.gif", "a.png"])]);

        let statics = view.section(SectionKind::Static).unwrap();
        assert_eq!(statics.label.as_deref(), Some("Images"));
        assert_eq!(statics.rows, vec![strings(&["c.png", "e.png"])]);

        let animated = view.section(SectionKind::Animated).unwrap();
        assert_eq!(animated.rows, vec![strings(&["b.gif"])]);

        // Каждая картинка ровно один раз
        let mut names: Vec<&str> = view.names().collect();
        names.sort();
        assert_eq!(names, vec!["a.png", "b.gif", "c.png", "d.gif", "e.png"]);
    }

    #[test]
    fn test_view_without_frequents_shows_everything() {
        let images = assets(&["a.png", "b.gif"]);
        let mut opts = options(4);
        opts.show_frequents = false;
        opts.separate_gifs = false;
        let view = build_view(&images, &strings(&["a.png"]), &opts).unwrap();

        assert_eq!(view.sections.len(), 1);
        assert_eq!(view.sections[0].label, None);
        assert_eq!(view.names().collect::<Vec<_>>(), vec!["a.png", "b.gif"]);
    }

    #[test]
    fn test_view_labels_hidden() {
        let images = assets(&["a.png"]);
        let mut opts = options(4);
        opts.show_labels = false;
        let view = build_view(&images, &[], &opts).unwrap();
        assert!(view.sections.iter().all(|s| s.label.is_none()));
        assert_eq!(view.len(), 1);
    }
}
