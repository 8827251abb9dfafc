use crate::error::{PickerError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Тип картинки: png считается статичной, всё остальное - анимацией
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKind {
    Static,
    Animated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub name: String,
    pub kind: ImageKind,
}

impl ImageAsset {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let kind = match Path::new(&name).extension().and_then(|ext| ext.to_str()) {
            Some("png") => ImageKind::Static,
            _ => ImageKind::Animated,
        };
        Self { name, kind }
    }
}

/// Просканировать каталог с уменьшенными картинками. Результат отсортирован по имени.
/// Скрытые файлы и подкаталоги пропускаются.
pub fn scan_images(dir: &Path) -> Result<Vec<ImageAsset>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        PickerError::Io(std::io::Error::new(
            e.kind(),
            format!("Не удалось прочитать каталог картинок {:?}: {}", dir, e),
        ))
    })?;

    let mut images = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            debug!("Пропускаем файл с не-UTF-8 именем: {:?}", entry.path());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        images.push(ImageAsset::new(name));
    }

    images.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Найдено {} картинок в {:?}", images.len(), dir);
    Ok(images)
}

/// Множество имён файлов, присутствующих на диске
pub fn present_names(images: &[ImageAsset]) -> HashSet<String> {
    images.iter().map(|image| image.name.clone()).collect()
}
