use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::events::Chord;
use crate::layout::ViewOptions;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub hotkeys: HotkeyConfig,
    pub picker: PickerConfig,
    pub paste: PasteConfig,
    pub paths: PathsConfig,
    pub input: InputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HotkeyConfig {
    /// Показать/скрыть пикер
    pub activate: String,
    /// Аварийное завершение процесса
    pub kill: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickerConfig {
    /// Максимум картинок в строке
    pub num_cols: usize,
    /// Максимум картинок в секции часто используемых
    pub num_frequent: usize,
    pub show_labels: bool,
    pub separate_gifs: bool,
    pub show_frequents: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PasteConfig {
    /// Вставлять ссылку сразу после выбора (иначе только копировать)
    pub auto_paste: bool,
    /// Нажимать Enter после вставки
    pub auto_enter: bool,
    /// Печатать ссылку посимвольно, не трогая буфер обмена
    pub preserve_clipboard: bool,
    pub sleep_time_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    pub assets_dir: PathBuf,
    pub images: PathBuf,
    pub links: PathBuf,
    pub frequencies: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// "auto" - слушать все клавиатуры, иначе путь к устройству
    pub device_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            hotkeys: HotkeyConfig {
                activate: "ctrl+alt+shift+q".to_string(),
                kill: "alt+shift+k".to_string(),
            },
            picker: PickerConfig {
                num_cols: 12,
                num_frequent: 12,
                show_labels: true,
                separate_gifs: true,
                show_frequents: true,
            },
            paste: PasteConfig {
                auto_paste: true,
                auto_enter: true,
                preserve_clipboard: false,
                sleep_time_ms: 0,
            },
            paths: PathsConfig {
                assets_dir: PathBuf::from("assets"),
                images: PathBuf::from("resized"),
                links: PathBuf::from("links.txt"),
                frequencies: PathBuf::from("frequencies.json"),
            },
            input: InputConfig {
                device_path: "auto".to_string(),
            },
        }
    }
}

impl PathsConfig {
    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.assets_dir.join(path)
        }
    }

    pub fn image_dir(&self) -> PathBuf {
        self.resolve(&self.images)
    }

    pub fn links_file(&self) -> PathBuf {
        self.resolve(&self.links)
    }

    pub fn frequencies_file(&self) -> PathBuf {
        self.resolve(&self.frequencies)
    }
}

impl Config {
    /// Загрузка: значения по умолчанию <- TOML файл <- переменные окружения PINGMOTE_*
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("PINGMOTE_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        if self.picker.num_cols == 0 {
            anyhow::bail!("picker.num_cols должно быть больше 0");
        }

        // Разбор сочетаний выполняется заранее, чтобы ошибка всплыла при старте
        for (name, chord) in [("activate", &self.hotkeys.activate), ("kill", &self.hotkeys.kill)] {
            Chord::parse(chord)
                .with_context(|| format!("Неверное сочетание hotkeys.{}: '{}'", name, chord))?;
        }

        Ok(())
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            num_cols: self.picker.num_cols,
            show_labels: self.picker.show_labels,
            separate_gifs: self.picker.separate_gifs,
            show_frequents: self.picker.show_frequents,
        }
    }

    /// Переопределить каталог ассетов (флаг --assets)
    pub fn with_assets_dir(mut self, assets_dir: impl Into<PathBuf>) -> Self {
        self.paths.assets_dir = assets_dir.into();
        self
    }
}
