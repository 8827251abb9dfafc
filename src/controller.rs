use crate::assets::{self, ImageAsset};
use crate::catalog::LinkCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::events::PickerEvent;
use crate::layout::{self, PickerView};
use crate::services::{Paster, Presenter};
use crate::tracker::UsageTracker;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info};

/// Видимость пикера
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Что делать циклу после обработки события
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
    Kill,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// Ссылка вставлена, счётчик обновлён
    Pasted {
        link: String,
        count: u64,
        layout_dirty: bool,
    },
    /// Имени нет в links.txt: событие пропущено
    MissingLink,
    /// Картинки нет в пикере (нет файла на диске): событие пропущено
    NotInPicker,
}

/// Связывает события выбора со вставкой ссылки и счётчиками использования.
/// Отрисовка и ввод делегируются `Presenter` и источникам событий.
pub struct PickerController {
    config: Arc<Config>,
    catalog: LinkCatalog,
    tracker: Arc<UsageTracker>,
    paster: Box<dyn Paster>,
    presenter: Box<dyn Presenter>,
    image_dir: PathBuf,
    images: Vec<ImageAsset>,
    frequents: Vec<String>,
    view: PickerView,
    visibility: Visibility,
}

impl PickerController {
    pub fn new(
        config: Arc<Config>,
        catalog: LinkCatalog,
        tracker: Arc<UsageTracker>,
        paster: Box<dyn Paster>,
        presenter: Box<dyn Presenter>,
        images: Vec<ImageAsset>,
    ) -> Result<Self> {
        let image_dir = config.paths.image_dir();
        let frequents = tracker.frequent(config.picker.num_frequent);
        let view = layout::build_view(&images, &frequents, &config.view_options())?;
        info!(
            "Пикер построен: {} картинок, {} в часто используемых",
            view.len(),
            frequents.len()
        );

        Ok(Self {
            config,
            catalog,
            tracker,
            paster,
            presenter,
            image_dir,
            images,
            frequents,
            view,
            visibility: Visibility::Hidden,
        })
    }

    /// Единый цикл диспетчеризации: события обрабатываются строго по одному
    pub async fn run(&mut self, events: &mut UnboundedReceiver<PickerEvent>) -> Result<Flow> {
        info!("Цикл событий запущен");
        while let Some(event) = events.recv().await {
            match self.handle(event).await? {
                Flow::Continue => {}
                flow => return Ok(flow),
            }
        }
        info!("Все источники событий завершились");
        Ok(Flow::Exit)
    }

    pub async fn handle(&mut self, event: PickerEvent) -> Result<Flow> {
        debug!("Событие: {} (состояние: {:?})", event, self.visibility);

        match event {
            PickerEvent::Activate => self.toggle(),
            PickerEvent::Show => self.show(),
            PickerEvent::Hide => self.hide(),
            PickerEvent::Select(name) => {
                if let SelectionOutcome::Pasted { link, count, layout_dirty } = self.on_select(&name).await? {
                    debug!("{} -> {} (счётчик {}, перестроение: {})", name, link, count, layout_dirty);
                }
            }
            PickerEvent::Exit => return Ok(Flow::Exit),
            PickerEvent::Kill => return Ok(Flow::Kill),
        }

        Ok(Flow::Continue)
    }

    /// Вставить ссылку выбранной картинки и обновить её счётчик
    pub async fn on_select(&mut self, name: &str) -> Result<SelectionOutcome> {
        self.hide();

        // Счётчики ведутся только для файлов, которые есть на диске
        if !self.images.iter().any(|image| image.name == name) {
            error!("Картинки нет в пикере - {}", name);
            return Ok(SelectionOutcome::NotInPicker);
        }

        let Some(link) = self.catalog.get(name).map(str::to_string) else {
            error!("Ссылка отсутствует - {}", name);
            return Ok(SelectionOutcome::MissingLink);
        };

        info!("Выбрано: {}", name);
        self.paster.paste(&link).await?;

        let count = self.tracker.record(name)?;
        let layout_dirty = self.refresh_frequents()?;

        Ok(SelectionOutcome::Pasted {
            link,
            count,
            layout_dirty,
        })
    }

    /// Пересчитать рейтинг. Любое изменение последовательности (даже только
    /// порядка) перестраивает пикер.
    fn refresh_frequents(&mut self) -> Result<bool> {
        let frequents = self.tracker.frequent(self.config.picker.num_frequent);
        if frequents == self.frequents {
            return Ok(false);
        }

        debug!("Часто используемые изменились: {:?} -> {:?}", self.frequents, frequents);
        self.frequents = frequents;
        self.rebuild_layout()?;
        Ok(true)
    }

    /// Перечитать каталог картинок и построить пикер заново
    fn rebuild_layout(&mut self) -> Result<()> {
        info!("Перестроение пикера...");
        self.images = assets::scan_images(&self.image_dir)?;
        self.view = layout::build_view(&self.images, &self.frequents, &self.config.view_options())?;
        Ok(())
    }

    pub fn toggle(&mut self) {
        match self.visibility {
            Visibility::Hidden => self.show(),
            Visibility::Visible => self.hide(),
        }
    }

    pub fn show(&mut self) {
        self.presenter.show(&self.view);
        self.visibility = Visibility::Visible;
    }

    pub fn hide(&mut self) {
        if self.visibility == Visibility::Visible {
            self.presenter.hide();
        }
        self.visibility = Visibility::Hidden;
    }

    /// Штатное освобождение ресурсов отображения
    pub fn shutdown(&mut self) {
        self.hide();
        self.presenter.close();
        info!("Пикер закрыт");
    }

    #[allow(dead_code)]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[allow(dead_code)]
    pub fn frequents(&self) -> &[String] {
        &self.frequents
    }

    #[allow(dead_code)]
    pub fn view(&self) -> &PickerView {
        &self.view
    }
}
