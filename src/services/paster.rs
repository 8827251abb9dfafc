use crate::config::Config;
use crate::error::Result;
use crate::events::KeyCode;
use crate::services::VirtualDevice;
use arboard::Clipboard;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

/// Вставка выбранной ссылки в активное приложение
#[async_trait::async_trait]
pub trait Paster: Send + Sync {
    async fn paste(&self, link: &str) -> Result<()>;
}

/// Фабрика: в dry-run режиме ссылки только логируются
pub fn create_paster(
    config: Arc<Config>,
    virtual_device: Arc<VirtualDevice>,
    dry_run: bool,
) -> Result<Box<dyn Paster>> {
    if dry_run {
        Ok(Box::new(DryRunPaster))
    } else {
        Ok(Box::new(KeyboardPaster::new(config, virtual_device)))
    }
}

/// Копирование в буфер обмена + Ctrl+V (+ Enter) через виртуальную клавиатуру
pub struct KeyboardPaster {
    config: Arc<Config>,
    virtual_device: Arc<VirtualDevice>,
    // Создаётся при первом копировании и живёт до конца процесса:
    // под X11 содержимое буфера существует, пока жив его владелец
    clipboard: Mutex<Option<Clipboard>>,
}

impl KeyboardPaster {
    pub fn new(config: Arc<Config>, virtual_device: Arc<VirtualDevice>) -> Self {
        Self {
            config,
            virtual_device,
            clipboard: Mutex::new(None),
        }
    }

    fn copy(&self, link: &str) -> Result<()> {
        let mut guard = self.clipboard.lock();
        if guard.is_none() {
            debug!("Подключение к буферу обмена");
            *guard = Some(Clipboard::new()?);
        }
        if let Some(clipboard) = guard.as_mut() {
            clipboard.set_text(link)?;
        }
        Ok(())
    }

    async fn pause(&self) {
        if self.config.paste.sleep_time_ms > 0 {
            sleep(Duration::from_millis(self.config.paste.sleep_time_ms)).await;
        }
    }
}

#[async_trait::async_trait]
impl Paster for KeyboardPaster {
    async fn paste(&self, link: &str) -> Result<()> {
        let paste = &self.config.paste;

        if !paste.auto_paste {
            self.copy(link)?;
            info!("Ссылка скопирована в буфер обмена");
            return Ok(());
        }

        if paste.preserve_clipboard {
            self.virtual_device.type_text(link)?;
        } else {
            self.copy(link)?;
            self.pause().await;
            self.virtual_device.chord(&[KeyCode::LEFTCTRL], KeyCode::V)?;
        }

        if paste.auto_enter {
            self.pause().await;
            self.virtual_device.tap(KeyCode::ENTER)?;
        }

        info!("Ссылка вставлена");
        Ok(())
    }
}

pub struct DryRunPaster;

#[async_trait::async_trait]
impl Paster for DryRunPaster {
    async fn paste(&self, link: &str) -> Result<()> {
        info!("[DRY RUN] Вставка ссылки: {}", link);
        Ok(())
    }
}
