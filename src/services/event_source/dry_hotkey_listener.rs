use crate::error::Result;
use tracing::info;

use super::held_keys::HotkeyBinding;
use super::r#trait::{EventSender, EventSourceTrait};

/// Без доступа к устройствам: только сообщает, какие сочетания были бы активны
pub struct DryRunHotkeyListener {
    bindings: Vec<HotkeyBinding>,
}

impl DryRunHotkeyListener {
    pub fn new(bindings: Vec<HotkeyBinding>) -> Self {
        info!("Инициализация DryRunHotkeyListener");
        Self { bindings }
    }
}

#[async_trait::async_trait]
impl EventSourceTrait for DryRunHotkeyListener {
    fn name(&self) -> &'static str {
        "DryRunHotkeyListener"
    }

    async fn run(self: Box<Self>, _events: EventSender) -> Result<()> {
        info!("Dry-run режим - горячие клавиши не перехватываются");
        for binding in &self.bindings {
            info!("[DRY RUN] {} -> {}", binding.chord, binding.event);
        }
        info!("Используйте команды в stdin: show, hide, toggle, exit, kill или имя картинки");
        Ok(())
    }
}
