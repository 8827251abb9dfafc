use crate::config::Config;
use crate::error::Result;
use crate::events::{Chord, PickerEvent};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

use super::held_keys::HotkeyBinding;

pub type EventSender = UnboundedSender<PickerEvent>;

/// Источник событий пикера. Все источники пишут в один канал,
/// который читает единственный цикл диспетчеризации.
#[async_trait::async_trait]
pub trait EventSourceTrait {
    fn name(&self) -> &'static str;

    /// Работает, пока есть события или пока канал не закрыт
    async fn run(self: Box<Self>, events: EventSender) -> Result<()>;
}

/// Сочетания из конфигурации
pub fn hotkey_bindings(config: &Config) -> Result<Vec<HotkeyBinding>> {
    Ok(vec![
        HotkeyBinding::new(Chord::parse(&config.hotkeys.activate)?, PickerEvent::Activate),
        HotkeyBinding::new(Chord::parse(&config.hotkeys.kill)?, PickerEvent::Kill),
    ])
}

/// Factory function: горячие клавиши (или их эмуляция в dry-run) плюс команды из stdin
pub fn create_event_sources(
    config: Arc<Config>,
    dry_run: bool,
) -> Result<Vec<Box<dyn EventSourceTrait + Send>>> {
    let bindings = hotkey_bindings(&config)?;

    let hotkeys: Box<dyn EventSourceTrait + Send> = if dry_run {
        Box::new(super::dry_hotkey_listener::DryRunHotkeyListener::new(bindings))
    } else {
        Box::new(super::hotkey_listener::RealHotkeyListener::new(
            &config.input.device_path,
            bindings,
        )?)
    };

    Ok(vec![hotkeys, Box::new(super::stdin_source::StdinCommandSource::new())])
}
