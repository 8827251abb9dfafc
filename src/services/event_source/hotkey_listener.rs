use crate::debug_if_enabled;
use crate::error::{PickerError, Result};
use crate::events::{KeyCode, KeyEvent, KeyState, PickerEvent};
use crate::utils::DeviceFinder;
use evdev::{Device, EventType};
use std::path::PathBuf;
use std::thread;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::held_keys::{HeldKeys, HotkeyBinding};
use super::r#trait::{EventSender, EventSourceTrait};

/// Глобальные горячие клавиши через evdev. Устройства не захватываются
/// эксклюзивно: ввод продолжает доходить до остальных приложений.
pub struct RealHotkeyListener {
    devices: Vec<(PathBuf, Device)>,
    bindings: Vec<HotkeyBinding>,
}

impl RealHotkeyListener {
    pub fn new(device_path: &str, bindings: Vec<HotkeyBinding>) -> Result<Self> {
        info!("Инициализация RealHotkeyListener");

        let mut devices = Vec::new();
        for path in DeviceFinder::find_keyboard_devices(device_path)? {
            match Device::open(&path) {
                Ok(device) => {
                    info!(
                        "Слушаем устройство {:?} ({})",
                        path,
                        device.name().unwrap_or("Unknown")
                    );
                    devices.push((path, device));
                }
                Err(e) => warn!("Не удалось открыть устройство {:?}: {}", path, e),
            }
        }

        if devices.is_empty() {
            return PickerError::device_not_found(
                "Ни одно клавиатурное устройство не удалось открыть. \
                 Убедитесь, что пользователь добавлен в группу 'input'",
            );
        }

        Ok(Self { devices, bindings })
    }
}

/// Блокирующее чтение одного устройства. Выполняется в отдельном потоке.
fn listen_device(mut device: Device, bindings: Vec<HotkeyBinding>, events: EventSender) -> Result<()> {
    let device_name = device.name().unwrap_or("Unknown").to_string();
    let mut held = HeldKeys::new();

    loop {
        let batch: Vec<evdev::InputEvent> = device.fetch_events()?.collect();

        for input in batch {
            if input.event_type() != EventType::KEY {
                continue;
            }
            let Some(state) = KeyState::from_value(input.value()) else {
                continue;
            };

            let key_event = KeyEvent::new(KeyCode(input.code()), state, device_name.as_str());
            debug_if_enabled!("Событие клавиши: {}", key_event);

            for picker_event in held.update(&key_event, &bindings) {
                if picker_event == PickerEvent::Kill {
                    // Выход прямо из потока слушателя: срабатывает даже при зависшем цикле событий
                    warn!("Сочетание аварийного завершения ({}), выход", device_name);
                    std::process::exit(1);
                }

                info!("Горячая клавиша: {}", picker_event);
                if events.send(picker_event).is_err() {
                    return Ok(());
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl EventSourceTrait for RealHotkeyListener {
    fn name(&self) -> &'static str {
        "RealHotkeyListener"
    }

    async fn run(self: Box<Self>, events: EventSender) -> Result<()> {
        let Self { devices, bindings } = *self;
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<(PathBuf, Result<()>)>();

        // Потоки не присоединяются: при выходе из процесса они просто завершаются
        for (path, device) in devices {
            let bindings = bindings.clone();
            let events = events.clone();
            let done_tx = done_tx.clone();
            let thread_path = path.clone();

            thread::Builder::new()
                .name(format!("hotkeys-{}", path.display()))
                .spawn(move || {
                    let result = listen_device(device, bindings, events);
                    let _ = done_tx.send((thread_path, result));
                })?;
        }
        drop(done_tx);

        info!("RealHotkeyListener запущен");

        while let Some((path, result)) = done_rx.recv().await {
            match result {
                Ok(()) => info!("Чтение {:?} завершено", path),
                Err(e) => error!("Ошибка чтения событий {:?}: {}", path, e),
            }
        }

        Ok(())
    }
}
