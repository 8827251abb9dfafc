use crate::error::{PickerError, Result};
use crate::events::{KeyCode, KeyState};
use crate::mappings::CharToEvdevCode;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

/// Имя виртуальной клавиатуры; слушатель горячих клавиш её пропускает
pub const VIRTUAL_DEVICE_NAME: &str = "Pingmote Virtual Keyboard";

const EV_SYN: i32 = 0;
const EV_KEY: i32 = 1;

/// Виртуальная клавиатура uinput для инъекции вставки (Ctrl+V, Enter) и
/// посимвольного ввода ссылок.
pub struct VirtualDevice {
    device: Mutex<Option<uinput::Device>>,
    device_name: String,
    dry_run: bool,
}

impl VirtualDevice {
    pub fn new(device_name: &str, dry_run: bool) -> Result<Self> {
        info!("Инициализация VirtualDevice '{}' (dry_run: {})", device_name, dry_run);

        let device = if dry_run {
            None
        } else {
            Some(Self::create_virtual_device(device_name)?)
        };

        Ok(Self {
            device: Mutex::new(device),
            device_name: device_name.to_string(),
            dry_run,
        })
    }

    fn create_virtual_device(device_name: &str) -> Result<uinput::Device> {
        info!("Создание виртуального устройства uinput '{}'", device_name);

        let virtual_device = uinput::default()?
            .name(device_name)?
            .event(uinput::event::Keyboard::All)?
            .create()
            .map_err(|e| {
                PickerError::Internal(format!(
                    "Не удалось создать виртуальное устройство '{}': {}",
                    device_name, e
                ))
            })?;

        info!("Виртуальное устройство '{}' создано успешно", device_name);
        Ok(virtual_device)
    }

    /// Отправить одно событие клавиши с синхронизацией
    pub fn send_key(&self, key_code: KeyCode, state: KeyState) -> Result<()> {
        if self.dry_run {
            info!("[DRY RUN] Виртуальное событие: {} {:?}", key_code, state);
            return Ok(());
        }

        let mut guard = self.device.lock();
        let device = guard
            .as_mut()
            .ok_or_else(|| PickerError::Internal("Виртуальное устройство недоступно".to_string()))?;

        let keycode = key_code.value() as i32;
        device.write(EV_KEY, keycode, state.value()).map_err(|e| {
            PickerError::Internal(format!("Не удалось отправить событие клавиши {}: {}", key_code, e))
        })?;
        device
            .write(EV_SYN, 0, 0)
            .map_err(|e| PickerError::Internal(format!("Не удалось синхронизировать события: {}", e)))?;

        debug!("Виртуальное событие {} {:?} отправлено", key_code, state);
        Ok(())
    }

    /// Нажать и отпустить клавишу
    pub fn tap(&self, key_code: KeyCode) -> Result<()> {
        self.send_key(key_code, KeyState::Pressed)?;
        self.send_key(key_code, KeyState::Released)
    }

    /// Сочетание: модификаторы зажимаются по порядку и отпускаются в обратном
    pub fn chord(&self, modifiers: &[KeyCode], key_code: KeyCode) -> Result<()> {
        for &modifier in modifiers {
            self.send_key(modifier, KeyState::Pressed)?;
        }
        let result = self.tap(key_code);
        for &modifier in modifiers.iter().rev() {
            if let Err(e) = self.send_key(modifier, KeyState::Released) {
                warn!("Не удалось отпустить модификатор {}: {}", modifier, e);
            }
        }
        result
    }

    /// Напечатать текст посимвольно. Символы вне раскладки US не поддерживаются.
    pub fn type_text(&self, text: &str) -> Result<()> {
        // Проверяем заранее, чтобы не напечатать половину ссылки
        let strokes = text
            .chars()
            .map(|ch| {
                CharToEvdevCode::translate(ch).ok_or_else(|| {
                    PickerError::Internal(format!("Символ '{}' нельзя ввести с клавиатуры", ch))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for stroke in strokes {
            let key = KeyCode(stroke.code);
            if stroke.shift {
                self.chord(&[KeyCode::LEFTSHIFT], key)?;
            } else {
                self.tap(key)?;
            }
        }
        Ok(())
    }

    #[allow(dead_code)]
    pub fn name(&self) -> &str {
        &self.device_name
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        if !self.dry_run {
            info!("Закрытие виртуального устройства '{}'", self.device_name);
        }
    }
}
