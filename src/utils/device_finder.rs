use crate::error::{PickerError, Result};
use crate::services::virtual_device::VIRTUAL_DEVICE_NAME;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct DeviceFinder;

impl DeviceFinder {
    /// Клавиатуры для прослушивания горячих клавиш: указанная или все найденные
    pub fn find_keyboard_devices(device_path: &str) -> Result<Vec<PathBuf>> {
        if device_path != "auto" {
            let path = PathBuf::from(device_path);
            return if path.exists() {
                info!("Используется указанное устройство: {:?}", path);
                Ok(vec![path])
            } else {
                PickerError::device_not_found(format!("Указанное устройство не найдено: {:?}", path))
            };
        }

        Self::auto_find_keyboards(Path::new("/dev/input"))
    }

    fn auto_find_keyboards(input_dir: &Path) -> Result<Vec<PathBuf>> {
        info!("Автопоиск клавиатурных устройств в {:?}...", input_dir);

        let entries = fs::read_dir(input_dir)
            .map_err(|e| PickerError::Permission(format!("Нет доступа к {:?}: {}", input_dir, e)))?;

        let mut event_devices = Vec::new();
        for entry in entries {
            let path = entry?.path();
            let is_event = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with("event"));
            if is_event {
                event_devices.push(path);
            }
        }
        event_devices.sort();

        let keyboards: Vec<PathBuf> = event_devices
            .into_iter()
            .filter(|path| Self::is_keyboard_device(path))
            .collect();

        if keyboards.is_empty() {
            return PickerError::device_not_found(
                "Не найдено доступных клавиатурных устройств. \
                 Убедитесь, что пользователь добавлен в группу 'input'",
            );
        }

        info!("Найдено клавиатур: {}", keyboards.len());
        Ok(keyboards)
    }

    fn is_keyboard_device(device_path: &Path) -> bool {
        let device = match evdev::Device::open(device_path) {
            Ok(device) => device,
            Err(e) => {
                debug!("Не удалось открыть устройство {:?}: {}", device_path, e);
                return false;
            }
        };

        let device_name = device.name().unwrap_or("Unknown");
        if !Self::is_keyboard_name(device_name) {
            debug!("Исключаем устройство {:?} ({})", device_path, device_name);
            return false;
        }

        // У настоящей клавиатуры есть буквы, пробел, Enter и много других клавиш
        let has_keys = device.supported_keys().is_some_and(|keys| {
            keys.contains(evdev::KeyCode::KEY_A)
                && keys.contains(evdev::KeyCode::KEY_SPACE)
                && keys.contains(evdev::KeyCode::KEY_ENTER)
                && keys.iter().count() > 20
        });

        if has_keys {
            info!("Устройство {:?} подходит как клавиатура ({})", device_path, device_name);
        }
        has_keys
    }

    /// Мыши, тачпады и собственная виртуальная клавиатура не слушаются
    fn is_keyboard_name(device_name: &str) -> bool {
        if device_name == VIRTUAL_DEVICE_NAME {
            return false;
        }
        let lower = device_name.to_lowercase();
        !["mouse", "deathadder", "touchpad", "trackpoint"]
            .iter()
            .any(|pattern| lower.contains(pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_missing_path() {
        let result = DeviceFinder::find_keyboard_devices("/non/existent/path");
        assert!(matches!(result, Err(PickerError::DeviceNotFound(_))));
    }

    #[test]
    fn test_specific_existing_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        let devices = DeviceFinder::find_keyboard_devices(path).unwrap();
        assert_eq!(devices, vec![file.path().to_path_buf()]);
    }

    #[test]
    fn test_auto_find_without_devices() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mouse0"), b"").unwrap();
        assert!(DeviceFinder::auto_find_keyboards(dir.path()).is_err());
    }

    #[test]
    fn test_keyboard_name_filter() {
        assert!(DeviceFinder::is_keyboard_name("AT Translated Set 2 keyboard"));
        assert!(!DeviceFinder::is_keyboard_name("Razer DeathAdder V2"));
        assert!(!DeviceFinder::is_keyboard_name("SynPS/2 Synaptics TouchPad"));
        assert!(!DeviceFinder::is_keyboard_name(VIRTUAL_DEVICE_NAME));
    }
}
