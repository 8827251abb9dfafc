use crate::error::{PickerError, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tracing::{info, warn};

/// Проверить права доступа к /dev/input (горячие клавиши) и /dev/uinput (вставка)
pub fn check_permissions() -> Result<()> {
    info!("Проверка прав доступа...");

    check_input_devices_access(Path::new("/dev/input"))?;
    check_uinput_access(Path::new("/dev/uinput"))?;
    check_not_root();

    info!("Проверка прав доступа завершена успешно");
    Ok(())
}

fn check_input_devices_access(input_dir: &Path) -> Result<()> {
    if !input_dir.exists() {
        return Err(PickerError::Permission(format!(
            "Директория {:?} не существует",
            input_dir
        )));
    }

    match fs::read_dir(input_dir) {
        Ok(_) => {
            info!("Доступ к {:?} подтвержден", input_dir);
            Ok(())
        }
        Err(e) => Err(PickerError::Permission(format!(
            "Нет доступа к {:?}: {}. Добавьте пользователя в группу 'input'",
            input_dir, e
        ))),
    }
}

fn check_uinput_access(uinput_device: &Path) -> Result<()> {
    if !uinput_device.exists() {
        // Модуль может быть загружен позже, создание устройства упадёт с понятной ошибкой
        warn!("{:?} не существует, возможно модуль uinput не загружен", uinput_device);
        return Ok(());
    }

    let metadata = fs::metadata(uinput_device).map_err(|e| {
        PickerError::Permission(format!(
            "Не удалось проверить права доступа к {:?}: {}",
            uinput_device, e
        ))
    })?;

    // Обычно 660 (группа input/uinput) или 666
    let mode = metadata.permissions().mode();
    if mode & 0o006 == 0 && mode & 0o060 == 0 {
        return Err(PickerError::Permission(format!(
            "Нет прав доступа к {:?}. Добавьте пользователя в группу 'uinput' или 'input'",
            uinput_device
        )));
    }

    info!("Доступ к {:?} подтвержден", uinput_device);
    Ok(())
}

fn check_not_root() {
    match std::env::var("USER") {
        Ok(user) if user == "root" => {
            warn!("⚠️  Приложение запущено от имени root!");
            warn!("   Рекомендуется добавить пользователя в группы 'input' и 'uinput':");
            warn!("   sudo usermod -a -G input,uinput $USER");
            warn!("   sudo modprobe uinput");
        }
        Ok(user) => info!("Приложение запущено от имени пользователя: {}", user),
        Err(_) => warn!("Не удалось определить пользователя"),
    }
}
