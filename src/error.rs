use thiserror::Error;

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ошибка JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Ошибка uinput: {0}")]
    Uinput(#[from] uinput::Error),

    #[error("Ошибка буфера обмена: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("Ошибка D-Bus: {0}")]
    DBus(#[from] zbus::Error),

    #[error("Устройство не найдено: {0}")]
    DeviceNotFound(String),

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Неверная раскладка: {0}")]
    InvalidLayout(String),

    #[error("Неверная горячая клавиша: {0}")]
    InvalidHotkey(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl PickerError {
    pub fn device_not_found<T>(msg: impl Into<String>) -> Result<T> {
        Err(PickerError::DeviceNotFound(msg.into()))
    }
}

pub type Result<T> = std::result::Result<T, PickerError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! picker_error {
    (device_not_found, $($arg:tt)*) => {
        $crate::error::PickerError::DeviceNotFound(format!($($arg)*))
    };
    (permission, $($arg:tt)*) => {
        $crate::error::PickerError::Permission(format!($($arg)*))
    };
    (invalid_layout, $($arg:tt)*) => {
        $crate::error::PickerError::InvalidLayout(format!($($arg)*))
    };
    (invalid_hotkey, $($arg:tt)*) => {
        $crate::error::PickerError::InvalidHotkey(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::PickerError::Internal(format!($($arg)*))
    };
}
