pub mod char_to_evdev_code;
pub mod key_name_to_evdev_code;

pub use char_to_evdev_code::{CharToEvdevCode, Keystroke};
pub use key_name_to_evdev_code::KeyNameToEvdevCode;
