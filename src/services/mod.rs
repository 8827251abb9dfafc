pub mod event_source;
pub mod notifier;
pub mod paster;
pub mod presenter;
pub mod virtual_device;

pub use event_source::create_event_sources;
pub use notifier::{create_notifier, Notifier};
pub use paster::{create_paster, Paster};
pub use presenter::{Presenter, TerminalPresenter};
pub use virtual_device::VirtualDevice;
