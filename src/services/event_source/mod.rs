mod dry_hotkey_listener;
mod held_keys;
mod hotkey_listener;
mod stdin_source;
mod r#trait;

pub use self::r#trait::create_event_sources;
