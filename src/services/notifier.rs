use crate::error::Result;
use std::collections::HashMap;
use tracing::{info, warn};
use zbus::zvariant::Value;
use zbus::Connection;

const APP_NAME: &str = "pingmote";

/// Уведомления пользователю (готовность, ошибки цикла событий).
/// Ошибки доставки логируются и никогда не прерывают работу.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, summary: &str, body: &str);
}

/// Фабрика: без D-Bus сессии или в dry-run уведомления идут в лог
pub async fn create_notifier(dry_run: bool) -> Box<dyn Notifier> {
    if dry_run {
        return Box::new(LogNotifier);
    }
    match DesktopNotifier::connect().await {
        Ok(notifier) => Box::new(notifier),
        Err(e) => {
            warn!("D-Bus недоступен, уведомления будут только в логе: {}", e);
            Box::new(LogNotifier)
        }
    }
}

/// org.freedesktop.Notifications через сессионную шину
pub struct DesktopNotifier {
    connection: Connection,
}

impl DesktopNotifier {
    pub async fn connect() -> Result<Self> {
        let connection = Connection::session().await?;
        Ok(Self { connection })
    }

    async fn send(&self, summary: &str, body: &str) -> Result<()> {
        let actions: Vec<&str> = Vec::new();
        let hints: HashMap<&str, Value<'_>> = HashMap::new();

        self.connection
            .call_method(
                Some("org.freedesktop.Notifications"),
                "/org/freedesktop/Notifications",
                Some("org.freedesktop.Notifications"),
                "Notify",
                &(APP_NAME, 0u32, "", summary, body, actions, hints, -1i32),
            )
            .await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, summary: &str, body: &str) {
        info!("Уведомление: {} - {}", summary, body);
        if let Err(e) = self.send(summary, body).await {
            warn!("Не удалось отправить уведомление: {}", e);
        }
    }
}

pub struct LogNotifier;

#[async_trait::async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, summary: &str, body: &str) {
        info!("Уведомление: {} - {}", summary, body);
    }
}
