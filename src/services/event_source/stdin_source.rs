use crate::error::Result;
use crate::events::PickerEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use super::r#trait::{EventSender, EventSourceTrait};

/// Команды построчно из stdin. EOF просто завершает источник.
pub struct StdinCommandSource;

impl StdinCommandSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EventSourceTrait for StdinCommandSource {
    fn name(&self) -> &'static str {
        "StdinCommandSource"
    }

    async fn run(self: Box<Self>, events: EventSender) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            let Some(event) = PickerEvent::from_command(&line) else {
                continue;
            };
            debug!("Команда из stdin: {}", event);
            if events.send(event).is_err() {
                break;
            }
        }

        info!("stdin закрыт, команды больше не принимаются");
        Ok(())
    }
}
