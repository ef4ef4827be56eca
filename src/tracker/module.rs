use anyhow::Result;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, warn};

use super::{
    commands::{CommandRegistry, SHOW_SUMMARY_COMMAND},
    events::{EditorEvent, HostMessage},
};

#[cfg(test)]
use mockall::automock;

/// Represents a consumer of editor events. Separates the message loop from the session tracker
/// so the loop can be exercised with a mock.
#[cfg_attr(test, automock)]
pub trait EventHandler {
    fn handle_event(&mut self, event: EditorEvent) -> Result<()>;
}

/// Single consumer of the host channel. Editor events go to the handler, command invocations go
/// through the registry. Runs until the feed drops the sender.
pub struct TrackerModule<H> {
    receiver: Receiver<HostMessage>,
    handler: H,
    commands: CommandRegistry<H>,
    summary_on_close: bool,
}

impl<H: EventHandler> TrackerModule<H> {
    pub fn new(
        receiver: Receiver<HostMessage>,
        handler: H,
        commands: CommandRegistry<H>,
        summary_on_close: bool,
    ) -> Self {
        Self {
            receiver,
            handler,
            commands,
            summary_on_close,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        while let Some(message) = self.receiver.recv().await {
            debug!("Processing host message {:?}", message);
            match self.dispatch(message) {
                Ok(_) => {}
                Err(e) => {
                    error!("Error handling host message {e:?}")
                }
            }
        }

        if self.summary_on_close {
            self.commands
                .invoke(SHOW_SUMMARY_COMMAND, &mut self.handler)?;
        }
        self.receiver.close();
        Ok(())
    }

    fn dispatch(&mut self, message: HostMessage) -> Result<()> {
        match message {
            HostMessage::Event(event) => self.handler.handle_event(event),
            HostMessage::Command { name } => {
                if !self.commands.invoke(&name, &mut self.handler)? {
                    warn!("Ignoring unknown command {name}");
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Result};
    use chrono::Utc;
    use mockall::{predicate::eq, Sequence};
    use tokio::sync::mpsc;

    use crate::tracker::{
        commands::{CommandRegistry, HELLO_WORLD_COMMAND, HELLO_WORLD_MESSAGE},
        events::{EditorEvent, HostMessage},
        register_commands,
        session::SessionTracker,
        sink::MockLineSink,
    };

    use super::{MockEventHandler, TrackerModule};

    #[tokio::test]
    async fn test_events_reach_the_handler_in_order() -> Result<()> {
        let saved = EditorEvent::DocumentSaved {
            file: "fileA".into(),
        };
        let focused = EditorEvent::FocusChanged {
            file: Some("fileB".into()),
            at: Utc::now(),
        };

        let mut handler = MockEventHandler::new();
        let mut order = Sequence::new();
        handler
            .expect_handle_event()
            .with(eq(saved.clone()))
            .times(1)
            .in_sequence(&mut order)
            .returning(|_| Ok(()));
        handler
            .expect_handle_event()
            .with(eq(focused.clone()))
            .times(1)
            .in_sequence(&mut order)
            .returning(|_| Ok(()));

        let (sender, receiver) = mpsc::channel(10);
        sender.send(HostMessage::Event(saved)).await?;
        sender.send(HostMessage::Event(focused)).await?;
        drop(sender);

        TrackerModule::new(receiver, handler, CommandRegistry::new(), false)
            .run()
            .await
    }

    #[tokio::test]
    async fn test_handler_error_does_not_stop_the_loop() -> Result<()> {
        let mut handler = MockEventHandler::new();
        let mut order = Sequence::new();
        handler
            .expect_handle_event()
            .times(1)
            .in_sequence(&mut order)
            .returning(|_| Err(anyhow!("sink went away")));
        handler
            .expect_handle_event()
            .times(1)
            .in_sequence(&mut order)
            .returning(|_| Ok(()));

        let (sender, receiver) = mpsc::channel(10);
        for _ in 0..2 {
            sender
                .send(HostMessage::Event(EditorEvent::DocumentSaved {
                    file: "fileA".into(),
                }))
                .await?;
        }
        drop(sender);

        TrackerModule::new(receiver, handler, CommandRegistry::new(), false)
            .run()
            .await
    }

    #[tokio::test]
    async fn test_unknown_command_is_ignored() -> Result<()> {
        let mut handler = MockEventHandler::new();
        handler.expect_handle_event().never();

        let (sender, receiver) = mpsc::channel(10);
        sender
            .send(HostMessage::Command {
                name: "devmirror.doesNotExist".into(),
            })
            .await?;
        drop(sender);

        TrackerModule::new(receiver, handler, CommandRegistry::new(), false)
            .run()
            .await
    }

    #[tokio::test]
    async fn test_hello_command_notifies_through_the_sink() -> Result<()> {
        let mut sink = MockLineSink::new();
        sink.expect_append()
            .with(eq(HELLO_WORLD_MESSAGE))
            .times(1)
            .returning(|_| Ok(()));

        let mut commands = CommandRegistry::new();
        register_commands(&mut commands);

        let (sender, receiver) = mpsc::channel(10);
        sender
            .send(HostMessage::Command {
                name: HELLO_WORLD_COMMAND.into(),
            })
            .await?;
        drop(sender);

        TrackerModule::new(receiver, SessionTracker::new(sink), commands, false)
            .run()
            .await
    }

    #[tokio::test]
    async fn test_summary_runs_when_the_channel_closes() -> Result<()> {
        let mut sink = MockLineSink::new();
        sink.expect_append()
            .with(eq("SESSION SUMMARY"))
            .times(1)
            .returning(|_| Ok(()));

        let mut commands = CommandRegistry::new();
        register_commands(&mut commands);

        let (sender, receiver) = mpsc::channel::<HostMessage>(10);
        drop(sender);

        TrackerModule::new(receiver, SessionTracker::new(sink), commands, true)
            .run()
            .await
    }
}
