use anyhow::Result;
use tokio::{io::AsyncBufRead, sync::mpsc};
use tokio_util::sync::CancellationToken;
use tracing::error;

use crate::{host::HostFeed, utils::clock::Clock};

pub mod commands;
pub mod events;
pub mod module;
pub mod session;
pub mod shutdown;
pub mod sink;

use commands::{
    CommandRegistrar, CommandRegistry, HELLO_WORLD_COMMAND, HELLO_WORLD_MESSAGE,
    SHOW_SUMMARY_COMMAND,
};
use events::HostMessage;
use module::TrackerModule;
use session::SessionTracker;
use sink::LineSink;

const CHANNEL_CAPACITY: usize = 10;

/// Represents the starting point for a tracking session: host feed on one side, tracker module
/// on the other, joined through a bounded channel. Returns once the input ends or the process
/// is interrupted.
pub async fn run_session<R, S>(
    input: R,
    sink: S,
    clock: impl Clock,
    summary_on_close: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    S: LineSink,
{
    let (sender, receiver) = mpsc::channel::<HostMessage>(CHANNEL_CAPACITY);
    let shutdown_token = CancellationToken::new();

    let feed = HostFeed::new(input, sender, shutdown_token.clone(), Box::new(clock));
    let module = create_module(receiver, sink, summary_on_close)?;

    let (_, feed_result, module_result) = tokio::join!(
        shutdown::watch_shutdown(shutdown_token.clone()),
        feed.run(),
        module.run(),
    );

    if let Err(feed_result) = feed_result {
        error!("Host feed got an error {:?}", feed_result);
    }

    if let Err(module_result) = module_result {
        error!("Tracker module got an error {:?}", module_result);
    }

    Ok(())
}

fn create_module<S: LineSink>(
    receiver: mpsc::Receiver<HostMessage>,
    mut sink: S,
    summary_on_close: bool,
) -> Result<TrackerModule<SessionTracker<S>>> {
    sink.append("Tracking started")?;
    let mut commands = CommandRegistry::new();
    register_commands(&mut commands);
    Ok(TrackerModule::new(
        receiver,
        SessionTracker::new(sink),
        commands,
        summary_on_close,
    ))
}

/// Registers the host-invocable command set.
pub fn register_commands<S: LineSink>(registry: &mut impl CommandRegistrar<SessionTracker<S>>) {
    registry.register(
        SHOW_SUMMARY_COMMAND,
        Box::new(|tracker| tracker.emit_summary()),
    );
    registry.register(
        HELLO_WORLD_COMMAND,
        Box::new(|tracker| tracker.notify(HELLO_WORLD_MESSAGE)),
    );
}
