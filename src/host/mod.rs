//! Contains logic for receiving events from the editor side. [HostFeed] is the main artifact
//! of this module, bridging a line-oriented reader and the tracker channel.

pub mod wire;

use anyhow::Result;
use futures::StreamExt;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    sync::mpsc,
};
use tokio_stream::wrappers::LinesStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info_span, warn, Instrument};

use crate::{tracker::events::HostMessage, utils::clock::Clock};

use wire::HostNotification;

/// Decodes host notifications line by line and forwards them into the tracker channel. Cancels
/// the shared token at end of input so the rest of the pipeline winds down with it.
pub struct HostFeed<R> {
    input: R,
    next: mpsc::Sender<HostMessage>,
    shutdown: CancellationToken,
    time_provider: Box<dyn Clock>,
}

impl<R: AsyncBufRead + Unpin> HostFeed<R> {
    pub fn new(
        input: R,
        next: mpsc::Sender<HostMessage>,
        shutdown: CancellationToken,
        time_provider: Box<dyn Clock>,
    ) -> Self {
        Self {
            input,
            next,
            shutdown,
            time_provider,
        }
    }

    /// Executes the feed event loop.
    pub async fn run(self) -> Result<()> {
        let Self {
            input,
            next,
            shutdown,
            time_provider,
        } = self;
        let mut lines = LinesStream::new(input.lines());

        loop {
            let line = tokio::select! {
                // Cancelation means we stop reading. Dropping the sender consequently stops the
                // tracker module.
                _ = shutdown.cancelled() => return Ok(()),
                line = lines.next() => line,
            };

            match line {
                Some(Ok(line)) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let notification = match serde_json::from_str::<HostNotification>(&line) {
                        Ok(v) => v,
                        Err(e) => {
                            // The shim is outside our control. Skip what can't be read.
                            warn!("Ignoring illegal host line {line}: {e}");
                            continue;
                        }
                    };
                    let message = notification.into_message(time_provider.as_ref());
                    let span = info_span!("Forwarding host message");
                    debug!("Sending message {:?}", message);
                    next.send(message)
                        .instrument(span)
                        .await
                        .inspect_err(|e| error!("Unexpected error during sending {e:?}"))?;
                }
                Some(Err(e)) => return Err(e.into()),
                None => {
                    shutdown.cancel();
                    return Ok(());
                }
            }
        }
    }
}
