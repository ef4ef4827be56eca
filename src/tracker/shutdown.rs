use tokio::select;
use tokio_util::sync::CancellationToken;

/// Detects signals sent to the process. Also ends when the token is cancelled from elsewhere
/// (the host feed cancels it at end of input), so a replay doesn't hang waiting for a signal.
pub async fn watch_shutdown(cancellation: CancellationToken) {
    select! {
        _ = tokio::signal::ctrl_c() => {
            cancellation.cancel();
        },
        _ = cancellation.cancelled() => {},
    };
}
