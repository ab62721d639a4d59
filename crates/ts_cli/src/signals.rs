use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cancel `cancel` on the first interrupt signal.
///
/// The listener stops by itself once `cancel` is cancelled by anyone else.
pub(crate) fn cancel_on_interrupt(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            () = cancel.cancelled() => {}
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => {
                    info!("Received interrupt signal. Cancelling turn.");
                    cancel.cancel();
                }
                Err(error) => error!(%error, "Unable to listen for interrupt signal."),
            },
        }
    })
}
