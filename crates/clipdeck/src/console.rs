use std::io::BufRead;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, warn};

/// Forward lines from `reader` on a single blocking task.
///
/// The task ends at end of input, on a read error, or once the receiver is
/// dropped and the next `blocking_send` fails.
pub(crate) fn spawn_forwarder<R>(reader: R, tx: mpsc::Sender<String>) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Console read failed");
                    break;
                }
            };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
        debug!("Console forwarder finished");
    })
}
