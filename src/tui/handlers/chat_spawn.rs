//! Sends a chat message from a background thread and hands the result back over a channel.

use std::sync::Arc;
use std::sync::mpsc;

use tokio::runtime::Runtime;

use crate::core::relay_client::{ClientError, RelayClient};
use crate::core::thread::ThreadId;

use super::PendingReply;

/// Spawn the request for `text`, sent from `thread`.
pub fn spawn_reply(
    rt: &Arc<Runtime>,
    client: Arc<RelayClient>,
    thread: ThreadId,
    text: String,
) -> PendingReply {
    let (result_tx, result_rx) = mpsc::channel::<Result<String, ClientError>>();
    let rt_clone = Arc::clone(rt);

    std::thread::spawn(move || {
        let result = rt_clone.block_on(client.send(&text));
        let _ = result_tx.send(result);
    });

    PendingReply { thread, result_rx }
}
