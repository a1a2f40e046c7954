//! Action handlers: UpdateAction dispatch and background task spawning

use tokio::sync::mpsc;
use tracing::{error, warn};

use crate::handler::UpdateAction;
use crate::message::Message;
use crate::reconciler::Reconciler;
use crate::services::LayoutStore;

/// Execute an action by spawning a background task.
///
/// Every task reports back through `msg_tx`; nothing here touches editor
/// state directly.
pub fn handle_action<S>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, reconciler: &Reconciler<S>)
where
    S: LayoutStore + Send + Sync + 'static,
{
    match action {
        UpdateAction::LoadObject { object_key } => {
            spawn_load(object_key, msg_tx, reconciler.clone());
        }

        UpdateAction::SaveLayout { object_key, blocks } => {
            let reconciler = reconciler.clone();
            tokio::spawn(async move {
                let message = match reconciler.save(&object_key, &blocks).await {
                    Ok(blocks) => Message::LayoutSaved { object_key, blocks },
                    Err(e) => Message::LayoutSaveFailed {
                        object_key,
                        error: e.to_string(),
                        fatal: e.is_fatal(),
                    },
                };
                if msg_tx.send(message).await.is_err() {
                    warn!("Editor loop closed before save result was delivered");
                }
            });
        }
    }
}

/// Fetch blocks and metadata concurrently and report the combined result
fn spawn_load<S>(object_key: String, msg_tx: mpsc::Sender<Message>, reconciler: Reconciler<S>)
where
    S: LayoutStore + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let (blocks, metadata) = tokio::join!(
            reconciler.fetch(&object_key),
            reconciler.fetch_metadata(&object_key)
        );

        let message = match (blocks, metadata) {
            (Ok(blocks), Ok(metadata)) => Message::LayoutLoaded {
                object_key,
                blocks,
                metadata,
            },
            (Err(e), _) | (_, Err(e)) => {
                error!("Loading {} failed: {}", object_key, e);
                Message::LayoutLoadFailed {
                    object_key,
                    error: e.to_string(),
                    fatal: e.is_fatal(),
                }
            }
        };

        if msg_tx.send(message).await.is_err() {
            warn!("Editor loop closed before layout was delivered");
        }
    });
}
