//! Message processing
//!
//! Runs the TEA update function to a fixed point and hands every resulting
//! action to the async side.

use tokio::sync::mpsc;

use crate::actions::handle_action;
use crate::handler;
use crate::message::Message;
use crate::reconciler::Reconciler;
use crate::services::LayoutStore;
use crate::state::EditorState;

/// Process a message through the TEA update function
pub fn process_message<S>(
    state: &mut EditorState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    reconciler: &Reconciler<S>,
) where
    S: LayoutStore + Send + Sync + 'static,
{
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), reconciler);
        }

        // Continue with follow-up message
        msg = result.message;
    }
}
