use std::sync::Weak;

use crate::Actor;
use crate::mailbox::{Inbox, Postbox};

pub async fn run_actor<S: Send + 'static>(
    postbox: Weak<Postbox<S>>,
    mut state: S,
    mut inbox: Inbox<S>,
) {
    debug!("started");
    while let Some(envelope) = inbox.recv().await {
        // Spawned tasks may still deliver after the last handle is gone.
        let Some(postbox) = postbox.upgrade() else {
            debug!("no handle left, dropping {}", envelope.kind());
            break;
        };
        let handle = Actor::from_postbox(postbox);
        trace_span!("proc msg", kind = envelope.kind())
            .in_scope(|| envelope.open(&mut state, &handle));
    }
    debug!("will terminate");
}
