use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::Instrument;

use crate::mailbox::{self, Postbox};
use crate::scheduler::run_actor;
use crate::{ActorDeadError, Message};

/// Handle to an actor.
///
/// Handles are cheap to clone. The actor stops once every handle is
/// dropped, or when [`Actor::try_kill`] is called.
pub struct Actor<S> {
    postbox: Arc<Postbox<S>>,
}

impl<S: Send + 'static> Actor<S> {
    /// Spawns a new actor with the specified state and an optional label
    /// used in tracing spans.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let (postbox, inbox) = mailbox::channel();
        let postbox = Arc::new(postbox);
        tokio::spawn(
            run_actor(Arc::downgrade(&postbox), state, inbox)
                .instrument(trace_span!("actor", label = label)),
        );
        Self { postbox }
    }

    #[inline]
    pub(crate) fn from_postbox(postbox: Arc<Postbox<S>>) -> Self {
        Self { postbox }
    }

    /// Sends a message to the actor.
    #[inline]
    pub fn send<M: Message<S>>(&self, msg: M) -> Result<(), ActorDeadError> {
        self.postbox.post(msg)
    }

    /// Runs `f` on the actor's state and returns its result.
    ///
    /// `f` is processed in order with the other messages.
    pub async fn query<R, F>(&self, f: F) -> Result<R, ActorDeadError>
    where
        R: Send + 'static,
        F: FnOnce(&mut S, &Actor<S>) -> R + Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Query {
            f: Box::new(f),
            reply_tx,
        })?;
        reply_rx.await.map_err(|_| ActorDeadError)
    }

    /// Attempts to kill the actor.
    ///
    /// The actor is not guaranteed to be killed immediately, but it
    /// will stop handling further messages and quit soon.
    #[inline]
    pub fn try_kill(&self) {
        self.postbox.try_kill();
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            postbox: Arc::clone(&self.postbox),
        }
    }
}

type QueryFn<S, R> = Box<dyn FnOnce(&mut S, &Actor<S>) -> R + Send>;

struct Query<S, R> {
    f: QueryFn<S, R>,
    reply_tx: oneshot::Sender<R>,
}

impl<S: Send + 'static, R: Send + 'static> Message<S> for Query<S, R> {
    #[inline]
    fn handle(self, state: &mut S, handle: &Actor<S>) {
        let value = (self.f)(state, handle);
        // The asker may have given up waiting.
        self.reply_tx.send(value).ok();
    }
}
