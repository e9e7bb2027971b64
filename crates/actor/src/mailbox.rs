use std::any;

use tokio::select;
use tokio::sync::{mpsc, watch};

use crate::{Actor, ActorDeadError};

/// A message that an actor can handle.
///
/// Handlers are synchronous: everything a handler does to the state is
/// observed by the next message as a whole. A handler that needs to wait
/// spawns a task, which reports back by sending another message. To read
/// the state from outside, prefer [`Actor::query`] over a message that
/// carries its own reply channel.
pub trait Message<S>: Send + 'static {
    /// Handles the message with mutable access to the actor's state.
    fn handle(self, state: &mut S, handle: &Actor<S>);
}

type Deliver<S> = Box<dyn FnOnce(&mut S, &Actor<S>) + Send>;

/// A type-erased message on its way to the actor.
pub struct Envelope<S> {
    kind: &'static str,
    deliver: Deliver<S>,
}

impl<S: 'static> Envelope<S> {
    pub fn new<M: Message<S>>(msg: M) -> Self {
        Self {
            kind: any::type_name::<M>(),
            deliver: Box::new(move |state, handle| msg.handle(state, handle)),
        }
    }

    /// Type name of the wrapped message.
    #[inline]
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    #[inline]
    pub fn open(self, state: &mut S, handle: &Actor<S>) {
        (self.deliver)(state, handle)
    }
}

/// Sending half, shared by every [`Actor`] handle.
pub struct Postbox<S> {
    msg_tx: mpsc::UnboundedSender<Envelope<S>>,
    kill_tx: watch::Sender<bool>,
}

/// Receiving half, owned by the actor task.
pub struct Inbox<S> {
    msg_rx: mpsc::UnboundedReceiver<Envelope<S>>,
    kill_rx: watch::Receiver<bool>,
}

pub fn channel<S>() -> (Postbox<S>, Inbox<S>) {
    let (msg_tx, msg_rx) = mpsc::unbounded_channel();
    let (kill_tx, kill_rx) = watch::channel(false);
    (Postbox { msg_tx, kill_tx }, Inbox { msg_rx, kill_rx })
}

impl<S: 'static> Postbox<S> {
    #[inline]
    pub fn post<M: Message<S>>(&self, msg: M) -> Result<(), ActorDeadError> {
        self.msg_tx
            .send(Envelope::new(msg))
            .map_err(|_| ActorDeadError)
    }

    #[inline]
    pub fn try_kill(&self) {
        self.kill_tx.send(true).ok();
    }
}

impl<S> Inbox<S> {
    /// Waits for the next message.
    ///
    /// Returns `None` once the actor is killed or every sender is gone.
    /// A pending kill wins over queued messages.
    pub async fn recv(&mut self) -> Option<Envelope<S>> {
        select! {
            biased;

            _ = self.kill_rx.changed() => None,
            envelope = self.msg_rx.recv() => envelope,
        }
    }
}
