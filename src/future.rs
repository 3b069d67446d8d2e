//! Awaiting a [`Task`] from async code.
//!
//! [`Task`] implements [`IntoFuture`], so `task.await` forks it once and yields its
//! [`Settlement`]. The fork happens on the first poll, not when the future is created.
//! No terminal handlers are involved, so the containment rules of
//! [`Task::fork`](crate::Task::fork) do not apply: the settlement is delivered as is.

use std::{
    future::{Future, IntoFuture},
    pin::Pin,
    task::{Context, Poll},
};

use futures::channel::oneshot;

use crate::{settlement::Settlement, settler::Settler, task::Task};

/// Every settler of the execution was dropped without settling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("task was dropped before it settled")]
pub struct Abandoned;

enum State<E, A> {
    Idle(Task<E, A>),
    Waiting(oneshot::Receiver<Settlement<E, A>>),
    Done,
}

/// Future returned by [`Task::into_future`](IntoFuture::into_future).
///
/// ```rust
/// use forked::prelude::*;
/// use futures::executor::block_on;
/// use std::future::IntoFuture;
///
/// let task = Task::<String, u32>::of(20).map(|n| n + 1);
/// let settled = block_on(task.into_future());
/// assert_eq!(settled, Ok(Settlement::Resolved(21)));
/// ```
#[must_use = "futures do nothing unless polled"]
pub struct Settled<E, A> {
    state: State<E, A>,
}

impl<E, A> Future for Settled<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    type Output = Result<Settlement<E, A>, Abandoned>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if let State::Idle(task) = &this.state {
            let task = task.clone();
            let (tx, rx) = oneshot::channel();
            this.state = State::Waiting(rx);
            tracing::trace!(task = ?task, "forking task from async context");
            task.run(Settler::new(move |settlement| {
                // the receiver may already be gone; nothing else wants the value
                let _ = tx.send(settlement);
            }));
        }

        match &mut this.state {
            State::Waiting(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(received) => {
                    this.state = State::Done;
                    Poll::Ready(received.map_err(|_| Abandoned))
                }
                Poll::Pending => Poll::Pending,
            },
            State::Idle(_) | State::Done => panic!("`Settled` polled after completion"),
        }
    }
}

impl<E, A> IntoFuture for Task<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    type Output = Result<Settlement<E, A>, Abandoned>;
    type IntoFuture = Settled<E, A>;

    fn into_future(self) -> Self::IntoFuture {
        Settled {
            state: State::Idle(self),
        }
    }
}
