//! Spies shared by the unit tests.

use std::sync::{Arc, Mutex};

use crate::task::Task;

/// Records every value handed to a pair of terminal handlers.
pub(crate) struct Recorder<E, A> {
    rejected: Arc<Mutex<Vec<E>>>,
    resolved: Arc<Mutex<Vec<A>>>,
}

impl<E, A> Recorder<E, A>
where
    E: Clone + Send + 'static,
    A: Clone + Send + 'static,
{
    pub(crate) fn new() -> Self {
        Recorder {
            rejected: Arc::new(Mutex::new(Vec::new())),
            resolved: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn on_rejected(&self) -> impl FnMut(E) -> Result<(), E> + Send + use<E, A> {
        let rejected = Arc::clone(&self.rejected);
        move |e| {
            rejected.lock().unwrap().push(e);
            Ok(())
        }
    }

    pub(crate) fn on_resolved(&self) -> impl FnOnce(A) -> Result<(), E> + Send + use<E, A> {
        let resolved = Arc::clone(&self.resolved);
        move |a| {
            resolved.lock().unwrap().push(a);
            Ok(())
        }
    }

    pub(crate) fn rejected(&self) -> Vec<E> {
        self.rejected.lock().unwrap().clone()
    }

    pub(crate) fn resolved(&self) -> Vec<A> {
        self.resolved.lock().unwrap().clone()
    }
}

/// Fork `task` once and return every terminal outcome observed synchronously.
pub(crate) fn collect<E, A>(task: Task<E, A>) -> Vec<Result<A, E>>
where
    E: Send + 'static,
    A: Send + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    task.fork(
        {
            let seen = Arc::clone(&seen);
            move |e| {
                seen.lock().unwrap().push(Err(e));
                Ok(())
            }
        },
        {
            let seen = Arc::clone(&seen);
            move |a| {
                seen.lock().unwrap().push(Ok(a));
                Ok(())
            }
        },
    );
    std::mem::take(&mut *seen.lock().unwrap())
}
