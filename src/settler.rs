//! The settle-once cell behind every task execution.
//!
//! A [`Settler`] is what an executor receives: the `resolve`/`reject` pair for one
//! execution. Clones share the same cell, so a settler can be handed to a timer or another
//! thread while the executor returns.

use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use parking_lot::Mutex;

use crate::settlement::Settlement;

type OnSettled<E, A> = Box<dyn FnOnce(Settlement<E, A>) + Send>;

struct Cell<E, A> {
    settled: AtomicBool,
    on_settled: Mutex<Option<OnSettled<E, A>>>,
}

/// Settlement callbacks for a single execution of a task.
///
/// Only the first call to [`resolve`](Settler::resolve) or [`reject`](Settler::reject), across
/// every clone, has any effect. Later calls are ignored and return `false`.
///
/// ```rust
/// use forked::{Settlement, Settler};
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let settler = Settler::new({
///     let seen = Arc::clone(&seen);
///     move |s: Settlement<String, i32>| seen.lock().unwrap().push(s)
/// });
///
/// assert!(settler.resolve(1));
/// assert!(!settler.reject("late".to_string()));
/// assert_eq!(*seen.lock().unwrap(), vec![Settlement::Resolved(1)]);
/// ```
pub struct Settler<E, A> {
    cell: Arc<Cell<E, A>>,
}

impl<E, A> Settler<E, A> {
    /// Create a settler that hands the first settlement to `on_settled`.
    pub fn new<F>(on_settled: F) -> Self
    where
        F: FnOnce(Settlement<E, A>) + Send + 'static,
    {
        Settler {
            cell: Arc::new(Cell {
                settled: AtomicBool::new(false),
                on_settled: Mutex::new(Some(Box::new(on_settled))),
            }),
        }
    }

    /// Settle with a resolution. Returns `false` if this execution already settled.
    pub fn resolve(&self, value: A) -> bool {
        self.settle(Settlement::Resolved(value))
    }

    /// Settle with a rejection. Returns `false` if this execution already settled.
    pub fn reject(&self, error: E) -> bool {
        self.settle(Settlement::Rejected(error))
    }

    /// Settle with either branch. Returns `false` if this execution already settled.
    pub fn settle(&self, settlement: Settlement<E, A>) -> bool {
        if self.cell.settled.swap(true, Ordering::AcqRel) {
            tracing::trace!(
                branch = branch_name(&settlement),
                "ignoring settlement of an already settled task"
            );
            return false;
        }

        // the lock is released before the callback runs; downstream stages may unwind
        let on_settled = self.cell.on_settled.lock().take();
        if let Some(f) = on_settled {
            f(settlement);
        }
        true
    }

    /// Whether a settlement has already been accepted.
    pub fn is_settled(&self) -> bool {
        self.cell.settled.load(Ordering::Acquire)
    }
}

impl<E, A> Clone for Settler<E, A> {
    fn clone(&self) -> Self {
        Settler {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<E, A> fmt::Debug for Settler<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settler")
            .field("settled", &self.is_settled())
            .finish()
    }
}

fn branch_name<E, A>(settlement: &Settlement<E, A>) -> &'static str {
    match settlement {
        Settlement::Rejected(_) => "rejected",
        Settlement::Resolved(_) => "resolved",
    }
}
