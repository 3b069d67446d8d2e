//! The [`Task`] type and the [`Pipeline`] trait it is built from.
//!
//! A [`Task<E, A>`] is a description of a computation that settles exactly once, either
//! rejecting with `E` or resolving with `A`. Building a task never runs anything: the
//! constructors and combinators only allocate pipeline nodes. Work happens when the task is
//! [forked](Task::fork), and happens again on every fork since results are not memoized.
//!
//! # Examples
//!
//! ```rust
//! use forked::prelude::*;
//! use std::sync::{Arc, Mutex};
//!
//! let seen = Arc::new(Mutex::new(None));
//! let task = Task::<String, u32>::of(20)
//!     .map(|n| n + 1)
//!     .chain(|n| Task::of(n * 2));
//!
//! task.fork(
//!     |_err| Ok(()),
//!     {
//!         let seen = Arc::clone(&seen);
//!         move |n| {
//!             *seen.lock().unwrap() = Some(n);
//!             Ok(())
//!         }
//!     },
//! );
//! assert_eq!(*seen.lock().unwrap(), Some(42));
//! ```

use std::{fmt, sync::Arc};

use crate::{
    build::{FromExecutor, Of, Reject},
    compose::{BiMap, Branch, Chain, Map, OrElse},
    fork,
    settler::Settler,
};

/// A node in a task's pipeline.
///
/// `run` is the interpreter step: it must eventually settle `settler` at most once (a
/// [`Settler`] ignores anything after the first settlement anyway), either synchronously or by
/// handing the settler to something that settles it later.
///
/// Implement this to plug a custom source or stage into a [`Task`] via
/// [`Task::from_pipeline`].
pub trait Pipeline<E, A>: Send + Sync {
    /// Start one execution, delivering its outcome to `settler`.
    fn run(&self, settler: Settler<E, A>);
}

/// A lazy computation that settles exactly once to `Rejected(E)` or `Resolved(A)`.
///
/// Cloning is cheap and shares the description, never a result.
pub struct Task<E, A> {
    pipeline: Arc<dyn Pipeline<E, A>>,
}

impl<E, A> Task<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Create a task from an executor.
    ///
    /// The executor runs once per fork and receives that execution's [`Settler`]. It may settle
    /// synchronously or move the settler elsewhere to settle later. Returning `Err(e)` rejects
    /// with `e`, unless the executor already settled, in which case the error is ignored.
    ///
    /// ```rust
    /// use forked::prelude::*;
    /// use std::sync::{Arc, Mutex};
    ///
    /// let task: Task<&str, u32> = Task::new(|settler| {
    ///     settler.resolve(1);
    ///     settler.resolve(2); // ignored
    ///     Ok(())
    /// });
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// let sink = Arc::clone(&seen);
    /// task.fork(|_| Ok(()), move |n| {
    ///     sink.lock().unwrap().push(n);
    ///     Ok(())
    /// });
    /// assert_eq!(*seen.lock().unwrap(), vec![1]);
    /// ```
    pub fn new<X>(executor: X) -> Self
    where
        X: Fn(Settler<E, A>) -> Result<(), E> + Send + Sync + 'static,
    {
        Task::from_pipeline(FromExecutor::new(executor))
    }

    /// A task that resolves with `value` on every fork.
    pub fn of(value: A) -> Self
    where
        A: Clone + Sync,
    {
        Task::from_pipeline(Of::new(value))
    }

    /// A task that rejects with `error` on every fork.
    pub fn reject(error: E) -> Self
    where
        E: Clone + Sync,
    {
        Task::from_pipeline(Reject::new(error))
    }

    /// A task that settles the way `result` says: `Ok` resolves, `Err` rejects.
    pub fn from_result(result: Result<A, E>) -> Self
    where
        A: Clone + Sync,
        E: Clone + Sync,
    {
        match result {
            Ok(value) => Task::of(value),
            Err(error) => Task::reject(error),
        }
    }

    /// Wrap a custom pipeline node.
    pub fn from_pipeline<P>(pipeline: P) -> Self
    where
        P: Pipeline<E, A> + 'static,
    {
        Task {
            pipeline: Arc::new(pipeline),
        }
    }

    /// Branch on the settlement of `task`, continuing with the task the matching function returns.
    ///
    /// Static form of [`either_with`](Task::either_with), taking the task last.
    pub fn either<E2, B, FE, FA>(on_rejected: FE, on_resolved: FA, task: Task<E, A>) -> Task<E2, B>
    where
        E2: Send + 'static,
        B: Send + 'static,
        FE: Fn(E) -> Task<E2, B> + Send + Sync + 'static,
        FA: Fn(A) -> Task<E2, B> + Send + Sync + 'static,
    {
        task.either_with(on_rejected, on_resolved)
    }

    /// Continue with the task returned by whichever function owns the branch this task settles
    /// into.
    ///
    /// Works like [`chain`](Task::chain) on both branches at once, and either branch may flip:
    /// a rejection can recover into a resolution and a resolution can turn into a rejection.
    pub fn either_with<E2, B, FE, FA>(self, on_rejected: FE, on_resolved: FA) -> Task<E2, B>
    where
        E2: Send + 'static,
        B: Send + 'static,
        FE: Fn(E) -> Task<E2, B> + Send + Sync + 'static,
        FA: Fn(A) -> Task<E2, B> + Send + Sync + 'static,
    {
        Task::from_pipeline(Branch::new(self, on_rejected, on_resolved))
    }

    /// Transform the resolved value. Rejections pass through untouched.
    pub fn map<B, F>(self, f: F) -> Task<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        self.try_map(move |a| Ok(f(a)))
    }

    /// Transform the resolved value with a function that may fail.
    ///
    /// An `Err` rejects the resulting task with that value and skips every later stage.
    pub fn try_map<B, F>(self, f: F) -> Task<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> Result<B, E> + Send + Sync + 'static,
    {
        Task::from_pipeline(Map::new(self, f))
    }

    /// Continue with the task `f` builds from the resolved value.
    pub fn chain<B, F>(self, f: F) -> Task<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> Task<E, B> + Send + Sync + 'static,
    {
        self.try_chain(move |a| Ok(f(a)))
    }

    /// Continue with the task `f` builds from the resolved value, where building may fail.
    ///
    /// If `f` returns `Err`, the composed task rejects with it and no inner task is run.
    pub fn try_chain<B, F>(self, f: F) -> Task<E, B>
    where
        B: Send + 'static,
        F: Fn(A) -> Result<Task<E, B>, E> + Send + Sync + 'static,
    {
        Task::from_pipeline(Chain::new(self, f))
    }

    /// Transform whichever branch this task settles into, keeping the branch.
    pub fn bimap<E2, B, FE, FA>(self, on_rejected: FE, on_resolved: FA) -> Task<E2, B>
    where
        E2: Send + 'static,
        B: Send + 'static,
        FE: Fn(E) -> E2 + Send + Sync + 'static,
        FA: Fn(A) -> B + Send + Sync + 'static,
    {
        self.try_bimap(move |e| Ok(on_rejected(e)), move |a| Ok(on_resolved(a)))
    }

    /// Fallible [`bimap`](Task::bimap): an `Err` from either function rejects.
    pub fn try_bimap<E2, B, FE, FA>(self, on_rejected: FE, on_resolved: FA) -> Task<E2, B>
    where
        E2: Send + 'static,
        B: Send + 'static,
        FE: Fn(E) -> Result<E2, E2> + Send + Sync + 'static,
        FA: Fn(A) -> Result<B, E2> + Send + Sync + 'static,
    {
        Task::from_pipeline(BiMap::new(self, on_rejected, on_resolved))
    }

    /// Transform the rejection value. Resolutions pass through untouched.
    pub fn map_rejected<E2, F>(self, f: F) -> Task<E2, A>
    where
        E2: Send + 'static,
        F: Fn(E) -> E2 + Send + Sync + 'static,
    {
        self.try_bimap(move |e| Ok(f(e)), Ok)
    }

    /// Recover from a rejection with the task `f` builds from it.
    pub fn or_else<E2, F>(self, f: F) -> Task<E2, A>
    where
        E2: Send + 'static,
        F: Fn(E) -> Task<E2, A> + Send + Sync + 'static,
    {
        Task::from_pipeline(OrElse::new(self, f))
    }

    /// Run the whole pipeline, delivering the outcome to one of the handlers.
    ///
    /// Handlers fail by returning `Err`:
    ///
    /// - if `on_resolved` fails with `e`, `on_rejected(e)` runs as though the task had rejected;
    /// - if `on_rejected` fails with `e2`, it is called once more with `e2`;
    /// - if that call fails too, its error unwinds out of the call that drove settlement (this
    ///   `fork` when the task settles synchronously) with the error as the panic payload.
    ///
    /// Returns `self`, so the task can be forked again or composed further.
    pub fn fork<R, S>(&self, on_rejected: R, on_resolved: S) -> &Self
    where
        R: FnMut(E) -> Result<(), E> + Send + 'static,
        S: FnOnce(A) -> Result<(), E> + Send + 'static,
    {
        tracing::trace!(task = ?self, "forking task");
        self.run(fork::terminal(on_rejected, on_resolved));
        self
    }

    /// Start one execution of the pipeline, delivering straight to `settler`.
    pub(crate) fn run(&self, settler: Settler<E, A>) {
        self.pipeline.run(settler)
    }
}

impl<E, A> Clone for Task<E, A> {
    fn clone(&self) -> Self {
        Task {
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<E, A> fmt::Debug for Task<E, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task<{}, {}>",
            std::any::type_name::<E>(),
            std::any::type_name::<A>()
        )
    }
}
