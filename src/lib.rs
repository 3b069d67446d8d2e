//! # Forked: lazy tasks that settle once
//!
//! A [`Task<E, A>`] describes a computation that will either reject with an `E` or resolve
//! with an `A`, exactly once per run. Nothing happens until the task is forked.
//!
//! ## Core Types
//!
//! - **[`Task<E, A>`]**: an immutable, re-runnable description of a computation
//! - **[`Settler<E, A>`]**: the settle-once callbacks an executor receives
//! - **[`Settlement<E, A>`]**: the outcome, `Rejected(E)` or `Resolved(A)`
//!
//! ## Composition
//!
//! - [`map`](Task::map) / [`try_map`](Task::try_map): transform a resolution
//! - [`chain`](Task::chain) / [`try_chain`](Task::try_chain): continue with another task
//! - [`bimap`](Task::bimap) / [`try_bimap`](Task::try_bimap): transform either branch in place
//! - [`Task::either`] / [`either_with`](Task::either_with): continue on either branch, possibly
//!   flipping it
//! - [`map_rejected`](Task::map_rejected), [`or_else`](Task::or_else): work on the rejection
//!
//! The `try_` forms take functions that may fail by returning `Err`. A failure rejects the
//! composed task and skips every later stage.
//!
//! ## Execution
//!
//! [`fork`](Task::fork) runs the pipeline and hands the outcome to one of two handlers, with
//! a fixed policy for handlers that fail (see [`Task::fork`]). With the `async` feature a task
//! can also be awaited.
//!
//! ## Example
//!
//! ```
//! use forked::prelude::*;
//!
//! let parse = |raw: &'static str| {
//!     Task::<String, u32>::new(move |settler| {
//!         let n: u32 = raw.parse().map_err(|_| format!("not a number: {raw}"))?;
//!         settler.resolve(n);
//!         Ok(())
//!     })
//! };
//!
//! let doubled = parse("21").map(|n| n * 2);
//! doubled.fork(
//!     |err| panic!("unexpected rejection: {err}"),
//!     |n| {
//!         assert_eq!(n, 42);
//!         Ok(())
//!     },
//! );
//!
//! parse("x").fork(
//!     |err| {
//!         assert_eq!(err, "not a number: x");
//!         Ok(())
//!     },
//!     |_| Ok(()),
//! );
//! ```

mod fork;
mod settlement;
mod settler;
mod task;

pub mod build;
pub mod compose;
pub mod fault;
#[cfg(feature = "async")]
pub mod future;
pub mod prelude;

#[cfg(test)]
mod testing;

pub use fault::Fault;
#[cfg(feature = "async")]
pub use future::{Abandoned, Settled};
pub use settlement::Settlement;
pub use settler::Settler;
pub use task::{Pipeline, Task};
