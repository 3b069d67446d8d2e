//! Stages that build a new task on top of an existing one.
//!
//! Every node here holds its upstream [`Task`](crate::Task) and the user function, and does
//! nothing until it is run. When run, it forks the upstream into a fresh
//! [`Settler`](crate::Settler) whose callback applies the function and settles downstream.

mod branch;
mod chain;
mod map;

pub use branch::Branch;
pub use chain::{Chain, OrElse};
pub use map::{BiMap, Map};
