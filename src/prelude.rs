//! Commonly used imports
//!
//! Use `use forked::prelude::*;` for quick access to the most common types.

pub use crate::{Pipeline, Settlement, Settler, Task};

#[cfg(feature = "async")]
pub use crate::future::{Abandoned, Settled};
