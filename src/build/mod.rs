//! Sources: the pipeline nodes a task starts from.

mod func;

pub use func::{FromExecutor, Of, Reject};
