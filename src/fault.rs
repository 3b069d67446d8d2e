//! Rejection payloads used by request-handling code.
//!
//! A task never looks inside its rejection value; [`Fault`] is simply the taxonomy the
//! surrounding middleware tends to reject with.
//!
//! ```rust
//! use forked::prelude::*;
//! use forked::Fault;
//!
//! let lookup = Task::<Fault, u32>::reject(Fault::validation("/body/id", "id must be positive"))
//!     .map_rejected(|cause| Fault::wrap("could not load user", [cause]));
//!
//! lookup.fork(
//!     |fault| {
//!         assert_eq!(fault.to_string(), "could not load user");
//!         assert_eq!(fault.causes()[0].status(), Some(400));
//!         Ok(())
//!     },
//!     |_| Ok(()),
//! );
//! ```

/// HTTP status given to validation faults unless overridden.
pub const DEFAULT_VALIDATION_STATUS: u16 = 400;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Fault {
    /// A failure that aggregates the failures that caused it.
    #[error("{message}")]
    Wrapped { message: String, causes: Vec<Fault> },

    /// Bad client input, located by a pointer into the request (`/body/name`).
    #[error("{message} (at {pointer})")]
    Validation {
        status: u16,
        pointer: String,
        message: String,
    },

    /// A caller broke the contract of an API.
    #[error("contract violated: {message}")]
    Contract { message: String },
}

impl Fault {
    pub fn wrap(message: impl Into<String>, causes: impl IntoIterator<Item = Fault>) -> Self {
        Fault::Wrapped {
            message: message.into(),
            causes: causes.into_iter().collect(),
        }
    }

    pub fn validation(pointer: impl Into<String>, message: impl Into<String>) -> Self {
        Fault::Validation {
            status: DEFAULT_VALIDATION_STATUS,
            pointer: pointer.into(),
            message: message.into(),
        }
    }

    pub fn contract(message: impl Into<String>) -> Self {
        Fault::Contract {
            message: message.into(),
        }
    }

    /// Override the status of a validation fault. Other kinds are returned unchanged.
    pub fn with_status(self, status: u16) -> Self {
        match self {
            Fault::Validation {
                pointer, message, ..
            } => Fault::Validation {
                status,
                pointer,
                message,
            },
            other => other,
        }
    }

    /// HTTP status to answer with, if this fault carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Fault::Validation { status, .. } => Some(*status),
            Fault::Wrapped { .. } | Fault::Contract { .. } => None,
        }
    }

    /// Direct causes of a wrapped fault; empty for the other kinds.
    pub fn causes(&self) -> &[Fault] {
        match self {
            Fault::Wrapped { causes, .. } => causes,
            Fault::Validation { .. } | Fault::Contract { .. } => &[],
        }
    }

    /// Every non-wrapper fault in this tree, depth first.
    pub fn leaves(&self) -> Vec<&Fault> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(fault) = stack.pop() {
            match fault {
                Fault::Wrapped { causes, .. } => stack.extend(causes.iter().rev()),
                leaf => leaves.push(leaf),
            }
        }
        leaves
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Task;
    use crate::testing::collect;

    #[test]
    fn test_validation_defaults_to_bad_request() {
        let fault = Fault::validation("/query/page", "page must be a number");
        assert_eq!(fault.status(), Some(400));
        assert_eq!(fault.with_status(422).status(), Some(422));
    }

    #[test]
    fn test_with_status_ignores_other_kinds() {
        let fault = Fault::contract("handler called twice");
        assert_eq!(fault.clone().with_status(500), fault);
        assert_eq!(fault.status(), None);
    }

    #[test]
    fn test_leaves_walk_nested_causes_in_order() {
        let fault = Fault::wrap(
            "request failed",
            [
                Fault::validation("/a", "a"),
                Fault::wrap("inner", [Fault::contract("b"), Fault::validation("/c", "c")]),
            ],
        );

        let messages: Vec<String> = fault.leaves().iter().map(|f| f.to_string()).collect();
        assert_eq!(
            messages,
            vec!["a (at /a)", "contract violated: b", "c (at /c)"]
        );
        assert_eq!(fault.causes().len(), 2);
    }

    #[test]
    fn test_fault_travels_through_rejection_unchanged() {
        let fault = Fault::validation("/body/name", "name is required");
        let task = Task::<Fault, u32>::reject(fault.clone())
            .map(|n| n + 1)
            .chain(|n| Task::of(n * 2));

        assert_eq!(collect(task), vec![Err(fault)]);
    }
}
