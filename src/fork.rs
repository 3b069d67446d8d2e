//! Delivering a settlement to the terminal handlers of [`Task::fork`](crate::Task::fork).
//!
//! Handlers report failure by returning `Err`. The rules:
//!
//! 1. A resolution goes to `on_resolved`. If it fails with `e`, delivery continues as if the
//!    task had rejected with `e`.
//! 2. A rejection goes to `on_rejected`. If it fails, it gets exactly one more call with the new
//!    error. A second failure is not contained: its error unwinds out of whatever call drove
//!    settlement.

use crate::{settlement::Settlement, settler::Settler};

/// Calls made to the rejection handler before its error escapes.
const REJECTION_ATTEMPTS: usize = 2;

/// Build the settler that ends a forked pipeline.
///
/// When a delivery escapes, the error is raised with [`std::panic::resume_unwind`] so the
/// payload is the `E` value itself and no panic hook runs.
pub(crate) fn terminal<E, A, R, S>(mut on_rejected: R, on_resolved: S) -> Settler<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
    R: FnMut(E) -> Result<(), E> + Send + 'static,
    S: FnOnce(A) -> Result<(), E> + Send + 'static,
{
    Settler::new(move |settlement| {
        if let Err(escaped) = deliver(settlement, &mut on_rejected, on_resolved) {
            std::panic::resume_unwind(Box::new(escaped));
        }
    })
}

/// Apply the containment rules to one settlement.
///
/// Returns the error that escaped containment, if any.
pub(crate) fn deliver<E, A, R, S>(
    settlement: Settlement<E, A>,
    on_rejected: &mut R,
    on_resolved: S,
) -> Result<(), E>
where
    R: FnMut(E) -> Result<(), E>,
    S: FnOnce(A) -> Result<(), E>,
{
    let mut error = match settlement {
        Settlement::Resolved(value) => match on_resolved(value) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::debug!("resolution handler failed; delivering its error as a rejection");
                e
            }
        },
        Settlement::Rejected(e) => e,
    };

    for attempt in 1..REJECTION_ATTEMPTS {
        match on_rejected(error) {
            Ok(()) => return Ok(()),
            Err(e) => {
                tracing::warn!(attempt, "rejection handler failed; retrying with its error");
                error = e;
            }
        }
    }

    on_rejected(error).inspect_err(|_| {
        tracing::error!(
            attempts = REJECTION_ATTEMPTS,
            "rejection handler failed again; propagating its error"
        );
    })
}
