use crate::{Pipeline, settler::Settler};

/// Runs a user executor, treating an `Err` return as a rejection.
///
/// The error only counts if the executor has not settled yet; a late error is dropped.
pub struct FromExecutor<X>(X);

impl<X> FromExecutor<X> {
    pub fn new(executor: X) -> Self {
        FromExecutor(executor)
    }
}

impl<E, A, X> Pipeline<E, A> for FromExecutor<X>
where
    X: Fn(Settler<E, A>) -> Result<(), E> + Send + Sync,
{
    fn run(&self, settler: Settler<E, A>) {
        if let Err(e) = (self.0)(settler.clone()) {
            if !settler.reject(e) {
                tracing::trace!("executor failed after settling; error dropped");
            }
        }
    }
}

/// Resolves with a copy of the stored value on every run.
pub struct Of<A>(A);

impl<A> Of<A> {
    pub fn new(value: A) -> Self {
        Of(value)
    }
}

impl<E, A> Pipeline<E, A> for Of<A>
where
    A: Clone + Send + Sync,
{
    fn run(&self, settler: Settler<E, A>) {
        settler.resolve(self.0.clone());
    }
}

/// Rejects with a copy of the stored error on every run.
pub struct Reject<E>(E);

impl<E> Reject<E> {
    pub fn new(error: E) -> Self {
        Reject(error)
    }
}

impl<E, A> Pipeline<E, A> for Reject<E>
where
    E: Clone + Send + Sync,
{
    fn run(&self, settler: Settler<E, A>) {
        settler.reject(self.0.clone());
    }
}
