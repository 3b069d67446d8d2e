use std::sync::Arc;

use crate::{Pipeline, Settlement, Task, settler::Settler};

/// Continues with the task built from the upstream resolution.
///
/// The inner task is forked into the same settler, so its settlement, on either branch,
/// becomes the settlement of the composed task.
pub struct Chain<E, A, F> {
    upstream: Task<E, A>,
    f: Arc<F>,
}

impl<E, A, F> Chain<E, A, F> {
    pub fn new(upstream: Task<E, A>, f: F) -> Self {
        Chain {
            upstream,
            f: Arc::new(f),
        }
    }
}

impl<E, A, B, F> Pipeline<E, B> for Chain<E, A, F>
where
    E: Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> Result<Task<E, B>, E> + Send + Sync + 'static,
{
    fn run(&self, settler: Settler<E, B>) {
        let f = Arc::clone(&self.f);
        self.upstream.run(Settler::new(move |settlement| match settlement {
            Settlement::Resolved(a) => match f(a) {
                Ok(next) => next.run(settler),
                Err(e) => {
                    settler.reject(e);
                }
            },
            Settlement::Rejected(e) => {
                settler.reject(e);
            }
        }));
    }
}

/// Recovers from an upstream rejection with the task built from the error.
pub struct OrElse<E, A, F> {
    upstream: Task<E, A>,
    f: Arc<F>,
}

impl<E, A, F> OrElse<E, A, F> {
    pub fn new(upstream: Task<E, A>, f: F) -> Self {
        OrElse {
            upstream,
            f: Arc::new(f),
        }
    }
}

impl<E, A, E2, F> Pipeline<E2, A> for OrElse<E, A, F>
where
    E: Send + 'static,
    A: Send + 'static,
    E2: Send + 'static,
    F: Fn(E) -> Task<E2, A> + Send + Sync + 'static,
{
    fn run(&self, settler: Settler<E2, A>) {
        let f = Arc::clone(&self.f);
        self.upstream.run(Settler::new(move |settlement| match settlement {
            Settlement::Rejected(e) => f(e).run(settler),
            Settlement::Resolved(a) => {
                settler.resolve(a);
            }
        }));
    }
}
