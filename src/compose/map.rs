//! Stages that transform a settled value in place.
//!
//! [`Map`] touches only resolutions; [`BiMap`] owns both branches but never moves a value
//! from one branch to the other unless its function fails.

use std::sync::Arc;

use crate::{Pipeline, Settlement, Task, settler::Settler};

/// Transforms the resolved value of the upstream task.
pub struct Map<E, A, F> {
    upstream: Task<E, A>,
    f: Arc<F>,
}

impl<E, A, F> Map<E, A, F> {
    pub fn new(upstream: Task<E, A>, f: F) -> Self {
        Map {
            upstream,
            f: Arc::new(f),
        }
    }
}

impl<E, A, B, F> Pipeline<E, B> for Map<E, A, F>
where
    E: Send + 'static,
    A: Send + 'static,
    B: Send + 'static,
    F: Fn(A) -> Result<B, E> + Send + Sync + 'static,
{
    fn run(&self, settler: Settler<E, B>) {
        let f = Arc::clone(&self.f);
        self.upstream.run(Settler::new(move |settlement| {
            let mapped: Settlement<E, B> = match settlement {
                Settlement::Resolved(a) => f(a).into(),
                Settlement::Rejected(e) => Settlement::Rejected(e),
            };
            settler.settle(mapped);
        }));
    }
}

/// Transforms whichever branch the upstream task settles into.
pub struct BiMap<E, A, FE, FA> {
    upstream: Task<E, A>,
    on_rejected: Arc<FE>,
    on_resolved: Arc<FA>,
}

impl<E, A, FE, FA> BiMap<E, A, FE, FA> {
    pub fn new(upstream: Task<E, A>, on_rejected: FE, on_resolved: FA) -> Self {
        BiMap {
            upstream,
            on_rejected: Arc::new(on_rejected),
            on_resolved: Arc::new(on_resolved),
        }
    }
}

impl<E, A, E2, B, FE, FA> Pipeline<E2, B> for BiMap<E, A, FE, FA>
where
    E: Send + 'static,
    A: Send + 'static,
    E2: Send + 'static,
    B: Send + 'static,
    FE: Fn(E) -> Result<E2, E2> + Send + Sync + 'static,
    FA: Fn(A) -> Result<B, E2> + Send + Sync + 'static,
{
    fn run(&self, settler: Settler<E2, B>) {
        let on_rejected = Arc::clone(&self.on_rejected);
        let on_resolved = Arc::clone(&self.on_resolved);
        self.upstream.run(Settler::new(move |settlement| {
            let mapped = match settlement {
                Settlement::Rejected(e) => match on_rejected(e) {
                    Ok(e2) | Err(e2) => Settlement::Rejected(e2),
                },
                Settlement::Resolved(a) => match on_resolved(a) {
                    Ok(b) => Settlement::Resolved(b),
                    Err(e2) => Settlement::Rejected(e2),
                },
            };
            settler.settle(mapped);
        }));
    }
}

#[cfg(test)]
mod tests {
    use crate::Task;
    use crate::testing::collect;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn deferred(outcome: Result<u32, &'static str>) -> Task<&'static str, u32> {
        Task::new(move |settler| {
            match outcome {
                Ok(v) => settler.resolve(v),
                Err(e) => settler.reject(e),
            };
            Ok(())
        })
    }

    #[test]
    fn test_map_identity() {
        for outcome in [Ok(3), Err("bad")] {
            assert_eq!(
                collect(deferred(outcome).map(|x| x)),
                collect(deferred(outcome))
            );
        }
    }

    #[test]
    fn test_map_composition() {
        let f = |x: u32| x + 1;
        let g = |x: u32| x * 10;
        for outcome in [Ok(3), Err("bad")] {
            assert_eq!(
                collect(deferred(outcome).map(f).map(g)),
                collect(deferred(outcome).map(move |x| g(f(x))))
            );
        }
    }

    #[test]
    fn test_map_skips_function_on_rejection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let task = Task::<&str, u32>::reject("bad").map({
            let calls = Arc::clone(&calls);
            move |x| {
                calls.fetch_add(1, Ordering::SeqCst);
                x
            }
        });

        assert_eq!(collect(task), vec![Err("bad")]);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_try_map_failure_rejects() {
        let task = Task::<&str, u32>::of(1).try_map(|_| Err::<u32, _>("thrown"));
        assert_eq!(collect(task), vec![Err("thrown")]);
    }

    #[test]
    fn test_bimap_identity() {
        for outcome in [Ok(3), Err("bad")] {
            assert_eq!(
                collect(deferred(outcome).bimap(|e| e, |a| a)),
                collect(deferred(outcome))
            );
        }
    }

    #[test]
    fn test_bimap_composition() {
        let f1 = |e: &'static str| e.len();
        let f2 = |n: usize| n * 2;
        let g1 = |a: u32| a + 1;
        let g2 = |a: u32| a.to_string();
        for outcome in [Ok(3), Err("bad")] {
            assert_eq!(
                collect(deferred(outcome).bimap(f1, g1).bimap(f2, g2)),
                collect(deferred(outcome).bimap(move |e| f2(f1(e)), move |a| g2(g1(a))))
            );
        }
    }

    #[test]
    fn test_bimap_keeps_branch_and_runs_one_side() {
        let rejected_calls = Arc::new(AtomicUsize::new(0));
        let resolved_calls = Arc::new(AtomicUsize::new(0));
        let counted = |task: Task<&'static str, u32>| {
            let rejected_calls = Arc::clone(&rejected_calls);
            let resolved_calls = Arc::clone(&resolved_calls);
            task.bimap(
                move |e: &str| {
                    rejected_calls.fetch_add(1, Ordering::SeqCst);
                    e.len()
                },
                move |a| {
                    resolved_calls.fetch_add(1, Ordering::SeqCst);
                    a * 2
                },
            )
        };

        assert_eq!(collect(counted(Task::of(4))), vec![Ok(8)]);
        assert_eq!(resolved_calls.load(Ordering::SeqCst), 1);
        assert_eq!(rejected_calls.load(Ordering::SeqCst), 0);

        assert_eq!(collect(counted(Task::reject("four"))), vec![Err(4)]);
        assert_eq!(resolved_calls.load(Ordering::SeqCst), 1);
        assert_eq!(rejected_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_try_bimap_resolved_failure_rejects() {
        let task = Task::<&str, u32>::of(1).try_bimap(|e| Ok(e), |_| Err::<u32, _>("mapped"));
        assert_eq!(collect(task), vec![Err("mapped")]);
    }

    #[test]
    fn test_try_bimap_rejected_failure_stays_rejected() {
        let task = Task::<&str, u32>::reject("a").try_bimap(|_| Err("b"), Ok::<u32, &str>);
        assert_eq!(collect(task), vec![Err("b")]);
    }

    #[test]
    fn test_map_rejected_leaves_resolution() {
        assert_eq!(
            collect(Task::<&str, u32>::of(2).map_rejected(|e| e.len())),
            vec![Ok(2)]
        );
        assert_eq!(
            collect(Task::<&str, u32>::reject("abc").map_rejected(|e| e.len())),
            vec![Err(3)]
        );
    }
}
