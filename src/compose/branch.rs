use std::sync::Arc;

use crate::{Pipeline, Settlement, Task, settler::Settler};

/// Continues with a task chosen by the branch the upstream task settles into.
///
/// Unlike [`BiMap`](super::BiMap), both functions return tasks, so either branch can end up
/// resolved or rejected.
pub struct Branch<E, A, FE, FA> {
    upstream: Task<E, A>,
    on_rejected: Arc<FE>,
    on_resolved: Arc<FA>,
}

impl<E, A, FE, FA> Branch<E, A, FE, FA> {
    pub fn new(upstream: Task<E, A>, on_rejected: FE, on_resolved: FA) -> Self {
        Branch {
            upstream,
            on_rejected: Arc::new(on_rejected),
            on_resolved: Arc::new(on_resolved),
        }
    }
}

impl<E, A, E2, B, FE, FA> Pipeline<E2, B> for Branch<E, A, FE, FA>
where
    E: Send + 'static,
    A: Send + 'static,
    E2: Send + 'static,
    B: Send + 'static,
    FE: Fn(E) -> Task<E2, B> + Send + Sync + 'static,
    FA: Fn(A) -> Task<E2, B> + Send + Sync + 'static,
{
    fn run(&self, settler: Settler<E2, B>) {
        let on_rejected = Arc::clone(&self.on_rejected);
        let on_resolved = Arc::clone(&self.on_resolved);
        self.upstream.run(Settler::new(move |settlement| {
            let next = match settlement {
                Settlement::Rejected(e) => on_rejected(e),
                Settlement::Resolved(a) => on_resolved(a),
            };
            next.run(settler);
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

    struct Counted {
        sad: Arc<AtomicUsize>,
        happy: Arc<AtomicUsize>,
    }

    impl Counted {
        fn new() -> Self {
            Counted {
                sad: Arc::new(AtomicUsize::new(0)),
                happy: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn counts(&self) -> (usize, usize) {
            (
                self.sad.load(Ordering::SeqCst),
                self.happy.load(Ordering::SeqCst),
            )
        }
    }

    #[test]
    fn test_either_runs_happy_on_resolution() {
        let counted = Counted::new();
        let sad = {
            let sad = Arc::clone(&counted.sad);
            move |_e: &'static str| {
                sad.fetch_add(1, Ordering::SeqCst);
                Task::<String, u32>::of(0)
            }
        };
        let happy = {
            let happy = Arc::clone(&counted.happy);
            move |v: u32| {
                happy.fetch_add(1, Ordering::SeqCst);
                Task::<String, u32>::of(v + 100)
            }
        };

        let task = Task::either(sad, happy, Task::<&str, u32>::of(1));
        assert_eq!(collect(task), vec![Ok(101)]);
        assert_eq!(counted.counts(), (0, 1));
    }

    #[test]
    fn test_either_runs_sad_on_rejection() {
        let counted = Counted::new();
        let sad = {
            let sad = Arc::clone(&counted.sad);
            move |e: &'static str| {
                sad.fetch_add(1, Ordering::SeqCst);
                Task::<String, u32>::reject(e.to_uppercase())
            }
        };
        let happy = {
            let happy = Arc::clone(&counted.happy);
            move |v: u32| {
                happy.fetch_add(1, Ordering::SeqCst);
                Task::<String, u32>::of(v)
            }
        };

        let task = Task::either(sad, happy, Task::<&str, u32>::reject("bad"));
        assert_eq!(collect(task), vec![Err("BAD".to_string())]);
        assert_eq!(counted.counts(), (1, 0));
    }

    #[test]
    fn test_either_happy_branch_can_reject() {
        let task = Task::<&str, u32>::of(1).either_with(
            |_| Task::<&str, u32>::of(0),
            |v| Task::reject(if v == 1 { "flipped" } else { "other" }),
        );
        assert_eq!(collect(task), vec![Err("flipped")]);
    }

    #[test]
    fn test_either_sad_branch_can_recover() {
        let task = Task::<&str, u32>::reject("bad").either_with(
            |e: &'static str| Task::<&str, u32>::of(e.len() as u32),
            |v| Task::of(v),
        );
        assert_eq!(collect(task), vec![Ok(3)]);
    }
}
