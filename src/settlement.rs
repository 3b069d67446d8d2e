use either::Either;

/// Outcome of one execution of a task: it either resolved with a value or rejected with an error.
///
/// `Settlement` plays the role `Result` plays for synchronous code. The variants are ordered
/// rejection-first to match the `(on_rejected, on_resolved)` argument order used throughout
/// the crate.
///
/// # Examples
///
/// ```rust
/// use forked::Settlement;
///
/// let resolved: Settlement<String, i32> = Settlement::Resolved(42);
/// let rejected: Settlement<String, i32> = Settlement::Rejected("boom".to_string());
///
/// assert_eq!(resolved.map(|v| v * 2), Settlement::Resolved(84));
/// assert!(rejected.is_rejected());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Settlement<E, A> {
    /// The computation failed with `E`
    Rejected(E),
    /// The computation succeeded with `A`
    Resolved(A),
}

impl<E, A> Settlement<E, A> {
    /// Returns `true` if the settlement is `Resolved`.
    #[inline]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Settlement::Resolved(_))
    }

    /// Returns `true` if the settlement is `Rejected`.
    #[inline]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Settlement::Rejected(_))
    }

    /// Converts from `Settlement<E, A>` to `Option<A>`, discarding a rejection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forked::Settlement;
    ///
    /// let x: Settlement<&str, i32> = Settlement::Resolved(7);
    /// assert_eq!(x.resolved_value(), Some(7));
    ///
    /// let y: Settlement<&str, i32> = Settlement::Rejected("nope");
    /// assert_eq!(y.resolved_value(), None);
    /// ```
    #[inline]
    pub fn resolved_value(self) -> Option<A> {
        match self {
            Settlement::Resolved(a) => Some(a),
            Settlement::Rejected(_) => None,
        }
    }

    /// Converts from `Settlement<E, A>` to `Option<E>`, discarding a resolution.
    #[inline]
    pub fn rejected_value(self) -> Option<E> {
        match self {
            Settlement::Resolved(_) => None,
            Settlement::Rejected(e) => Some(e),
        }
    }

    /// Maps the resolved value, leaving a rejection untouched.
    #[inline]
    pub fn map<B, F>(self, f: F) -> Settlement<E, B>
    where
        F: FnOnce(A) -> B,
    {
        match self {
            Settlement::Resolved(a) => Settlement::Resolved(f(a)),
            Settlement::Rejected(e) => Settlement::Rejected(e),
        }
    }

    /// Maps the rejected value, leaving a resolution untouched.
    #[inline]
    pub fn map_rejected<E2, F>(self, f: F) -> Settlement<E2, A>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Settlement::Resolved(a) => Settlement::Resolved(a),
            Settlement::Rejected(e) => Settlement::Rejected(f(e)),
        }
    }

    /// Maps whichever side is present, keeping the branch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use forked::Settlement;
    ///
    /// let x: Settlement<i32, i32> = Settlement::Rejected(3);
    /// assert_eq!(x.bimap(|e| e + 1, |a| a * 2), Settlement::Rejected(4));
    /// ```
    #[inline]
    pub fn bimap<E2, B, FE, FA>(self, fe: FE, fa: FA) -> Settlement<E2, B>
    where
        FE: FnOnce(E) -> E2,
        FA: FnOnce(A) -> B,
    {
        match self {
            Settlement::Rejected(e) => Settlement::Rejected(fe(e)),
            Settlement::Resolved(a) => Settlement::Resolved(fa(a)),
        }
    }

    /// Swaps the branches: a resolution becomes a rejection and vice versa.
    #[inline]
    pub fn flip(self) -> Settlement<A, E> {
        match self {
            Settlement::Rejected(e) => Settlement::Resolved(e),
            Settlement::Resolved(a) => Settlement::Rejected(a),
        }
    }

    /// Converts from `&Settlement<E, A>` to `Settlement<&E, &A>`.
    #[inline]
    pub const fn as_ref(&self) -> Settlement<&E, &A> {
        match self {
            Settlement::Rejected(e) => Settlement::Rejected(e),
            Settlement::Resolved(a) => Settlement::Resolved(a),
        }
    }

    /// Converts into a standard `Result`, resolution becoming `Ok`.
    #[inline]
    pub fn into_result(self) -> Result<A, E> {
        match self {
            Settlement::Resolved(a) => Ok(a),
            Settlement::Rejected(e) => Err(e),
        }
    }

    /// Returns the resolved value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the value is `Rejected`.
    #[inline]
    pub fn expect_resolved(self, msg: &str) -> A {
        match self {
            Settlement::Resolved(a) => a,
            Settlement::Rejected(_) => panic!("{}", msg),
        }
    }

    /// Returns the rejected value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics with `msg` if the value is `Resolved`.
    #[inline]
    pub fn expect_rejected(self, msg: &str) -> E {
        match self {
            Settlement::Resolved(_) => panic!("{}", msg),
            Settlement::Rejected(e) => e,
        }
    }

    /// Returns the resolved value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics if the value is `Rejected`.
    ///
    /// ```should_panic
    /// use forked::Settlement;
    ///
    /// let x: Settlement<&str, i32> = Settlement::Rejected("nope");
    /// x.unwrap_resolved(); // panics
    /// ```
    #[inline]
    pub fn unwrap_resolved(self) -> A {
        match self {
            Settlement::Resolved(a) => a,
            Settlement::Rejected(_) => {
                panic!("called `Settlement::unwrap_resolved()` on a `Rejected` value")
            }
        }
    }

    /// Returns the rejected value, consuming the `self` value.
    ///
    /// # Panics
    ///
    /// Panics if the value is `Resolved`.
    #[inline]
    pub fn unwrap_rejected(self) -> E {
        match self {
            Settlement::Resolved(_) => {
                panic!("called `Settlement::unwrap_rejected()` on a `Resolved` value")
            }
            Settlement::Rejected(e) => e,
        }
    }
}

impl<E, A> From<Result<A, E>> for Settlement<E, A> {
    fn from(result: Result<A, E>) -> Self {
        match result {
            Ok(a) => Settlement::Resolved(a),
            Err(e) => Settlement::Rejected(e),
        }
    }
}

impl<E, A> From<Settlement<E, A>> for Result<A, E> {
    fn from(settlement: Settlement<E, A>) -> Self {
        settlement.into_result()
    }
}

impl<E, A> From<Either<E, A>> for Settlement<E, A> {
    fn from(either: Either<E, A>) -> Self {
        match either {
            Either::Left(e) => Settlement::Rejected(e),
            Either::Right(a) => Settlement::Resolved(a),
        }
    }
}

impl<E, A> From<Settlement<E, A>> for Either<E, A> {
    fn from(settlement: Settlement<E, A>) -> Self {
        match settlement {
            Settlement::Rejected(e) => Either::Left(e),
            Settlement::Resolved(a) => Either::Right(a),
        }
    }
}
