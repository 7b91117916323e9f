//! Success/failure helpers layered on top of [`std::result::Result`].
//!
//! Every validation and orchestration step in the crate returns a plain `Result`.
//! This module adds the two pieces the standard type does not carry on its own:
//! combining independent validations into a single first-failure outcome, and
//! branch accessors that fail fast when used on the wrong branch.

use std::fmt::Debug;

/// Collapse a sequence of validation outcomes into one.
///
/// Returns the first failure in iteration order, or `Ok(())` when every entry
/// succeeded. Later failures are never inspected, so callers report a single
/// error at a time.
///
/// ```
/// use identity_core::domain::result::{Outcome, combine};
///
/// let email: Result<u8, &str> = Ok(1);
/// let password: Result<&str, &str> = Err("empty password");
/// let name: Result<u8, &str> = Err("empty name");
///
/// assert_eq!(combine([email.check(), password.check(), name.check()]), Err("empty password"));
/// ```
pub fn combine<'a, E, I>(results: I) -> Result<(), E>
where
    E: Clone + 'a,
    I: IntoIterator<Item = Result<(), &'a E>>,
{
    match results.into_iter().find_map(Result::err) {
        Some(error) => Err(error.clone()),
        None => Ok(()),
    }
}

/// Branch queries and fail-fast accessors for `Result`.
pub trait Outcome<T, E> {
    fn is_success(&self) -> bool;

    fn is_failure(&self) -> bool;

    /// Borrow the success value.
    ///
    /// # Panics
    ///
    /// Panics when called on a failure. Reading the value of a failed outcome is a
    /// programming error, never a recoverable condition.
    fn value(&self) -> &T;

    /// Borrow the failure reason.
    ///
    /// # Panics
    ///
    /// Panics when called on a success.
    fn error(&self) -> &E;

    /// Erase the success type so heterogeneous outcomes can be passed to [`combine`].
    fn check(&self) -> Result<(), &E>;
}

impl<T, E> Outcome<T, E> for Result<T, E>
where
    T: Debug,
    E: Debug,
{
    fn is_success(&self) -> bool {
        self.is_ok()
    }

    fn is_failure(&self) -> bool {
        self.is_err()
    }

    fn value(&self) -> &T {
        match self {
            Ok(value) => value,
            Err(error) => panic!("cannot read the value of a failed result: {error:?}"),
        }
    }

    fn error(&self) -> &E {
        match self {
            Ok(value) => panic!("cannot read the error of a successful result: {value:?}"),
            Err(error) => error,
        }
    }

    fn check(&self) -> Result<(), &E> {
        self.as_ref().map(|_| ())
    }
}
