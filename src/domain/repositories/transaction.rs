//! Transaction boundary (§5, §6)
//!
//! `transaction` returns the closure's value on success and rolls back
//! every mutation made inside on failure, including those of nested
//! transactional calls — nesting joins the outer transaction rather than
//! creating a savepoint, so only the outermost `transaction` call is a
//! snapshot point.

use crate::domain::errors::CoreError;

pub trait TransactionManager {
    fn transaction<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, CoreError>) -> Result<T, CoreError>;
}
