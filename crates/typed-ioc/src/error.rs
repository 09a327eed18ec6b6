use thiserror::Error;
use crate::lifecycle::Mode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("failed to register {type_name}, already registered {mode}")]
  AlreadyRegistered {
    type_name: &'static str,
    mode: Mode,
  },
  #[error("type {0} is registered as async, but sync access is attempted")]
  AsyncOnly(&'static str),
  #[error("resolver registered for {expected} produced a value of another type")]
  TypeMismatch {
    expected: &'static str,
  },
}
