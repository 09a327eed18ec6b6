use std::any::Any;
use crate::error::Error;
use crate::key::Key;

pub type BoxAny = Box<dyn Any + Send + Sync>;

/// Recovers the concrete value a type-erased resolver produced for `key`.
pub fn unbox<T>(key: Key, value: BoxAny) -> Result<T, Error>
  where T: 'static
{
  value
    .downcast::<T>()
    .map(|value| *value)
    .map_err(|_| Error::TypeMismatch {
      expected: key.type_name(),
    })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unbox_matching_type() {
    let value: BoxAny = Box::new(7_u32);
    assert_eq!(unbox::<u32>(Key::of::<u32>(), value), Ok(7));
  }

  #[test]
  fn unbox_reports_mismatch() {
    let value: BoxAny = Box::new("seven");
    assert_eq!(
      unbox::<u32>(Key::of::<u32>(), value),
      Err(Error::TypeMismatch { expected: "u32" })
    );
  }
}
