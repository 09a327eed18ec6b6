use std::any::{type_name, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Registry identity of a type.
///
/// Equality, ordering and hashing only look at the [`TypeId`]; the type name
/// is carried along for log lines and error messages.
#[derive(Clone, Copy)]
pub struct Key {
  id: TypeId,
  name: &'static str,
}

impl Key {
  pub fn of<T>() -> Self
  where
    T: ?Sized + 'static,
  {
    Key {
      id: TypeId::of::<T>(),
      name: type_name::<T>(),
    }
  }

  pub fn type_id(&self) -> TypeId {
    self.id
  }

  pub fn type_name(&self) -> &'static str {
    self.name
  }
}

pub fn key_of<T>() -> Key
where
  T: ?Sized + 'static,
{
  Key::of::<T>()
}

impl PartialEq for Key {
  fn eq(&self, other: &Self) -> bool {
    self.id == other.id
  }
}

impl Eq for Key {}

impl PartialOrd for Key {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Key {
  fn cmp(&self, other: &Self) -> Ordering {
    self.id.cmp(&other.id)
  }
}

impl Hash for Key {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id.hash(state)
  }
}

impl fmt::Debug for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Key").field(&self.name).finish()
  }
}

impl fmt::Display for Key {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name)
  }
}
