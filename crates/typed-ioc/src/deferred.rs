use crate::resolver::Resolvable;
use crate::Container;
use std::fmt;
use std::marker::PhantomData;

/// A handle to a dependency that may not be registered yet.
///
/// Capturing a `Deferred` does not resolve anything; each call goes back to
/// the container.
pub struct Deferred<T> {
    container: Container,
    _p: PhantomData<fn() -> T>,
}

impl<T> Deferred<T>
where
    T: Resolvable,
{
    pub(crate) fn new(container: Container) -> Self {
        Self {
            container,
            _p: PhantomData,
        }
    }

    /// See [`Container::get`].
    pub fn get(&self) -> Option<T> {
        self.container.get::<T>()
    }

    pub async fn get_async(&self) -> Option<T> {
        self.container.get_async::<T>().await
    }

    /// Parks until the dependency is registered, see
    /// [`Container::wait_for_resolve`].
    pub async fn wait(&self) -> T {
        self.container.wait_for_resolve::<T>().await
    }
}

impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            container: self.container.clone(),
            _p: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
