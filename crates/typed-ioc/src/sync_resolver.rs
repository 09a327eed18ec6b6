use crate::lock::BlockingLock;
use crate::resolver::{Resolvable, SyncResolver};
use std::fmt;

type Build<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Singleton resolver: the build closure runs at most once, every caller
/// after the first gets a clone of the cached value.
///
/// If the build closure panics the slot stays empty and the next caller
/// builds again.
pub struct SyncContainerResolver<T> {
    slot: BlockingLock<Option<T>>,
    build: Build<T>,
}

impl<T> SyncContainerResolver<T>
where
    T: Resolvable,
{
    pub fn new<F>(build: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            slot: BlockingLock::new(None),
            build: Box::new(build),
        }
    }
}

impl<T> SyncResolver for SyncContainerResolver<T>
where
    T: Resolvable,
{
    type Output = T;

    fn instance(&self) -> T {
        self.slot
            .with_lock(|slot| slot.get_or_insert_with(|| (self.build)()).clone())
    }
}

impl<T> fmt::Debug for SyncContainerResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncContainerResolver")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

/// Calls the build closure on every resolution.
pub struct SyncTransientResolver<T> {
    build: Build<T>,
}

impl<T> SyncTransientResolver<T>
where
    T: Resolvable,
{
    pub fn new<F>(build: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            build: Box::new(build),
        }
    }
}

impl<T> SyncResolver for SyncTransientResolver<T>
where
    T: Resolvable,
{
    type Output = T;

    fn instance(&self) -> T {
        (self.build)()
    }
}

impl<T> fmt::Debug for SyncTransientResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncTransientResolver")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
