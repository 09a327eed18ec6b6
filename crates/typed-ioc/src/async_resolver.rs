use crate::lock::AsyncLock;
use crate::resolver::{AsyncResolver, Resolvable};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;

type Build<T> = Box<dyn Fn() -> BoxFuture<'static, T> + Send + Sync>;

fn boxed_build<T, F, Fut>(build: F) -> Build<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    Box::new(move || build().boxed())
}

/// Async singleton resolver.
///
/// Concurrent callers that arrive while the first build is in flight are
/// suspended on the slot's [`AsyncLock`] and receive the built value once it
/// is stored. A build that panics or whose caller is dropped mid-await leaves
/// the slot empty.
pub struct AsyncContainerResolver<T> {
    slot: AsyncLock<Option<T>>,
    build: Build<T>,
}

impl<T> AsyncContainerResolver<T>
where
    T: Resolvable,
{
    pub fn new<F, Fut>(build: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            slot: AsyncLock::new(None),
            build: boxed_build(build),
        }
    }
}

#[async_trait]
impl<T> AsyncResolver for AsyncContainerResolver<T>
where
    T: Resolvable,
{
    type Output = T;

    async fn instance(&self) -> T {
        let mut slot = self.slot.lock().await;
        if let Some(instance) = slot.as_ref() {
            return instance.clone();
        }
        let instance = (self.build)().await;
        *slot = Some(instance.clone());
        instance
    }
}

impl<T> fmt::Debug for AsyncContainerResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncContainerResolver")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

pub struct AsyncTransientResolver<T> {
    build: Build<T>,
}

impl<T> AsyncTransientResolver<T>
where
    T: Resolvable,
{
    pub fn new<F, Fut>(build: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        Self {
            build: boxed_build(build),
        }
    }
}

#[async_trait]
impl<T> AsyncResolver for AsyncTransientResolver<T>
where
    T: Resolvable,
{
    type Output = T;

    async fn instance(&self) -> T {
        (self.build)().await
    }
}

impl<T> fmt::Debug for AsyncTransientResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncTransientResolver")
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}
