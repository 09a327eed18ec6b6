use crate::helpers::BoxAny;
use async_trait::async_trait;

/// Values a container can hand out.
///
/// Shared instances are registered behind an `Arc`, so cloning hands out
/// the same instance.
pub trait Resolvable: Clone + Send + Sync + 'static {}

impl<T> Resolvable for T where T: Clone + Send + Sync + 'static {}

/// Produces instances from a synchronous call site.
pub trait SyncResolver: Send + Sync + 'static {
    type Output: Resolvable;

    fn instance(&self) -> Self::Output;
}

/// Produces instances from an asynchronous call site.
#[async_trait]
pub trait AsyncResolver: Send + Sync + 'static {
    type Output: Resolvable;

    async fn instance(&self) -> Self::Output;
}

// Object-safe counterparts stored in the registry maps. The concrete type is
// recovered with `helpers::unbox` at resolution time.

pub(crate) trait SyncResolverObject: Send + Sync + 'static {
    fn instance(&self) -> BoxAny;
}

impl<R> SyncResolverObject for R
where
    R: SyncResolver,
{
    fn instance(&self) -> BoxAny {
        Box::new(SyncResolver::instance(self))
    }
}

#[async_trait]
pub(crate) trait AsyncResolverObject: Send + Sync + 'static {
    async fn instance(&self) -> BoxAny;
}

#[async_trait]
impl<R> AsyncResolverObject for R
where
    R: AsyncResolver,
{
    async fn instance(&self) -> BoxAny {
        Box::new(AsyncResolver::instance(self).await) as BoxAny
    }
}
