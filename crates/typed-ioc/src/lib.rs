//! A type-indexed dependency container.
//!
//! Factories are registered under the type they produce, either as plain
//! closures or as closures returning a future, with a [`Lifecycle`] that
//! decides whether the built value is shared ([`Lifecycle::Container`]) or
//! rebuilt on every resolution ([`Lifecycle::Transient`]).
//!
//! ```
//! use std::sync::Arc;
//! use typed_ioc::{Container, Lifecycle};
//!
//! struct Db;
//!
//! let container = Container::new();
//! container.register(Lifecycle::Container, || Arc::new(Db));
//!
//! let a: Arc<Db> = container.get().unwrap();
//! let b: Arc<Db> = container.get().unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```
//!
//! Wiring mistakes (registering a type twice, resolving an async-only type
//! from sync code) panic. The `try_*` methods report them as [`Error`]
//! instead.

mod async_resolver;
pub use async_resolver::{AsyncContainerResolver, AsyncTransientResolver};
mod deferred;
pub use deferred::Deferred;
mod error;
pub use error::Error;
mod helpers;
mod key;
pub use key::{key_of, Key};
mod lifecycle;
pub use lifecycle::{Lifecycle, Mode};
mod lock;
pub use lock::{AsyncLock, BlockingLock};
mod logger;
pub use logger::{Logger, NoopLogger, TracingLogger};
mod registry;
mod resolver;
pub use resolver::{AsyncResolver, Resolvable, SyncResolver};
mod sync_resolver;
pub use sync_resolver::{SyncContainerResolver, SyncTransientResolver};

pub use async_trait::async_trait;
pub type Ref<T> = std::sync::Arc<T>;

use registry::{Entry, Registry};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

#[track_caller]
fn fatal<T>(result: Result<T, Error>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

/// A registry of resolvers keyed by type.
///
/// Cloning is cheap and every clone shares the same registrations.
#[derive(Debug, Clone)]
pub struct Container {
    registry: Arc<Registry>,
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    /// An empty container logging through [`TracingLogger`].
    pub fn new() -> Self {
        Self::with_logger(TracingLogger::default())
    }

    pub fn with_logger<L>(logger: L) -> Self
    where
        L: Logger + 'static,
    {
        Self {
            registry: Arc::new(Registry::new(Arc::new(logger))),
        }
    }

    pub fn build() -> ContainerBuilder {
        ContainerBuilder {
            registry: Registry::new(Arc::new(TracingLogger::default())),
        }
    }

    pub fn configure<F>(config: F) -> Self
    where
        F: FnOnce(&mut ContainerBuilder),
    {
        let mut builder = Self::build();

        config(&mut builder);

        builder.finalize()
    }

    /// Registers a synchronous factory for `T`.
    ///
    /// # Panics
    /// Panics if `T` is already registered, sync or async.
    #[track_caller]
    pub fn register<T, F>(&self, lifecycle: Lifecycle, build: F)
    where
        T: Resolvable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        fatal(self.try_register(lifecycle, false, build))
    }

    /// Registers an asynchronous factory for `T`. Such a type can only be
    /// resolved through [`Container::get_async`].
    ///
    /// # Panics
    /// Panics if `T` is already registered, sync or async.
    #[track_caller]
    pub fn register_async<T, F, Fut>(&self, lifecycle: Lifecycle, build: F)
    where
        T: Resolvable,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        fatal(self.try_register_async(lifecycle, false, build))
    }

    /// Registers a synchronous factory for `T`, dropping any previous
    /// registration of `T` together with its cached value.
    pub fn replace<T, F>(&self, lifecycle: Lifecycle, build: F)
    where
        T: Resolvable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        fatal(self.try_register(lifecycle, true, build))
    }

    pub fn replace_async<T, F, Fut>(&self, lifecycle: Lifecycle, build: F)
    where
        T: Resolvable,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        fatal(self.try_register_async(lifecycle, true, build))
    }

    pub fn try_register<T, F>(&self, lifecycle: Lifecycle, with_replacement: bool, build: F) -> Result<(), Error>
    where
        T: Resolvable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.registry
            .insert(Key::of::<T>(), Entry::from_sync(lifecycle, build), with_replacement)
    }

    pub fn try_register_async<T, F, Fut>(
        &self,
        lifecycle: Lifecycle,
        with_replacement: bool,
        build: F,
    ) -> Result<(), Error>
    where
        T: Resolvable,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        self.registry
            .insert(Key::of::<T>(), Entry::from_async(lifecycle, build), with_replacement)
    }

    /// Registers an already built value. Every resolution returns a clone.
    ///
    /// # Panics
    /// Panics if `T` is already registered.
    pub fn register_instance<T>(&self, value: T)
    where
        T: Resolvable,
    {
        self.register(Lifecycle::Transient, move || value.clone())
    }

    /// Registers a custom resolver under its output type.
    ///
    /// # Panics
    /// Panics if the output type is already registered.
    pub fn register_resolver<R>(&self, resolver: R)
    where
        R: SyncResolver,
    {
        fatal(
            self.registry
                .insert(Key::of::<R::Output>(), Entry::Sync(Arc::new(resolver)), false),
        )
    }

    /// # Panics
    /// Panics if the output type is already registered.
    pub fn register_async_resolver<R>(&self, resolver: R)
    where
        R: AsyncResolver,
    {
        fatal(
            self.registry
                .insert(Key::of::<R::Output>(), Entry::Async(Arc::new(resolver)), false),
        )
    }

    /// Removes the registration of `T`. Returns `false` if there was none.
    pub fn unregister<T>(&self) -> bool
    where
        T: 'static,
    {
        self.registry.remove(Key::of::<T>())
    }

    pub fn contains<T>(&self) -> bool
    where
        T: 'static,
    {
        self.mode_of::<T>().is_some()
    }

    pub fn mode_of<T>(&self) -> Option<Mode>
    where
        T: 'static,
    {
        self.registry.mode_of(Key::of::<T>())
    }

    pub fn keys(&self) -> Vec<Key> {
        self.registry.keys()
    }

    /// Resolves `T` from a synchronous call site. Returns `None` if `T` was
    /// never registered.
    ///
    /// # Panics
    /// Panics if `T` is registered with an async factory: a sync call site
    /// cannot wait for it. Use [`Container::try_get`] to get that case as an
    /// [`Error::AsyncOnly`] instead.
    #[track_caller]
    pub fn get<T>(&self) -> Option<T>
    where
        T: Resolvable,
    {
        fatal(self.try_get())
    }

    pub fn try_get<T>(&self) -> Result<Option<T>, Error>
    where
        T: Resolvable,
    {
        self.registry.get()
    }

    /// Resolves `T` from an async call site. Both sync and async
    /// registrations are visible here.
    pub async fn get_async<T>(&self) -> Option<T>
    where
        T: Resolvable,
    {
        fatal(self.try_get_async().await)
    }

    pub async fn try_get_async<T>(&self) -> Result<Option<T>, Error>
    where
        T: Resolvable,
    {
        self.registry.get_async().await
    }

    /// Polls [`Container::get_async`], yielding to the scheduler between
    /// attempts, until `T` is registered.
    ///
    /// There is no timeout; race it against one or use
    /// [`Container::wait_for_resolve_timeout`].
    pub async fn wait_for_resolve<T>(&self) -> T
    where
        T: Resolvable,
    {
        loop {
            match self.get_async::<T>().await {
                Some(instance) => return instance,
                None => tokio::task::yield_now().await,
            }
        }
    }

    /// Like [`Container::wait_for_resolve`] but gives up after `timeout`.
    pub async fn wait_for_resolve_timeout<T>(&self, timeout: Duration) -> Option<T>
    where
        T: Resolvable,
    {
        tokio::time::timeout(timeout, self.wait_for_resolve()).await.ok()
    }

    pub fn deferred<T>(&self) -> Deferred<T>
    where
        T: Resolvable,
    {
        Deferred::new(self.clone())
    }
}

#[derive(Debug)]
pub struct ContainerBuilder {
    registry: Registry,
}

impl ContainerBuilder {
    pub fn logger<L>(&mut self, logger: L) -> &mut Self
    where
        L: Logger + 'static,
    {
        self.registry.set_logger(Arc::new(logger));
        self
    }

    /// # Panics
    /// Panics if `T` is already registered.
    pub fn register<T, F>(&mut self, lifecycle: Lifecycle, build: F) -> &mut Self
    where
        T: Resolvable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        fatal(
            self.registry
                .insert(Key::of::<T>(), Entry::from_sync(lifecycle, build), false),
        );
        self
    }

    /// # Panics
    /// Panics if `T` is already registered.
    pub fn register_async<T, F, Fut>(&mut self, lifecycle: Lifecycle, build: F) -> &mut Self
    where
        T: Resolvable,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        fatal(
            self.registry
                .insert(Key::of::<T>(), Entry::from_async(lifecycle, build), false),
        );
        self
    }

    pub fn register_instance<T>(&mut self, value: T) -> &mut Self
    where
        T: Resolvable,
    {
        self.register(Lifecycle::Transient, move || value.clone())
    }

    pub fn finalize(self) -> Container {
        Container {
            registry: Arc::new(self.registry),
        }
    }
}
