use crate::async_resolver::{AsyncContainerResolver, AsyncTransientResolver};
use crate::error::Error;
use crate::helpers::unbox;
use crate::key::Key;
use crate::lifecycle::{Lifecycle, Mode};
use crate::logger::Logger;
use crate::resolver::{AsyncResolverObject, Resolvable, SyncResolverObject};
use crate::sync_resolver::{SyncContainerResolver, SyncTransientResolver};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) enum Entry {
    Sync(Arc<dyn SyncResolverObject>),
    Async(Arc<dyn AsyncResolverObject>),
}

impl Entry {
    pub(crate) fn from_sync<T, F>(lifecycle: Lifecycle, build: F) -> Self
    where
        T: Resolvable,
        F: Fn() -> T + Send + Sync + 'static,
    {
        let resolver: Arc<dyn SyncResolverObject> = match lifecycle {
            Lifecycle::Container => Arc::new(SyncContainerResolver::new(build)),
            Lifecycle::Transient => Arc::new(SyncTransientResolver::new(build)),
        };
        Entry::Sync(resolver)
    }

    pub(crate) fn from_async<T, F, Fut>(lifecycle: Lifecycle, build: F) -> Self
    where
        T: Resolvable,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let resolver: Arc<dyn AsyncResolverObject> = match lifecycle {
            Lifecycle::Container => Arc::new(AsyncContainerResolver::new(build)),
            Lifecycle::Transient => Arc::new(AsyncTransientResolver::new(build)),
        };
        Entry::Async(resolver)
    }

    fn mode(&self) -> Mode {
        match self {
            Entry::Sync(_) => Mode::Sync,
            Entry::Async(_) => Mode::Async,
        }
    }
}

#[derive(Default)]
struct Entries {
    sync_entries: BTreeMap<Key, Arc<dyn SyncResolverObject>>,
    async_entries: BTreeMap<Key, Arc<dyn AsyncResolverObject>>,
}

impl Entries {
    fn mode_of(&self, key: &Key) -> Option<Mode> {
        if self.sync_entries.contains_key(key) {
            Some(Mode::Sync)
        } else if self.async_entries.contains_key(key) {
            Some(Mode::Async)
        } else {
            None
        }
    }

    fn remove(&mut self, key: &Key) -> bool {
        let from_sync = self.sync_entries.remove(key).is_some();
        let from_async = self.async_entries.remove(key).is_some();
        from_sync || from_async
    }
}

/// The two key → resolver maps behind a [`crate::Container`].
///
/// Inserts and removals take the write side of a single lock over both maps,
/// so a key is never present in both. Lookups take the read side just long
/// enough to clone the resolver out; resolution itself runs unlocked and is
/// serialised per key by the resolver's own guard.
pub(crate) struct Registry {
    entries: RwLock<Entries>,
    logger: Arc<dyn Logger>,
}

impl Registry {
    pub(crate) fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            entries: RwLock::new(Entries::default()),
            logger,
        }
    }

    pub(crate) fn set_logger(&mut self, logger: Arc<dyn Logger>) {
        self.logger = logger;
    }

    fn log<F>(&self, msg: F)
    where
        F: FnOnce() -> String,
    {
        if self.logger.enabled() {
            self.logger.send(&msg());
        }
    }

    pub(crate) fn insert(&self, key: Key, entry: Entry, with_replacement: bool) -> Result<(), Error> {
        let mode = entry.mode();
        {
            let mut entries = self.entries.write();
            if let Some(existing) = entries.mode_of(&key) {
                if !with_replacement {
                    drop(entries);
                    self.log(|| format!("failed to register {}, already registered {}", key, existing));
                    return Err(Error::AlreadyRegistered {
                        type_name: key.type_name(),
                        mode: existing,
                    });
                }
                entries.remove(&key);
            }
            match entry {
                Entry::Sync(resolver) => {
                    entries.sync_entries.insert(key, resolver);
                }
                Entry::Async(resolver) => {
                    entries.async_entries.insert(key, resolver);
                }
            }
        }
        self.log(|| format!("type: {} registered {} successfully", key, mode));
        Ok(())
    }

    pub(crate) fn remove(&self, key: Key) -> bool {
        let removed = self.entries.write().remove(&key);
        if removed {
            self.log(|| format!("type: {} unregistered", key));
        }
        removed
    }

    pub(crate) fn mode_of(&self, key: Key) -> Option<Mode> {
        self.entries.read().mode_of(&key)
    }

    pub(crate) fn keys(&self) -> Vec<Key> {
        let entries = self.entries.read();
        entries
            .sync_entries
            .keys()
            .chain(entries.async_entries.keys())
            .copied()
            .collect()
    }

    fn lookup(&self, key: &Key, prefer: Mode) -> Option<Entry> {
        let entries = self.entries.read();
        let from_sync = || entries.sync_entries.get(key).cloned().map(Entry::Sync);
        let from_async = || entries.async_entries.get(key).cloned().map(Entry::Async);
        match prefer {
            Mode::Sync => from_sync().or_else(from_async),
            Mode::Async => from_async().or_else(from_sync),
        }
    }

    pub(crate) fn get<T>(&self) -> Result<Option<T>, Error>
    where
        T: Resolvable,
    {
        let key = Key::of::<T>();
        let instance = match self.lookup(&key, Mode::Sync) {
            Some(Entry::Sync(resolver)) => Some(unbox::<T>(key, resolver.instance())?),
            Some(Entry::Async(_)) => {
                self.log(|| format!("type {} is registered as async, but sync access is attempted", key));
                return Err(Error::AsyncOnly(key.type_name()));
            }
            None => None,
        };
        self.log_resolution(key, Mode::Sync, instance.is_some());
        Ok(instance)
    }

    pub(crate) async fn get_async<T>(&self) -> Result<Option<T>, Error>
    where
        T: Resolvable,
    {
        let key = Key::of::<T>();
        let instance = match self.lookup(&key, Mode::Async) {
            Some(Entry::Async(resolver)) => Some(unbox::<T>(key, resolver.instance().await)?),
            // sync resolvers never suspend
            Some(Entry::Sync(resolver)) => Some(unbox::<T>(key, resolver.instance())?),
            None => None,
        };
        self.log_resolution(key, Mode::Async, instance.is_some());
        Ok(instance)
    }

    fn log_resolution(&self, key: Key, mode: Mode, found: bool) {
        if found {
            self.log(|| format!("instance of {} {} resolved successfully", key, mode));
        } else {
            self.log(|| format!("no instance of {} registered for {}", key, mode));
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("Registry")
            .field("sync_entries", &entries.sync_entries.keys().collect::<Vec<_>>())
            .field("async_entries", &entries.async_entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
