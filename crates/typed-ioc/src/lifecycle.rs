use std::fmt;

/// How long a built value lives once a resolver has produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
    /// Build once, then hand out the cached value for as long as the
    /// container holds the registration.
    Container,
    /// Build a new value on every resolution.
    #[default]
    Transient,
}

/// Which map a registration lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Sync,
    Async,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Sync => f.write_str("sync"),
            Mode::Async => f.write_str("async"),
        }
    }
}
