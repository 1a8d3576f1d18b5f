// shared/src/lib.rs

use std::time::Duration;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("backend: {0}")]
    Backend(String),
    #[error("producer: {0}")]
    Producer(String),
    #[error("internal: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Time-to-live in whole seconds. Zero means "keep the entry as long as the
/// backend allows", i.e. no explicit expiry requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlSecs(pub u64);

impl TtlSecs {
    pub const UNBOUNDED: TtlSecs = TtlSecs(0);

    pub fn as_duration(self) -> Option<Duration> {
        (self.0 > 0).then(|| Duration::from_secs(self.0))
    }
}
