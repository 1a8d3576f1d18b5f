// remember/src/lib.rs

//! Memoization helpers over a pluggable cache store: `remember`
//! (get-or-compute-and-store) and `forget` (get-then-delete), for a grouped
//! object cache and for the reduced transient store shape.

pub mod ports;
pub mod usecases;

pub use ports::{ObjectCache, TransientStore, TransientValue};
pub use usecases::{RememberCache, TransientCache};
