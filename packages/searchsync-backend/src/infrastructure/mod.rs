//! Backend adapters implementing the [`SearchEngine`] port.
//!
//! [`SearchEngine`]: crate::SearchEngine

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "memory")]
pub use memory::MemoryEngine;
