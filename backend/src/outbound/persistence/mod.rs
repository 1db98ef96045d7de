//! Store adapters behind the domain persistence ports.

mod memory;

pub use memory::MemoryStore;
