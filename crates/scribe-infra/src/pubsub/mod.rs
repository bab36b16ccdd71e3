//! Cache signal bus adapters.

mod memory;

pub use memory::InMemorySignalBus;
