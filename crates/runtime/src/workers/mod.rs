//! Background workers owned by the runtime.

mod persistence;

pub use persistence::PersistenceHandle;
