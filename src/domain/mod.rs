//! Domain types and the storage port they are persisted through.

pub mod money;
pub mod ports;
pub mod reservation;
