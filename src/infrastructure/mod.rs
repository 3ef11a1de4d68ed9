//! Storage adapters implementing [`ReservationStore`](crate::domain::ports::ReservationStore).

pub mod in_memory;
pub mod sqlite;
