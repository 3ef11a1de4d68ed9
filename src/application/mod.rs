//! Application layer: the reservation workflow.
//!
//! `ReservationWorkflow` parses the free-text values collected by the
//! presentation layer, computes prices and drives the store. Screens talk to
//! it and never to the store directly.

pub mod workflow;
