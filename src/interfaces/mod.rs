//! Presentation side: view-models and report output.

pub mod csv;
pub mod view;
