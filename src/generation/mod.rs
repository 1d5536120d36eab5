//! Report generation state machine
//!
//! `ReportGenerator` drives one generation call from `loading` to a terminal
//! `success` or `error` state, publishing each transition to an optional
//! observer supplied by the caller.

mod generator;
mod status;

pub use generator::ReportGenerator;
pub use status::{GenerationPhase, GenerationStatus, StatusObserver};
