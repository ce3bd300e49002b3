//! Batch generation workflow

pub mod admission;
pub mod traits;
pub mod orchestrator;

pub use admission::{AdmissionGate, AdmissionSlot};
pub use traits::{LogProgress, ProgressSink};
pub use orchestrator::{BatchOrchestrator, UnitOutcome};
