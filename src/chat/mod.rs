//! Chat turn orchestration.
//!
//! Two independent extraction paths run per turn: the direct path over the
//! user's message, and the confirmation scan over the assistant's reply.
//! They share the extraction primitives but stay uncoordinated by design.

mod orchestrator;
mod scanner;
mod turn;

pub use orchestrator::{ExtractionOrchestrator, TurnExtraction};
pub use scanner::{ConfirmationScanner, ScanOutcome};
pub use turn::{ChatTurnProcessor, TurnOutcome, TRANSPORT_APOLOGY};
