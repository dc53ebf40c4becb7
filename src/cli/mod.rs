pub mod orchestration;

pub use orchestration::{ReleaseOrchestrator, ReleaseOutcome, ReleaseSettings};
