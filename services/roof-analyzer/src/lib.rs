//! Roof analyzer service library.
//!
//! Wires the extraction and packing engines to JSON jobs and YAML
//! configuration, and holds the interactive drawing session used when a
//! user outlines a roof by hand.

pub mod config;
pub mod jobs;
pub mod session;

pub use config::AnalyzerConfig;
pub use jobs::{run_extract, run_pack, PackedRoof, PackingJob, PackingReport};
pub use session::{DrawingSession, PanelSpec, SessionError, SessionState};
