//! # Workflows Module
//!
//! High-level entry points that tie the foundation, the analysis engine, the
//! orchestration layer, and the report emitters together into complete
//! procedures.
//!
//! - **Contact Analysis** ([`contacts`]) - One full pass: load the
//!   topology/trajectory pair, resolve the groups, count contacts, and emit
//!   figures, the series export, and the summary.
//! - **Campaign** ([`campaign`]) - Prepare scenario directories, drive the
//!   phase pipeline through the external engine, and run the post-production
//!   contact analysis for the mixed composition.

pub mod campaign;
pub mod contacts;

use crate::core::io::dcd::DcdError;
use crate::core::io::pdb::PdbError;
use crate::engine::error::AnalysisError;
use crate::report::ReportError;
use crate::sim::error::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Failed to read topology: {0}")]
    Topology(#[from] PdbError),

    #[error("Failed to read trajectory: {0}")]
    Trajectory(#[from] DcdError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Sim(#[from] SimError),
}
