use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum AnalysisError {
    #[error("Contact cutoff must be positive (got {0} nm)")]
    NonPositiveCutoff(f64),

    #[error("Trajectory holds no frames")]
    EmptyTrajectory,

    #[error("Topology has {topology} atoms but trajectory frames carry {trajectory}")]
    AtomCountMismatch { topology: usize, trajectory: usize },
}
