use crate::sim::error::SimError;
use crate::sim::scenario::Scenario;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

/// One stage of the simulation pipeline. The order is fixed and not
/// reorderable: minimization, then equilibration, then production.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Minimization,
    Equilibration,
    Production,
}

impl Phase {
    pub const ALL: [Phase; 3] = [Phase::Minimization, Phase::Equilibration, Phase::Production];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Phase::Minimization => "minimization",
            Phase::Equilibration => "equilibration",
            Phase::Production => "production",
        }
    }

    pub(crate) fn sysname_suffix(&self) -> &'static str {
        match self {
            Phase::Minimization => "_min",
            Phase::Equilibration => "_eq",
            Phase::Production => "_prod",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Minimization => write!(f, "minimization"),
            Phase::Equilibration => write!(f, "equilibration"),
            Phase::Production => write!(f, "production"),
        }
    }
}

/// Which phases of the pipeline to skip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PhasePlan {
    pub skip_minimization: bool,
    pub skip_equilibration: bool,
    pub skip_production: bool,
}

impl PhasePlan {
    pub fn skips(&self, phase: Phase) -> bool {
        match phase {
            Phase::Minimization => self.skip_minimization,
            Phase::Equilibration => self.skip_equilibration,
            Phase::Production => self.skip_production,
        }
    }
}

/// How one phase invocation ended.
///
/// Engine failure is data, not an `Err`: a failed phase aborts the rest of
/// its scenario but must not unwind the campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseStatus {
    Completed,
    Skipped,
    Failed { detail: String },
}

/// The explicit per-phase result passed between pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseOutcome {
    pub phase: Phase,
    pub directory: PathBuf,
    pub status: PhaseStatus,
}

/// Everything that happened while running one scenario. Phases the runner
/// never reached (aborted after a failure) are absent from the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub phases: Vec<PhaseOutcome>,
}

impl ScenarioOutcome {
    pub fn succeeded(&self) -> bool {
        !self
            .phases
            .iter()
            .any(|outcome| matches!(outcome.status, PhaseStatus::Failed { .. }))
    }
}

/// Launches the external engine for one phase directory, blocking until the
/// process exits. No timeout is enforced and no retry is attempted.
#[derive(Debug, Clone)]
pub struct EngineLauncher {
    program: PathBuf,
}

impl EngineLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn run_phase(&self, directory: &Path) -> PhaseStatus {
        info!(
            program = %self.program.display(),
            directory = %directory.display(),
            "launching engine"
        );
        match Command::new(&self.program)
            .arg("--path")
            .arg(directory)
            .status()
        {
            Ok(status) if status.success() => PhaseStatus::Completed,
            Ok(status) => {
                warn!(%status, "engine exited with a failure status");
                PhaseStatus::Failed {
                    detail: format!("engine exited with {status}"),
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to launch engine");
                PhaseStatus::Failed {
                    detail: format!("failed to launch engine: {e}"),
                }
            }
        }
    }
}

/// Runs the phase sequence of one scenario, fail-fast.
///
/// Skipped phases are recorded as such; the first failed phase aborts the
/// remaining ones. The caller reads success off the returned outcome.
pub fn run_scenario(
    scenario: Scenario,
    campaign_root: &Path,
    plan: &PhasePlan,
    launcher: &EngineLauncher,
) -> ScenarioOutcome {
    let mut phases = Vec::new();

    for phase in Phase::ALL {
        let directory = scenario.phase_dir(campaign_root, phase);

        if plan.skips(phase) {
            info!(%scenario, %phase, "phase skipped by request");
            phases.push(PhaseOutcome {
                phase,
                directory,
                status: PhaseStatus::Skipped,
            });
            continue;
        }

        info!(%scenario, %phase, "running phase");
        let status = launcher.run_phase(&directory);
        let failed = matches!(status, PhaseStatus::Failed { .. });
        phases.push(PhaseOutcome {
            phase,
            directory,
            status,
        });

        if failed {
            warn!(%scenario, %phase, "aborting remaining phases");
            break;
        }
    }

    ScenarioOutcome { scenario, phases }
}

/// The production files the contact analysis consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionArtifacts {
    pub trajectory: PathBuf,
    pub topology: PathBuf,
}

/// Looks for one trajectory (`.dcd`) and one topology (`.pdb`) file in the
/// production directory. The first match per extension wins, in directory
/// order; the tie-break between multiple candidates is deliberately left
/// undefined. Returns `None` when either file is absent.
pub fn locate_production_artifacts(
    production_dir: &Path,
) -> Result<Option<ProductionArtifacts>, SimError> {
    let mut trajectory = None;
    let mut topology = None;

    for entry in std::fs::read_dir(production_dir)? {
        let path = entry?.path();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("dcd") if trajectory.is_none() => trajectory = Some(path),
            Some("pdb") if topology.is_none() => topology = Some(path),
            _ => {}
        }
    }

    Ok(match (trajectory, topology) {
        (Some(trajectory), Some(topology)) => Some(ProductionArtifacts {
            trajectory,
            topology,
        }),
        _ => None,
    })
}
