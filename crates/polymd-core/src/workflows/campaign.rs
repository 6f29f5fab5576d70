use crate::engine::config::ContactConfig;
use crate::engine::progress::ProgressReporter;
use crate::sim::runner::{self, EngineLauncher, Phase, PhasePlan, ScenarioOutcome};
use crate::sim::scenario::{self, Scenario};
use crate::workflows::contacts::{self, ContactReport};
use crate::workflows::WorkflowError;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Options driving one campaign invocation.
#[derive(Debug, Clone)]
pub struct CampaignOptions {
    /// Scenarios to prepare and run, in order.
    pub scenarios: Vec<Scenario>,
    pub plan: PhasePlan,
    /// Directory the scenario trees are materialized under.
    pub root: PathBuf,
    /// Directory holding the residue table and chain sequence files the
    /// composition manifests point at.
    pub input_dir: PathBuf,
    /// External engine program invoked once per phase.
    pub engine_program: PathBuf,
    /// Stop after writing the phase directories.
    pub setup_only: bool,
    /// Skip straight to the post-production contact analysis.
    pub analyze_only: bool,
}

/// What one campaign run produced.
#[derive(Debug, Clone)]
pub struct CampaignSummary {
    pub outcomes: Vec<ScenarioOutcome>,
    /// The mixed-composition contact analysis, when it ran.
    pub analysis: Option<ContactReport>,
    /// True when every executed phase completed or was skipped.
    pub success: bool,
}

/// Runs a full campaign: prepare the scenario directories, drive the phase
/// pipeline per scenario, and analyze the mixed production run.
///
/// Engine failures surface through the per-scenario outcomes, not as errors;
/// only infrastructure problems (unwritable directories, serialization) abort
/// the campaign.
#[instrument(skip_all, name = "campaign_workflow")]
pub fn run(
    options: &CampaignOptions,
    reporter: &ProgressReporter,
) -> Result<CampaignSummary, WorkflowError> {
    let mixed_selected = options.scenarios.contains(&Scenario::Mixed);

    if options.analyze_only {
        let analysis = analyze_mixed_production(&options.root, reporter);
        return Ok(CampaignSummary {
            outcomes: Vec::new(),
            analysis,
            success: true,
        });
    }

    for &scenario in &options.scenarios {
        scenario::prepare(scenario, &options.root, &options.input_dir)?;
    }
    if options.setup_only {
        info!("setup complete, skipping simulation phases");
        return Ok(CampaignSummary {
            outcomes: Vec::new(),
            analysis: None,
            success: true,
        });
    }

    let launcher = EngineLauncher::new(&options.engine_program);
    let mut outcomes = Vec::new();
    for &scenario in &options.scenarios {
        outcomes.push(runner::run_scenario(
            scenario,
            &options.root,
            &options.plan,
            &launcher,
        ));
    }
    let success = outcomes.iter().all(ScenarioOutcome::succeeded);

    let analysis = if mixed_selected && !options.plan.skip_production {
        analyze_mixed_production(&options.root, reporter)
    } else {
        None
    };

    Ok(CampaignSummary {
        outcomes,
        analysis,
        success,
    })
}

/// Locates the mixed scenario's production artifacts and runs the contact
/// analysis on them. Every failure path is soft: a missing or unreadable
/// artifact pair, or a failing analysis, logs a warning and yields `None`.
fn analyze_mixed_production(
    campaign_root: &Path,
    reporter: &ProgressReporter,
) -> Option<ContactReport> {
    let production_dir = Scenario::Mixed.phase_dir(campaign_root, Phase::Production);

    let artifacts = match runner::locate_production_artifacts(&production_dir) {
        Ok(Some(artifacts)) => artifacts,
        Ok(None) => {
            warn!(
                directory = %production_dir.display(),
                "could not find a trajectory (.dcd) and topology (.pdb) pair, skipping contact analysis"
            );
            return None;
        }
        Err(e) => {
            warn!(
                directory = %production_dir.display(),
                error = %e,
                "could not scan production directory, skipping contact analysis"
            );
            return None;
        }
    };

    let prefix = production_dir.join("crosslinking_analysis");
    match contacts::run(
        &artifacts.topology,
        &artifacts.trajectory,
        &ContactConfig::default(),
        &prefix,
        reporter,
    ) {
        Ok(report) => Some(report),
        Err(e) => {
            warn!(error = %e, "contact analysis failed");
            None
        }
    }
}
