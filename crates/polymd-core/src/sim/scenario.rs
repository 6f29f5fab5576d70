use crate::sim::components::{ChainDefaults, ChainSpec, ComponentsSpec};
use crate::sim::config::EngineConfig;
use crate::sim::error::{ConfigError, SimError};
use crate::sim::runner::Phase;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

// Shared physical setup: a 5 nm cubic box at room temperature and
// physiological ionic strength.
const BOX_EDGE_NM: f64 = 5.0;
const TEMPERATURE_K: f64 = 293.15;
const IONIC_STRENGTH_M: f64 = 0.15;
const PH: f64 = 7.0;

// 100 ns of production at a 10 fs timestep, writing every 10 ps; 1 ns of
// equilibration beforehand.
const PRODUCTION_STEPS: u64 = 10_000_000;
const EQUILIBRATION_STEPS: u64 = 100_000;
const SAVE_INTERVAL_STEPS: u64 = 1_000;
const MINIMIZE_STEPS: u64 = 1_000;
const POST_MINIMIZE_STEPS: u64 = 100;
const POST_MINIMIZE_WFREQ: u64 = 100;
const RESTART_FILE: &str = "restart.chk";

const RESIDUES_FILE: &str = "polymer_residues.csv";
const POLYALLYLAMINE_FASTA: &str = "polyallylamine.fasta";
const GLUTARALDEHYDE_FASTA: &str = "glutaraldehyde.fasta";

/// One of the two shipped polymer compositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// 100% polyallylamine: 10 chains.
    Pure,
    /// 50/50 polyallylamine and glutaraldehyde: 5 chains of each. This is the
    /// composition whose production run feeds the crosslinking analysis.
    Mixed,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Pure, Scenario::Mixed];

    /// Directory name of this scenario under the campaign root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Scenario::Pure => "pure",
            Scenario::Mixed => "mixed",
        }
    }

    /// Base system name; the per-phase suffix is appended to it.
    fn sysname_base(&self) -> &'static str {
        match self {
            Scenario::Pure => "pure_polyallylamine",
            Scenario::Mixed => "mixed_paa_gta",
        }
    }

    pub fn root_dir(&self, campaign_root: &Path) -> PathBuf {
        campaign_root.join(self.dir_name())
    }

    pub fn phase_dir(&self, campaign_root: &Path, phase: Phase) -> PathBuf {
        self.root_dir(campaign_root).join(phase.dir_name())
    }

    /// The engine-parameters document for one phase of this scenario.
    pub fn phase_config(&self, phase: Phase) -> Result<EngineConfig, ConfigError> {
        let builder = EngineConfig::builder()
            .sysname(format!("{}{}", self.sysname_base(), phase.sysname_suffix()))
            .box_lengths([BOX_EDGE_NM, BOX_EDGE_NM, BOX_EDGE_NM])
            .temp(TEMPERATURE_K)
            .ionic(IONIC_STRENGTH_M)
            .ph(PH)
            .platform("CPU")
            .verbose(true);

        let builder = match phase {
            Phase::Minimization => builder
                .minimize(MINIMIZE_STEPS)
                .wfreq(POST_MINIMIZE_WFREQ)
                .steps(POST_MINIMIZE_STEPS),
            Phase::Equilibration => builder
                .wfreq(SAVE_INTERVAL_STEPS)
                .steps(EQUILIBRATION_STEPS)
                .checkpoint_restart(RESTART_FILE),
            Phase::Production => builder
                .wfreq(SAVE_INTERVAL_STEPS)
                .steps(PRODUCTION_STEPS)
                .checkpoint_restart(RESTART_FILE),
        };

        builder.build()
    }

    /// The composition manifest for this scenario.
    pub fn components(&self, input_dir: &Path) -> ComponentsSpec {
        let residues = input_dir.join(RESIDUES_FILE);
        let paa = |nmol| ChainSpec {
            nmol,
            fresidues: residues.clone(),
            ffasta: input_dir.join(POLYALLYLAMINE_FASTA),
        };

        match self {
            Scenario::Pure => ComponentsSpec::new(ChainDefaults::default())
                .with_chain("polyallylamine_chain", paa(10)),
            Scenario::Mixed => ComponentsSpec::new(ChainDefaults::default())
                .with_chain("polyallylamine_chain", paa(5))
                .with_chain(
                    "glutaraldehyde_chain",
                    ChainSpec {
                        nmol: 5,
                        fresidues: residues,
                        ffasta: input_dir.join(GLUTARALDEHYDE_FASTA),
                    },
                ),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::Pure => write!(f, "pure polyallylamine"),
            Scenario::Mixed => write!(f, "mixed polyallylamine + glutaraldehyde"),
        }
    }
}

/// Materializes the three phase directories of `scenario` under
/// `campaign_root`, each holding its engine-parameters document and the
/// composition manifest.
pub fn prepare(scenario: Scenario, campaign_root: &Path, input_dir: &Path) -> Result<(), SimError> {
    let components = scenario.components(input_dir);
    for phase in Phase::ALL {
        let dir = scenario.phase_dir(campaign_root, phase);
        fs::create_dir_all(&dir)?;
        scenario.phase_config(phase)?.write(&dir, "config.toml")?;
        components.write(&dir, "components.toml")?;
    }
    info!(
        scenario = %scenario,
        root = %scenario.root_dir(campaign_root).display(),
        "wrote phase directories"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_config_carries_the_long_run_constants() {
        let config = Scenario::Mixed.phase_config(Phase::Production).unwrap();
        assert_eq!(config.sysname, "mixed_paa_gta_prod");
        assert_eq!(config.box_lengths, [5.0, 5.0, 5.0]);
        assert_eq!(config.temp, 293.15);
        assert_eq!(config.ionic, 0.15);
        assert_eq!(config.ph, 7.0);
        assert_eq!(config.steps, 10_000_000);
        assert_eq!(config.wfreq, 1_000);
        assert_eq!(config.restart.as_deref(), Some("checkpoint"));
        assert_eq!(config.frestart.as_deref(), Some("restart.chk"));
        assert_eq!(config.minimize, None);
    }

    #[test]
    fn minimization_config_minimizes_then_barely_integrates() {
        let config = Scenario::Pure.phase_config(Phase::Minimization).unwrap();
        assert_eq!(config.sysname, "pure_polyallylamine_min");
        assert_eq!(config.minimize, Some(true));
        assert_eq!(config.minimize_steps, Some(1_000));
        assert_eq!(config.steps, 100);
        assert_eq!(config.wfreq, 100);
        assert_eq!(config.restart, None);
    }

    #[test]
    fn equilibration_runs_one_nanosecond_with_checkpointing() {
        let config = Scenario::Mixed.phase_config(Phase::Equilibration).unwrap();
        assert_eq!(config.steps, 100_000);
        assert_eq!(config.wfreq, 1_000);
        assert_eq!(config.restart.as_deref(), Some("checkpoint"));
    }

    #[test]
    fn pure_scenario_places_ten_polyallylamine_chains() {
        let components = Scenario::Pure.components(Path::new("input"));
        assert_eq!(components.system.len(), 1);
        assert_eq!(components.system["polyallylamine_chain"].nmol, 10);
    }

    #[test]
    fn mixed_scenario_places_five_chains_of_each_species() {
        let components = Scenario::Mixed.components(Path::new("input"));
        assert_eq!(components.system.len(), 2);
        assert_eq!(components.system["polyallylamine_chain"].nmol, 5);
        assert_eq!(components.system["glutaraldehyde_chain"].nmol, 5);
        assert_eq!(
            components.system["glutaraldehyde_chain"].ffasta,
            Path::new("input").join("glutaraldehyde.fasta")
        );
    }

    #[test]
    fn prepare_writes_both_documents_per_phase() {
        let dir = tempfile::tempdir().unwrap();
        prepare(Scenario::Mixed, dir.path(), Path::new("input")).unwrap();

        for phase in Phase::ALL {
            let phase_dir = Scenario::Mixed.phase_dir(dir.path(), phase);
            assert!(phase_dir.join("config.toml").is_file());
            assert!(phase_dir.join("components.toml").is_file());
        }
    }
}
