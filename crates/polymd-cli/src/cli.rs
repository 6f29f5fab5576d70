use clap::{Args, Parser, Subcommand, ValueEnum};
use polymd::sim::scenario::Scenario;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "polymd - configure, launch, and analyze coarse-grained polymer mixture simulations.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Prepare scenario directories and drive the external engine through the
    /// minimization, equilibration, and production phases.
    Run(RunArgs),
    /// Compute inter-chain contacts from a trajectory/topology pair.
    Analyze(AnalyzeArgs),
}

/// Which of the shipped scenarios to operate on.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioArg {
    /// 100% polyallylamine.
    Pure,
    /// 50% polyallylamine + 50% glutaraldehyde.
    Mixed,
    /// Both scenarios, pure first.
    Both,
}

impl ScenarioArg {
    pub fn scenarios(&self) -> Vec<Scenario> {
        match self {
            ScenarioArg::Pure => vec![Scenario::Pure],
            ScenarioArg::Mixed => vec![Scenario::Mixed],
            ScenarioArg::Both => vec![Scenario::Pure, Scenario::Mixed],
        }
    }
}

impl std::fmt::Display for ScenarioArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScenarioArg::Pure => "pure",
            ScenarioArg::Mixed => "mixed",
            ScenarioArg::Both => "both",
        };
        write!(f, "{name}")
    }
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Which scenario to run.
    #[arg(long, value_enum, default_value_t = ScenarioArg::Both)]
    pub scenario: ScenarioArg,

    /// Root directory the scenario trees are materialized under.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Directory holding the residue table and chain sequence files.
    #[arg(long, value_name = "DIR", default_value = "input")]
    pub input_dir: PathBuf,

    /// External engine program invoked once per phase.
    #[arg(long, value_name = "PROGRAM", default_value = "calvados")]
    pub engine: PathBuf,

    /// Skip the minimization phase.
    #[arg(long)]
    pub skip_minimization: bool,

    /// Skip the equilibration phase.
    #[arg(long)]
    pub skip_equilibration: bool,

    /// Skip the production phase.
    #[arg(long)]
    pub skip_production: bool,

    /// Only write the configuration documents, do not launch the engine.
    #[arg(long, conflicts_with = "analyze_only")]
    pub setup_only: bool,

    /// Only run the contact analysis on an existing mixed production run.
    #[arg(long)]
    pub analyze_only: bool,
}

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to the trajectory file (.dcd).
    #[arg(long, required = true, value_name = "PATH")]
    pub traj: PathBuf,

    /// Path to the topology file (.pdb).
    #[arg(long, required = true, value_name = "PATH")]
    pub top: PathBuf,

    /// Contact cutoff in nanometers.
    #[arg(long, value_name = "NM", default_value_t = 0.6)]
    pub cutoff: f64,

    /// Prefix for output files.
    #[arg(
        short,
        long,
        value_name = "PREFIX",
        default_value = "crosslinking_analysis"
    )]
    pub output: PathBuf,

    /// Residue name selecting group A.
    #[arg(long, value_name = "RESNAME", default_value = "PAA")]
    pub group_a: String,

    /// Residue name selecting group B.
    #[arg(long, value_name = "RESNAME", default_value = "GTA")]
    pub group_b: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_definitions_are_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn scenario_selection_expands_in_order() {
        assert_eq!(ScenarioArg::Pure.scenarios(), vec![Scenario::Pure]);
        assert_eq!(
            ScenarioArg::Both.scenarios(),
            vec![Scenario::Pure, Scenario::Mixed]
        );
    }

    #[test]
    fn analyze_defaults_match_the_shipped_analysis() {
        let cli = Cli::parse_from(["polymd", "analyze", "--traj", "a.dcd", "--top", "a.pdb"]);
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.cutoff, 0.6);
                assert_eq!(args.group_a, "PAA");
                assert_eq!(args.group_b, "GTA");
                assert_eq!(args.output, PathBuf::from("crosslinking_analysis"));
            }
            _ => panic!("expected the analyze subcommand"),
        }
    }
}
