use crate::cli::AnalyzeArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use polymd::engine::config::ContactConfig;
use polymd::engine::groups::ResolutionMethod;
use polymd::engine::progress::ProgressReporter;
use polymd::workflows::contacts;
use tracing::info;

pub fn run(args: AnalyzeArgs) -> Result<()> {
    // Missing inputs are reported plainly and terminate the command early,
    // before any computation and without creating output files.
    if !args.traj.exists() {
        eprintln!("Error: Trajectory file not found: {}", args.traj.display());
        return Ok(());
    }
    if !args.top.exists() {
        eprintln!("Error: Topology file not found: {}", args.top.display());
        return Ok(());
    }

    let config = ContactConfig {
        cutoff_nm: args.cutoff,
        group_a_label: args.group_a,
        group_b_label: args.group_b,
    };

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.callback());

    let report = contacts::run(&args.top, &args.traj, &config, &args.output, &reporter)?;
    info!("analysis complete");

    if report.analysis.groups.method == ResolutionMethod::MidpointFallback {
        println!("Note: residue labels were not found; atoms were split at the midpoint.");
    }
    for figure in &report.figures {
        println!("Saved figure: {}", figure.display());
    }
    println!("Saved series: {}", report.series_csv.display());
    println!("Saved summary: {}", report.summary.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AnalyzeArgs;
    use std::path::PathBuf;

    fn args_with(traj: PathBuf, top: PathBuf, output: PathBuf) -> AnalyzeArgs {
        AnalyzeArgs {
            traj,
            top,
            cutoff: 0.6,
            output,
            group_a: "PAA".to_string(),
            group_b: "GTA".to_string(),
        }
    }

    #[test]
    fn missing_trajectory_terminates_early_without_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let top = dir.path().join("present.pdb");
        std::fs::write(&top, "END\n").unwrap();

        let prefix = dir.path().join("analysis");
        let result = run(args_with(dir.path().join("missing.dcd"), top, prefix.clone()));

        assert!(result.is_ok());
        assert!(!prefix.with_file_name("analysis_summary.txt").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn missing_topology_terminates_early_without_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let traj = dir.path().join("present.dcd");
        std::fs::write(&traj, b"not really a dcd").unwrap();

        let result = run(args_with(
            traj,
            dir.path().join("missing.pdb"),
            dir.path().join("analysis"),
        ));

        assert!(result.is_ok());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
