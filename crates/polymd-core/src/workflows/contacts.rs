use crate::core::io::dcd::DcdFile;
use crate::core::io::pdb::PdbFile;
use crate::engine::config::ContactConfig;
use crate::engine::contacts::{self, ContactAnalysis};
use crate::engine::error::AnalysisError;
use crate::engine::groups;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::report::{figures, series, summary};
use crate::workflows::WorkflowError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// Everything produced by one contact-analysis pass.
#[derive(Debug, Clone)]
pub struct ContactReport {
    pub analysis: ContactAnalysis,
    /// Figure files actually written (time series, histogram).
    pub figures: Vec<PathBuf>,
    pub series_csv: PathBuf,
    pub summary: PathBuf,
}

fn prefixed(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(prefix.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Runs one full contact analysis: load the topology/trajectory pair, resolve
/// the atom groups, count contacts frame by frame, and emit every derived
/// output under `output_prefix`.
#[instrument(skip_all, name = "contact_workflow")]
pub fn run(
    topology_path: &Path,
    trajectory_path: &Path,
    config: &ContactConfig,
    output_prefix: &Path,
    reporter: &ProgressReporter,
) -> Result<ContactReport, WorkflowError> {
    config.validate().map_err(WorkflowError::Analysis)?;

    reporter.report(Progress::PhaseStart { name: "Loading" });
    info!("Analyzing trajectory: {}", trajectory_path.display());
    let topology = PdbFile::read_from_path(topology_path)?;
    let trajectory = DcdFile::read_from_path(trajectory_path)?;
    reporter.report(Progress::PhaseFinish);

    if topology.atom_count() != trajectory.atom_count() {
        return Err(AnalysisError::AtomCountMismatch {
            topology: topology.atom_count(),
            trajectory: trajectory.atom_count(),
        }
        .into());
    }

    let resolved = groups::resolve(&topology, &config.group_a_label, &config.group_b_label);
    info!(
        "Number of {} atoms: {}",
        config.group_a_label,
        resolved.group_a.len()
    );
    info!(
        "Number of {} atoms: {}",
        config.group_b_label,
        resolved.group_b.len()
    );
    info!("Contact cutoff: {} nm", config.cutoff_nm);

    reporter.report(Progress::PhaseStart {
        name: "Counting contacts",
    });
    let analysis = contacts::run(&trajectory, resolved, config, reporter)?;
    reporter.report(Progress::PhaseFinish);

    reporter.report(Progress::PhaseStart {
        name: "Writing report",
    });
    let timeseries =
        figures::contact_timeseries(&prefixed(output_prefix, "_contacts.png"), &analysis)?;
    let histogram =
        figures::contact_histogram(&prefixed(output_prefix, "_contact_histogram.png"), &analysis)?;

    let series_csv = prefixed(output_prefix, "_contacts_per_frame.csv");
    series::write_series_csv(&series_csv, &analysis.series)?;

    let summary_path = prefixed(output_prefix, "_summary.txt");
    summary::write_summary(
        &summary_path,
        &analysis,
        &config.group_a_label,
        &config.group_b_label,
    )?;
    reporter.report(Progress::PhaseFinish);

    info!("Saved summary: {}", summary_path.display());

    Ok(ContactReport {
        analysis,
        figures: vec![timeseries, histogram],
        series_csv,
        summary: summary_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::groups::ResolutionMethod;
    use std::fs;
    use std::path::Path;

    fn record(payload: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out.extend_from_slice(payload);
        out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
        out
    }

    /// A minimal two-atom, two-frame DCD without unit-cell records. The atoms
    /// sit 5 A apart in the first frame and 8 A apart in the second.
    fn write_test_dcd(path: &Path) {
        let mut header = Vec::new();
        header.extend_from_slice(b"CORD");
        let mut icntrl = [0i32; 20];
        icntrl[0] = 2;
        icntrl[19] = 24;
        for value in icntrl {
            header.extend_from_slice(&value.to_le_bytes());
        }

        let mut title = Vec::new();
        title.extend_from_slice(&1i32.to_le_bytes());
        title.extend_from_slice(&[b' '; 80]);

        let axis = |values: [f32; 2]| {
            let mut payload = Vec::new();
            for value in values {
                payload.extend_from_slice(&value.to_le_bytes());
            }
            record(&payload)
        };

        let mut bytes = Vec::new();
        bytes.extend(record(&header));
        bytes.extend(record(&title));
        bytes.extend(record(&2i32.to_le_bytes()));
        // Frame 1: atoms at x = 0 and x = 5.
        bytes.extend(axis([0.0, 5.0]));
        bytes.extend(axis([0.0, 0.0]));
        bytes.extend(axis([0.0, 0.0]));
        // Frame 2: atoms at x = 0 and x = 8.
        bytes.extend(axis([0.0, 8.0]));
        bytes.extend(axis([0.0, 0.0]));
        bytes.extend(axis([0.0, 0.0]));

        fs::write(path, bytes).unwrap();
    }

    fn write_test_pdb(path: &Path) {
        let body = "\
ATOM      1  C1  PAA A   1       0.000   0.000   0.000  1.00  0.00           C
ATOM      2  C1  GTA B   2       5.000   0.000   0.000  1.00  0.00           C
END
";
        fs::write(path, body).unwrap();
    }

    #[test]
    fn end_to_end_pass_writes_every_output() {
        let dir = tempfile::tempdir().unwrap();
        let traj = dir.path().join("run.dcd");
        let top = dir.path().join("run.pdb");
        write_test_dcd(&traj);
        write_test_pdb(&top);

        let prefix = dir.path().join("analysis");
        let report = run(
            &top,
            &traj,
            &ContactConfig::default(),
            &prefix,
            &ProgressReporter::new(),
        )
        .unwrap();

        // 5 A = 0.5 nm is a contact at the 0.6 nm cutoff; 8 A = 0.8 nm is not.
        assert_eq!(report.analysis.series.counts, vec![1, 0]);
        assert_eq!(report.analysis.series.fractions, vec![1.0, 0.0]);
        assert_eq!(report.analysis.groups.method, ResolutionMethod::ByLabel);

        assert!(report.summary.is_file());
        assert!(report.series_csv.is_file());
        for figure in &report.figures {
            assert!(figure.is_file());
        }
        assert_eq!(report.summary, dir.path().join("analysis_summary.txt"));
        assert_eq!(
            report.series_csv,
            dir.path().join("analysis_contacts_per_frame.csv")
        );
    }

    #[test]
    fn atom_count_mismatch_is_rejected_before_counting() {
        let dir = tempfile::tempdir().unwrap();
        let traj = dir.path().join("run.dcd");
        let top = dir.path().join("run.pdb");
        write_test_dcd(&traj);
        // Topology with a single atom against two-atom frames.
        fs::write(
            &top,
            "ATOM      1  C1  PAA A   1       0.000   0.000   0.000  1.00  0.00           C\n",
        )
        .unwrap();

        let err = run(
            &top,
            &traj,
            &ContactConfig::default(),
            &dir.path().join("analysis"),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Analysis(AnalysisError::AtomCountMismatch {
                topology: 1,
                trajectory: 2,
            })
        ));
    }

    #[test]
    fn missing_trajectory_file_is_a_typed_error() {
        let dir = tempfile::tempdir().unwrap();
        let top = dir.path().join("run.pdb");
        write_test_pdb(&top);

        let err = run(
            &top,
            &dir.path().join("missing.dcd"),
            &ContactConfig::default(),
            &dir.path().join("analysis"),
            &ProgressReporter::new(),
        )
        .unwrap_err();
        assert!(matches!(err, WorkflowError::Trajectory(_)));
    }
}
