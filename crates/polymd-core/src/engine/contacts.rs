use crate::core::models::frame::Frame;
use crate::core::models::trajectory::Trajectory;
use crate::core::utils::geometry::{angstroms_to_nanometers, pair_distance};
use crate::engine::config::ContactConfig;
use crate::engine::error::AnalysisError;
use crate::engine::groups::GroupResolution;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::stats::SeriesStats;
use tracing::{info, instrument};

/// Per-frame contact series over a whole trajectory, in frame order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSeries {
    /// Number of cross-group pairs below the cutoff, one entry per frame.
    pub counts: Vec<usize>,
    /// Counts normalized by the maximum possible pair count; zero when either
    /// group is empty.
    pub fractions: Vec<f64>,
}

impl ContactSeries {
    pub fn frame_count(&self) -> usize {
        self.counts.len()
    }
}

/// The full derived dataset of one analysis pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactAnalysis {
    pub cutoff_nm: f64,
    pub groups: GroupResolution,
    pub series: ContactSeries,
    pub count_stats: SeriesStats,
    pub fraction_stats: SeriesStats,
}

impl ContactAnalysis {
    pub fn frame_count(&self) -> usize {
        self.series.frame_count()
    }
}

/// Number of cross-group pairs in `frame` whose distance falls strictly below
/// `cutoff_nm`.
///
/// Every (a, b) pair is tested through the minimum-image convention of the
/// frame's unit cell; native Angstrom distances are converted to nanometers
/// before the comparison. Pairs are counted without deduplication by chain
/// membership, which is the intended metric definition.
pub fn count_frame_contacts(
    frame: &Frame,
    group_a: &[usize],
    group_b: &[usize],
    cutoff_nm: f64,
) -> usize {
    let cell = frame.unit_cell.as_ref();
    let mut contacts = 0;
    for &a in group_a {
        for &b in group_b {
            let distance = pair_distance(&frame.positions[a], &frame.positions[b], cell);
            if angstroms_to_nanometers(distance) < cutoff_nm {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Runs the contact pass over every frame, strictly in trajectory order.
///
/// Two-pass design: the per-frame series is buffered in full, then the
/// aggregates are reduced over it, since the buffered series is also what the
/// histogram and time-series figures are rendered from.
#[instrument(skip_all, name = "contact_analysis")]
pub fn run(
    trajectory: &Trajectory,
    groups: GroupResolution,
    config: &ContactConfig,
    reporter: &ProgressReporter,
) -> Result<ContactAnalysis, AnalysisError> {
    config.validate()?;
    if trajectory.frame_count() == 0 {
        return Err(AnalysisError::EmptyTrajectory);
    }

    let pair_count = groups.pair_count();
    info!(
        frames = trajectory.frame_count(),
        group_a = groups.group_a.len(),
        group_b = groups.group_b.len(),
        cutoff_nm = config.cutoff_nm,
        "counting inter-chain contacts"
    );

    let mut series = ContactSeries::default();
    reporter.report(Progress::TaskStart {
        total_steps: trajectory.frame_count() as u64,
    });
    for frame in trajectory.frames() {
        let count = count_frame_contacts(frame, &groups.group_a, &groups.group_b, config.cutoff_nm);
        series.counts.push(count);
        let fraction = if pair_count > 0 {
            count as f64 / pair_count as f64
        } else {
            0.0
        };
        series.fractions.push(fraction);
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    let counts_f64: Vec<f64> = series.counts.iter().map(|&c| c as f64).collect();
    // Both series are non-empty here: the trajectory holds at least one frame.
    let count_stats =
        SeriesStats::from_values(&counts_f64).ok_or(AnalysisError::EmptyTrajectory)?;
    let fraction_stats =
        SeriesStats::from_values(&series.fractions).ok_or(AnalysisError::EmptyTrajectory)?;

    Ok(ContactAnalysis {
        cutoff_nm: config.cutoff_nm,
        groups,
        series,
        count_stats,
        fraction_stats,
    })
}
