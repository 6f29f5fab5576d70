use crate::engine::contacts::ContactAnalysis;
use crate::report::ReportError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const BANNER: &str = "============================================================";
const RULE: &str = "------------------------------------------------------------";

/// Writes the fixed-layout plain-text summary of one analysis pass.
///
/// `label_a` and `label_b` name the two groups in the header block; the
/// statistics block reports mean ± std of both series, the mean contact
/// percentage, and the min/max/median of the count series.
pub fn write_summary(
    path: &Path,
    analysis: &ContactAnalysis,
    label_a: &str,
    label_b: &str,
) -> Result<(), ReportError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "{BANNER}")?;
    writeln!(out, "CROSSLINKING ANALYSIS SUMMARY")?;
    writeln!(out, "{BANNER}")?;
    writeln!(out)?;

    writeln!(out, "Cutoff distance: {} nm", analysis.cutoff_nm)?;
    writeln!(out, "Number of frames analyzed: {}", analysis.frame_count())?;
    writeln!(
        out,
        "Number of {} atoms: {}",
        label_a,
        analysis.groups.group_a.len()
    )?;
    writeln!(
        out,
        "Number of {} atoms: {}",
        label_b,
        analysis.groups.group_b.len()
    )?;
    writeln!(out)?;

    writeln!(out, "CONTACT STATISTICS:")?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        "Mean number of contacts: {:.2} \u{b1} {:.2}",
        analysis.count_stats.mean, analysis.count_stats.std_dev
    )?;
    writeln!(
        out,
        "Contact fraction: {:.6} \u{b1} {:.6}",
        analysis.fraction_stats.mean, analysis.fraction_stats.std_dev
    )?;
    writeln!(
        out,
        "Contact percentage: {:.4}%",
        analysis.fraction_stats.mean * 100.0
    )?;
    writeln!(out)?;

    writeln!(out, "Minimum contacts: {}", analysis.count_stats.min)?;
    writeln!(out, "Maximum contacts: {}", analysis.count_stats.max)?;
    writeln!(out, "Median contacts: {:.2}", analysis.count_stats.median)?;
    writeln!(out)?;

    writeln!(out, "{BANNER}")?;
    out.flush()?;
    Ok(())
}
