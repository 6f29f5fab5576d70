use crate::engine::contacts::ContactSeries;
use crate::report::ReportError;
use std::path::Path;

/// Writes the per-frame series as CSV: frame index, contact count, contact
/// fraction, one row per frame in trajectory order.
pub fn write_series_csv(path: &Path, series: &ContactSeries) -> Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["frame", "contacts", "contact_fraction"])?;

    for (frame, (count, fraction)) in series
        .counts
        .iter()
        .zip(series.fractions.iter())
        .enumerate()
    {
        writer.write_record(&[
            frame.to_string(),
            count.to_string(),
            fraction.to_string(),
        ])?;
    }

    writer.flush().map_err(ReportError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_holds_a_header_and_one_row_per_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.csv");
        let series = ContactSeries {
            counts: vec![2, 4, 0],
            fractions: vec![0.5, 1.0, 0.0],
        };

        write_series_csv(&path, &series).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "frame,contacts,contact_fraction");
        assert_eq!(lines[1], "0,2,0.5");
        assert_eq!(lines[3], "2,0,0");
    }
}
