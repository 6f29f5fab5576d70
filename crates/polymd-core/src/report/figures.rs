//! Figure generation using plotters (SVG output).
//!
//! The SVG backend avoids system font dependencies; a requested `.png` path
//! is redirected to its `.svg` sibling, keeping names deterministic from the
//! output prefix.

use crate::engine::contacts::ContactAnalysis;
use crate::report::ReportError;
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use std::path::{Path, PathBuf};

const HISTOGRAM_BINS: usize = 50;

fn figure_path(path: &Path) -> PathBuf {
    if path.extension().map(|ext| ext == "png").unwrap_or(false) {
        path.with_extension("svg")
    } else {
        path.to_path_buf()
    }
}

fn draw_err(path: &Path, message: impl std::fmt::Display) -> ReportError {
    ReportError::Figure {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Renders the two stacked time-series panels (contact count, contact
/// fraction), each with a horizontal mean line annotated mean ± std.
/// Returns the path actually written.
pub fn contact_timeseries(path: &Path, analysis: &ContactAnalysis) -> Result<PathBuf, ReportError> {
    let svg_path = figure_path(path);
    let root = SVGBackend::new(&svg_path, (1000, 800)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(&svg_path, e))?;

    let frames = analysis.frame_count();
    let x_max = frames.saturating_sub(1).max(1) as f64;
    let panels = root.split_evenly((2, 1));

    // Panel 1: contact count over time.
    {
        let counts = &analysis.series.counts;
        let y_max = counts.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;

        let mut chart = ChartBuilder::on(&panels[0])
            .caption("Inter-Chain Contacts Over Time", ("sans-serif", 22))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)
            .map_err(|e| draw_err(&svg_path, e))?;
        chart
            .configure_mesh()
            .x_desc("Frame")
            .y_desc("Number of Contacts")
            .draw()
            .map_err(|e| draw_err(&svg_path, e))?;

        chart
            .draw_series(LineSeries::new(
                counts.iter().enumerate().map(|(i, &c)| (i as f64, c as f64)),
                &BLUE,
            ))
            .map_err(|e| draw_err(&svg_path, e))?;

        let mean = analysis.count_stats.mean;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, mean), (x_max, mean)],
                RED.stroke_width(2),
            )))
            .map_err(|e| draw_err(&svg_path, e))?
            .label(format!(
                "Mean = {:.1} \u{b1} {:.1}",
                mean, analysis.count_stats.std_dev
            ))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| draw_err(&svg_path, e))?;
    }

    // Panel 2: contact fraction over time.
    {
        let fractions = &analysis.series.fractions;
        let y_max = fractions
            .iter()
            .copied()
            .fold(0.0f64, f64::max)
            .max(1e-3)
            * 1.1;

        let mut chart = ChartBuilder::on(&panels[1])
            .caption("Contact Fraction Over Time", ("sans-serif", 22))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)
            .map_err(|e| draw_err(&svg_path, e))?;
        chart
            .configure_mesh()
            .x_desc("Frame")
            .y_desc("Contact Fraction")
            .draw()
            .map_err(|e| draw_err(&svg_path, e))?;

        chart
            .draw_series(LineSeries::new(
                fractions.iter().enumerate().map(|(i, &f)| (i as f64, f)),
                &GREEN,
            ))
            .map_err(|e| draw_err(&svg_path, e))?;

        let mean = analysis.fraction_stats.mean;
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(0.0, mean), (x_max, mean)],
                RED.stroke_width(2),
            )))
            .map_err(|e| draw_err(&svg_path, e))?
            .label(format!(
                "Mean = {:.4} \u{b1} {:.4}",
                mean, analysis.fraction_stats.std_dev
            ))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(|e| draw_err(&svg_path, e))?;
    }

    root.present().map_err(|e| draw_err(&svg_path, e))?;
    Ok(svg_path.clone())
}

/// Renders the histogram of the contact-count series with the mean marked.
/// Returns the path actually written.
pub fn contact_histogram(path: &Path, analysis: &ContactAnalysis) -> Result<PathBuf, ReportError> {
    let svg_path = figure_path(path);
    let root = SVGBackend::new(&svg_path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw_err(&svg_path, e))?;

    let counts = &analysis.series.counts;
    let min = counts.iter().copied().min().unwrap_or(0) as f64;
    let max = counts.iter().copied().max().unwrap_or(0) as f64;
    let span = (max - min).max(1.0);
    let bin_width = span / HISTOGRAM_BINS as f64;

    let mut frequencies = [0usize; HISTOGRAM_BINS];
    for &count in counts {
        let bin = (((count as f64 - min) / bin_width) as usize).min(HISTOGRAM_BINS - 1);
        frequencies[bin] += 1;
    }
    let y_max = frequencies.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Inter-Chain Contacts", ("sans-serif", 22))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min..(min + span * 1.02), 0.0..y_max)
        .map_err(|e| draw_err(&svg_path, e))?;
    chart
        .configure_mesh()
        .x_desc("Number of Contacts")
        .y_desc("Frequency")
        .draw()
        .map_err(|e| draw_err(&svg_path, e))?;

    chart
        .draw_series(frequencies.iter().enumerate().map(|(bin, &freq)| {
            let x0 = min + bin as f64 * bin_width;
            let x1 = x0 + bin_width;
            Rectangle::new([(x0, 0.0), (x1, freq as f64)], BLUE.mix(0.6).filled())
        }))
        .map_err(|e| draw_err(&svg_path, e))?;

    let mean = analysis.count_stats.mean;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![(mean, 0.0), (mean, y_max)],
            RED.stroke_width(2),
        )))
        .map_err(|e| draw_err(&svg_path, e))?
        .label(format!("Mean = {:.1}", mean))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| draw_err(&svg_path, e))?;

    root.present().map_err(|e| draw_err(&svg_path, e))?;
    Ok(svg_path.clone())
}
