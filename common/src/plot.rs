use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use eyre::{Result, eyre};
use plotters::data::Quartiles;
use plotters::prelude::*;
use tracing::{debug, warn};

use crate::{bucket::Bucket, category::Category};

const PLOT_SIZE: (u32, u32) = (1200, 800);

/// Fixed per-pipeline chart parameters.
#[derive(Debug, Clone, Copy)]
pub struct PlotSpec {
    pub file_prefix: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
}

pub fn output_filename(spec: &PlotSpec, category: Category) -> String {
    format!("{}_{}.png", spec.file_prefix, category.file_stem())
}

/// Draws one vertical box plot per series in the bucket, ticks labeled with
/// the bucket labels, and writes the chart as a PNG named after the category.
///
/// An empty bucket still produces a chart (with no boxes). Series with zero
/// readings are skipped, there is nothing to summarize for them.
pub fn render_boxplot(
    bucket: &Bucket,
    category: Category,
    spec: &PlotSpec,
    images_dir: &Path,
) -> Result<PathBuf> {
    create_dir_all(images_dir)
        .map_err(|e| eyre!("Create images dir {}: {e}", images_dir.display()))?;
    let path = images_dir.join(output_filename(spec, category));

    let mut boxes = Vec::new();
    for (i, series) in bucket.series.iter().enumerate() {
        if series.is_empty() {
            warn!(
                "Skipping empty series {:?} in {}",
                bucket.labels[i],
                category.title()
            );
            continue;
        }
        boxes.push((i, Quartiles::new(series)));
    }

    // Fresh drawing area per render, nothing leaks across categories.
    let root = BitMapBackend::new(&path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| eyre!("Fill drawing area: {e}"))?;

    let y_range = fitting_range(boxes.iter().map(|(_, q)| q));
    let x_segments = bucket.len().max(1);

    let mut chart = ChartBuilder::on(&root)
        .caption(category.title(), ("sans-serif", 40))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(85)
        .build_cartesian_2d((0..x_segments).into_segmented(), y_range)
        .map_err(|e| eyre!("Configure chart: {e}"))?;

    chart
        .configure_mesh()
        .x_desc(spec.x_label)
        .y_desc(spec.y_label)
        .x_label_style(("sans-serif", 25))
        .y_label_style(("sans-serif", 25))
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) => bucket.labels.get(*i).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .draw()
        .map_err(|e| eyre!("Draw mesh: {e}"))?;

    chart
        .draw_series(
            boxes
                .iter()
                .map(|(i, q)| Boxplot::new_vertical(SegmentValue::CenterOf(*i), q)),
        )
        .map_err(|e| eyre!("Draw box plots: {e}"))?;

    root.present()
        .map_err(|e| eyre!("Write {}: {e}", path.display()))?;
    debug!("Rendered {} boxes to {}", boxes.len(), path.display());
    drop(chart);
    drop(root);
    Ok(path)
}

/// Y range covering every whisker, padded so the boxes do not touch the
/// chart border. Falls back to 0..1 when there is nothing to plot.
fn fitting_range<'a>(quartiles: impl Iterator<Item = &'a Quartiles>) -> std::ops::Range<f32> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for q in quartiles {
        for v in q.values() {
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    if min == max {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = (max - min) * 0.05;
    (min - pad)..(max + pad)
}
