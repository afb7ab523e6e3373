use std::path::Path;

use common::{
    bucket::bucketize,
    collect::{Layout, collect},
    plot::{PlotSpec, render_boxplot},
};
use eyre::Result;
use tracing::info;

pub const FPS_PLOT: PlotSpec = PlotSpec {
    file_prefix: "FPS",
    x_label: "Persona Setting",
    y_label: "FPS",
};

pub const WATTS_PLOT: PlotSpec = PlotSpec {
    file_prefix: "Watts",
    x_label: "Energy Rating",
    y_label: "Watts",
};

/// Collect → bucketize → render, one chart per test category.
pub async fn run(layout: Layout, spec: &PlotSpec, results: &Path, images: &Path) -> Result<()> {
    let entries = collect(results, layout).await?;
    info!(
        "Collected {} series from {}",
        entries.len(),
        results.display()
    );

    for (category, bucket) in bucketize(&entries)? {
        let path = render_boxplot(&bucket, category, spec, images)?;
        info!(
            "Wrote {} ({} series)",
            path.display(),
            bucket.len()
        );
    }
    Ok(())
}

/// Prints the buckets the renderer would receive.
pub async fn list(layout: Layout, results: &Path) -> Result<()> {
    let entries = collect(results, layout).await?;
    for (category, bucket) in bucketize(&entries)? {
        println!("{}:", category.title());
        for (label, series) in bucket.labels.iter().zip(&bucket.series) {
            println!("  {label} -> {} readings", series.len());
        }
    }
    Ok(())
}
