use eyre::{ContextCompat, Result};
use tracing::warn;

use crate::{category::Category, collect::Series};

/// The series and display labels of one test category, in discovery order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Bucket {
    pub series: Vec<Series>,
    pub labels: Vec<String>,
}

impl Bucket {
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Routes every collected series into its category bucket, keyed by the last
/// `_`-delimited segment of the series key. Keys that name no category are
/// skipped with a warning. Returns the buckets in fixed category order.
///
/// The display label is the second `_`-delimited segment of the key, so a
/// routed key with a single segment is an error.
pub fn bucketize(entries: &[(String, Series)]) -> Result<Vec<(Category, Bucket)>> {
    let mut buckets: [Bucket; 4] = Default::default();
    for (key, series) in entries {
        let suffix = key.rsplit('_').next().unwrap_or(key.as_str());
        let Some(category) = Category::from_suffix(suffix) else {
            warn!("Skipping series {key}: suffix {suffix:?} names no test category");
            continue;
        };
        let label = key.split('_').nth(1).wrap_err_with(|| {
            format!("Cannot derive a label from series key {key:?}: expected at least two '_' separated segments")
        })?;
        let bucket = &mut buckets[category as usize];
        bucket.series.push(series.clone());
        bucket.labels.push(label.to_owned());
    }
    Ok(Category::ALL.into_iter().zip(buckets).collect())
}
