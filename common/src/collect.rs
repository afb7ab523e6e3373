use std::path::Path;

use eyre::{Context, ContextCompat, Result};
use tokio::fs::{read_dir, read_to_string};
use tracing::debug;

/// Ordered readings parsed from one result file.
pub type Series = Vec<f64>;

/// How result files are laid out under the results root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `<root>/<dir>/<numeric file>`, lines `<ignored>;<float>` (3DMark runs)
    Nested,
    /// `<root>/<file>`, one float per line (power readings)
    Flat,
}

/// Walks the results root and parses every result file into a
/// (series key, series) pair, in directory-listing order.
///
/// Any unreadable path or malformed line aborts the whole collection.
pub async fn collect(root: &Path, layout: Layout) -> Result<Vec<(String, Series)>> {
    match layout {
        Layout::Nested => collect_nested(root).await,
        Layout::Flat => collect_flat(root).await,
    }
}

async fn collect_nested(root: &Path) -> Result<Vec<(String, Series)>> {
    let mut entries = Vec::new();
    let mut dirs = read_dir(root)
        .await
        .wrap_err_with(|| format!("Read results dir {}", root.display()))?;
    while let Some(dir) = dirs.next_entry().await? {
        if !dir.file_type().await?.is_dir() {
            continue;
        }
        let dir_name = dir.file_name().to_string_lossy().into_owned();
        let mut files = read_dir(dir.path())
            .await
            .wrap_err_with(|| format!("Read results dir {}", dir.path().display()))?;
        while let Some(file) = files.next_entry().await? {
            if !file.file_type().await?.is_file() {
                continue;
            }
            let file_name = file.file_name().to_string_lossy().into_owned();
            // Only pure-digit filenames hold run scores; anything else in the
            // persona dir (notes, exports) is skipped.
            if file_name.is_empty() || !file_name.chars().all(|c| c.is_ascii_digit()) {
                debug!("Skipping non-numeric file {}", file.path().display());
                continue;
            }
            let series = read_delimited_series(&file.path()).await?;
            entries.push((format!("{dir_name}_{file_name}"), series));
        }
    }
    Ok(entries)
}

async fn collect_flat(root: &Path) -> Result<Vec<(String, Series)>> {
    let mut entries = Vec::new();
    let mut files = read_dir(root)
        .await
        .wrap_err_with(|| format!("Read results dir {}", root.display()))?;
    while let Some(file) = files.next_entry().await? {
        if !file.file_type().await?.is_file() {
            continue;
        }
        let file_name = file.file_name().to_string_lossy().into_owned();
        let series = read_plain_series(&file.path()).await?;
        entries.push((file_name, series));
    }
    Ok(entries)
}

/// Parses `<ignored>;<float>` lines, second field is the score.
async fn read_delimited_series(path: &Path) -> Result<Series> {
    let data = read_to_string(path)
        .await
        .wrap_err_with(|| format!("Read {}", path.display()))?;
    data.lines()
        .enumerate()
        .map(|(idx, line)| {
            let field = line.split(';').nth(1).wrap_err_with(|| {
                format!("{}:{}: missing ';' delimited score field", path.display(), idx + 1)
            })?;
            field.trim().parse::<f64>().wrap_err_with(|| {
                format!("{}:{}: invalid reading {field:?}", path.display(), idx + 1)
            })
        })
        .collect()
}

/// Parses one float per line.
async fn read_plain_series(path: &Path) -> Result<Series> {
    let data = read_to_string(path)
        .await
        .wrap_err_with(|| format!("Read {}", path.display()))?;
    data.lines()
        .enumerate()
        .map(|(idx, line)| {
            line.trim().parse::<f64>().wrap_err_with(|| {
                format!("{}:{}: invalid reading {line:?}", path.display(), idx + 1)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;

    fn fixture_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("collect-tests-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn nested_collects_one_series_per_numeric_file() {
        let root = fixture_dir("nested");
        fs::create_dir_all(root.join("PersonaA")).unwrap();
        fs::create_dir_all(root.join("PersonaB")).unwrap();
        fs::write(root.join("PersonaA").join("1"), "x;10.5\nx;12.0\n").unwrap();
        fs::write(root.join("PersonaA").join("3"), "x;30.0\n").unwrap();
        fs::write(root.join("PersonaB").join("1"), "x;9.0\n").unwrap();
        // not purely numeric, must be skipped
        fs::write(root.join("PersonaB").join("notes.txt"), "garbage").unwrap();

        let mut entries = collect(&root, Layout::Nested).await.unwrap();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            entries,
            vec![
                ("PersonaA_1".to_owned(), vec![10.5, 12.0]),
                ("PersonaA_3".to_owned(), vec![30.0]),
                ("PersonaB_1".to_owned(), vec![9.0]),
            ]
        );
        fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn nested_ignores_loose_files_at_the_root() {
        let root = fixture_dir("nested-loose");
        fs::write(root.join("1"), "x;1.0\n").unwrap();

        let entries = collect(&root, Layout::Nested).await.unwrap();
        assert!(entries.is_empty());
        fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn nested_aborts_on_missing_delimiter() {
        let root = fixture_dir("nested-bad-delim");
        fs::create_dir_all(root.join("PersonaA")).unwrap();
        fs::write(root.join("PersonaA").join("1"), "x;10.5\n12.0\n").unwrap();

        let err = collect(&root, Layout::Nested).await.unwrap_err();
        assert!(err.to_string().contains(":2"), "{err}");
        fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn flat_collects_every_file_with_line_count_readings() {
        let root = fixture_dir("flat");
        fs::write(root.join("Low_3"), "5.0\n6.2\n").unwrap();
        fs::write(root.join("High_1"), "100.0\n").unwrap();

        let mut entries = collect(&root, Layout::Flat).await.unwrap();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            entries,
            vec![
                ("High_1".to_owned(), vec![100.0]),
                ("Low_3".to_owned(), vec![5.0, 6.2]),
            ]
        );
        fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn flat_aborts_on_non_numeric_line() {
        let root = fixture_dir("flat-bad");
        fs::write(root.join("Low_3"), "5.0\nnot-a-number\n").unwrap();

        let err = collect(&root, Layout::Flat).await.unwrap_err();
        assert!(err.to_string().contains(":2"), "{err}");
        fs::remove_dir_all(&root).unwrap();
    }

    #[tokio::test]
    async fn missing_root_is_fatal() {
        let root = std::env::temp_dir().join("collect-tests-does-not-exist");
        assert!(collect(&root, Layout::Nested).await.is_err());
        assert!(collect(&root, Layout::Flat).await.is_err());
    }
}
