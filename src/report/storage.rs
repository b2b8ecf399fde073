use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Dated report file name, e.g. "devops-digest-2024-06-15.md"
pub fn report_file_name(date: NaiveDate) -> String {
    format!("devops-digest-{}.md", date.format("%Y-%m-%d"))
}

/// Write the rendered report into `dir`, replacing any report from the same day.
///
/// Uses atomic-write-file so a reader never sees a half-written report.
/// Creates `dir` if it doesn't exist. Returns the path written.
pub fn save_report(dir: &Path, date: NaiveDate, content: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create reports directory at {}", dir.display()))?;

    let path = dir.join(report_file_name(date));
    let mut file = AtomicWriteFile::open(&path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    file.write_all(content.as_bytes())
        .context("Failed to write report")?;

    file.commit().context("Failed to save report")?;

    Ok(path)
}
