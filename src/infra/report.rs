// ============================================================
// Layer 6 — Partition Summary Report
// ============================================================
// Records the per-label partition sizes to a CSV file after a
// scan, for eyeballing split balance in a spreadsheet.
//
// Output file: <cache dir>/index_summary.csv
//
// Example CSV output:
//   label,training,testing,validation,total
//   cats,21,1,3,25
//   dogs,20,0,0,20
//
// Unlike a per-epoch metrics log this is a snapshot of one scan,
// so the file is rewritten whole each time rather than appended.

use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::label_entry::LabelIndex;

pub struct SummaryWriter {
    csv_path: PathBuf,
}

impl SummaryWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create '{}'", dir.display()))?;
        Ok(Self { csv_path: dir.join("index_summary.csv") })
    }

    /// Write one row per label, in index (name) order.
    pub fn write(&self, index: &LabelIndex) -> Result<()> {
        let mut f = File::create(&self.csv_path)
            .with_context(|| format!("Cannot write '{}'", self.csv_path.display()))?;

        writeln!(f, "label,training,testing,validation,total")?;
        for (label_name, entry) in index.iter() {
            writeln!(
                f,
                "{},{},{},{},{}",
                label_name,
                entry.training.len(),
                entry.testing.len(),
                entry.validation.len(),
                entry.total_files(),
            )?;
        }

        tracing::debug!("Wrote partition summary to '{}'", self.csv_path.display());
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}
