use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tracing::debug;
use trialkit_core::{Error, Result, Schema, TrialRecord};

/// Tabular output settings.
///
/// The default delimiter is `;` rather than `,` so that values using a
/// decimal comma do not collide with the column separator.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub delimiter: char,
    pub extension: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            extension: "csv".to_owned(),
        }
    }
}

/// Appends completed trial records to a timestamped log file, one durable
/// row per [`write`](TrialLogger::write) call.
///
/// The first written record establishes the header; every later record
/// must carry the same schema or the write fails with
/// [`Error::SchemaMismatch`]. Writes go straight to the file and are
/// synced before `write` returns, so a row that has been acknowledged
/// survives a crash immediately afterwards. The trade is latency per
/// call, which is why a driver should log between trials rather than
/// inside a timing-critical interval.
pub struct TrialLogger {
    file: File,
    path: PathBuf,
    delimiter: char,
    header: Option<Arc<Schema>>,
}

impl TrialLogger {
    /// Open a log file named `<prefix> (<timestamp>).<ext>` under
    /// `directory`, creating the directory first if needed.
    ///
    /// Directory creation is idempotent; an existing directory is not an
    /// error.
    ///
    /// # Errors
    ///
    /// [`Error::DirectoryCreation`] if the directory cannot be created,
    /// [`Error::Write`] if the file cannot be opened. Both are fatal for
    /// the session: there is no log target to fall back to.
    pub fn create(directory: impl AsRef<Path>, prefix: &str, config: LogConfig) -> Result<Self> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory).map_err(|source| Error::DirectoryCreation {
            path: directory.to_path_buf(),
            source,
        })?;

        let stamp = Local::now().format("%Y-%m-%d %H-%M-%S");
        let path = directory.join(format!("{prefix} ({stamp}).{}", config.extension));
        let file = OpenOptions::new().append(true).create(true).open(&path)?;
        debug!(path = %path.display(), "trial log opened");

        Ok(Self {
            file,
            path,
            delimiter: config.delimiter,
            header: None,
        })
    }

    /// Path of the log file backing this logger.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a row, emitting the header first if this is
    /// the first write.
    ///
    /// # Errors
    ///
    /// [`Error::SchemaMismatch`] if the record's field set disagrees with
    /// the header already written; [`Error::Write`] on storage failure.
    /// Nothing is buffered, so a failed write has not corrupted earlier,
    /// already-acknowledged rows.
    pub fn write(&mut self, record: &TrialRecord) -> Result<()> {
        let mut out = String::new();

        // Only pin the header once its bytes are durably out; a failed
        // first write leaves the logger header-less so a retried write
        // starts the file with the header row again.
        let pin_header = match &self.header {
            None => {
                let names: Vec<&str> =
                    record.schema().fields().iter().map(String::as_str).collect();
                out.push_str(&self.format_row(&names));
                true
            }
            Some(pinned) if pinned != record.schema() => {
                return Err(Error::SchemaMismatch {
                    expected: pinned.fields().join(", "),
                    found: record.schema().fields().join(", "),
                });
            }
            Some(_) => false,
        };

        let cells: Vec<String> = record.values().iter().map(ToString::to_string).collect();
        let refs: Vec<&str> = cells.iter().map(String::as_str).collect();
        out.push_str(&self.format_row(&refs));

        self.file.write_all(out.as_bytes())?;
        self.file.sync_data()?;
        if pin_header {
            self.header = Some(Arc::clone(record.schema()));
        }
        Ok(())
    }

    fn format_row(&self, cells: &[&str]) -> String {
        let mut row = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                row.push(self.delimiter);
            }
            row.push_str(&quote(cell, self.delimiter));
        }
        row.push('\n');
        row
    }
}

/// Wrap a cell in double quotes when it would otherwise break the row,
/// doubling any embedded quotes.
fn quote(raw: &str, delimiter: char) -> String {
    if raw.contains(delimiter) || raw.contains('"') || raw.contains('\n') || raw.contains('\r') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_owned()
    }
}
