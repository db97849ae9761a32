use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum IngestError {
    /// File read or CSV-level failure.
    Io { path: PathBuf, message: String },
    /// Empty file or missing header row.
    EmptyFile { path: PathBuf },
    /// Header row lacks required columns.
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "cannot read {}: {message}", path.display())
            }
            Self::EmptyFile { path } => {
                write!(f, "{} is empty or has no header row", path.display())
            }
            Self::MissingColumns { path, columns } => {
                write!(f, "missing columns in {}: {}", path.display(), columns.join(", "))
            }
        }
    }
}

impl std::error::Error for IngestError {}

#[derive(Debug)]
pub enum ReportError {
    /// File write failure.
    Io { path: PathBuf, message: String },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for ReportError {}
