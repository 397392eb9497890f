// VaporLog - util/error.rs
//
// Typed errors for the CLI boundary.
//
// The engine itself communicates failure through sentinel returns (empty
// lists, None, short copy counts) and logs the cause at the point of
// failure; nothing in core/ or platform/ raises. This enum exists so the
// binary can turn those sentinels into a non-zero exit code with a
// readable message.

use std::fmt;
use std::path::PathBuf;

/// Conditions the CLI reports with exit code 1.
#[derive(Debug)]
pub enum CollectorError {
    /// No installation root could be auto-detected on this machine.
    RootNotFound,

    /// A root supplied on the command line does not exist or fails the
    /// per-OS marker check.
    InvalidRoot { path: PathBuf },

    /// No installed title matched the query, exactly or by substring.
    TitleNotFound { query: String },

    /// The timestamped output directory could not be created.
    OutputDirFailed { title: String },
}

impl fmt::Display for CollectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotFound => {
                write!(f, "No installation found in any known location")
            }
            Self::InvalidRoot { path } => {
                write!(
                    f,
                    "'{}' does not exist or is not a valid installation root",
                    path.display()
                )
            }
            Self::TitleNotFound { query } => {
                write!(f, "No installed title matches '{query}'")
            }
            Self::OutputDirFailed { title } => {
                write!(f, "Could not create an output directory for '{title}'")
            }
        }
    }
}

impl std::error::Error for CollectorError {}
