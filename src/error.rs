use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading an event log or writing a report.
///
/// The counting and selection structures themselves are total and never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("impossible to read input {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
