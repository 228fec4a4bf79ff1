use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DamLevelsError {
    #[error("Malformed numeric cell {value:?} at line {line}, column {column}")]
    MalformedCell {
        line: u64,
        column: usize,
        value: String,
    },

    #[error("Unparseable date {value:?} at line {line}")]
    UnparseableDate { line: u64, value: String },

    #[error("No capacity known for dam {name:?}")]
    UnknownDam { name: String },

    #[error("No rows left to write after dropping future dates")]
    EmptyResult,

    #[error("Unable to read CSV path {}: {source}", .path.display())]
    InputNotReadable { path: PathBuf, source: io::Error },

    #[error("Unable to write to CSV out dir {}: {reason}", .path.display())]
    OutputNotWritable { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DamLevelsError {
    /// Process exit code for the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InputNotReadable { .. }
            | Self::OutputNotWritable { .. }
            | Self::Io { .. }
            | Self::Csv(_) => 2,
            Self::MalformedCell { .. } | Self::UnparseableDate { .. } | Self::UnknownDam { .. } => 3,
            Self::EmptyResult => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, DamLevelsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(DamLevelsError::EmptyResult.exit_code(), 4);
        assert_eq!(
            DamLevelsError::UnknownDam {
                name: String::from("Alexandra")
            }
            .exit_code(),
            3
        );
        assert_eq!(
            DamLevelsError::OutputNotWritable {
                path: PathBuf::from("/nowhere"),
                reason: String::from("missing"),
            }
            .exit_code(),
            2
        );
    }

    #[test]
    fn test_messages() {
        let err = DamLevelsError::MalformedCell {
            line: 7,
            column: 2,
            value: String::from("12a"),
        };
        assert_eq!(
            err.to_string(),
            "Malformed numeric cell \"12a\" at line 7, column 2"
        );
    }
}
