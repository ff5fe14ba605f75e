use thiserror::Error;

/// Reasons a launch dataset cannot be loaded.
///
/// These are raised inside the loaders and wrapped by `anyhow` context that
/// names the file, so the startup diagnostic reads e.g.
/// `loading launches.csv: missing required column 'class'`.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        reason: String,
    },

    #[error("dataset contains no launch records")]
    Empty,
}

impl DatasetError {
    pub fn invalid(row: usize, column: &'static str, reason: impl Into<String>) -> Self {
        DatasetError::InvalidValue {
            row,
            column,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_column() {
        let err = DatasetError::MissingColumn("Launch Site");
        assert_eq!(err.to_string(), "missing required column 'Launch Site'");

        let err = DatasetError::invalid(3, "class", "expected 0 or 1, got 2");
        assert_eq!(err.to_string(), "row 3, column 'class': expected 0 or 1, got 2");
    }
}
