//! Configuration error type.

use thiserror::Error;

/// Failure to assemble the layered configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source failed to parse, or the merged profile did not match the
    /// expected shape.
    #[error("configuration error: {0}")]
    Extraction(#[from] figment::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JobsuiteConfig;

    #[test]
    fn malformed_source_reports_an_extraction_error() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("jobsuite.toml", "backend = \"not a table\"")?;
            let error = JobsuiteConfig::load().expect_err("merge must fail");
            assert!(matches!(error, ConfigError::Extraction(_)));
            assert!(error.to_string().starts_with("configuration error"));
            Ok(())
        });
    }
}
