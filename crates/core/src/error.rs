use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfqaError {
    #[error("invalid configuration value for {key}: {value} ({reason})")]
    InvalidConfig {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
}
