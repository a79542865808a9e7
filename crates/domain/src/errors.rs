use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Domain name too long: {0} characters")]
    DomainTooLong(usize),

    #[error("Label too long ({length} characters): {label}")]
    LabelTooLong { label: String, length: usize },

    #[error("Invalid {record_type} record value: {value}")]
    InvalidRecordValue { record_type: String, value: String },

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Failed to emit record: {0}")]
    RecordEmission(String),
}
