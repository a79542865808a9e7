//! twodns domain layer
pub mod address;
pub mod config;
pub mod decode_outcome;
pub mod dns_query;
pub mod dns_record;
pub mod errors;

pub use address::{AddressFormat, DualStackAddress, EncodedAddress};
pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ServerConfig, ZoneConfig};
pub use decode_outcome::DecodeOutcome;
pub use dns_query::{DnsQuery, QueryType};
pub use dns_record::{DnsRecord, RecordSet, RecordType};
pub use errors::DomainError;

/// Longest legal label (RFC 1035).
pub const MAX_LABEL_LENGTH: usize = 63;

/// Longest legal presentation-format name, without the trailing dot.
pub const MAX_DOMAIN_LENGTH: usize = 253;
