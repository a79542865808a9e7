mod record_sink;

pub use record_sink::{EmittedRecord, RecordSink};

// Re-export for convenience
pub use twodns_domain::DnsQuery;
