use twodns_domain::{DnsRecord, DomainError};

/// Receives the records a resolution produces.
///
/// The wire layer implements this to turn records into answer RRs. An
/// error aborts the resolution with an internal failure.
pub trait RecordSink {
    fn emit(&mut self, record: &DnsRecord, ttl: u32) -> Result<(), DomainError>;
}

/// A record together with the TTL it was emitted with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedRecord {
    pub record: DnsRecord,
    pub ttl: u32,
}

impl RecordSink for Vec<EmittedRecord> {
    fn emit(&mut self, record: &DnsRecord, ttl: u32) -> Result<(), DomainError> {
        self.push(EmittedRecord {
            record: record.clone(),
            ttl,
        });
        Ok(())
    }
}
