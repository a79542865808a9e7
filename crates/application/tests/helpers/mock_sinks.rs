#![allow(dead_code)]

use twodns_application::ports::RecordSink;
use twodns_domain::{DnsRecord, DomainError, RecordType, ZoneConfig};

/// Records everything it is handed; optionally fails after `fail_after`
/// successful emissions.
pub struct MockRecordSink {
    emitted: Vec<(DnsRecord, u32)>,
    fail_after: Option<usize>,
}

impl MockRecordSink {
    pub fn new() -> Self {
        Self {
            emitted: Vec::new(),
            fail_after: None,
        }
    }

    pub fn failing_after(count: usize) -> Self {
        Self {
            emitted: Vec::new(),
            fail_after: Some(count),
        }
    }

    pub fn records(&self) -> Vec<DnsRecord> {
        self.emitted.iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn values(&self) -> Vec<(RecordType, String)> {
        self.emitted
            .iter()
            .map(|(r, _)| (r.record_type, r.value.clone()))
            .collect()
    }

    pub fn ttls(&self) -> Vec<u32> {
        self.emitted.iter().map(|(_, ttl)| *ttl).collect()
    }

    pub fn len(&self) -> usize {
        self.emitted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.is_empty()
    }
}

impl RecordSink for MockRecordSink {
    fn emit(&mut self, record: &DnsRecord, ttl: u32) -> Result<(), DomainError> {
        if let Some(limit) = self.fail_after {
            if self.emitted.len() >= limit {
                return Err(DomainError::RecordEmission(format!(
                    "mock sink refused {}",
                    record
                )));
            }
        }
        self.emitted.push((record.clone(), ttl));
        Ok(())
    }
}

pub fn zone() -> ZoneConfig {
    ZoneConfig::default()
}

pub fn zone_with(json: bool, ip: bool, dual_stack: bool) -> ZoneConfig {
    ZoneConfig {
        enable_json_records: json,
        enable_ip_reflection: ip,
        enable_dual_stack: dual_stack,
        ..ZoneConfig::default()
    }
}
