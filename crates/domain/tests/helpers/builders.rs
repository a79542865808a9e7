#![allow(dead_code)]
use twodns_domain::{DnsRecord, RecordSet, RecordType};

pub struct RecordSetBuilder {
    records: Vec<DnsRecord>,
}

impl RecordSetBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn record(mut self, record_type: RecordType, value: &str) -> Self {
        self.records.push(DnsRecord::new(record_type, value));
        self
    }

    pub fn a(self, value: &str) -> Self {
        self.record(RecordType::A, value)
    }

    pub fn aaaa(self, value: &str) -> Self {
        self.record(RecordType::AAAA, value)
    }

    pub fn txt(self, value: &str) -> Self {
        self.record(RecordType::TXT, value)
    }

    pub fn build(self) -> RecordSet {
        self.records.into_iter().collect()
    }
}
