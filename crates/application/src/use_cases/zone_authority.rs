use crate::codec::labels;
use crate::ports::RecordSink;
use std::sync::Arc;
use tracing::{debug, error};
use twodns_domain::{DnsQuery, DnsRecord, RecordSet, RecordType, ZoneConfig};

use super::ResolutionStatus;

/// SOA and NS records for the zone apex.
pub struct ZoneAuthorityUseCase {
    zone: Arc<ZoneConfig>,
}

impl ZoneAuthorityUseCase {
    pub fn new(zone: Arc<ZoneConfig>) -> Self {
        Self { zone }
    }

    pub fn zone_name(&self) -> String {
        self.zone.normalized_suffix()
    }

    pub fn in_zone(&self, name: &str) -> bool {
        labels::is_in_zone(&labels::normalize_name(name), &self.zone_name())
    }

    pub fn is_apex(&self, name: &str) -> bool {
        labels::normalize_name(name) == self.zone_name()
    }

    /// `<mname> <rname> <serial> <refresh> <retry> <expire> <minimum>`,
    /// with the first nameserver as MNAME.
    pub fn soa_record(&self) -> DnsRecord {
        let nameservers = self.zone.nameserver_names();
        let mname = nameservers
            .first()
            .cloned()
            .unwrap_or_else(|| format!("ns1.{}", self.zone_name()));
        DnsRecord::new(
            RecordType::SOA,
            format!(
                "{} {} {} {} {} {} {}",
                mname,
                self.zone.hostmaster_name(),
                self.zone.serial,
                self.zone.refresh,
                self.zone.retry,
                self.zone.expire,
                self.zone.minimum
            ),
        )
    }

    pub fn ns_records(&self) -> Vec<DnsRecord> {
        self.zone
            .nameserver_names()
            .into_iter()
            .map(|ns| DnsRecord::new(RecordType::NS, ns))
            .collect()
    }

    pub fn apex_records(&self) -> RecordSet {
        std::iter::once(self.soa_record())
            .chain(self.ns_records())
            .collect()
    }

    /// Answers an apex query. Names below the apex are `NotFound`.
    pub fn execute(&self, query: &DnsQuery, sink: &mut dyn RecordSink) -> ResolutionStatus {
        if !self.is_apex(&query.domain) {
            return ResolutionStatus::NotFound;
        }

        let ttl = self.zone.default_ttl;
        let mut emitted = 0usize;
        for record in self.apex_records().matching(query.query_type) {
            if let Err(e) = sink.emit(record, ttl) {
                error!(domain = %query.domain, error = %e, "Failed to emit apex record");
                return ResolutionStatus::InternalError;
            }
            emitted += 1;
        }

        debug!(domain = %query.domain, query_type = %query.query_type, emitted, "Apex query");
        if emitted > 0 {
            ResolutionStatus::Success
        } else {
            ResolutionStatus::NoData
        }
    }
}
