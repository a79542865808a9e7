use crate::codec::labels;
use crate::decoders::{AddressDecoder, AddressMatch, JsonRecordDecoder};
use crate::ports::{EmittedRecord, RecordSink};
use std::fmt;
use std::net::IpAddr;
use tracing::{debug, error, warn};
use twodns_domain::{
    DecodeOutcome, DnsQuery, DnsRecord, DomainError, QueryType, RecordType, ZoneConfig,
};

/// How a resolution ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionStatus {
    /// At least one record was emitted.
    Success,
    /// The name decoded, but nothing matched the requested type.
    NoData,
    /// No decoder recognized the name.
    NotFound,
    /// The name claimed an encoding but its content was unusable.
    MalformedInput,
    /// The record sink failed.
    InternalError,
}

impl ResolutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionStatus::Success => "success",
            ResolutionStatus::NoData => "no-data",
            ResolutionStatus::NotFound => "not-found",
            ResolutionStatus::MalformedInput => "malformed-input",
            ResolutionStatus::InternalError => "internal-error",
        }
    }
}

impl fmt::Display for ResolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns an encoded name into records.
///
/// Stages run in order, each gated by its zone toggle: JSON record sets,
/// single addresses (direct and Base32), then dual-stack pairs. A stage
/// that decodes the name but emits nothing lets the next stage try.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResolveEncodedNameUseCase;

enum Stage {
    Emitted,
    Decoded,
    Skipped(Option<String>),
}

type StageFn = fn(&str, QueryType, u32, &mut dyn RecordSink) -> Result<Stage, DomainError>;

impl ResolveEncodedNameUseCase {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(
        &self,
        query: &DnsQuery,
        zone: &ZoneConfig,
        sink: &mut dyn RecordSink,
    ) -> ResolutionStatus {
        match self.resolve(query, zone, sink) {
            Ok(status) => status,
            Err(e) => {
                error!(domain = %query.domain, error = %e, "Record emission failed");
                ResolutionStatus::InternalError
            }
        }
    }

    fn resolve(
        &self,
        query: &DnsQuery,
        zone: &ZoneConfig,
        sink: &mut dyn RecordSink,
    ) -> Result<ResolutionStatus, DomainError> {
        if let Err(e) = labels::validate_name_lengths(&query.domain) {
            debug!(domain = %query.domain, error = %e, "Name exceeds DNS limits");
            return Ok(ResolutionStatus::MalformedInput);
        }

        let Some(prefix) = labels::extract_prefix(&query.domain, &zone.suffix) else {
            debug!(domain = %query.domain, "No encoded prefix under zone suffix");
            return Ok(ResolutionStatus::NotFound);
        };

        let ttl = zone.default_ttl;
        let query_type = query.query_type;
        let mut decoded = false;
        let mut malformed: Option<String> = None;

        let stages: [(bool, StageFn); 3] = [
            (zone.enable_json_records, json_stage),
            (zone.enable_ip_reflection, address_stage),
            (zone.enable_dual_stack, dual_stack_stage),
        ];

        for (enabled, stage) in stages {
            if !enabled {
                continue;
            }
            match stage(&prefix, query_type, ttl, sink)? {
                Stage::Emitted => return Ok(ResolutionStatus::Success),
                Stage::Decoded => decoded = true,
                Stage::Skipped(reason) => {
                    if malformed.is_none() {
                        malformed = reason;
                    }
                }
            }
        }

        if decoded {
            debug!(domain = %query.domain, query_type = %query_type, "Decoded, no matching records");
            Ok(ResolutionStatus::NoData)
        } else if let Some(reason) = malformed {
            warn!(domain = %query.domain, reason = %reason, "Malformed encoded name");
            Ok(ResolutionStatus::MalformedInput)
        } else {
            debug!(domain = %query.domain, "Name matches no encoding");
            Ok(ResolutionStatus::NotFound)
        }
    }

    /// Resolves `1.2.3.4.<suffix>` with every decoder enabled and checks
    /// the single A record that comes back.
    pub fn self_test(&self, zone: &ZoneConfig) -> Result<(), DomainError> {
        let probe_zone = ZoneConfig {
            enable_json_records: true,
            enable_ip_reflection: true,
            enable_dual_stack: true,
            ..zone.clone()
        };
        let name = format!("1.2.3.4.{}", probe_zone.normalized_suffix());
        let query = DnsQuery::new(name.as_str(), RecordType::A);

        let mut records: Vec<EmittedRecord> = Vec::new();
        let status = self.execute(&query, &probe_zone, &mut records);

        let expected = DnsRecord::new(RecordType::A, "1.2.3.4");
        match (status, records.as_slice()) {
            (ResolutionStatus::Success, [only]) if only.record == expected => Ok(()),
            _ => Err(DomainError::EncodingError(format!(
                "self-test for {} returned {} with {} record(s)",
                name,
                status,
                records.len()
            ))),
        }
    }
}

fn emit_matching<'a>(
    records: impl IntoIterator<Item = &'a DnsRecord>,
    query_type: QueryType,
    ttl: u32,
    sink: &mut dyn RecordSink,
) -> Result<Stage, DomainError> {
    let mut emitted = 0usize;
    for record in records {
        if query_type.matches(record.record_type) {
            sink.emit(record, ttl)?;
            emitted += 1;
        }
    }
    Ok(if emitted > 0 {
        Stage::Emitted
    } else {
        Stage::Decoded
    })
}

fn json_stage(
    prefix: &str,
    query_type: QueryType,
    ttl: u32,
    sink: &mut dyn RecordSink,
) -> Result<Stage, DomainError> {
    match JsonRecordDecoder::decode(prefix) {
        DecodeOutcome::Matched(set) => {
            debug!(prefix = %prefix, records = set.len(), "JSON record set decoded");
            emit_matching(&set, query_type, ttl, sink)
        }
        DecodeOutcome::NoMatch => Ok(Stage::Skipped(None)),
        DecodeOutcome::Malformed(reason) => Ok(Stage::Skipped(Some(reason))),
    }
}

fn address_stage(
    prefix: &str,
    query_type: QueryType,
    ttl: u32,
    sink: &mut dyn RecordSink,
) -> Result<Stage, DomainError> {
    match AddressDecoder::decode_single(prefix) {
        DecodeOutcome::Matched(address) => {
            debug!(
                prefix = %prefix,
                format = %address.format,
                address = %address.address,
                private = address.is_private(),
                "Address decoded"
            );
            let record = DnsRecord::from_address(address.address);
            emit_matching([&record], query_type, ttl, sink)
        }
        DecodeOutcome::NoMatch => Ok(Stage::Skipped(None)),
        DecodeOutcome::Malformed(reason) => Ok(Stage::Skipped(Some(reason))),
    }
}

fn dual_stack_stage(
    prefix: &str,
    query_type: QueryType,
    ttl: u32,
    sink: &mut dyn RecordSink,
) -> Result<Stage, DomainError> {
    match AddressDecoder::decode_dual_stack(prefix) {
        DecodeOutcome::Matched(pair) => {
            let records = [
                DnsRecord::from_address(IpAddr::V4(pair.ipv4)),
                DnsRecord::from_address(IpAddr::V6(pair.ipv6)),
            ];
            emit_matching(&records, query_type, ttl, sink)
        }
        DecodeOutcome::NoMatch => Ok(Stage::Skipped(None)),
        DecodeOutcome::Malformed(reason) => Ok(Stage::Skipped(Some(reason))),
    }
}

/// Records a name would resolve to, regardless of query type.
///
/// Used by the `decode` command to show what a name carries.
pub fn describe_name(name: &str, zone: &ZoneConfig) -> DecodeOutcome<Vec<DnsRecord>> {
    let Some(prefix) = labels::extract_prefix(name, &zone.suffix) else {
        return DecodeOutcome::NoMatch;
    };
    let mut malformed = None;

    match JsonRecordDecoder::decode(&prefix) {
        DecodeOutcome::Matched(set) => return DecodeOutcome::Matched(set.into_iter().collect()),
        DecodeOutcome::Malformed(reason) => malformed = Some(reason),
        DecodeOutcome::NoMatch => {}
    }

    match AddressDecoder::decode(&prefix) {
        DecodeOutcome::Matched(AddressMatch::Single(address)) => {
            DecodeOutcome::Matched(vec![DnsRecord::from_address(address.address)])
        }
        DecodeOutcome::Matched(AddressMatch::DualStack(pair)) => DecodeOutcome::Matched(vec![
            DnsRecord::from_address(IpAddr::V4(pair.ipv4)),
            DnsRecord::from_address(IpAddr::V6(pair.ipv6)),
        ]),
        DecodeOutcome::Malformed(reason) => DecodeOutcome::Malformed(reason),
        DecodeOutcome::NoMatch => match malformed {
            Some(reason) => DecodeOutcome::Malformed(reason),
            None => DecodeOutcome::NoMatch,
        },
    }
}
