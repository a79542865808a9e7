use crate::codec::{base32, labels};
use crate::decoders::{AddressDecoder, AddressMatch, MAX_JSON_PARTS};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::debug;
use twodns_domain::{
    AddressFormat, DecodeOutcome, DnsRecord, DomainError, DualStackAddress, EncodedAddress,
    RecordSet, MAX_LABEL_LENGTH,
};

/// How a direct IPv6 name spells the address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ipv6Notation {
    /// Longest zero run written as `z`: `2001-db8z1`.
    #[default]
    Compressed,
    /// All eight groups: `2001-db8-0-0-0-0-0-1`.
    Full,
}

/// Builds names under the zone suffix that resolve back to the given data.
pub struct EncodeNameUseCase {
    suffix: String,
}

impl EncodeNameUseCase {
    pub fn new(suffix: impl Into<String>) -> Self {
        Self {
            suffix: suffix.into(),
        }
    }

    pub fn encode_ipv4(&self, addr: Ipv4Addr) -> Result<String, DomainError> {
        let prefix = addr.to_string();
        check_decodes_to(&prefix, single(IpAddr::V4(addr), AddressFormat::DirectIpv4))?;
        labels::join_name(&prefix, &self.suffix)
    }

    pub fn encode_ipv6(&self, addr: Ipv6Addr, notation: Ipv6Notation) -> Result<String, DomainError> {
        let text = addr.to_string();
        let prefix = match notation {
            Ipv6Notation::Compressed if !text.contains('.') => {
                text.replace("::", "z").replace(':', "-")
            }
            _ => full_ipv6(addr),
        };
        check_decodes_to(&prefix, single(IpAddr::V6(addr), AddressFormat::DirectIpv6))?;
        labels::join_name(&prefix, &self.suffix)
    }

    /// Fails with [`DomainError::EncodingError`] for the few addresses whose
    /// Base32 form also reads as a direct IPv6 name, e.g. `0.68.60.232`
    /// gives `ABCDZ2A8`, which is `abcd::2a8`.
    pub fn encode_ipv4_base32(&self, addr: Ipv4Addr) -> Result<String, DomainError> {
        let prefix = base32::ipv4_to_base32(addr);
        check_decodes_to(&prefix, single(IpAddr::V4(addr), AddressFormat::Base32Ipv4))?;
        labels::join_name(&prefix, &self.suffix)
    }

    pub fn encode_ipv6_base32(&self, addr: Ipv6Addr) -> Result<String, DomainError> {
        let prefix = base32::ipv6_to_base32(addr);
        check_decodes_to(&prefix, single(IpAddr::V6(addr), AddressFormat::Base32Ipv6))?;
        labels::join_name(&prefix, &self.suffix)
    }

    pub fn encode_dual_stack(&self, ipv4: Ipv4Addr, ipv6: Ipv6Addr) -> Result<String, DomainError> {
        let prefix = format!(
            "{}{}",
            base32::ipv4_to_base32(ipv4),
            base32::ipv6_to_base32(ipv6)
        );
        check_decodes_to(
            &prefix,
            AddressMatch::DualStack(DualStackAddress::new(ipv4, ipv6)),
        )?;
        labels::join_name(&prefix, &self.suffix)
    }

    /// Encodes a record set as JSON in the single-label form when it fits
    /// one label, otherwise split across `j1`..`jN` labels.
    pub fn encode_records(&self, records: &RecordSet) -> Result<String, DomainError> {
        if records.is_empty() {
            return Err(DomainError::EncodingError(
                "cannot encode an empty record set".to_string(),
            ));
        }

        let json = records_to_json(records)?;
        let payload = base32::json_to_base32(&json);
        let starts_with_digit = payload.starts_with(|c: char| c.is_ascii_digit());

        if 1 + payload.len() <= MAX_LABEL_LENGTH && !starts_with_digit {
            return labels::join_name(&format!("j{}", payload), &self.suffix);
        }

        let fragments = split_fragments(&payload)?;
        debug!(parts = fragments.len(), payload_len = payload.len(), "Encoding multi-label JSON");

        let prefix = fragments
            .iter()
            .enumerate()
            .map(|(i, fragment)| format!("j{}{}", i + 1, fragment))
            .collect::<Vec<_>>()
            .join(".");
        labels::join_name(&prefix, &self.suffix)
    }
}

fn single(address: IpAddr, format: AddressFormat) -> AddressMatch {
    AddressMatch::Single(EncodedAddress::new(address, format))
}

/// Runs `prefix` through the address decoder the resolver uses and
/// requires it to come back as `expected`, format included.
fn check_decodes_to(prefix: &str, expected: AddressMatch) -> Result<(), DomainError> {
    match AddressDecoder::decode(&prefix.to_ascii_lowercase()) {
        DecodeOutcome::Matched(decoded) if decoded == expected => Ok(()),
        DecodeOutcome::Matched(decoded) => Err(DomainError::EncodingError(format!(
            "'{}' would be read back as {:?}",
            prefix, decoded
        ))),
        _ => Err(DomainError::EncodingError(format!(
            "'{}' does not decode as an address",
            prefix
        ))),
    }
}

fn full_ipv6(addr: Ipv6Addr) -> String {
    addr.segments()
        .iter()
        .map(|segment| format!("{:x}", segment))
        .collect::<Vec<_>>()
        .join("-")
}

/// JSON object text with entries in set order, duplicates kept.
fn records_to_json(records: &RecordSet) -> Result<String, DomainError> {
    let mut entries = Vec::with_capacity(records.len());
    for DnsRecord { record_type, value } in records {
        let value = serde_json::to_string(value)
            .map_err(|e| DomainError::EncodingError(e.to_string()))?;
        entries.push(format!("\"{}\":{}", record_type, value));
    }
    Ok(format!("{{{}}}", entries.join(",")))
}

/// Cuts `payload` into fragments for `j<index><fragment>` labels.
///
/// A fragment never starts with a digit, so the index that precedes it is
/// read back unambiguously. At least two fragments are produced.
fn split_fragments(payload: &str) -> Result<Vec<&str>, DomainError> {
    let bytes = payload.as_bytes();
    match bytes.first() {
        Some(b) if !b.is_ascii_digit() => {}
        _ => {
            return Err(DomainError::EncodingError(
                "payload cannot start a fragment".to_string(),
            ))
        }
    }

    let target = if payload.len() < MAX_LABEL_LENGTH - 1 {
        payload.len().div_ceil(2)
    } else {
        usize::MAX
    };

    let mut fragments = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let index = fragments.len() + 1;
        if index > MAX_JSON_PARTS {
            return Err(DomainError::EncodingError(format!(
                "record set needs more than {} labels",
                MAX_JSON_PARTS
            )));
        }

        let room = MAX_LABEL_LENGTH - 1 - index.to_string().len();
        let mut end = (start + room.min(target)).min(bytes.len());
        while end < bytes.len() && end > start && bytes[end].is_ascii_digit() {
            end -= 1;
        }
        if end <= start {
            return Err(DomainError::EncodingError(
                "no fragment boundary avoids a leading digit".to_string(),
            ));
        }

        fragments.push(&payload[start..end]);
        start = end;
    }
    Ok(fragments)
}
