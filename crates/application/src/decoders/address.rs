use crate::codec::base32::{
    self, Base32Error, DUAL_STACK_ENCODED_LEN, IPV4_ENCODED_LEN, IPV6_ENCODED_LEN,
};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use tracing::debug;
use twodns_domain::{AddressFormat, DecodeOutcome, DualStackAddress, EncodedAddress};

/// Address recovered from a prefix by [`AddressDecoder::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMatch {
    Single(EncodedAddress),
    DualStack(DualStackAddress),
}

/// Recognizes the five address encodings, in priority order:
/// direct IPv4, direct IPv6, Base32 IPv4, Base32 IPv6, dual-stack.
pub struct AddressDecoder;

impl AddressDecoder {
    /// Tries all five formats; the first match wins.
    pub fn decode(prefix: &str) -> DecodeOutcome<AddressMatch> {
        let single = Self::decode_single(prefix);
        if let DecodeOutcome::Matched(address) = single {
            return DecodeOutcome::Matched(AddressMatch::Single(address));
        }

        match Self::decode_dual_stack(prefix) {
            DecodeOutcome::Matched(pair) => DecodeOutcome::Matched(AddressMatch::DualStack(pair)),
            DecodeOutcome::Malformed(reason) => DecodeOutcome::Malformed(reason),
            DecodeOutcome::NoMatch => match single {
                DecodeOutcome::Malformed(reason) => DecodeOutcome::Malformed(reason),
                _ => DecodeOutcome::NoMatch,
            },
        }
    }

    /// Formats 1 to 4: a prefix carrying exactly one address.
    pub fn decode_single(prefix: &str) -> DecodeOutcome<EncodedAddress> {
        if let Some(v4) = Self::direct_ipv4(prefix) {
            debug!(prefix = %prefix, address = %v4, "Matched direct IPv4");
            return DecodeOutcome::Matched(EncodedAddress::new(
                IpAddr::V4(v4),
                AddressFormat::DirectIpv4,
            ));
        }

        if let Some(v6) = Self::direct_ipv6(prefix) {
            debug!(prefix = %prefix, address = %v6, "Matched direct IPv6");
            return DecodeOutcome::Matched(EncodedAddress::new(
                IpAddr::V6(v6),
                AddressFormat::DirectIpv6,
            ));
        }

        if !is_base32_shaped(prefix) {
            return DecodeOutcome::NoMatch;
        }

        match prefix.len() {
            IPV4_ENCODED_LEN => match base32::base32_to_ipv4(prefix) {
                Ok(v4) => {
                    debug!(prefix = %prefix, address = %v4, "Matched Base32 IPv4");
                    DecodeOutcome::Matched(EncodedAddress::new(
                        IpAddr::V4(v4),
                        AddressFormat::Base32Ipv4,
                    ))
                }
                Err(e) => malformed("Base32 IPv4", &e),
            },
            IPV6_ENCODED_LEN => match base32::base32_to_ipv6(prefix) {
                Ok(v6) => {
                    debug!(prefix = %prefix, address = %v6, "Matched Base32 IPv6");
                    DecodeOutcome::Matched(EncodedAddress::new(
                        IpAddr::V6(v6),
                        AddressFormat::Base32Ipv6,
                    ))
                }
                Err(e) => malformed("Base32 IPv6", &e),
            },
            _ => DecodeOutcome::NoMatch,
        }
    }

    /// Format 5: 8 characters of Base32 IPv4 followed by 32 of Base32 IPv6.
    /// Both halves must decode.
    pub fn decode_dual_stack(prefix: &str) -> DecodeOutcome<DualStackAddress> {
        if prefix.len() != DUAL_STACK_ENCODED_LEN || !is_base32_shaped(prefix) {
            return DecodeOutcome::NoMatch;
        }

        let (v4_text, v6_text) = prefix.split_at(IPV4_ENCODED_LEN);
        let ipv4 = match base32::base32_to_ipv4(v4_text) {
            Ok(v4) => v4,
            Err(e) => return malformed("dual-stack IPv4 half", &e),
        };
        let ipv6 = match base32::base32_to_ipv6(v6_text) {
            Ok(v6) => v6,
            Err(e) => return malformed("dual-stack IPv6 half", &e),
        };

        debug!(prefix = %prefix, ipv4 = %ipv4, ipv6 = %ipv6, "Matched dual-stack");
        DecodeOutcome::Matched(DualStackAddress::new(ipv4, ipv6))
    }

    pub fn direct_ipv4(prefix: &str) -> Option<Ipv4Addr> {
        prefix.parse().ok()
    }

    /// `-` stands for `:`; a `z` stands for one `::` run.
    pub fn direct_ipv6(prefix: &str) -> Option<Ipv6Addr> {
        if !prefix.contains('-') && !prefix.contains('z') {
            return None;
        }
        let text = if prefix.contains('z') {
            prefix.replace('z', "::").replace('-', ":")
        } else {
            prefix.replace('-', ":")
        };
        text.parse().ok()
    }
}

/// Right character set for Base32, regardless of length or padding.
fn is_base32_shaped(prefix: &str) -> bool {
    !prefix.is_empty() && prefix.chars().all(base32::is_base32_char)
}

fn malformed<T>(what: &str, error: &Base32Error) -> DecodeOutcome<T> {
    debug!(format = what, error = %error, "Malformed address encoding");
    DecodeOutcome::malformed(format!("{}: {}", what, error))
}
