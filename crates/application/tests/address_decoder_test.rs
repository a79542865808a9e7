use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use twodns_application::decoders::{AddressDecoder, AddressMatch};
use twodns_domain::{AddressFormat, DecodeOutcome};

fn v6(text: &str) -> Ipv6Addr {
    text.parse().unwrap()
}

fn single(prefix: &str) -> (IpAddr, AddressFormat) {
    match AddressDecoder::decode_single(prefix) {
        DecodeOutcome::Matched(address) => (address.address, address.format),
        other => panic!("expected a match for {}, got {:?}", prefix, other),
    }
}

// ── direct notations ───────────────────────────────────────────────────────

#[test]
fn test_direct_ipv4() {
    assert_eq!(
        single("1.2.3.4"),
        (IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)), AddressFormat::DirectIpv4)
    );
    assert_eq!(
        single("192.168.1.1").1,
        AddressFormat::DirectIpv4
    );
}

#[test]
fn test_direct_ipv4_rejects_bad_quads() {
    assert_eq!(AddressDecoder::direct_ipv4("1.2.3"), None);
    assert_eq!(AddressDecoder::direct_ipv4("1.2.3.256"), None);
    assert_eq!(AddressDecoder::direct_ipv4("1.2.3.4.5"), None);
}

#[test]
fn test_direct_ipv6_omitted_zero_notation() {
    assert_eq!(
        single("2001-db8-85a3-0-0-8a2e-370-7334"),
        (
            IpAddr::V6(v6("2001:db8:85a3::8a2e:370:7334")),
            AddressFormat::DirectIpv6
        )
    );
}

#[test]
fn test_direct_ipv6_z_notation() {
    assert_eq!(
        AddressDecoder::direct_ipv6("2001-db8z8a2e-370-7334"),
        Some(v6("2001:db8::8a2e:370:7334"))
    );
    assert_eq!(AddressDecoder::direct_ipv6("z1"), Some(Ipv6Addr::LOCALHOST));
    assert_eq!(AddressDecoder::direct_ipv6("fe80z1"), Some(v6("fe80::1")));
    assert_eq!(AddressDecoder::direct_ipv6("z"), Some(Ipv6Addr::UNSPECIFIED));
}

#[test]
fn test_direct_ipv6_rejects_multiple_z() {
    assert_eq!(AddressDecoder::direct_ipv6("2001z1z2"), None);
}

#[test]
fn test_direct_ipv6_requires_separators() {
    assert_eq!(AddressDecoder::direct_ipv6("abcd"), None);
    assert_eq!(AddressDecoder::direct_ipv6("not-an-address"), None);
}

// ── Base32 forms ───────────────────────────────────────────────────────────

#[test]
fn test_base32_ipv4() {
    assert_eq!(
        single("aebagba8"),
        (IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)), AddressFormat::Base32Ipv4)
    );
    assert_eq!(single("YCUACAI8").0, IpAddr::V4(Ipv4Addr::new(192, 168, 1, 1)));
}

#[test]
fn test_base32_ipv6() {
    assert_eq!(
        single("aaaaaaaaaaaaaaaaaaaaaaaaae888888"),
        (IpAddr::V6(Ipv6Addr::LOCALHOST), AddressFormat::Base32Ipv6)
    );
    assert_eq!(
        single("72AAAAAAAAAAAAAAAAAAAAAAAE888888").0,
        IpAddr::V6(v6("fe80::1"))
    );
}

#[test]
fn test_base32_wrong_decoded_length_is_malformed() {
    assert!(matches!(
        AddressDecoder::decode_single("nbswy3dp"),
        DecodeOutcome::Malformed(_)
    ));
}

#[test]
fn test_non_base32_shapes_do_not_match() {
    assert_eq!(AddressDecoder::decode_single("www"), DecodeOutcome::NoMatch);
    assert_eq!(AddressDecoder::decode_single("hello123"), DecodeOutcome::NoMatch);
    assert_eq!(AddressDecoder::decode_single("aebagba"), DecodeOutcome::NoMatch);
}

#[test]
fn test_direct_ipv4_has_priority() {
    let (address, format) = single("1.2.3.4");
    assert_eq!(format, AddressFormat::DirectIpv4);
    assert_eq!(address, IpAddr::V4(Ipv4Addr::new(1, 2, 3, 4)));
}

// ── dual-stack ─────────────────────────────────────────────────────────────

const DUAL_STACK: &str = "AEBAGBA8AAAAAAAAAAAAAAAAAAAAAAAAAE888888";

#[test]
fn test_dual_stack() {
    match AddressDecoder::decode_dual_stack(DUAL_STACK) {
        DecodeOutcome::Matched(pair) => {
            assert_eq!(pair.ipv4, Ipv4Addr::new(1, 2, 3, 4));
            assert_eq!(pair.ipv6, Ipv6Addr::LOCALHOST);
        }
        other => panic!("expected dual-stack match, got {:?}", other),
    }
}

#[test]
fn test_dual_stack_through_full_decoder() {
    let lower = DUAL_STACK.to_ascii_lowercase();
    assert!(matches!(
        AddressDecoder::decode(&lower),
        DecodeOutcome::Matched(AddressMatch::DualStack(_))
    ));
}

#[test]
fn test_dual_stack_wrong_length_does_not_match() {
    assert_eq!(
        AddressDecoder::decode_dual_stack(&DUAL_STACK[..39]),
        DecodeOutcome::NoMatch
    );
    let longer = format!("{}A", DUAL_STACK);
    assert_eq!(AddressDecoder::decode_dual_stack(&longer), DecodeOutcome::NoMatch);
}

#[test]
fn test_dual_stack_bad_half_is_malformed() {
    // IPv4 half decodes to 5 bytes.
    let bad_v4 = format!("NBSWY3DP{}", &DUAL_STACK[8..]);
    assert!(matches!(
        AddressDecoder::decode_dual_stack(&bad_v4),
        DecodeOutcome::Malformed(_)
    ));

    // IPv6 half has a broken padding run.
    let bad_v6 = format!("{}AAAAAAAAAAAAAAAAAAAAAAAAAAE88888", &DUAL_STACK[..8]);
    assert!(matches!(
        AddressDecoder::decode_dual_stack(&bad_v6),
        DecodeOutcome::Malformed(_)
    ));
}

#[test]
fn test_full_decoder_single_before_dual_stack() {
    assert!(matches!(
        AddressDecoder::decode("aebagba8"),
        DecodeOutcome::Matched(AddressMatch::Single(_))
    ));
    assert_eq!(AddressDecoder::decode("mail"), DecodeOutcome::NoMatch);
}
