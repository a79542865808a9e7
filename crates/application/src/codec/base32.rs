//! RFC 4648 Base32 with DNS-safe padding.
//!
//! `=` is not legal inside a DNS label, so encoding pads with `8` instead.
//! `8` is outside the alphabet, which keeps the substitution unambiguous.
//! Decoding accepts either padding symbol and either letter case.

use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;

pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Padding symbol emitted by [`encode`].
pub const PADDING: char = '8';

/// Padding symbol of standard RFC 4648 text, still accepted by [`decode`].
pub const STANDARD_PADDING: char = '=';

/// Base32 length of a 4-byte payload.
pub const IPV4_ENCODED_LEN: usize = 8;

/// Base32 length of a 16-byte payload.
pub const IPV6_ENCODED_LEN: usize = 32;

/// Base32 length of a 20-byte IPv4 + IPv6 payload.
pub const DUAL_STACK_ENCODED_LEN: usize = 40;

/// Trailing padding runs that can follow a 1..=4 byte tail.
const VALID_PADDING_RUNS: [usize; 5] = [0, 1, 3, 4, 6];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Base32Error {
    #[error("Empty Base32 input")]
    Empty,

    #[error("Base32 length {0} is not a multiple of 8")]
    InvalidLength(usize),

    #[error("Invalid Base32 character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },

    #[error("Invalid Base32 padding run of {0} characters")]
    InvalidPadding(usize),

    #[error("Padding before data at position {0}")]
    PaddingInData(usize),

    #[error("Decoded {actual} bytes, expected {expected}")]
    UnexpectedLength { expected: usize, actual: usize },

    #[error("Decoded payload is not valid UTF-8")]
    InvalidUtf8,
}

/// Encodes `bytes` as uppercase Base32 padded with `8`.
///
/// An empty payload yields an empty string.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(encoded_len(bytes.len()));
    let mut buffer: u64 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | u64::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            let index = ((buffer >> bits) & 0x1f) as usize;
            out.push(ALPHABET[index] as char);
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        let index = ((buffer << (5 - bits)) & 0x1f) as usize;
        out.push(ALPHABET[index] as char);
    }

    while out.len() % 8 != 0 {
        out.push(PADDING);
    }
    out
}

/// Decodes Base32 text in either case, padded with `8` or `=`.
///
/// Bits left over after the last whole byte are discarded.
pub fn decode(text: &str) -> Result<Vec<u8>, Base32Error> {
    validate_base32_format(text)?;

    let data = &text.as_bytes()[..text.len() - count_padding(text)];
    let mut out = Vec::with_capacity(data.len() * 5 / 8);
    let mut buffer: u64 = 0;
    let mut bits: u32 = 0;

    for (position, &c) in data.iter().enumerate() {
        let value = symbol_value(c).ok_or(Base32Error::InvalidCharacter {
            ch: c as char,
            position,
        })?;
        buffer = (buffer << 5) | u64::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push(((buffer >> bits) & 0xff) as u8);
        }
        buffer &= (1 << bits) - 1;
    }

    Ok(out)
}

fn symbol_value(c: u8) -> Option<u8> {
    match c.to_ascii_uppercase() {
        c @ b'A'..=b'Z' => Some(c - b'A'),
        c @ b'2'..=b'7' => Some(c - b'2' + 26),
        _ => None,
    }
}

fn is_padding(c: char) -> bool {
    c == PADDING || c == STANDARD_PADDING
}

/// Replaces standard `=` padding with `8`.
pub fn make_dns_safe(text: &str) -> String {
    text.replace(STANDARD_PADDING, "8")
}

/// Replaces `8` padding with standard `=`.
pub fn restore_standard(text: &str) -> String {
    text.replace(PADDING, "=")
}

/// Alphabet symbol (either case) or a padding symbol.
pub fn is_base32_char(c: char) -> bool {
    c.is_ascii() && (symbol_value(c as u8).is_some() || is_padding(c))
}

/// Length of the trailing padding run.
pub fn count_padding(text: &str) -> usize {
    text.chars().rev().take_while(|&c| is_padding(c)).count()
}

pub fn validate_base32_format(text: &str) -> Result<(), Base32Error> {
    if text.is_empty() {
        return Err(Base32Error::Empty);
    }

    let mut padding_seen = false;
    for (position, ch) in text.chars().enumerate() {
        if !is_base32_char(ch) {
            return Err(Base32Error::InvalidCharacter { ch, position });
        }
        if is_padding(ch) {
            padding_seen = true;
        } else if padding_seen {
            return Err(Base32Error::PaddingInData(position));
        }
    }

    if text.len() % 8 != 0 {
        return Err(Base32Error::InvalidLength(text.len()));
    }

    let padding = count_padding(text);
    if !VALID_PADDING_RUNS.contains(&padding) {
        return Err(Base32Error::InvalidPadding(padding));
    }

    Ok(())
}

pub fn is_valid_base32(text: &str) -> bool {
    validate_base32_format(text).is_ok()
}

/// Uppercases `text`, switches it to `8` padding and validates it.
pub fn normalize(text: &str) -> Result<String, Base32Error> {
    let normalized = make_dns_safe(&text.to_ascii_uppercase());
    validate_base32_format(&normalized)?;
    Ok(normalized)
}

pub fn ipv4_to_base32(addr: Ipv4Addr) -> String {
    encode(&addr.octets())
}

pub fn base32_to_ipv4(text: &str) -> Result<Ipv4Addr, Base32Error> {
    let octets: [u8; 4] = decode_exact(text)?;
    Ok(Ipv4Addr::from(octets))
}

pub fn ipv6_to_base32(addr: Ipv6Addr) -> String {
    encode(&addr.octets())
}

pub fn base32_to_ipv6(text: &str) -> Result<Ipv6Addr, Base32Error> {
    let octets: [u8; 16] = decode_exact(text)?;
    Ok(Ipv6Addr::from(octets))
}

fn decode_exact<const N: usize>(text: &str) -> Result<[u8; N], Base32Error> {
    let bytes = decode(text)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| Base32Error::UnexpectedLength {
        expected: N,
        actual,
    })
}

pub fn json_to_base32(json: &str) -> String {
    encode(json.as_bytes())
}

pub fn base32_to_json_string(text: &str) -> Result<String, Base32Error> {
    String::from_utf8(decode(text)?).map_err(|_| Base32Error::InvalidUtf8)
}

/// Encoded length of an `n`-byte payload: `ceil(n / 5) * 8`.
pub fn encoded_len(n: usize) -> usize {
    n.div_ceil(5) * 8
}

/// Largest payload a text of `text_len` characters can decode to.
pub fn decoded_len_upper_bound(text_len: usize) -> usize {
    text_len * 5 / 8
}
