use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Which of the name encodings an address was recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFormat {
    /// `1.2.3.4.<suffix>`
    DirectIpv4,
    /// `2001-db8--1.<suffix>` or `2001-db8z1.<suffix>`
    DirectIpv6,
    /// `<base32 of 4 bytes>.<suffix>`
    Base32Ipv4,
    /// `<base32 of 16 bytes>.<suffix>`
    Base32Ipv6,
    /// `<base32 of 20 bytes>.<suffix>`
    DualStack,
}

impl AddressFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressFormat::DirectIpv4 => "direct-ipv4",
            AddressFormat::DirectIpv6 => "direct-ipv6",
            AddressFormat::Base32Ipv4 => "base32-ipv4",
            AddressFormat::Base32Ipv6 => "base32-ipv6",
            AddressFormat::DualStack => "dual-stack",
        }
    }
}

impl fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single address decoded from a name, tagged with its encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedAddress {
    pub address: IpAddr,
    pub format: AddressFormat,
}

impl EncodedAddress {
    pub fn new(address: IpAddr, format: AddressFormat) -> Self {
        Self { address, format }
    }

    pub fn is_private(&self) -> bool {
        match self.address {
            IpAddr::V4(v4) => is_private_ipv4(v4),
            IpAddr::V6(v6) => is_private_ipv6(v6),
        }
    }
}

/// IPv4 and IPv6 address pair carried by a 20-byte dual-stack payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DualStackAddress {
    pub ipv4: Ipv4Addr,
    pub ipv6: Ipv6Addr,
}

impl DualStackAddress {
    pub fn new(ipv4: Ipv4Addr, ipv6: Ipv6Addr) -> Self {
        Self { ipv4, ipv6 }
    }
}

/// RFC 1918 ranges: 10/8, 172.16/12, 192.168/16.
pub fn is_private_ipv4(addr: Ipv4Addr) -> bool {
    let [a, b, _, _] = addr.octets();
    a == 10 || (a == 172 && (16..=31).contains(&b)) || (a == 192 && b == 168)
}

/// Link-local fe80::/10 and unique-local fc00::/7.
pub fn is_private_ipv6(addr: Ipv6Addr) -> bool {
    let first = addr.segments()[0];
    (first & 0xffc0) == 0xfe80 || (first & 0xfe00) == 0xfc00
}
