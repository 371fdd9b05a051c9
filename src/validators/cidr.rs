// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{is_decimal, strings::*, CidrError, IPV4_BITS, IPV6_BITS};
use ipnet::IpNet;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, net::IpAddr, str::FromStr};
use tracing::debug;

/**
A validated CIDR address: IP literal plus prefix length.

Describes an allowed or assigned address range in a tunnel
configuration. The address is stored exactly as given (host bits are
*not* masked off); `prefix` never exceeds the address family width.
*/
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct CidrAddress {
    pub addr: IpAddr,
    /// **v4**: `0..=32`, **v6**: `0..=128`
    pub prefix: u8,
}

impl CidrAddress {
    /// Returns true if the CIDR represents a single host address.
    pub fn is_host(&self) -> bool {
        match self.addr {
            IpAddr::V4(_) => self.prefix == IPV4_BITS,
            IpAddr::V6(_) => self.prefix == IPV6_BITS,
        }
    }

    pub fn is_ipv4(&self) -> bool {
        matches!(self.addr, IpAddr::V4(_))
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self.addr, IpAddr::V6(_))
    }
}

impl fmt::Display for CidrAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SLASH}{}", self.addr, self.prefix)
    }
}

impl FromStr for CidrAddress {
    type Err = CidrError;

    /**
    Parse an `address/prefix` CIDR string.

    The split point is the **last** `/` in the input. The subnet
    segment is validated before the address segment, so a malformed
    subnet is reported even when the address is also bad. The prefix
    range check (32 for IPv4, 128 for IPv6) runs only after the address
    has validated, since the limit depends on the address family.
    */
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (addr_part, subnet_part) = match raw.rsplit_once(SLASH) {
            Some(split) => split,
            None => {
                debug!("CIDR '{raw}': no address/subnet separator");
                return Err(CidrError::NoAddressAndSubnet(raw.into()));
            }
        };

        // Subnet format first: a non-empty run of decimal digits.
        if !is_decimal(subnet_part) {
            debug!("CIDR '{raw}': malformed subnet '{subnet_part}'");
            return Err(CidrError::InvalidSubnet(subnet_part.into()));
        }

        // No bracket syntax here: the whole segment must parse.
        let addr: IpAddr = addr_part.parse().map_err(|_| {
            debug!("CIDR '{raw}': invalid address '{addr_part}'");
            CidrError::InvalidAddress(addr_part.into())
        })?;

        let bits: u8 = match addr {
            IpAddr::V4(_) => IPV4_BITS,
            IpAddr::V6(_) => IPV6_BITS,
        };
        let prefix: u8 = match subnet_part.parse::<u8>() {
            Ok(pre) if pre <= bits => pre,
            _ => {
                debug!("CIDR '{raw}': prefix '{subnet_part}' out of range ({bits}-bit family)");
                return Err(CidrError::InvalidSubnet(subnet_part.into()));
            }
        };

        Ok(CidrAddress { addr, prefix })
    }
}

/* ---------------------------------- */

impl From<&CidrAddress> for IpNet {
    /// Convert to an [IpNet] for range arithmetic. The prefix length
    /// invariant makes this infallible.
    fn from(cidr: &CidrAddress) -> Self {
        IpNet::new(cidr.addr, cidr.prefix).expect(PANIC_PREFIX)
    }
}

impl Serialize for CidrAddress {
    /// Serialize as the canonical `address/prefix` string.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CidrAddress {
    /// Deserialize from an `address/prefix` string.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>,
    {
        let raw: String = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    const V4_OK: &str = "192.168.0.1/24";
    const V6_OK: &str = "2607:f938:3001:4000::aac/24";
    const V6_ADDR: &str = "2607:f938:3001:4000::aac";

    #[test]
    fn test_parse_v4() {
        let cidr: CidrAddress = V4_OK.parse().unwrap();
        assert_eq!(cidr.addr, "192.168.0.1".parse::<IpAddr>().unwrap());
        assert_eq!(cidr.prefix, 24);
        assert!(cidr.is_ipv4());
        assert!(!cidr.is_host());
    }

    #[test]
    fn test_parse_v6() {
        let cidr: CidrAddress = V6_OK.parse().unwrap();
        assert_eq!(cidr.addr, V6_ADDR.parse::<IpAddr>().unwrap());
        assert_eq!(cidr.prefix, 24);
        assert!(cidr.is_ipv6());
    }

    #[test]
    fn test_invalid_address() {
        for (input, addr) in [("12345/12345", "12345"), ("/12345", "")] {
            assert_eq!(
                input.parse::<CidrAddress>(),
                Err(CidrError::InvalidAddress(addr.into())),
                "input: '{input}'"
            );
        }
    }

    #[test]
    fn test_invalid_subnet() {
        for (input, subnet) in [
            ("/", ""),
            ("2607:f938:3001:4000::aac/a", "a"),
            ("2607:f938:3001:4000:/aac", "aac"),
            ("2607:f938:3001:4000::aac/", ""),
            ("192.168.0.1/a", "a"),
            ("192.168.0.1/", ""),
            ("192.168.0.1/-1", "-1"),
            ("192.168.0.1/+24", "+24"),
            ("192.168.0.1/ 24", " 24"),
        ] {
            assert_eq!(
                input.parse::<CidrAddress>(),
                Err(CidrError::InvalidSubnet(subnet.into())),
                "input: '{input}'"
            );
        }
    }

    #[test]
    fn test_no_address_and_subnet() {
        for input in ["192.168.0.1", "12345"] {
            assert_eq!(
                input.parse::<CidrAddress>(),
                Err(CidrError::NoAddressAndSubnet(input.into()))
            );
        }
    }

    #[test]
    fn test_subnet_preempts_address() {
        // both segments malformed: the subnet error always wins
        assert_eq!(
            "2607:f938:3001:4000:/aac".parse::<CidrAddress>(),
            Err(CidrError::InvalidSubnet("aac".into()))
        );
    }

    #[test]
    fn test_last_separator_rule() {
        // the split is at the final slash: the earlier one stays on the
        // address side and fails there
        assert_eq!(
            "10.0.0.0/8/16".parse::<CidrAddress>(),
            Err(CidrError::InvalidAddress("10.0.0.0/8".into()))
        );
    }

    #[test]
    fn test_prefix_range() {
        for input in ["192.168.0.1/33", "192.168.0.1/200", "::1/129", "::1/999"] {
            let subnet: &str = input.rsplit_once('/').unwrap().1;
            assert_eq!(
                input.parse::<CidrAddress>(),
                Err(CidrError::InvalidSubnet(subnet.into())),
                "input: '{input}'"
            );
        }

        let cidr: CidrAddress = "192.168.0.1/32".parse().unwrap();
        assert!(cidr.is_host());
        let cidr: CidrAddress = "::1/128".parse().unwrap();
        assert!(cidr.is_host());
        let cidr: CidrAddress = "::1/0".parse().unwrap();
        assert_eq!(cidr.prefix, 0);
    }

    #[test]
    fn test_display_roundtrip() {
        for input in [V4_OK, V6_OK] {
            let cidr: CidrAddress = input.parse().unwrap();
            assert_eq!(cidr.to_string(), input);
            assert_eq!(cidr.to_string().parse::<CidrAddress>().unwrap(), cidr);
        }
    }

    #[test]
    fn test_ipnet_conversion() {
        let cidr: CidrAddress = V4_OK.parse().unwrap();
        let net: IpNet = (&cidr).into();
        assert_eq!(net.addr(), cidr.addr);
        assert_eq!(net.prefix_len(), cidr.prefix);
        assert_eq!(net.to_string(), V4_OK);
    }
}
