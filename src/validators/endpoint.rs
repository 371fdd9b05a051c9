// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::{is_decimal, strings::*, EndpointError};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt,
    net::{IpAddr, Ipv6Addr, SocketAddr},
    str::FromStr,
};
use tracing::debug;

/**
A validated tunnel peer endpoint: IP literal plus UDP port.

Only constructed by a successful parse. Surrounding brackets on an
IPv6 host are surface syntax and are stripped before storage; [Display]
re-brackets them, so re-parsing the displayed form yields an equal value.
*/
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Endpoint {
    pub host: IpAddr,
    pub port: u16,
}

impl Endpoint {
    pub fn is_ipv4(&self) -> bool {
        matches!(self.host, IpAddr::V4(_))
    }

    pub fn is_ipv6(&self) -> bool {
        matches!(self.host, IpAddr::V6(_))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host {
            IpAddr::V4(v4) => write!(f, "{v4}{COLON}{}", self.port),
            IpAddr::V6(v6) => {
                write!(f, "{BRACKET_L}{v6}{BRACKET_R}{COLON}{}", self.port)
            }
        }
    }
}

impl FromStr for Endpoint {
    type Err = EndpointError;

    /**
    Parse a `host:port` endpoint string.

    The split point is the **last** `:` in the input, since IPv6
    literals contain colons of their own. The port segment is validated
    before the host segment, so a missing or malformed port yields a
    single predictable error even over a host which is also invalid
    (e.g. a bracketed literal with no port at all, where the trailing
    `aac]` remnant lands on the port side of the split).

    Accepted host forms:
    - IPv4 literal: `192.168.0.1:51820`
    - bracketed IPv6 literal: `[2001:db8::1]:51820`
    - bare IPv6 literal, when everything before the last colon is
      itself a valid literal: `2001:db8::1:51820`
    */
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (host_part, port_part) = match raw.rsplit_once(COLON) {
            Some(split) => split,
            None => {
                debug!("endpoint '{raw}': no host/port separator");
                return Err(EndpointError::NoHostAndPort(raw.into()));
            }
        };

        // Port first: digits-only format check, then the u16 range check.
        if !is_decimal(port_part) {
            debug!("endpoint '{raw}': malformed port '{port_part}'");
            return Err(EndpointError::InvalidPort(port_part.into()));
        }
        let port: u16 = port_part.parse().map_err(|_| {
            debug!("endpoint '{raw}': port '{port_part}' out of range");
            EndpointError::InvalidPort(port_part.into())
        })?;

        // A bracketed host must hold an IPv6 literal inside the brackets;
        // anything else must parse whole. The error payload is always the
        // original segment, brackets included.
        let host: IpAddr = match bracketed(host_part) {
            Some(inner) => inner.parse::<Ipv6Addr>().map(IpAddr::V6),
            None => host_part.parse::<IpAddr>(),
        }
        .map_err(|_| {
            debug!("endpoint '{raw}': invalid host '{host_part}'");
            EndpointError::InvalidHost(host_part.into())
        })?;

        Ok(Endpoint { host, port })
    }
}

/// Interior of a `[...]`-wrapped host segment, if both brackets are present.
#[inline]
fn bracketed(host: &str) -> Option<&str> {
    host.strip_prefix(BRACKET_L)?.strip_suffix(BRACKET_R)
}

/* ---------------------------------- */

impl From<SocketAddr> for Endpoint {
    fn from(addr: SocketAddr) -> Self {
        Endpoint {
            host: addr.ip(),
            port: addr.port(),
        }
    }
}

impl From<&Endpoint> for SocketAddr {
    fn from(ep: &Endpoint) -> Self {
        SocketAddr::new(ep.host, ep.port)
    }
}

impl Serialize for Endpoint {
    /// Serialize as the canonical `host:port` string.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Endpoint {
    /// Deserialize from a `host:port` string.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where D: Deserializer<'de>,
    {
        let raw: String = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/* -------------------------------------------------------------------------- */
