// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

pub(crate) static COLON: &str = ":";
pub(crate) static SLASH: &str = "/";
pub(crate) static BRACKET_L: &str = "[";
pub(crate) static BRACKET_R: &str = "]";

// endpoint.rs
pub(crate) static ERR_NO_HOST_PORT: &str = "no host and port in endpoint";
pub(crate) static ERR_INV_HOST: &str = "invalid host in endpoint";
pub(crate) static ERR_INV_PORT: &str = "invalid port in endpoint";

// cidr.rs
pub(crate) static ERR_NO_ADDR_SUBNET: &str = "no address and subnet in CIDR";
pub(crate) static ERR_INV_ADDR: &str = "invalid address in CIDR";
pub(crate) static ERR_INV_SUBNET: &str = "invalid subnet in CIDR";
pub(crate) static PANIC_PREFIX: &str = "Naughty programmer! Prefix cannot exceed family width!";
