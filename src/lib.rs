// Copyright (c) 2026 Mikko Tanner. All rights reserved.
// Licensed under the MIT License or the Apache License, Version 2.0.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Strict parsers for tunnel peer endpoints and CIDR address ranges.
//!
//! User-supplied strings gate what gets written into a tunnel
//! configuration, so both parsers reject malformed input early and
//! report the exact segment of the input which was at fault, verbatim,
//! for inline error display.

mod validators;

pub use validators::{CidrAddress, CidrError, Endpoint, EndpointError};
