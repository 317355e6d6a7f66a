// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for PowerDNS API operations and reconciliation.
//!
//! Three failure families, all fatal to the running invocation:
//!
//! - validation errors, raised before any remote call is made
//! - resolution errors, raised when an operation requires an entity
//!   (zone, cryptokey, TSIG key, RRset) that does not exist remotely
//! - remote API errors, carrying the server's own message verbatim
//!
//! Idempotence is the recovery mechanism: re-running the same desired
//! state after any of these is safe.

use thiserror::Error;

/// Errors produced while converging a PowerDNS server to a desired state.
#[derive(Error, Debug)]
pub enum Error {
    /// Desired-state input violates a declared invariant.
    ///
    /// Checked before any remote call, so no partial mutation can have
    /// happened when this is returned.
    #[error("invalid input: {reason}")]
    Validation {
        /// Explanation of what is invalid
        reason: String,
    },

    /// Zone name did not resolve to a zone id and the requested operation
    /// requires the zone to exist (notify, retrieve, rrset/cryptokey work).
    #[error("zone '{zone}' not found")]
    ZoneNotFound {
        /// The zone name that failed to resolve
        zone: String,
    },

    /// NOTIFY requested for a zone kind that is not a transfer source.
    #[error("NOTIFY cannot be requested for '{kind}' zones")]
    NotifyNotSupported {
        /// The zone kind that rejected the operation
        kind: String,
    },

    /// Retrieval requested for a zone kind that is not a transfer sink.
    #[error("retrieval can only be requested for Slave or Consumer zones, not '{kind}'")]
    RetrieveNotSupported {
        /// The zone kind that rejected the operation
        kind: String,
    },

    /// DELETE requested for an RRset that does not exist on the server.
    #[error("no matching RRset found for name '{name}' and type '{rtype}'")]
    RrsetNotFound {
        /// Owner name of the missing RRset
        name: String,
        /// Record type of the missing RRset
        rtype: String,
    },

    /// Cryptokey id not present in the zone's key listing.
    #[error("cryptokey '{id}' not found for zone '{zone}'")]
    CryptokeyNotFound {
        /// The key id that failed to resolve
        id: String,
        /// The zone whose listing was consulted
        zone: String,
    },

    /// The remote API rejected an operation (4xx/5xx).
    ///
    /// The server-provided message is attached verbatim; there is no
    /// automatic retry.
    #[error("API operation {operation} returned '{message}' (HTTP {status})")]
    Api {
        /// Name of the API operation that failed (e.g. `createZone`)
        operation: &'static str,
        /// HTTP status code returned by the server
        status: u16,
        /// Error message extracted from the response body
        message: String,
    },

    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("request to PowerDNS API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered 2xx but the body could not be decoded.
    #[error("API operation {operation} returned an undecodable body: {detail}")]
    InvalidResponse {
        /// Name of the API operation whose response failed to decode
        operation: &'static str,
        /// Decode failure detail
        detail: String,
    },
}

impl Error {
    /// Shorthand for a validation failure.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_validation() {
        let e = Error::validation("zone name 'example.com' does not end with '.'");
        assert_eq!(
            e.to_string(),
            "invalid input: zone name 'example.com' does not end with '.'"
        );
    }

    #[test]
    fn display_zone_not_found() {
        let e = Error::ZoneNotFound {
            zone: "missing.example.".into(),
        };
        assert_eq!(e.to_string(), "zone 'missing.example.' not found");
    }

    #[test]
    fn display_api_error() {
        let e = Error::Api {
            operation: "createZone",
            status: 422,
            message: "Domain 'example.com.' already exists".into(),
        };
        assert_eq!(
            e.to_string(),
            "API operation createZone returned 'Domain 'example.com.' already exists' (HTTP 422)"
        );
    }

    #[test]
    fn display_notify_gate() {
        let e = Error::NotifyNotSupported {
            kind: "Native".into(),
        };
        assert!(e.to_string().contains("Native"));
    }
}
