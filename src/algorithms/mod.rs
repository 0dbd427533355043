//! JSON Web Algorithms (RFC 7518)
//!
//! This module implements the JWA identifiers which may be attached to a JWK
//! in its `alg` member.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod rsa;

/// The identifiers used in JWA to indicate how a JWS or JWE is signed or encrypted.
///
/// This is the list of standard identifiers defined in [RFC 7518](https://tools.ietf.org/html/rfc7518#section-3.1).
/// Only the RSA family can be attached to the keys produced by this crate.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum AlgorithmIdentifier {
    HS256,
    HS384,
    HS512,
    RS256,
    RS384,
    RS512,
    ES256,
    ES384,
    ES512,
    PS256,
    PS384,
    PS512,
    EdDSA,
    #[serde(rename = "none")]
    None,
}

impl AlgorithmIdentifier {
    /// The registered name of this algorithm, as it appears in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlgorithmIdentifier::HS256 => "HS256",
            AlgorithmIdentifier::HS384 => "HS384",
            AlgorithmIdentifier::HS512 => "HS512",
            AlgorithmIdentifier::RS256 => "RS256",
            AlgorithmIdentifier::RS384 => "RS384",
            AlgorithmIdentifier::RS512 => "RS512",
            AlgorithmIdentifier::ES256 => "ES256",
            AlgorithmIdentifier::ES384 => "ES384",
            AlgorithmIdentifier::ES512 => "ES512",
            AlgorithmIdentifier::PS256 => "PS256",
            AlgorithmIdentifier::PS384 => "PS384",
            AlgorithmIdentifier::PS512 => "PS512",
            AlgorithmIdentifier::EdDSA => "EdDSA",
            AlgorithmIdentifier::None => "none",
        }
    }

    /// The JWK key type (`kty`) which this algorithm operates on, if any.
    pub fn key_type(&self) -> Option<&'static str> {
        match self {
            AlgorithmIdentifier::HS256 | AlgorithmIdentifier::HS384 | AlgorithmIdentifier::HS512 => {
                Some("oct")
            }
            AlgorithmIdentifier::RS256
            | AlgorithmIdentifier::RS384
            | AlgorithmIdentifier::RS512
            | AlgorithmIdentifier::PS256
            | AlgorithmIdentifier::PS384
            | AlgorithmIdentifier::PS512 => Some("RSA"),
            AlgorithmIdentifier::ES256 | AlgorithmIdentifier::ES384 | AlgorithmIdentifier::ES512 => {
                Some("EC")
            }
            AlgorithmIdentifier::EdDSA => Some("OKP"),
            AlgorithmIdentifier::None => None,
        }
    }

    /// Whether this algorithm is an RSASSA algorithm (PKCS#1 v1.5 or PSS).
    pub fn is_rsa(&self) -> bool {
        self.key_type() == Some(self::rsa::KEY_TYPE)
    }
}

impl fmt::Display for AlgorithmIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown JWA algorithm: {0}")]
pub struct UnknownAlgorithm(String);

impl FromStr for AlgorithmIdentifier {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_value(serde_json::Value::String(s.to_owned()))
            .map_err(|_| UnknownAlgorithm(s.to_owned()))
    }
}
