//! # build-jwks: RSA public keys as JSON Web Key Sets
//!
//! Convert a PEM encoded RSA public key (X.509 SubjectPublicKeyInfo) into a
//! [JWKS][RFC7517] document holding a single signing key.
//!
//! ```rust
//! use build_jwks::jwks::{parse_public_key, render, JwksBuilder};
//!
//! let pem = "-----BEGIN PUBLIC KEY-----
//! MIIBIjANBgkqhkiG9w0BAQEFAAOCAQ8AMIIBCgKCAQEA0vx7agoebGcQSuuPiLJX
//! ZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tS
//! oc/BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ/2W+5JsGY4Hc5n9yBXArwl93lqt
//! 7/RN5w6Cf0h4QyQ5v+65YGjQR0/FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0
//! zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt+bFTWhAI4vMQFh6WeZu0f
//! M4lFd2NcRwr3XPksINHaQ+G/xBniIqbw0Ls1jF44+csFCur+kEgU8awapJzKnqDK
//! gwIDAQAB
//! -----END PUBLIC KEY-----
//! ";
//!
//! let key = parse_public_key(pem)?;
//! let jwks = JwksBuilder::default().jwks(&key)?;
//!
//! let jwk = &jwks.keys[0];
//! assert_eq!(jwk.key_id(), Some("hub-spid-login-test"));
//! assert_eq!(jwk.parameter("e").unwrap(), "AQAB");
//!
//! println!("{}", render(&jwks)?);
//! # Ok::<(), build_jwks::Error>(())
//! ```
//!
//! The JWK members are written in the order `kty`, `e`, `use`, `kid`, `alg`,
//! `n`. Consumers must treat the object as unordered; the order only keeps
//! the output byte-for-byte stable.
//!
//! [RFC7517]: https://tools.ietf.org/html/rfc7517

#![deny(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithms;
pub mod base64data;
mod error;
pub mod fmt;
pub mod jwks;
pub mod key;
pub mod output;
pub mod pem;

pub use algorithms::AlgorithmIdentifier;
pub use error::Error;
pub use jwks::{JwksBuilder, DEFAULT_KEY_ID};
pub use key::{JsonWebKey, JsonWebKeySet, KeyUse, Thumbprint};
