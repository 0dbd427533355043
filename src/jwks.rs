//! Building a JSON Web Key Set from a PEM encoded RSA public key.
//!
//! The pipeline reads the key file, strips the PEM armor, decodes the
//! SubjectPublicKeyInfo, attaches the JWK metadata and renders the single-key
//! set as pretty JSON.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use build_jwks::jwks::{self, JwksBuilder};
//!
//! let builder = JwksBuilder::default().key_id("my-service");
//! let rendered = jwks::run(Path::new("public.pem"), Path::new("jwks.json"), &builder)?;
//! println!("{rendered}");
//! # Ok::<(), build_jwks::Error>(())
//! ```

use std::fs;
use std::path::Path;

use rsa::traits::PublicKeyParts;
use rsa::RsaPublicKey;
use sha2::Sha256;

use crate::algorithms::{rsa::public_key_from_der, AlgorithmIdentifier};
use crate::error::Error;
use crate::key::{JsonWebKey, JsonWebKeySet, KeyUse, Thumbprint};
use crate::output::write_atomic;
use crate::{fmt, pem};

/// Key identifier used when none is configured.
pub const DEFAULT_KEY_ID: &str = "hub-spid-login-test";

/// How the `kid` member of the generated key is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyId {
    /// A fixed identifier.
    Fixed(String),

    /// The RFC 7638 SHA-256 thumbprint of the key.
    Thumbprint,
}

impl Default for KeyId {
    fn default() -> Self {
        KeyId::Fixed(DEFAULT_KEY_ID.to_owned())
    }
}

/// Options for the generated JWK.
///
/// The defaults produce `use=sig`, `alg=RS256` and `kid=hub-spid-login-test`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwksBuilder {
    key_id: KeyId,
    algorithm: AlgorithmIdentifier,
    key_use: KeyUse,
}

impl Default for JwksBuilder {
    fn default() -> Self {
        Self {
            key_id: KeyId::default(),
            algorithm: AlgorithmIdentifier::RS256,
            key_use: KeyUse::Signature,
        }
    }
}

impl JwksBuilder {
    /// Use a fixed key identifier.
    pub fn key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = KeyId::Fixed(key_id.into());
        self
    }

    /// Use the RFC 7638 thumbprint of the key as its identifier.
    pub fn thumbprint_key_id(mut self) -> Self {
        self.key_id = KeyId::Thumbprint;
        self
    }

    /// Set the algorithm advertised in the `alg` member.
    pub fn algorithm(mut self, algorithm: AlgorithmIdentifier) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the intended key use.
    pub fn key_use(mut self, key_use: KeyUse) -> Self {
        self.key_use = key_use;
        self
    }

    /// Build the JWK for a public key.
    pub fn jwk(&self, key: &RsaPublicKey) -> Result<JsonWebKey, Error> {
        if !self.algorithm.is_rsa() {
            return Err(Error::UnsupportedAlgorithm(self.algorithm));
        }

        let key_id = match &self.key_id {
            KeyId::Fixed(key_id) => key_id.clone(),
            KeyId::Thumbprint => Thumbprint::<Sha256>::build(key)?.to_string(),
        };

        tracing::debug!(kid = %key_id, alg = %self.algorithm, key_use = %self.key_use, "building JWK");
        Ok(JsonWebKey::build(key)
            .with_key_use(self.key_use)
            .with_key_id(key_id)
            .with_algorithm(self.algorithm))
    }

    /// Build a key set holding the single JWK for a public key.
    pub fn jwks(&self, key: &RsaPublicKey) -> Result<JsonWebKeySet, Error> {
        self.jwk(key).map(JsonWebKeySet::from)
    }
}

/// Parse the contents of a PEM file into an RSA public key.
pub fn parse_public_key(contents: &str) -> Result<RsaPublicKey, Error> {
    let der = pem::decode_public_key(contents)?;
    let key = public_key_from_der(&der)?;
    tracing::debug!(bits = key.n().bits(), "parsed RSA public key");
    Ok(key)
}

/// Read a PEM file and parse it into an RSA public key.
pub fn read_public_key(path: &Path) -> Result<RsaPublicKey, Error> {
    let contents = fs::read_to_string(path).map_err(|source| Error::ReadInput {
        path: path.to_owned(),
        source,
    })?;

    parse_public_key(&contents)
}

/// Render a key set as pretty JSON with two-space indentation.
pub fn render(jwks: &JsonWebKeySet) -> Result<String, Error> {
    Ok(fmt::to_string_pretty(jwks)?)
}

/// Convert the PEM public key at `input` into a key set written to `output`.
///
/// Returns the rendered document, which is identical to the bytes written.
/// Nothing is written unless the key is parsed and rendered successfully.
pub fn run(input: &Path, output: &Path, builder: &JwksBuilder) -> Result<String, Error> {
    let key = read_public_key(input)?;
    let jwks = builder.jwks(&key)?;
    let rendered = render(&jwks)?;

    write_atomic(output, rendered.as_bytes())?;
    tracing::info!(input = %input.display(), output = %output.display(), "wrote key set");

    Ok(rendered)
}
