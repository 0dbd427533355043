//! JSON Web Keys ([RFC 7517][RFC7517])
//!
//! This module implements the JWK format for representing cryptographic keys,
//! the JWK Set container, and JWK thumbprints ([RFC 7638][RFC7638]).
//!
//! [RFC7517]: https://tools.ietf.org/html/rfc7517
//! [RFC7638]: https://tools.ietf.org/html/rfc7638

use std::{collections::BTreeMap, fmt, hash::Hash, marker::PhantomData};

use base64ct::Encoding;
use serde::{
    ser::{self, SerializeMap},
    Deserialize, Serialize,
};

use crate::algorithms::AlgorithmIdentifier;

/// Members which are written first, in this order, when a JWK is serialized.
/// Any other member follows in lexicographic order.
const MEMBER_ORDER: [&str; 6] = ["kty", "e", "use", "kid", "alg", "n"];

/// Trait for keys which can be used as a JWK.
pub trait JWKeyType {
    /// The string used to identify the JWK type in the `kty` field.
    const KEY_TYPE: &'static str;
}

impl<T> JWKeyType for &T
where
    T: JWKeyType,
{
    const KEY_TYPE: &'static str = T::KEY_TYPE;
}

/// Trait for keys which can be used as a JWK, automatically implemented for
/// types which implement `JWKeyType`, to make `SerializeJWK` object-safe.
pub trait DynJwkKeyType {
    /// The string used to identify the JWK type in the `kty` field.
    fn key_type(&self) -> &'static str;
}

impl<T> DynJwkKeyType for T
where
    T: JWKeyType,
{
    fn key_type(&self) -> &'static str {
        T::KEY_TYPE
    }
}

/// Trait for keys which can be serialized as a JWK.
pub trait SerializeJWK: DynJwkKeyType {
    /// Return the key-specific parameters to be serialized in the JWK.
    ///
    /// These are exactly the required members of the key type (other than
    /// `kty`), which are also the members hashed into a thumbprint.
    fn parameters(&self) -> Vec<(String, serde_json::Value)>;
}

/// Trait for keys which can be deserialized from a JWK.
pub trait DeserializeJWK: JWKeyType {
    /// From a set of parameters, build a key.
    fn build(parameters: &BTreeMap<String, serde_json::Value>) -> Result<Self, serde_json::Error>
    where
        Self: Sized;
}

/// Intended use of the public key (the `use` member, RFC 7517 section 4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeyUse {
    /// The key is used to verify signatures.
    #[default]
    #[serde(rename = "sig")]
    Signature,

    /// The key is used to encrypt data.
    #[serde(rename = "enc")]
    Encryption,
}

impl KeyUse {
    /// The registered value for this key use.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyUse::Signature => "sig",
            KeyUse::Encryption => "enc",
        }
    }
}

impl fmt::Display for KeyUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when converting a [`JsonWebKey`] back into a concrete key.
#[derive(Debug, thiserror::Error)]
pub enum JsonWebKeyError {
    /// The JWK describes a different type of key.
    #[error("expected a JWK with kty={expected}, found kty={found}")]
    KeyType {
        /// The `kty` of the requested key type.
        expected: &'static str,
        /// The `kty` found in the JWK.
        found: String,
    },

    /// The key parameters could not be decoded.
    #[error("invalid JWK parameters: {0}")]
    Parameters(#[from] serde_json::Error),
}

/// JSON Web Key in serialized form.
///
/// This struct contains the key parameters along with the optional metadata
/// members `use`, `kid` and `alg`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JsonWebKey {
    #[serde(rename = "kty")]
    key_type: String,

    #[serde(rename = "use", default)]
    key_use: Option<KeyUse>,

    #[serde(rename = "kid", default)]
    key_id: Option<String>,

    #[serde(rename = "alg", default)]
    algorithm: Option<AlgorithmIdentifier>,

    #[serde(flatten)]
    parameters: BTreeMap<String, serde_json::Value>,
}

impl JsonWebKey {
    /// Build a JWK from a key, with no metadata members.
    pub fn build<K: SerializeJWK + ?Sized>(key: &K) -> Self {
        JsonWebKey {
            key_type: key.key_type().into(),
            key_use: None,
            key_id: None,
            algorithm: None,
            parameters: key.parameters().into_iter().collect(),
        }
    }

    /// Set the `use` member.
    pub fn with_key_use(mut self, key_use: KeyUse) -> Self {
        self.key_use = Some(key_use);
        self
    }

    /// Set the `kid` member.
    pub fn with_key_id(mut self, key_id: impl Into<String>) -> Self {
        self.key_id = Some(key_id.into());
        self
    }

    /// Set the `alg` member.
    pub fn with_algorithm(mut self, algorithm: AlgorithmIdentifier) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// The `kty` member.
    pub fn key_type(&self) -> &str {
        &self.key_type
    }

    /// The `use` member, if present.
    pub fn key_use(&self) -> Option<KeyUse> {
        self.key_use
    }

    /// The `kid` member, if present.
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// The `alg` member, if present.
    pub fn algorithm(&self) -> Option<AlgorithmIdentifier> {
        self.algorithm
    }

    /// A key-specific member, e.g. `n` for an RSA key.
    pub fn parameter(&self, name: &str) -> Option<&serde_json::Value> {
        self.parameters.get(name)
    }

    /// Rebuild the concrete key described by this JWK.
    pub fn to_key<K: DeserializeJWK>(&self) -> Result<K, JsonWebKeyError> {
        if self.key_type != K::KEY_TYPE {
            return Err(JsonWebKeyError::KeyType {
                expected: K::KEY_TYPE,
                found: self.key_type.clone(),
            });
        }

        Ok(K::build(&self.parameters)?)
    }
}

impl Serialize for JsonWebKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut entries = self
            .parameters
            .iter()
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect::<BTreeMap<_, _>>();

        entries.insert("kty", self.key_type.clone().into());
        if let Some(key_use) = self.key_use {
            entries.insert("use", key_use.as_str().into());
        }
        if let Some(key_id) = &self.key_id {
            entries.insert("kid", key_id.clone().into());
        }
        if let Some(algorithm) = self.algorithm {
            entries.insert("alg", algorithm.as_str().into());
        }

        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for key in MEMBER_ORDER {
            if let Some(value) = entries.remove(key) {
                map.serialize_entry(key, &value)?;
            }
        }
        for (key, value) in entries {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// A JSON Web Key Set (RFC 7517 section 5).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWebKeySet {
    /// The keys in this set.
    pub keys: Vec<JsonWebKey>,
}

impl JsonWebKeySet {
    /// Create a key set from a list of keys.
    pub fn new(keys: Vec<JsonWebKey>) -> Self {
        Self { keys }
    }

    /// Find a key by its `kid` member.
    pub fn find(&self, key_id: &str) -> Option<&JsonWebKey> {
        self.keys.iter().find(|key| key.key_id() == Some(key_id))
    }
}

impl From<JsonWebKey> for JsonWebKeySet {
    fn from(key: JsonWebKey) -> Self {
        Self::new(vec![key])
    }
}

/// A computed thumbprint.
#[derive(Debug)]
pub struct Thumbprint<Digest> {
    thumbprint: String,
    digest: PhantomData<Digest>,
}

impl<Digest> Clone for Thumbprint<Digest> {
    fn clone(&self) -> Self {
        Self {
            thumbprint: self.thumbprint.clone(),
            digest: PhantomData,
        }
    }
}

impl<Digest> Hash for Thumbprint<Digest> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.thumbprint.hash(state);
    }
}

impl<Digest> PartialEq for Thumbprint<Digest> {
    fn eq(&self, other: &Self) -> bool {
        self.thumbprint == other.thumbprint && self.digest == other.digest
    }
}

impl<Digest> Eq for Thumbprint<Digest> {}

impl<Digest> Thumbprint<Digest>
where
    Digest: digest::Digest,
{
    /// Create a new thumbprint from a base64url-encoded digest.
    pub fn new(thumbprint: String) -> Self {
        Self {
            thumbprint,
            digest: PhantomData,
        }
    }

    /// Compute the thumbprint of a key.
    ///
    /// The hash input is the compact JSON object of the required members,
    /// sorted lexicographically.
    pub fn build<K>(key: &K) -> Result<Self, serde_json::Error>
    where
        K: SerializeJWK + ?Sized,
    {
        let mut members = key.parameters().into_iter().collect::<BTreeMap<_, _>>();
        members.insert("kty".to_owned(), key.key_type().into());
        let thumb = serde_json::to_vec(&members)?;

        let mut hasher = Digest::new();
        hasher.update(&thumb);
        let digest = hasher.finalize();
        Ok(Self::new(base64ct::Base64UrlUnpadded::encode_string(
            &digest,
        )))
    }
}

impl<Digest> ser::Serialize for Thumbprint<Digest> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.thumbprint.as_str())
    }
}

impl<Digest> fmt::Display for Thumbprint<Digest> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.thumbprint)
    }
}

impl<Digest> std::ops::Deref for Thumbprint<Digest> {
    type Target = str;

    fn deref(&self) -> &str {
        &self.thumbprint
    }
}
