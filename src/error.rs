//! Errors produced while building a key set.

use std::io;
use std::path::PathBuf;

use crate::algorithms::AlgorithmIdentifier;
use crate::key::JsonWebKeyError;

/// Error when building or writing a JSON Web Key Set.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input key file could not be read.
    #[error("unable to read public key from {}", path.display())]
    ReadInput {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The PEM body is not valid base64.
    #[error("malformed PEM: {0}")]
    InvalidBase64(#[from] base64ct::Error),

    /// The decoded bytes are not an RSA SubjectPublicKeyInfo.
    #[error("invalid RSA public key: {0}")]
    InvalidKey(#[from] spki::Error),

    /// The requested algorithm can't be used with an RSA key.
    #[error("algorithm {0} can't be used with an RSA key")]
    UnsupportedAlgorithm(AlgorithmIdentifier),

    /// A JWK could not be converted back into a key.
    #[error(transparent)]
    Jwk(#[from] JsonWebKeyError),

    /// The key set could not be serialized.
    #[error("unable to serialize key set: {0}")]
    Json(#[from] serde_json::Error),

    /// The output file could not be written.
    #[error("unable to write key set to {}", path.display())]
    WriteOutput {
        /// Path of the output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
