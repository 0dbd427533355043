//! RSA keys
//!
//! RSA public keys are read from an X.509 SubjectPublicKeyInfo DER structure
//! and are represented in a JWK by their modulus (`n`) and public exponent
//! (`e`), each as the base64url encoding of the unsigned big-endian integer
//! (RFC 7518 section 6.3.1).
//!
//! A key of size 2048 bits or larger SHOULD be used with the RS* and PS*
//! algorithms. Moduli up to [`MAX_MODULUS_BITS`] are accepted; the public
//! exponent must fit in 33 bits.

use std::collections::BTreeMap;

use rsa::pkcs1::RsaPublicKey as Pkcs1PublicKey;
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPublicKey};
use serde::de::Error as _;
use spki::SubjectPublicKeyInfoRef;

use crate::base64data::Base64Data;
use crate::key::{DeserializeJWK, JWKeyType, SerializeJWK};

/// The JWK key type for RSA keys.
pub const KEY_TYPE: &str = "RSA";

/// Largest modulus accepted, in bits.
pub const MAX_MODULUS_BITS: usize = 16384;

fn public_key_from_parts(n: BigUint, e: BigUint) -> Result<RsaPublicKey, rsa::Error> {
    RsaPublicKey::new_with_max_size(n, e, MAX_MODULUS_BITS)
}

/// Parse an RSA public key from DER encoded X.509 SubjectPublicKeyInfo.
///
/// Fails if the algorithm identifier is not `rsaEncryption`, or if the
/// DER structure is corrupt.
pub fn public_key_from_der(der: &[u8]) -> Result<RsaPublicKey, spki::Error> {
    let info = SubjectPublicKeyInfoRef::try_from(der)?;
    info.algorithm
        .assert_algorithm_oid(rsa::pkcs1::ALGORITHM_OID)?;

    let bytes = info
        .subject_public_key
        .as_bytes()
        .ok_or(spki::Error::KeyMalformed)?;
    let key = Pkcs1PublicKey::try_from(bytes).map_err(|_| spki::Error::KeyMalformed)?;

    public_key_from_parts(
        BigUint::from_bytes_be(key.modulus.as_bytes()),
        BigUint::from_bytes_be(key.public_exponent.as_bytes()),
    )
    .map_err(|_| spki::Error::KeyMalformed)
}

impl JWKeyType for RsaPublicKey {
    const KEY_TYPE: &'static str = KEY_TYPE;
}

impl SerializeJWK for RsaPublicKey {
    fn parameters(&self) -> Vec<(String, serde_json::Value)> {
        let mut params = Vec::with_capacity(2);

        let n = Base64Data(self.n().to_bytes_be());
        params.push(("n".to_owned(), n.serialized_value().into()));
        let e = Base64Data(self.e().to_bytes_be());
        params.push(("e".to_owned(), e.serialized_value().into()));

        params
    }
}

fn to_biguint(
    parameters: &BTreeMap<String, serde_json::Value>,
    name: &'static str,
) -> Result<BigUint, serde_json::Error> {
    let value = parameters
        .get(name)
        .ok_or_else(|| serde_json::Error::missing_field(name))?;
    let data: Base64Data<Vec<u8>> = serde_json::from_value(value.clone())?;
    Ok(BigUint::from_bytes_be(data.as_ref()))
}

impl DeserializeJWK for RsaPublicKey {
    fn build(parameters: &BTreeMap<String, serde_json::Value>) -> Result<Self, serde_json::Error> {
        let n = to_biguint(parameters, "n")?;
        let e = to_biguint(parameters, "e")?;

        public_key_from_parts(n, e).map_err(serde_json::Error::custom)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use base64ct::{Base64, Encoding};

    fn fixture_der(name: &str) -> Vec<u8> {
        let path = format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"));
        let pem = std::fs::read_to_string(path).unwrap();
        let body: String = pem.lines().filter(|line| !line.starts_with("-----")).collect();
        Base64::decode_vec(&body).unwrap()
    }

    #[test]
    fn rfc7638_parameters() {
        let key = public_key_from_der(&fixture_der("rfc7638.pub.pem")).unwrap();
        let params: BTreeMap<_, _> = key.parameters().into_iter().collect();

        assert_eq!(params["e"], "AQAB");
        assert!(params["n"]
            .as_str()
            .unwrap()
            .starts_with("0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAt"));
        assert_eq!(key.size(), 256);
    }

    #[test]
    fn modulus_has_no_leading_zero() {
        // DER integers carry a leading zero octet when the high bit is set.
        let key = public_key_from_der(&fixture_der("rsa2048.pub.pem")).unwrap();
        let n = key.parameters().remove(0).1;
        let bytes = base64ct::Base64UrlUnpadded::decode_vec(n.as_str().unwrap()).unwrap();
        assert_eq!(bytes.len(), 256);
        assert_ne!(bytes[0], 0);
    }

    #[test]
    fn parses_8192_bit_key() {
        let key = public_key_from_der(&fixture_der("rsa8192.pub.pem")).unwrap();
        assert_eq!(key.size(), 1024);
        assert_eq!(key.e(), &BigUint::from(65537u32));

        let params: BTreeMap<_, _> = key.parameters().into_iter().collect();
        let rebuilt = <RsaPublicKey as DeserializeJWK>::build(&params).unwrap();
        assert_eq!(rebuilt, key);
    }

    #[test]
    fn rejects_ec_key() {
        let err = public_key_from_der(&fixture_der("ec-p256.pub.pem")).unwrap_err();
        assert!(matches!(err, spki::Error::OidUnknown { .. }), "{err:?}");
    }

    #[test]
    fn rejects_pkcs1_structure() {
        assert!(public_key_from_der(&fixture_der("rsa2048.pkcs1.pub.pem")).is_err());
    }

    #[test]
    fn rejects_truncated_der() {
        let der = fixture_der("rsa2048.pub.pem");
        assert!(public_key_from_der(&der[..der.len() / 2]).is_err());
    }

    #[test]
    fn missing_exponent() {
        let mut params: BTreeMap<String, serde_json::Value> = BTreeMap::new();
        params.insert("n".into(), "AQAB".into());

        let err = <RsaPublicKey as DeserializeJWK>::build(&params).unwrap_err();
        assert!(err.to_string().contains("`e`"), "{err}");
    }
}
