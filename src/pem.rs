//! PEM armor handling for SubjectPublicKeyInfo public keys.
//!
//! Only the `PUBLIC KEY` label is understood. Anything else, such as a
//! PKCS#1 `RSA PUBLIC KEY` block, leaves its markers in place and fails to
//! decode as base64.
//!
//! The body uses the standard base64 alphabet. Trailing `=` padding is
//! optional.

use base64ct::{Base64Unpadded, Encoding};

/// Opening marker of a PEM-armored SubjectPublicKeyInfo.
pub const BEGIN_PUBLIC_KEY: &str = "-----BEGIN PUBLIC KEY-----";

/// Closing marker of a PEM-armored SubjectPublicKeyInfo.
pub const END_PUBLIC_KEY: &str = "-----END PUBLIC KEY-----";

/// Remove the `PUBLIC KEY` markers and line breaks, leaving the base64 body.
pub fn strip_armor(contents: &str) -> String {
    contents
        .replace(BEGIN_PUBLIC_KEY, "")
        .replace(END_PUBLIC_KEY, "")
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect()
}

/// Strip the armor from a PEM public key and decode its body to DER.
pub fn decode_public_key(contents: &str) -> Result<Vec<u8>, base64ct::Error> {
    let body = strip_armor(contents);
    tracing::debug!(length = body.len(), "decoding PEM body");
    Base64Unpadded::decode_vec(body.trim_end_matches('='))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_markers_and_newlines() {
        let pem = "-----BEGIN PUBLIC KEY-----\nAQID\nBAUG\n-----END PUBLIC KEY-----\n";
        assert_eq!(strip_armor(pem), "AQIDBAUG");
    }

    #[test]
    fn strips_crlf() {
        let pem = "-----BEGIN PUBLIC KEY-----\r\nAQID\r\nBAUG\r\n-----END PUBLIC KEY-----\r\n";
        assert_eq!(decode_public_key(pem).unwrap(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn bare_body() {
        assert_eq!(decode_public_key("AQIDBA==").unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn padding_is_optional() {
        assert_eq!(decode_public_key("AQIDBA").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(decode_public_key("AQID").unwrap(), vec![1, 2, 3]);

        let pem = std::fs::read_to_string(format!(
            "{}/tests/data/rsa4096.pub.pem",
            env!("CARGO_MANIFEST_DIR")
        ))
        .unwrap();
        let trimmed = pem.replace('=', "");
        assert_eq!(
            decode_public_key(&trimmed).unwrap(),
            decode_public_key(&pem).unwrap()
        );
    }

    #[test]
    fn padding_inside_body() {
        assert!(decode_public_key("AQ==AQID").is_err());
    }

    #[test]
    fn invalid_base64() {
        let pem = "-----BEGIN PUBLIC KEY-----\nnot*base64!\n-----END PUBLIC KEY-----\n";
        assert!(decode_public_key(pem).is_err());
    }

    #[test]
    fn other_labels_are_kept() {
        let pem = "-----BEGIN RSA PUBLIC KEY-----\nAQID\n-----END RSA PUBLIC KEY-----\n";
        assert!(strip_armor(pem).starts_with("-----BEGIN RSA PUBLIC KEY-----"));
        assert!(decode_public_key(pem).is_err());
    }

    #[test]
    fn spaces_are_not_stripped() {
        assert!(decode_public_key("AQID BAUG").is_err());
    }
}
