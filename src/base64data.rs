//! Base64 Data tools, which interact well with serde and are useful
//! for building the numeric members of a JWK.

use std::marker::PhantomData;

use base64ct::Encoding;
use serde::{de, ser};

/// Wrapper type to indicate that the inner type should be serialized
/// as bytes with a Base64 URL-safe encoding, without padding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base64Data<T>(pub T);

impl<T> Base64Data<T>
where
    T: AsRef<[u8]>,
{
    /// The base64url (unpadded) form of the inner data.
    pub fn serialized_value(&self) -> String {
        base64ct::Base64UrlUnpadded::encode_string(self.0.as_ref())
    }
}

impl<T> From<T> for Base64Data<T> {
    fn from(value: T) -> Self {
        Base64Data(value)
    }
}

impl<T> ser::Serialize for Base64Data<T>
where
    T: AsRef<[u8]>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.serialized_value())
    }
}

impl<T> AsRef<[u8]> for Base64Data<T>
where
    T: AsRef<[u8]>,
{
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

struct Base64Visitor<T>(PhantomData<T>);

impl<'de, T> de::Visitor<'de> for Base64Visitor<T>
where
    T: for<'a> TryFrom<&'a [u8]>,
{
    type Value = Base64Data<T>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("base64url encoded data")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        let data = base64ct::Base64UrlUnpadded::decode_vec(v)
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &"invalid base64url encoding"))?;

        let realized = T::try_from(data.as_ref())
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &"can't parse internal data"))?;
        Ok(Base64Data(realized))
    }
}

impl<'de, T> de::Deserialize<'de> for Base64Data<T>
where
    T: for<'a> TryFrom<&'a [u8]>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(Base64Visitor(PhantomData))
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_base64_data() {
        let data = Base64Data::from(vec![1, 2, 3, 4]);
        let serialized = serde_json::to_string(&data).unwrap();
        assert_eq!(serialized, r#""AQIDBA""#);
        let deserialized: Base64Data<Vec<u8>> = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, data);
    }

    #[test]
    fn exponent_65537() {
        let data = Base64Data(vec![0x01, 0x00, 0x01]);
        assert_eq!(data.serialized_value(), "AQAB");
    }

    #[test]
    fn from_owned_value() {
        let data: Base64Data<Vec<u8>> = serde_json::from_value(json!("AQAB")).unwrap();
        assert_eq!(data.as_ref(), &[0x01, 0x00, 0x01]);
    }

    #[test]
    fn rejects_padding_and_standard_alphabet() {
        assert!(serde_json::from_value::<Base64Data<Vec<u8>>>(json!("AQIDBA==")).is_err());
        assert!(serde_json::from_value::<Base64Data<Vec<u8>>>(json!("a+b/")).is_err());
    }
}
