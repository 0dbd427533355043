//! Pretty-printed JSON rendering for key sets.

use serde::ser::Error as _;
use serde::Serialize;

/// Indentation used for rendered documents.
pub const INDENT: &str = "  ";

/// Render a value as prettified JSON using the given indent string.
///
/// This uses [`serde_json::ser::PrettyFormatter::with_indent`]; the output has
/// no trailing newline.
pub fn to_string_pretty_with_indent<T: Serialize + ?Sized>(
    data: &T,
    indent: &str,
) -> Result<String, serde_json::Error> {
    let mut writer = Vec::with_capacity(1024);
    let fmt = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::ser::Serializer::with_formatter(&mut writer, fmt);
    data.serialize(&mut ser)?;

    String::from_utf8(writer).map_err(serde_json::Error::custom)
}

/// Render a value as prettified JSON with two-space indentation.
pub fn to_string_pretty<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    to_string_pretty_with_indent(data, INDENT)
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn two_space_indent() {
        let rendered = to_string_pretty(&json!({"keys": [{"kty": "RSA"}]})).unwrap();
        assert_eq!(
            rendered,
            "{\n  \"keys\": [\n    {\n      \"kty\": \"RSA\"\n    }\n  ]\n}"
        );
    }

    #[test]
    fn custom_indent() {
        let rendered = to_string_pretty_with_indent(&json!({"a": 1}), "\t").unwrap();
        assert_eq!(rendered, "{\n\t\"a\": 1\n}");
    }
}
