//! String and encoding conversions
//!
//! Transliteration of Latin-1 text to plain ASCII and lenient Base64
//! decoding that accepts both the standard and the URL-safe alphabet.

use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error::Result;

/// Placeholder for characters without an ASCII substitute
pub const PLACEHOLDER: &str = "_";

/// ASCII substitutes for the accented and Germanic letters of Latin-1
#[rustfmt::skip]
static ASCII_SUBSTITUTES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        (192, "A"), (193, "A"), (194, "A"), (195, "A"),
        (196, "AE"), (197, "AE"), (198, "AE"),
        (199, "C"),
        (200, "E"), (201, "E"), (202, "E"), (203, "E"),
        (204, "I"), (205, "I"), (206, "I"), (207, "I"),
        (208, "D"), (209, "N"),
        (210, "O"), (211, "O"), (212, "O"), (213, "O"),
        (214, "OE"), (216, "OE"),
        (217, "U"), (218, "U"), (219, "U"),
        (220, "UE"),
        (221, "Y"),
        (223, "ss"),
        (224, "a"), (225, "a"), (226, "a"), (227, "a"),
        (228, "ae"), (229, "ae"), (230, "ae"),
        (231, "c"),
        (232, "e"), (233, "e"), (234, "e"), (235, "e"),
        (236, "i"), (237, "i"), (238, "i"), (239, "i"),
        (240, "d"), (241, "n"),
        (242, "o"), (243, "o"), (244, "o"), (245, "o"),
        (246, "oe"), (248, "oe"),
        (249, "u"), (250, "u"), (251, "u"),
        (252, "ue"),
        (253, "y"), (255, "y"),
    ])
});

/// Transliterate a string to plain ASCII
///
/// The input is walked one UTF-16 code unit at a time. ASCII units are kept,
/// Latin-1 letters with a known substitute are replaced (`ä` becomes `ae`,
/// `ß` becomes `ss`, `É` becomes `E`) and every other unit becomes `_`.
/// Characters outside the Basic Multilingual Plane therefore produce two
/// placeholders, one per surrogate.
///
/// # Arguments
///
/// * `value` - The text to convert
/// * `default_value` - Returned when the conversion yields nothing, if it is
///   a non-empty string
///
/// # Returns
///
/// The ASCII text. When that is empty, `default_value` if it is non-empty,
/// otherwise the empty string.
///
/// # Example
///
/// ```rust
/// use valkit::utils::strings::convert_utf8_to_ascii;
///
/// assert_eq!(convert_utf8_to_ascii("Grüße", None), "Gruesse");
/// assert_eq!(convert_utf8_to_ascii("5€", None), "5_");
/// assert_eq!(convert_utf8_to_ascii("", Some("unnamed")), "unnamed");
/// ```
pub fn convert_utf8_to_ascii(value: &str, default_value: Option<&str>) -> String {
    let mut result = String::with_capacity(value.len());

    for unit in value.encode_utf16() {
        if unit < 128 {
            result.push(char::from(u8::try_from(unit).unwrap_or(b'_')));
        } else {
            result.push_str(ASCII_SUBSTITUTES.get(&unit).copied().unwrap_or(PLACEHOLDER));
        }
    }

    if result.is_empty() {
        return default_value.unwrap_or_default().to_string();
    }
    result
}

/// Base64 engine that accepts non-zero trailing bits, padding is added by
/// the caller
const LAZY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireCanonical),
);

/// Padding needed to bring a Base64 text to a multiple of four
fn padding_for(len: usize) -> &'static str {
    match len % 4 {
        1 => "===",
        2 => "==",
        3 => "=",
        _ => "",
    }
}

/// Decode standard or URL-safe Base64 into UTF-8 text
///
/// `-` and `_` are translated to `+` and `/`, missing padding is appended
/// and the result is decoded with the standard alphabet.
///
/// # Errors
///
/// `ValkitError::Base64` for invalid symbols or an impossible length,
/// `ValkitError::Utf8` when the decoded bytes are not UTF-8.
pub fn decode_base64_lazy(encoded: &str) -> Result<String> {
    let mut normalized: String = encoded
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    normalized.push_str(padding_for(encoded.len()));

    let bytes = LAZY_ENGINE.decode(normalized)?;
    Ok(String::from_utf8(bytes)?)
}

/// Decode standard or URL-safe Base64 text, falling back to a default
///
/// Swallowing counterpart of [`decode_base64_lazy`].
///
/// # Example
///
/// ```rust
/// use valkit::utils::strings::base64_decode_lazy;
///
/// // "Grüße?" in URL-safe Base64 without padding
/// assert_eq!(base64_decode_lazy("R3LDvMOfZT8", String::new()), "Grüße?");
/// assert_eq!(base64_decode_lazy::<Option<String>>("*!", None), None);
/// ```
pub fn base64_decode_lazy<D: From<String>>(encoded: &str, default_value: D) -> D {
    match decode_base64_lazy(encoded) {
        Ok(text) => D::from(text),
        Err(e) => {
            tracing::trace!("base64_decode_lazy fell back to default: {}", e);
            default_value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_convert_utf8_to_ascii() {
        let src = "Ein schöner String mit jede Menge Zeugs: äöüÄÖÜ$€€😎";
        let dst = "Ein schoener String mit jede Menge Zeugs: aeoeueAEOEUE$____";

        assert_eq!(convert_utf8_to_ascii(src, None), dst);
        assert_eq!(convert_utf8_to_ascii(dst, None), dst);
        assert_ne!(convert_utf8_to_ascii(src, None), src);
    }

    #[test]
    fn test_convert_table_entries() {
        assert_eq!(convert_utf8_to_ascii("ß", None), "ss");
        assert_eq!(convert_utf8_to_ascii("ÉÈÊË", None), "EEEE");
        assert_eq!(convert_utf8_to_ascii("Ø", None), "OE");
        assert_eq!(convert_utf8_to_ascii("ñÑ", None), "nN");
        assert_eq!(convert_utf8_to_ascii("ÿ", None), "y");
        // U+00D7 and U+00F7 sit between table entries
        assert_eq!(convert_utf8_to_ascii("×÷", None), "__");
        assert_eq!(convert_utf8_to_ascii("\u{a0}", None), "_");
    }

    #[test]
    fn test_convert_astral_characters() {
        assert_eq!(convert_utf8_to_ascii("😎", None), "__");
        assert_eq!(convert_utf8_to_ascii("a𝄞b", None), "a__b");
    }

    #[test]
    fn test_convert_empty_fallback() {
        assert_eq!(convert_utf8_to_ascii("", None), "");
        assert_eq!(convert_utf8_to_ascii("", Some("")), "");
        assert_eq!(convert_utf8_to_ascii("", Some("fallback")), "fallback");
        assert_eq!(convert_utf8_to_ascii("x", Some("fallback")), "x");
    }

    #[test]
    fn test_convert_idempotent() {
        for src in ["Ärger über Öl", "naïve café", "日本語", "plain"] {
            let once = convert_utf8_to_ascii(src, None);
            assert!(once.is_ascii());
            assert_eq!(convert_utf8_to_ascii(&once, None), once);
        }
    }

    #[test]
    fn test_base64_standard_and_url_safe() {
        let text = "Grüße?>>";
        let standard = general_purpose::STANDARD.encode(text);
        let url_safe = general_purpose::URL_SAFE_NO_PAD.encode(text);
        assert_ne!(standard.trim_end_matches('='), url_safe);

        assert_eq!(base64_decode_lazy(&standard, String::new()), text);
        assert_eq!(base64_decode_lazy(&url_safe, String::new()), text);
    }

    #[test]
    fn test_base64_padding_added() {
        assert_eq!(base64_decode_lazy("YQ", String::new()), "a");
        assert_eq!(base64_decode_lazy("YWI", String::new()), "ab");
        assert_eq!(base64_decode_lazy("YWJj", String::new()), "abc");
        assert_eq!(base64_decode_lazy("", "x".to_string()), "");
    }

    #[test]
    fn test_base64_failures() {
        assert_eq!(base64_decode_lazy("Y", "bad".to_string()), "bad");
        assert_eq!(base64_decode_lazy("Y*Jj", "bad".to_string()), "bad");
        assert_eq!(base64_decode_lazy("YQ==YQ==", "bad".to_string()), "bad");

        let not_utf8 = general_purpose::STANDARD.encode([0xff, 0xfe, 0xfd]);
        assert!(decode_base64_lazy(&not_utf8).is_err_and(|e| matches!(
            e,
            crate::error::ValkitError::Utf8(_)
        )));
        assert!(decode_base64_lazy("Y").is_err_and(|e| e.is_decode_error()));
    }
}
