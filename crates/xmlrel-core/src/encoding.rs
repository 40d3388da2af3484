//! Document encoding detection
//!
//! `roxmltree` only reads UTF-8, so uploads in other encodings are transcoded
//! first. The encoding is taken from, in order: a byte order mark, the
//! `<?xml` byte pattern of BOM-less UTF-16, the `encoding=` pseudo-attribute
//! of the XML declaration. Anything else is read as UTF-8.

use crate::error::{XmlError, XmlResult};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use std::borrow::Cow;

/// Longest XML declaration scanned for an `encoding=` label
const MAX_DECLARATION_LEN: usize = 512;

/// Decode raw document bytes into UTF-8 text
pub fn decode(bytes: &[u8]) -> XmlResult<Cow<'_, str>> {
    let (encoding, body) = detect(bytes)?;

    if encoding == UTF_8 {
        return std::str::from_utf8(body)
            .map(Cow::Borrowed)
            .map_err(|e| XmlError::MalformedInput(format!("document is not UTF-8: {e}")));
    }

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            XmlError::MalformedInput(format!("document is not valid {}", encoding.name()))
        })
}

/// Pick the encoding and strip any byte order mark
fn detect(bytes: &[u8]) -> XmlResult<(&'static Encoding, &[u8])> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return Ok((encoding, &bytes[bom_len..]));
    }

    match bytes {
        [0x3C, 0x00, 0x3F, 0x00, ..] => return Ok((UTF_16LE, bytes)),
        [0x00, 0x3C, 0x00, 0x3F, ..] => return Ok((UTF_16BE, bytes)),
        _ => {}
    }

    match declared_label(bytes) {
        Some(label) => {
            let encoding = Encoding::for_label(label).ok_or_else(|| {
                XmlError::MalformedInput(format!(
                    "unsupported encoding '{}'",
                    String::from_utf8_lossy(label)
                ))
            })?;
            // An ASCII-compatible declaration claiming UTF-16 can only be UTF-8
            Ok((encoding.output_encoding(), bytes))
        }
        None => Ok((UTF_8, bytes)),
    }
}

/// The `encoding` value of a leading `<?xml ... ?>` declaration
fn declared_label(bytes: &[u8]) -> Option<&[u8]> {
    if !bytes.starts_with(b"<?xml") {
        return None;
    }

    let head = &bytes[..bytes.len().min(MAX_DECLARATION_LEN)];
    let end = head.windows(2).position(|w| w == b"?>")?;
    let declaration = &head[..end];

    let key = declaration.windows(8).position(|w| w == b"encoding")?;
    let rest = trim_start(&declaration[key + 8..]);
    let rest = trim_start(rest.strip_prefix(b"=")?);

    let (&quote, value) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let close = value.iter().position(|&b| b == quote)?;
    Some(&value[..close])
}

fn trim_start(bytes: &[u8]) -> &[u8] {
    let skip = bytes.iter().take_while(|b| b.is_ascii_whitespace()).count();
    &bytes[skip..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16(text: &str, little_endian: bool, bom: bool) -> Vec<u8> {
        let mut data = Vec::new();
        if bom {
            data.push(0xFEFF_u16);
        }
        data.extend(text.encode_utf16());
        data.into_iter()
            .flat_map(|unit| {
                if little_endian {
                    unit.to_le_bytes()
                } else {
                    unit.to_be_bytes()
                }
            })
            .collect()
    }

    #[test]
    fn test_plain_utf8_is_borrowed() {
        let text = decode(b"<r a=\"1\"/>").unwrap();
        assert!(matches!(text, Cow::Borrowed("<r a=\"1\"/>")));
    }

    #[test]
    fn test_utf8_bom_stripped() {
        let text = decode(b"\xEF\xBB\xBF<r/>").unwrap();
        assert_eq!(text, "<r/>");
    }

    #[test]
    fn test_utf16_with_bom() {
        let doc = r#"<?xml version="1.0" encoding="UTF-16"?><r n="café"/>"#;
        assert_eq!(decode(&utf16(doc, true, true)).unwrap(), doc);
        assert_eq!(decode(&utf16(doc, false, true)).unwrap(), doc);
    }

    #[test]
    fn test_utf16_without_bom() {
        let doc = r#"<?xml version="1.0"?><r/>"#;
        assert_eq!(decode(&utf16(doc, true, false)).unwrap(), doc);
        assert_eq!(decode(&utf16(doc, false, false)).unwrap(), doc);
    }

    #[test]
    fn test_declared_latin1() {
        let text = decode(b"<?xml version='1.0' encoding = 'ISO-8859-1'?><r n=\"caf\xE9\"/>")
            .unwrap();
        assert!(text.ends_with("<r n=\"café\"/>"));
    }

    #[test]
    fn test_declared_utf16_on_ascii_bytes_reads_as_utf8() {
        let text = decode(br#"<?xml version="1.0" encoding="UTF-16"?><r/>"#).unwrap();
        assert!(text.ends_with("<r/>"));
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = decode(br#"<?xml version="1.0" encoding="x-made-up"?><r/>"#).unwrap_err();
        assert!(matches!(err, XmlError::MalformedInput(msg) if msg.contains("x-made-up")));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let err = decode(&[0x3C, 0xFF, 0xFE, 0x3E]).unwrap_err();
        assert!(matches!(err, XmlError::MalformedInput(_)));
    }

    #[test]
    fn test_truncated_utf16_rejected() {
        let mut bytes = utf16("<r/>", true, true);
        bytes.push(0x3C);
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, XmlError::MalformedInput(msg) if msg.contains("UTF-16LE")));
    }
}
