//! Text conversion helpers and the growable record store.

mod store;

pub use store::RecordStore;

use crate::model::CharCode;

/// Decode raw dictionary content to UTF-8.
///
/// ISO-8859-1 volumes map every byte to the code point of the same value, so
/// 0x80-0x9F stay C1 controls. JIS X 0208 volumes, mixed JIS/GB2312 volumes
/// and volumes with an unresolved code decode as EUC-JP, without BOM
/// sniffing.
///
/// Returns `None` if the bytes are malformed EUC-JP. A replacement character
/// is never substituted into the result.
///
/// # Examples
///
/// ```
/// use epwing_json::model::CharCode;
/// use epwing_json::util::decode_text;
///
/// // "辞書" in EUC-JP
/// let bytes = [0xBC, 0xAD, 0xBD, 0xF1];
/// assert_eq!(decode_text(&bytes, CharCode::JisX0208).as_deref(), Some("辞書"));
/// ```
pub fn decode_text(bytes: &[u8], char_code: CharCode) -> Option<String> {
    if char_code == CharCode::Iso8859_1 {
        return Some(bytes.iter().copied().map(char::from).collect());
    }

    let (result, malformed) = encoding_rs::EUC_JP.decode_without_bom_handling(bytes);
    if malformed {
        return None;
    }
    Some(result.into_owned())
}

/// Trim a multi-byte sequence cut short at the end of a bounded read.
///
/// Only EUC encodings are affected. Single-byte character codes return the
/// input unchanged. Invalid lead bytes are kept so the decoder still rejects
/// them.
pub fn trim_partial_sequence(bytes: &[u8], char_code: CharCode) -> &[u8] {
    if char_code == CharCode::Iso8859_1 {
        return bytes;
    }

    let mut pos = 0;
    while pos < bytes.len() {
        let width = match bytes[pos] {
            0x8F => 3,
            0x8E | 0xA1..=0xFE => 2,
            _ => 1,
        };
        if pos + width > bytes.len() {
            return &bytes[..pos];
        }
        pos += width;
    }
    bytes
}
