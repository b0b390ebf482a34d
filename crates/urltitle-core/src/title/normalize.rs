//! Title cleanup: charset detection, conversion to UTF-8, entity decoding, trimming.
//!
//! Titles arrive as raw bytes in whatever charset the remote page used. The
//! charset is guessed by trying a fixed list of candidates in priority order
//! and keeping the first one that decodes the bytes without error.

use encoding_rs::{Encoding, BIG5, EUC_JP, GBK, ISO_2022_JP, SHIFT_JIS};

const ESC: u8 = 0x1b;

/// Candidate charsets, in detection priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    Ascii,
    Utf8,
    /// Only recognized with a byte order mark.
    Utf16,
    /// GBK, a superset of GB2312.
    Gbk,
    Big5,
    EucJp,
    /// Shift_JIS as extended by Windows code page 932.
    ShiftJis,
    /// JIS / ISO-2022-JP.
    Iso2022Jp,
}

pub const CANDIDATES: [Charset; 8] = [
    Charset::Ascii,
    Charset::Utf8,
    Charset::Utf16,
    Charset::Gbk,
    Charset::Big5,
    Charset::EucJp,
    Charset::ShiftJis,
    Charset::Iso2022Jp,
];

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Charset::Ascii => "ASCII",
            Charset::Utf8 => "UTF-8",
            Charset::Utf16 => "UTF-16",
            Charset::Gbk => "GBK",
            Charset::Big5 => "Big5",
            Charset::EucJp => "EUC-JP",
            Charset::ShiftJis => "Shift_JIS",
            Charset::Iso2022Jp => "ISO-2022-JP",
        }
    }

    /// Decodes `raw` if it is a valid byte sequence in this charset.
    pub fn decode(self, raw: &[u8]) -> Option<String> {
        // ESC only appears as an ISO-2022 shift sequence.
        if self != Charset::Iso2022Jp && raw.contains(&ESC) {
            return None;
        }
        match self {
            Charset::Ascii => raw
                .is_ascii()
                .then(|| String::from_utf8_lossy(raw).into_owned()),
            Charset::Utf8 => std::str::from_utf8(raw).ok().map(str::to_string),
            Charset::Utf16 => decode_utf16_with_bom(raw),
            Charset::Gbk => decode_strict(GBK, raw),
            Charset::Big5 => decode_strict(BIG5, raw),
            Charset::EucJp => decode_strict(EUC_JP, raw),
            Charset::ShiftJis => decode_strict(SHIFT_JIS, raw),
            Charset::Iso2022Jp => decode_strict(ISO_2022_JP, raw),
        }
    }
}

fn decode_strict(encoding: &'static Encoding, raw: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(raw)
        .map(|s| s.into_owned())
}

fn decode_utf16_with_bom(raw: &[u8]) -> Option<String> {
    let (encoding, bom_len) = Encoding::for_bom(raw)?;
    if encoding == encoding_rs::UTF_8 {
        return None;
    }
    decode_strict(encoding, &raw[bom_len..])
}

/// Returns the first candidate charset under which `raw` is valid.
pub fn detect(raw: &[u8]) -> Option<Charset> {
    CANDIDATES.into_iter().find(|c| c.decode(raw).is_some())
}

/// Converts `raw` to UTF-8 using the detected charset.
///
/// Falls back to lossy UTF-8 when no candidate fits.
pub fn to_utf8(raw: &[u8]) -> String {
    for charset in CANDIDATES {
        if let Some(text) = charset.decode(raw) {
            if charset != Charset::Ascii && charset != Charset::Utf8 {
                tracing::debug!(charset = charset.name(), "converted title to UTF-8");
            }
            return text;
        }
    }
    tracing::debug!("no charset matched title bytes, decoding as UTF-8");
    String::from_utf8_lossy(raw).into_owned()
}

/// Turns raw title bytes into display text.
///
/// Bytes are converted to UTF-8 before entities are decoded, so a decoded
/// entity can never be mistaken for part of a legacy multi-byte sequence.
pub fn normalize(raw: &[u8]) -> String {
    let text = to_utf8(raw);
    html_escape::decode_html_entities(&text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_utf8_round_trips() {
        for s in ["Example Domain", "Ünïcödé – ok", "日本語のページ"] {
            assert_eq!(normalize(s.as_bytes()), s);
        }
    }

    #[test]
    fn entities_are_decoded_and_whitespace_trimmed() {
        assert_eq!(
            normalize(b"\n   Tom &amp; Jerry &#8211; &quot;Cartoons&quot;  \t"),
            "Tom & Jerry \u{2013} \"Cartoons\""
        );
    }

    #[test]
    fn entity_decoding_can_expose_whitespace_to_trim() {
        assert_eq!(normalize(b"&nbsp;Title&#32;"), "Title");
    }

    #[test]
    fn ascii_and_utf8_detection() {
        assert_eq!(detect(b"plain"), Some(Charset::Ascii));
        assert_eq!(detect("café".as_bytes()), Some(Charset::Utf8));
    }

    #[test]
    fn utf16_needs_bom() {
        let le = [0xff, 0xfe, b'H', 0x00, b'i', 0x00];
        assert_eq!(detect(&le), Some(Charset::Utf16));
        assert_eq!(normalize(&le), "Hi");

        let be = [0xfe, 0xff, 0x00, b'O', 0x00, b'K'];
        assert_eq!(normalize(&be), "OK");
    }

    #[test]
    fn gbk_title_is_converted() {
        // "中文标题" in GBK
        let raw = [0xd6, 0xd0, 0xce, 0xc4, 0xb1, 0xea, 0xcc, 0xe2];
        assert_eq!(detect(&raw), Some(Charset::Gbk));
        assert_eq!(normalize(&raw), "中文标题");
    }

    #[test]
    fn iso_2022_jp_title_is_converted() {
        // "日本語" in ISO-2022-JP
        let raw = [
            0x1b, 0x24, 0x42, 0x46, 0x7c, 0x4b, 0x5c, 0x38, 0x6c, 0x1b, 0x28, 0x42,
        ];
        assert_eq!(detect(&raw), Some(Charset::Iso2022Jp));
        assert_eq!(normalize(&raw), "日本語");
    }

    #[test]
    fn big5_bytes_are_claimed_by_gbk_first() {
        // "中文" in Big5; every Big5 pair is also a valid GBK pair.
        let raw = [0xa4, 0xa4, 0xa4, 0xe5];
        assert_eq!(Charset::Big5.decode(&raw).as_deref(), Some("中文"));
        assert_eq!(detect(&raw), Some(Charset::Gbk));
        assert_ne!(normalize(&raw), "中文");
    }

    #[test]
    fn euc_jp_title_is_converted() {
        // JIS X 0212 "丂" followed by " a". The three-byte sequence leaves
        // 0xa1 paired with a space, which GBK and Big5 reject. Shift_JIS
        // would also accept these bytes, so this pins EUC-JP ahead of it.
        let raw = [0x8f, 0xb0, 0xa1, b' ', b'a'];
        assert_eq!(Charset::Gbk.decode(&raw), None);
        assert_eq!(Charset::Big5.decode(&raw), None);
        assert!(Charset::ShiftJis.decode(&raw).is_some());
        assert_eq!(detect(&raw), Some(Charset::EucJp));
        assert_eq!(normalize(&raw), "丂 a");
    }

    #[test]
    fn shift_jis_half_width_katakana_is_converted() {
        // "ｱｲｳ" in Shift_JIS; odd length defeats GBK, Big5 and EUC-JP.
        let raw = [0xb1, 0xb2, 0xb3];
        assert_eq!(detect(&raw), Some(Charset::ShiftJis));
        assert_eq!(normalize(&raw), "ｱｲｳ");
    }

    #[test]
    fn candidates_keep_priority_order() {
        assert_eq!(
            CANDIDATES.map(Charset::name),
            ["ASCII", "UTF-8", "UTF-16", "GBK", "Big5", "EUC-JP", "Shift_JIS", "ISO-2022-JP"]
        );
    }

    #[test]
    fn undetectable_bytes_fall_back_to_lossy_utf8() {
        let raw = b"ab\xff";
        assert_eq!(detect(raw), None);
        assert_eq!(normalize(raw), "ab\u{fffd}");
    }
}
