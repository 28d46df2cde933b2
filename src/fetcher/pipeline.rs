//! Decoding of fetched page bytes to UTF-8.
//!
//! News sites still serve a long tail of legacy encodings, so the charset is
//! resolved from declarations in priority order (transport header, `<meta
//! charset>`, `http-equiv` content-type) with a byte-frequency guess as the
//! last resort. Only the first 4 KiB are sniffed; declarations live in the
//! document head.

use crate::fetcher::{
    errors::FetchError,
    types::{Charset, PageResponse},
};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

const SNIFF_WINDOW: usize = 4096;

static HEADER_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

static META_HTTP_EQUIV: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta\s+[^>]*?http-equiv\s*=\s*["']?content-type["']?[^>]*?content\s*=\s*["']?[^"'>]*?charset\s*=\s*([^"'\s;/>]+)"#).unwrap()
});

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<PageResponse, FetchError> {
    let charset = detect_charset(content_type, &body_bytes);
    let body_utf8 = decode_to_utf8(&body_bytes, &charset)?;

    Ok(PageResponse {
        url_final,
        status,
        body_utf8,
        charset,
        fetched_at: Utc::now(),
    })
}

fn detect_charset(content_type: &str, body: &[u8]) -> Charset {
    let head = &body[..body.len().min(SNIFF_WINDOW)];
    let head_str = String::from_utf8_lossy(head);

    let declared = declared_label(&HEADER_CHARSET, content_type)
        .or_else(|| declared_label(&META_CHARSET, &head_str))
        .or_else(|| declared_label(&META_HTTP_EQUIV, &head_str))
        .and_then(|label| Encoding::for_label(label.as_bytes()));

    let encoding = declared.unwrap_or_else(|| {
        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(head, false);
        detector.guess(None, true)
    });

    Charset::from_encoding(encoding)
}

fn declared_label(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_lowercase())
}

fn decode_to_utf8(body_bytes: &[u8], charset: &Charset) -> Result<String, FetchError> {
    let encoding = match charset {
        Charset::Utf8 => encoding_rs::UTF_8,
        Charset::Windows1252 => encoding_rs::WINDOWS_1252,
        Charset::ShiftJis => encoding_rs::SHIFT_JIS,
        Charset::Gb2312 => encoding_rs::GBK,
        Charset::Big5 => encoding_rs::BIG5,
        Charset::Other(name) => Encoding::for_label(name.as_bytes()).unwrap_or(encoding_rs::UTF_8),
    };

    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);
    if had_errors {
        return Err(FetchError::Charset(format!(
            "could not decode body as {}",
            encoding.name()
        )));
    }

    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_declaration_wins() {
        let body = b"<html><head><meta charset=\"shift_jis\"></head><body>story</body></html>";
        let charset = detect_charset("text/html; charset=utf-8", body);
        assert!(matches!(charset, Charset::Utf8));
    }

    #[test]
    fn meta_charset_used_without_header() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Archive</title></head></html>";
        let charset = detect_charset("text/html", body);
        // encoding_rs resolves iso-8859-1 labels to windows-1252.
        assert!(matches!(charset, Charset::Windows1252));
    }

    #[test]
    fn http_equiv_declaration_is_honored() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head></html>";
        let charset = detect_charset("text/html", body);
        assert!(matches!(charset, Charset::Windows1252));
    }

    #[test]
    fn multibyte_utf8_decodes_cleanly() {
        let body = "Relief effort reaches \u{5317}\u{6d77}\u{9053}.".as_bytes();
        let decoded = decode_to_utf8(body, &Charset::Utf8).unwrap();
        assert!(decoded.ends_with("\u{5317}\u{6d77}\u{9053}."));
    }

    #[test]
    fn windows_1252_punctuation_survives() {
        // 0x93/0x94 are curly quotes in windows-1252.
        let body = b"He said \x93no comment\x94 on Friday.";
        let decoded = decode_to_utf8(body, &Charset::Windows1252).unwrap();
        assert!(decoded.contains('\u{201c}'));
        assert!(decoded.contains('\u{201d}'));
    }
}
