// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parser for `WIFI:` QR payloads.
//!
//! The payload format is `WIFI:` followed by `key:value` fields separated by
//! `;`. Within a value, the characters `\ ; , " :` may be escaped with a
//! backslash. Recognised keys are `S` (SSID), `T` (security type) and `P`
//! (password); anything else is skipped.
//!
//! Parsing never fails. Text that is not a credential payload yields the
//! zero-valued [`WifiCredential`].

use super::WifiCredential;

/// Prefix identifying a Wi-Fi credential payload.
pub const WIFI_SCHEME: &str = "WIFI:";

const FIELD_SEPARATOR: char = ';';
const KEY_SEPARATOR: char = ':';
const ESCAPE: char = '\\';

/// Characters that take a backslash escape inside a field value.
const ESCAPABLE: [char; 5] = ['\\', ';', ',', '"', ':'];

/// Parses a decoded QR payload into a Wi-Fi credential.
///
/// Returns the zero-valued record when `text` does not start with `WIFI:`.
///
/// # Examples
///
/// ```
/// use qrprov_lib::credential::parse;
///
/// let cred = parse("WIFI:S:MyNet;T:WPA;P:secret;;");
/// assert_eq!(cred.ssid(), "MyNet");
/// assert_eq!(cred.security_type(), "WPA");
/// assert_eq!(cred.password(), "secret");
///
/// assert!(parse("hello world").is_empty());
/// ```
#[must_use]
pub fn parse(text: &str) -> WifiCredential {
    let mut credential = WifiCredential::default();

    let Some(body) = text.strip_prefix(WIFI_SCHEME) else {
        return credential;
    };

    // Trailing separators go before splitting, so `abc\;` ends in a lone
    // backslash rather than an escaped `;`. Empty inner fields carry no key
    // and fall through apply_field untouched.
    let body = body.trim_end_matches(FIELD_SEPARATOR);
    for field in split_fields(body) {
        apply_field(field, &mut credential);
    }

    credential
}

/// Splits the payload body on unescaped `;`.
///
/// An escape sequence keeps both characters in the field so that
/// [`unescape`] can resolve it afterwards.
fn split_fields(body: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut chars = body.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            ESCAPE => {
                chars.next();
            }
            FIELD_SEPARATOR => {
                fields.push(&body[start..idx]);
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    fields.push(&body[start..]);

    fields
}

fn apply_field(field: &str, credential: &mut WifiCredential) {
    let Some((key, raw_value)) = field.split_once(KEY_SEPARATOR) else {
        return;
    };

    let value = strip_quotes(unescape(raw_value));
    match key {
        "S" => credential.set_ssid(value),
        "T" => credential.set_security_type(value),
        "P" => credential.set_password(value),
        _ => tracing::trace!(key, "Ignoring unknown WIFI field"),
    }
}

/// Resolves backslash escapes in a field value.
///
/// A backslash before one of `\ ; , " :` yields that character. A backslash
/// before anything else is kept together with the following character, and
/// a trailing lone backslash is kept as-is.
///
/// # Examples
///
/// ```
/// use qrprov_lib::credential::unescape;
///
/// assert_eq!(unescape(r"a\;b"), "a;b");
/// assert_eq!(unescape(r"a\nb"), r"a\nb");
/// assert_eq!(unescape(r"end\"), r"end\");
/// ```
#[must_use]
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != ESCAPE {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if ESCAPABLE.contains(&next) => out.push(next),
            Some(next) => {
                out.push(ESCAPE);
                out.push(next);
            }
            None => out.push(ESCAPE),
        }
    }

    out
}

/// Escapes the characters that [`unescape`] resolves.
///
/// # Examples
///
/// ```
/// use qrprov_lib::credential::{escape, unescape};
///
/// let escaped = escape(r#"a;b:"c""#);
/// assert_eq!(escaped, r#"a\;b\:\"c\""#);
/// assert_eq!(unescape(&escaped), r#"a;b:"c""#);
/// ```
#[must_use]
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if ESCAPABLE.contains(&c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Removes exactly one pair of surrounding double quotes.
fn strip_quotes(value: String) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        value[1..value.len() - 1].to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cred(ssid: &str, security_type: &str, password: &str) -> WifiCredential {
        WifiCredential::new(ssid, security_type, password)
    }

    #[test]
    fn parses_full_payload_with_trailing_separators() {
        assert_eq!(
            parse("WIFI:S:MyNet;T:WPA;P:secret;;"),
            cred("MyNet", "WPA", "secret")
        );
    }

    #[test]
    fn parses_escaped_separators() {
        assert_eq!(parse(r"WIFI:S:My\;Net;P:pa\:ss"), cred("My;Net", "", "pa:ss"));
    }

    #[test]
    fn non_credential_text_is_zero_valued() {
        assert_eq!(parse("hello world"), WifiCredential::default());
        assert_eq!(parse("wifi:S:lower;"), WifiCredential::default());
        assert_eq!(parse(" WIFI:S:leading-space;"), WifiCredential::default());
    }

    #[test]
    fn bare_prefix_is_zero_valued() {
        assert_eq!(parse("WIFI:"), WifiCredential::default());
        assert_eq!(parse("WIFI:;;;"), WifiCredential::default());
    }

    #[test]
    fn field_order_does_not_matter() {
        let expected = cred("Net", "WEP", "pw");
        assert_eq!(parse("WIFI:P:pw;S:Net;T:WEP;;"), expected);
        assert_eq!(parse("WIFI:T:WEP;P:pw;S:Net;;"), expected);
        assert_eq!(parse("WIFI:T:WEP;S:Net;P:pw"), expected);
    }

    #[test]
    fn absent_fields_stay_empty() {
        assert_eq!(parse("WIFI:S:OnlySsid;;"), cred("OnlySsid", "", ""));
        assert_eq!(parse("WIFI:T:nopass;;"), cred("", "nopass", ""));
        assert_eq!(parse("WIFI:P:x"), cred("", "", "x"));
    }

    #[test]
    fn single_field_without_separator() {
        assert_eq!(parse("WIFI:S:Lonely"), cred("Lonely", "", ""));
    }

    #[test]
    fn empty_and_keyless_tokens_are_ignored() {
        assert_eq!(
            parse("WIFI:;;S:Net;;garbage;H:true;;P:pw;;;"),
            cred("Net", "", "pw")
        );
    }

    #[test]
    fn value_splits_at_first_colon_only() {
        assert_eq!(parse("WIFI:P:a:b:c;"), cred("", "", "a:b:c"));
    }

    #[test]
    fn later_field_overrides_earlier() {
        assert_eq!(parse("WIFI:S:first;S:second;"), cred("second", "", ""));
    }

    #[test]
    fn quotes_stripped_once() {
        assert_eq!(parse(r#"WIFI:S:"abc";"#).ssid(), "abc");
        assert_eq!(parse(r#"WIFI:S:""abc"";"#).ssid(), r#""abc""#);
        assert_eq!(parse(r#"WIFI:S:"";"#).ssid(), "");
        assert_eq!(parse(r#"WIFI:S:";"#).ssid(), r#"""#);
        assert_eq!(parse(r#"WIFI:S:"abc;"#).ssid(), r#""abc"#);
    }

    #[test]
    fn escaped_quotes_are_stripped_after_unescape() {
        assert_eq!(parse(r#"WIFI:S:\"abc\";"#).ssid(), "abc");
    }

    #[test]
    fn escaped_backslash_before_separator() {
        // `\\` is a literal backslash, so the following `;` still separates.
        assert_eq!(parse(r"WIFI:S:a\\;P:b;"), cred(r"a\", "", "b"));
    }

    #[test]
    fn trailing_lone_backslash_is_literal() {
        assert_eq!(parse(r"WIFI:P:abc\"), cred("", "", r"abc\"));
        assert_eq!(unescape(r"\"), r"\");
    }

    #[test]
    fn trailing_separators_are_stripped_before_escapes() {
        assert_eq!(parse(r"WIFI:S:abc\;").ssid(), r"abc\");
        assert_eq!(parse(r"WIFI:S:abc\;;"), cred(r"abc\", "", ""));
        assert_eq!(parse(r"WIFI:P:pw;S:abc\;;;"), cred(r"abc\", "", "pw"));
    }

    #[test]
    fn escaped_separator_inside_value_survives_trailing_strip() {
        assert_eq!(parse(r"WIFI:S:a\;b;;"), cred("a;b", "", ""));
    }

    #[test]
    fn unknown_escape_is_kept_verbatim() {
        assert_eq!(unescape(r"a\tb\x"), r"a\tb\x");
    }

    #[test]
    fn every_escape_pair_round_trips() {
        for literal in ['\\', ';', ',', '"', ':'] {
            for len in 1..=4 {
                let value: String = std::iter::repeat_n(literal, len).collect();
                assert_eq!(unescape(&escape(&value)), value, "literal {literal:?}");
            }
        }
    }

    #[test]
    fn escaped_credential_round_trips_through_parse() {
        let original = cred(r#"we;ird:"net"\"#, "WPA", r"p,a;s\s");
        assert_eq!(parse(&original.to_qr_text()), original);
    }

    #[test]
    fn parse_is_deterministic() {
        let input = r"WIFI:S:My\;Net;T:WPA;P:pa\:ss;;";
        assert_eq!(parse(input), parse(input));
    }

    #[test]
    fn multibyte_values_survive() {
        assert_eq!(parse("WIFI:S:Café☕;P:mötley;"), cred("Café☕", "", "mötley"));
    }
}
