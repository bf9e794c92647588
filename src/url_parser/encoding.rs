use std::borrow::Cow;

/// Encodes a query component the way the export endpoints expect it
///
/// Only `A-Z a-z 0-9 - _ . ~` stay literal, so `! ' ( ) *` come out as
/// `%21 %27 %28 %29 %2A`. Spaces are written as `+` rather than `%20`.
///
/// # Examples
/// ```
/// use ru_supplier_link::url_parser::encoding::urlencode;
///
/// assert_eq!(urlencode("a b"), "a+b");
/// assert_eq!(urlencode("a(b)"), "a%28b%29");
/// ```
pub fn urlencode(input: &str) -> String {
    // `%` itself is always escaped to `%25`, so every `%20` here came from a space
    urlencoding::encode(input).replace("%20", "+")
}

/// Decodes a query component, never failing
///
/// A `%` that is not followed by two hex digits is kept as a literal `%`,
/// `+` decodes to a space, and byte sequences that are not valid UTF-8 are
/// replaced with U+FFFD.
pub fn urldecode(input: &str) -> String {
    let escaped = escape_stray_percents(input).replace('+', "%20");
    let bytes = urlencoding::decode_binary(escaped.as_bytes());
    String::from_utf8_lossy(&bytes).into_owned()
}

fn escape_stray_percents(input: &str) -> Cow<'_, str> {
    let bytes = input.as_bytes();
    let is_escape = |i: usize| {
        bytes.len() > i + 2 && bytes[i + 1].is_ascii_hexdigit() && bytes[i + 2].is_ascii_hexdigit()
    };

    if !bytes
        .iter()
        .enumerate()
        .any(|(i, &b)| b == b'%' && !is_escape(i))
    {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 4);
    for (i, ch) in input.char_indices() {
        if ch == '%' && !is_escape(i) {
            out.push_str("%25");
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}
