//! URL decoding for form-urlencoded keys and values.

use crate::constants::MAX_URL_DECODED_LEN;

/// A form key or value that cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// The decoded text would be longer than [`MAX_URL_DECODED_LEN`] bytes.
    TooLong,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLong => write!(f, "decoded form field exceeds {MAX_URL_DECODED_LEN} bytes"),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode one form-urlencoded key or value.
///
/// `%XX` becomes the byte it names and `+` becomes a space. A `%` not
/// followed by two hex digits is kept literally. Bytes that are not valid
/// UTF-8 once decoded are replaced with U+FFFD.
///
/// # Errors
///
/// [`DecodeError::TooLong`] if the decoded bytes exceed [`MAX_URL_DECODED_LEN`].
///
/// # Examples
///
/// ```
/// use grid_query::url_decode;
///
/// assert_eq!(url_decode("columns%5B0%5D%5Bdata%5D").unwrap(), "columns[0][data]");
/// assert_eq!(url_decode("o%27brien+smith").unwrap(), "o'brien smith");
/// ```
pub fn url_decode(s: &str) -> Result<String, DecodeError> {
    let input = s.as_bytes();
    let mut out = Vec::with_capacity(input.len().min(MAX_URL_DECODED_LEN));
    let mut pos = 0;

    while let Some(&b) = input.get(pos) {
        let (byte, width) = match b {
            b'%' => escaped_byte(input.get(pos + 1..pos + 3)).map_or((b'%', 1), |d| (d, 3)),
            b'+' => (b' ', 1),
            b => (b, 1),
        };
        if out.len() == MAX_URL_DECODED_LEN {
            return Err(DecodeError::TooLong);
        }
        out.push(byte);
        pos += width;
    }

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// The byte named by two hex digits.
fn escaped_byte(hex: Option<&[u8]>) -> Option<u8> {
    match hex? {
        [hi, lo] => Some((hex_digit(*hi)? << 4) | hex_digit(*lo)?),
        _ => None,
    }
}

fn hex_digit(b: u8) -> Option<u8> {
    char::from(b)
        .to_digit(16)
        .and_then(|d| u8::try_from(d).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_decode() {
        assert_eq!(url_decode("hello%20world").unwrap(), "hello world");
        assert_eq!(url_decode("hello+world").unwrap(), "hello world");
        assert_eq!(url_decode("a%2Fb").unwrap(), "a/b");
        assert_eq!(url_decode("plain").unwrap(), "plain");
    }

    #[test]
    fn test_url_decode_brackets() {
        assert_eq!(
            url_decode("columns%5B2%5D%5Bsearch%5D%5Bvalue%5D").unwrap(),
            "columns[2][search][value]"
        );
    }

    #[test]
    fn test_url_decode_utf8() {
        assert_eq!(url_decode("caf%C3%A9").unwrap(), "café");
        assert_eq!(url_decode("%E4%B8%AD%E6%96%87").unwrap(), "中文");
    }

    #[test]
    fn test_url_decode_invalid_sequences() {
        assert_eq!(url_decode("%GG").unwrap(), "%GG");
        assert_eq!(url_decode("%2").unwrap(), "%2");
        assert_eq!(url_decode("%").unwrap(), "%");
        assert_eq!(url_decode("a%20b%GGc%2").unwrap(), "a b%GGc%2");
    }

    #[test]
    fn test_url_decode_double_encoding() {
        assert_eq!(url_decode("%2520").unwrap(), "%20");
    }

    #[test]
    fn test_url_decode_literal_escape_at_limit() {
        let fill = "a".repeat(MAX_URL_DECODED_LEN - 1);
        assert_eq!(url_decode(&format!("{fill}%GG")), Err(DecodeError::TooLong));
        assert_eq!(url_decode(&format!("{fill}%2")), Err(DecodeError::TooLong));

        // A valid escape decodes to one byte, so this lands exactly on the limit
        assert_eq!(
            url_decode(&format!("{fill}%41")).unwrap().len(),
            MAX_URL_DECODED_LEN
        );
    }

    #[test]
    fn test_url_decode_too_long() {
        let long = "a".repeat(MAX_URL_DECODED_LEN + 1);
        assert_eq!(url_decode(&long), Err(DecodeError::TooLong));

        let exact = "a".repeat(MAX_URL_DECODED_LEN);
        assert_eq!(url_decode(&exact).unwrap().len(), MAX_URL_DECODED_LEN);
    }
}
