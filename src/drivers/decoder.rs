use crate::drivers::error::MalformedSample;
/// Parses one device line into a raw ADC code.
///
/// Invalid UTF-8 sequences are dropped before parsing, so a stray byte inside
/// an otherwise numeric line does not cost the sample.
pub fn decode_line(line: &[u8]) -> Result<i64, MalformedSample> {
    let text: String = String::from_utf8_lossy(line)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect();
    let trimmed = text.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| MalformedSample(trimmed.to_string()))
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn decodes_plain_codes() {
        assert_eq!(decode_line(b"0"), Ok(0));
        assert_eq!(decode_line(b"65535"), Ok(65535));
        assert_eq!(decode_line(b" 1234\r"), Ok(1234));
        assert_eq!(decode_line(b"+7"), Ok(7));
    }
    #[test]
    fn drops_invalid_bytes_before_parsing() {
        assert_eq!(decode_line(b"12\xff34"), Ok(1234));
        assert_eq!(decode_line(b"\xfe\xff512"), Ok(512));
    }
    #[test]
    fn rejects_non_numeric_lines() {
        assert!(decode_line(b"").is_err());
        assert!(decode_line(b"\xff\xfe").is_err());
        assert!(decode_line(b"12.5").is_err());
        assert_eq!(
            decode_line(b"ready"),
            Err(MalformedSample("ready".to_string()))
        );
    }
}
