use std::io;
use crate::drivers::PipelineError;
/// An open line-oriented link to the sampling device.
///
/// Dropping the link closes it.
pub trait SampleLink: Send {
    fn name(&self) -> &str;
    /// Returns the next complete line with its terminator stripped, or `None`
    /// when nothing arrived within the link's read timeout.
    fn read_line(&mut self) -> io::Result<Option<Vec<u8>>>;
    /// Discards everything received but not yet read.
    fn clear_input(&mut self) -> io::Result<()>;
}
/// Opens links by target name (a port path such as `COM4` or `/dev/ttyACM0`).
pub trait LinkOpener: Send + Sync {
    fn open(&self, target: &str) -> Result<Box<dyn SampleLink>, PipelineError>;
}
/// Longest unterminated run kept while waiting for `\n`. No valid sample line
/// comes close.
pub const MAX_LINE: usize = 64;
/// Splits the first complete line off `pending`, trimming trailing whitespace.
///
/// Once more than [`MAX_LINE`] bytes arrive without a terminator they are
/// handed out as one line so the decoder rejects them and `pending` stays bounded.
pub fn take_line(pending: &mut Vec<u8>) -> Option<Vec<u8>> {
    let Some(end) = pending.iter().position(|b| *b == b'\n') else {
        if pending.len() > MAX_LINE {
            return Some(std::mem::take(pending));
        }
        return None;
    };
    let mut line: Vec<u8> = pending.drain(..=end).collect();
    while line.last().is_some_and(|b| b.is_ascii_whitespace()) {
        line.pop();
    }
    Some(line)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn take_line_waits_for_terminator() {
        let mut pending = b"123".to_vec();
        assert_eq!(take_line(&mut pending), None);
        pending.extend_from_slice(b"4\r\n56");
        assert_eq!(take_line(&mut pending), Some(b"1234".to_vec()));
        assert_eq!(pending, b"56".to_vec());
    }
    #[test]
    fn take_line_handles_blank_lines() {
        let mut pending = b"\n\r\n7\n".to_vec();
        assert_eq!(take_line(&mut pending), Some(Vec::new()));
        assert_eq!(take_line(&mut pending), Some(Vec::new()));
        assert_eq!(take_line(&mut pending), Some(b"7".to_vec()));
        assert!(pending.is_empty());
    }
    #[test]
    fn unterminated_noise_is_handed_out_once_over_the_cap() {
        let mut pending = vec![b'7'; MAX_LINE];
        assert_eq!(take_line(&mut pending), None);
        pending.extend_from_slice(b"77");
        let line = take_line(&mut pending).unwrap();
        assert_eq!(line.len(), MAX_LINE + 2);
        assert!(pending.is_empty());
        assert!(crate::drivers::decode_line(&line).is_err());
        pending.extend_from_slice(b"512\n");
        assert_eq!(take_line(&mut pending), Some(b"512".to_vec()));
    }
}
