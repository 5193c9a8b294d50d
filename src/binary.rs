/*!
 * Binary content heuristic
 */

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes sampled from each file
pub const SAMPLE_SIZE: usize = 1024;

/// Share of non-text bytes above which a sample counts as binary
const NON_TEXT_THRESHOLD: f64 = 0.30;

/// Whether a byte is printable ASCII or one of the common control characters
fn is_text_byte(byte: u8) -> bool {
    matches!(byte, 0x07 | 0x08 | 0x09 | 0x0A | 0x0C | 0x0D | 0x1B | 0x20..=0x7E)
}

/// Classify a content sample
pub fn is_binary_bytes(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }
    if sample.contains(&0) {
        return true;
    }

    let non_text = sample.iter().filter(|&&b| !is_text_byte(b)).count();
    non_text as f64 / sample.len() as f64 > NON_TEXT_THRESHOLD
}

fn read_sample(path: &Path) -> io::Result<Vec<u8>> {
    let mut sample = Vec::with_capacity(SAMPLE_SIZE);
    File::open(path)?
        .take(SAMPLE_SIZE as u64)
        .read_to_end(&mut sample)?;
    Ok(sample)
}

/// Heuristically decide whether the file at `path` is binary.
///
/// Only the first [`SAMPLE_SIZE`] bytes are read. Unreadable files are
/// treated as text so that a read failure never aborts a scan.
pub fn is_binary(path: &Path) -> bool {
    match read_sample(path) {
        Ok(sample) => is_binary_bytes(&sample),
        Err(e) => {
            log::debug!("Could not sample {}: {}; assuming text", path.display(), e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_null_byte_is_binary() {
        assert!(is_binary_bytes(b"\x00\x01\x02BINARY"));
        assert!(is_binary_bytes(b"plain text with a \x00 somewhere"));
    }

    #[test]
    fn test_plain_text_is_not_binary() {
        assert!(!is_binary_bytes(b"fn main() {\n\tprintln!(\"hi\");\r\n}\x1b[0m\x07\x08\x0c"));
        assert!(!is_binary_bytes(b""));
    }

    #[test]
    fn test_threshold_is_strictly_greater_than_thirty_percent() {
        // 3 of 10 bytes are non-text: exactly 30%, still text
        let mut sample = vec![b'a'; 7];
        sample.extend_from_slice(&[0x80, 0x81, 0x82]);
        assert!(!is_binary_bytes(&sample));

        // 4 of 10: binary
        let mut sample = vec![b'a'; 6];
        sample.extend_from_slice(&[0x80, 0x81, 0x82, 0x83]);
        assert!(is_binary_bytes(&sample));
    }

    #[test]
    fn test_utf8_heavy_text_can_look_binary() {
        // Every byte of a multi-byte character is outside printable ASCII
        assert!(is_binary_bytes("日本語のテキスト".as_bytes()));
        assert!(!is_binary_bytes("mostly ascii with one é".as_bytes()));
    }

    #[test]
    fn test_only_prefix_is_sampled() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tail.bin");
        let mut content = vec![b'x'; SAMPLE_SIZE];
        content.extend_from_slice(&[0u8; 64]);
        fs::write(&path, content).unwrap();

        assert!(!is_binary(&path));
    }

    #[test]
    fn test_missing_file_is_not_binary() {
        let temp_dir = tempdir().unwrap();
        assert!(!is_binary(&temp_dir.path().join("does-not-exist")));
    }

    #[test]
    fn test_binary_file_on_disk() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("image.png");
        fs::write(&path, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00]).unwrap();
        assert!(is_binary(&path));
    }
}
