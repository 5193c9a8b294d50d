/*!
 * Lossless compression of rendered bodies (zlib)
 */

use std::io::{self, Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

/// Compress text with zlib at the default level
pub fn compress(content: &str) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content.as_bytes())?;
    encoder.finish()
}

/// Inverse of [`compress`]. Fails on corrupt input or non-UTF-8 payloads.
pub fn decompress(data: &[u8]) -> io::Result<String> {
    let mut content = String::new();
    ZlibDecoder::new(data).read_to_string(&mut content)?;
    Ok(content)
}

/// Render compressed bytes as a Python-style byte-string literal.
///
/// Single quotes are used unless the data holds `'` and no `"`, in which
/// case the literal is `b"..."`. Only the chosen quote is escaped.
pub fn to_byte_literal(data: &[u8]) -> String {
    let quote = if data.contains(&b'\'') && !data.contains(&b'"') {
        '"'
    } else {
        '\''
    };

    let mut literal = String::with_capacity(data.len() * 2 + 3);
    literal.push('b');
    literal.push(quote);
    for &byte in data {
        match byte {
            b'\\' => literal.push_str("\\\\"),
            b'\t' => literal.push_str("\\t"),
            b'\n' => literal.push_str("\\n"),
            b'\r' => literal.push_str("\\r"),
            _ if byte as char == quote => {
                literal.push('\\');
                literal.push(quote);
            }
            0x20..=0x7E => literal.push(byte as char),
            _ => literal.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    literal.push(quote);
    literal
}
