/*!
 * Output sink for rendered units
 *
 * Depending on `--quiet` and `--clipboard`, output goes to stdout, to an
 * in-memory buffer (for the clipboard), to both, or nowhere.
 */

use std::io::{self, Stdout, Write};

/// Destination of the scan output
pub enum OutputSink {
    /// Terminal only
    Stdout(Stdout),
    /// Buffer only
    Buffer(Vec<u8>),
    /// Terminal and buffer
    Tee(Stdout, Vec<u8>),
    /// Discard everything
    Null,
}

impl OutputSink {
    /// Pick the sink for the given `--clipboard` / `--quiet` combination
    pub fn for_mode(clipboard: bool, quiet: bool) -> Self {
        match (clipboard, quiet) {
            (false, false) => Self::Stdout(io::stdout()),
            (false, true) => Self::Null,
            (true, false) => Self::Tee(io::stdout(), Vec::new()),
            (true, true) => Self::Buffer(Vec::new()),
        }
    }

    /// Buffered output, if this sink buffers
    pub fn buffered(&self) -> Option<&[u8]> {
        match self {
            Self::Buffer(buffer) | Self::Tee(_, buffer) => Some(buffer.as_slice()),
            Self::Stdout(_) | Self::Null => None,
        }
    }

    /// Consume the sink and return the buffered text, if any
    pub fn into_buffered_text(self) -> Option<String> {
        match self {
            Self::Buffer(buffer) | Self::Tee(_, buffer) => {
                Some(String::from_utf8_lossy(&buffer).into_owned())
            }
            Self::Stdout(_) | Self::Null => None,
        }
    }
}

impl Write for OutputSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(stdout) => stdout.write(buf),
            Self::Buffer(buffer) => buffer.write(buf),
            Self::Tee(stdout, buffer) => {
                stdout.write_all(buf)?;
                buffer.extend_from_slice(buf);
                Ok(buf.len())
            }
            Self::Null => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(stdout) | Self::Tee(stdout, _) => stdout.flush(),
            Self::Buffer(_) | Self::Null => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        assert!(matches!(OutputSink::for_mode(false, false), OutputSink::Stdout(_)));
        assert!(matches!(OutputSink::for_mode(false, true), OutputSink::Null));
        assert!(matches!(OutputSink::for_mode(true, false), OutputSink::Tee(_, _)));
        assert!(matches!(OutputSink::for_mode(true, true), OutputSink::Buffer(_)));
    }

    #[test]
    fn test_buffer_collects_output() {
        let mut sink = OutputSink::for_mode(true, true);
        writeln!(sink, "<< START: a >>").unwrap();
        writeln!(sink, "body").unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.buffered(), Some(&b"<< START: a >>\nbody\n"[..]));
        assert_eq!(
            sink.into_buffered_text().as_deref(),
            Some("<< START: a >>\nbody\n")
        );
    }

    #[test]
    fn test_null_discards() {
        let mut sink = OutputSink::Null;
        assert_eq!(sink.write(b"ignored").unwrap(), 7);
        assert!(sink.buffered().is_none());
        assert!(sink.into_buffered_text().is_none());
    }
}
