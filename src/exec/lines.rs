//! Line splitting for process output.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Reads `\n`-terminated lines, tolerating invalid UTF-8 and `\r\n` endings.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            inner: BufReader::new(reader),
            buf: Vec::new(),
        }
    }

    /// Read the next line without its terminator.
    ///
    /// A final line without a trailing newline is still returned.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the underlying reader fails.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buf.clear();
        if self.inner.read_until(b'\n', &mut self.buf).await? == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}
