use embedded_io_async::{Error as _, Read};

use super::Error;

/// Buffered line reader over an async byte stream.
///
/// Lines end with LF; a trailing CR is stripped. A line longer than the buffer is
/// returned in buffer-sized pieces. Reads are cancel-safe: dropping a pending
/// `read_line` (for example on timeout) keeps every byte already received.
pub struct LineReader<R, const N: usize> {
    inner: R,
    buf: [u8; N],
    start: usize,
    end: usize,
    // The last line returned was cut at the buffer boundary.
    truncated: bool,
}

impl<R: Read, const N: usize> LineReader<R, N> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: [0; N],
            start: 0,
            end: 0,
            truncated: false,
        }
    }

    /// Read the next line without its terminator.
    ///
    /// Returns `None` once the peer has closed and every buffered byte was consumed.
    pub async fn read_line(&mut self) -> Result<Option<&[u8]>, Error> {
        let (from, to) = loop {
            let pending = &self.buf[self.start..self.end];
            if let Some(pos) = pending.iter().position(|&b| b == b'\n') {
                let (from, to) = (self.start, self.start + pos);
                self.start += pos + 1;
                let continuation = core::mem::replace(&mut self.truncated, false);
                let empty = to == from || (to == from + 1 && self.buf[from] == b'\r');
                if continuation && empty {
                    // terminator of a line already handed out in pieces
                    continue;
                }
                break (from, to);
            }

            if self.start > 0 {
                self.buf.copy_within(self.start..self.end, 0);
                self.end -= self.start;
                self.start = 0;
            }

            if self.end == N {
                self.start = N;
                self.truncated = true;
                break (0, N);
            }

            let n = self
                .inner
                .read(&mut self.buf[self.end..])
                .await
                .map_err(|e| Error::Io(e.kind()))?;
            if n == 0 {
                if self.start == self.end {
                    return Ok(None);
                }
                let tail = (self.start, self.end);
                self.start = self.end;
                self.truncated = false;
                break tail;
            }
            self.end += n;
        };

        let line = &self.buf[from..to];
        Ok(Some(line.strip_suffix(b"\r").unwrap_or(line)))
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;

    /// Serves a fixed byte string in chunks of at most `chunk` bytes.
    struct Chunked<'a> {
        data: &'a [u8],
        chunk: usize,
    }

    impl embedded_io_async::ErrorType for Chunked<'_> {
        type Error = embedded_io_async::ErrorKind;
    }

    impl Read for Chunked<'_> {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let n = self.data.len().min(self.chunk).min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    fn lines<const N: usize>(data: &[u8], chunk: usize) -> Vec<Vec<u8>> {
        let mut reader = LineReader::<_, N>::new(Chunked { data, chunk });
        let mut out = Vec::new();
        block_on(async {
            while let Some(line) = reader.read_line().await.unwrap() {
                out.push(line.to_vec());
            }
        });
        out
    }

    #[test]
    fn splits_crlf_and_lf_lines() {
        let got = lines::<64>(b"GET / HTTP/1.0\r\nHost: x\n\r\n", 64);
        assert_eq!(
            got,
            vec![b"GET / HTTP/1.0".to_vec(), b"Host: x".to_vec(), Vec::new()]
        );
    }

    #[test]
    fn reassembles_lines_split_across_reads() {
        let got = lines::<64>(b"GET /on HTTP/1.0\r\nAccept: */*\r\n\r\n", 3);
        assert_eq!(got[0], b"GET /on HTTP/1.0");
        assert_eq!(got[1], b"Accept: */*");
        assert!(got[2].is_empty());
    }

    #[test]
    fn returns_unterminated_tail_before_eof() {
        let got = lines::<64>(b"first\r\nsecond", 5);
        assert_eq!(got, vec![b"first".to_vec(), b"second".to_vec()]);
    }

    #[test]
    fn long_lines_come_back_in_buffer_sized_pieces() {
        let got = lines::<8>(b"0123456789abcdef\r\nok\r\n", 4);
        assert_eq!(
            got,
            vec![b"01234567".to_vec(), b"89abcdef".to_vec(), b"ok".to_vec()]
        );
    }
}
