use embassy_time::{Duration, Instant, with_deadline};
use embedded_io_async::Read;

use super::{Error, LineReader};

/// How header skipping ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HeaderSkip {
    /// A blank line terminated the header block.
    Complete,
    /// The time budget ran out first.
    DeadlineElapsed,
    /// The peer closed the stream.
    Closed,
    Failed(Error),
}

/// Read and discard header lines until a blank line, end of stream, or until `budget`
/// has elapsed since the call.
///
/// Every read is bounded by the same deadline, so a client that stops sending cannot
/// hold the caller longer than the budget.
pub async fn skip_headers<R: Read, const N: usize>(
    reader: &mut LineReader<R, N>,
    budget: Duration,
) -> HeaderSkip {
    let deadline = Instant::now() + budget;
    loop {
        if Instant::now() >= deadline {
            return HeaderSkip::DeadlineElapsed;
        }
        match with_deadline(deadline, reader.read_line()).await {
            Ok(Ok(Some(line))) if line.is_empty() => return HeaderSkip::Complete,
            Ok(Ok(Some(_header))) => {
                trace!("http: skipped header");
            }
            Ok(Ok(None)) => return HeaderSkip::Closed,
            Ok(Err(e)) => return HeaderSkip::Failed(e),
            Err(_) => return HeaderSkip::DeadlineElapsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;
    use embassy_time::Timer;

    use super::*;

    const BUDGET: Duration = Duration::from_millis(250);

    /// Sends `line` every `every`, forever.
    struct Drip {
        line: &'static [u8],
        every: Duration,
    }

    impl embedded_io_async::ErrorType for Drip {
        type Error = embedded_io_async::ErrorKind;
    }

    impl Read for Drip {
        async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            Timer::after(self.every).await;
            let n = self.line.len().min(buf.len());
            buf[..n].copy_from_slice(&self.line[..n]);
            Ok(n)
        }
    }

    #[test]
    fn stops_at_blank_line() {
        let mut reader = LineReader::<_, 128>::new(&b"Host: a\r\nAccept: */*\r\n\r\nbody"[..]);
        let outcome = block_on(skip_headers(&mut reader, BUDGET));
        assert_eq!(outcome, HeaderSkip::Complete);
    }

    #[test]
    fn stops_when_peer_closes() {
        let mut reader = LineReader::<_, 128>::new(&b"Host: a\r\n"[..]);
        let outcome = block_on(skip_headers(&mut reader, BUDGET));
        assert_eq!(outcome, HeaderSkip::Closed);
    }

    #[test]
    fn slow_headers_are_cut_off_by_the_budget() {
        let drip = Drip {
            line: b"X-Slow: 1\r\n",
            every: Duration::from_millis(100),
        };
        let mut reader = LineReader::<_, 128>::new(drip);
        let started = Instant::now();
        let outcome = block_on(skip_headers(&mut reader, BUDGET));
        let elapsed = started.elapsed();
        assert_eq!(outcome, HeaderSkip::DeadlineElapsed);
        assert!(elapsed >= BUDGET);
        assert!(elapsed < Duration::from_millis(400), "took {:?}", elapsed);
    }

    #[test]
    fn silent_client_is_cut_off_by_the_budget() {
        let drip = Drip {
            line: b"",
            every: Duration::from_secs(60),
        };
        let mut reader = LineReader::<_, 128>::new(drip);
        let started = Instant::now();
        let outcome = block_on(skip_headers(&mut reader, BUDGET));
        assert_eq!(outcome, HeaderSkip::DeadlineElapsed);
        assert!(started.elapsed() < Duration::from_millis(400));
    }
}
