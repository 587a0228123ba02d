//! One request/response cycle on an accepted connection.

use embassy_time::{Duration, with_timeout};
use embedded_io_async::{Error as _, Read, Write};

use crate::actuator::Actuator;
use crate::app::AppState;
use crate::http::{Error, HeaderSkip, LineReader, parse_request_line, skip_headers};
use crate::router::Route;

/// How long a client may take to send its request line.
pub const REQUEST_LINE_TIMEOUT: Duration = Duration::from_secs(1);
/// Upper bound on the time spent discarding request headers.
pub const HEADER_SKIP_BUDGET: Duration = Duration::from_millis(250);

const LINE_BUFFER_SIZE: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AbandonReason {
    /// No request line within [`REQUEST_LINE_TIMEOUT`].
    Timeout,
    /// The peer closed before sending a request line.
    Closed,
}

/// An accepted client stream that can be shut down from this side.
pub trait Connection: Read + Write {
    /// Start closing the stream. Completion is awaited by a following flush.
    fn close(&mut self);
}

/// Result of handling one connection. Nothing is ever propagated to the server loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// A response was written and flushed.
    Served(Route),
    /// No response was sent.
    Abandoned(AbandonReason),
    /// The stream failed mid-request.
    Failed(Error),
}

/// Read the request line, skip the headers, route, then write and flush the response.
///
/// Closing the stream is left to the caller, see [`serve_connection`].
pub async fn handle_connection<C, A>(conn: &mut C, app: &mut AppState<'_, A>) -> Outcome
where
    C: Read + Write,
    A: Actuator,
{
    let mut reader = LineReader::<_, LINE_BUFFER_SIZE>::new(&mut *conn);

    let request = match with_timeout(REQUEST_LINE_TIMEOUT, reader.read_line()).await {
        Ok(Ok(Some(line))) => parse_request_line(line),
        Ok(Ok(None)) => {
            debug!("http: client closed before request line");
            return Outcome::Abandoned(AbandonReason::Closed);
        }
        Ok(Err(e)) => {
            warn!("http: read error: {:?}", e);
            return Outcome::Failed(e);
        }
        Err(_) => {
            warn!("http: request line timed out");
            return Outcome::Abandoned(AbandonReason::Timeout);
        }
    };
    info!("http: request {:?} {}", request.method, request.path.as_str());

    match skip_headers(&mut reader, HEADER_SKIP_BUDGET).await {
        HeaderSkip::Complete | HeaderSkip::Closed => {}
        HeaderSkip::DeadlineElapsed => warn!("http: header skip deadline elapsed"),
        HeaderSkip::Failed(e) => {
            warn!("http: read error: {:?}", e);
            return Outcome::Failed(e);
        }
    }

    let route = Route::from_path(&request.path);
    let response = app.respond(route);
    match response.write_to(conn).await {
        Ok(()) => Outcome::Served(route),
        Err(e) => {
            warn!("http: write error: {:?}", e);
            Outcome::Failed(e)
        }
    }
}

/// Handle one request, then close the stream and wait for the close to go out.
///
/// The stream is closed whatever the outcome, including when the client never sent a
/// request line.
pub async fn serve_connection<C, A>(conn: &mut C, app: &mut AppState<'_, A>) -> Outcome
where
    C: Connection,
    A: Actuator,
{
    let outcome = handle_connection(conn, app).await;
    match outcome {
        Outcome::Served(route) => debug!("http: served {:?}", route),
        Outcome::Abandoned(reason) => debug!("http: abandoned ({:?})", reason),
        Outcome::Failed(e) => warn!("http: connection failed: {}", e),
    }

    conn.close();
    if let Err(e) = conn.flush().await {
        debug!("http: close flush error: {:?}", e.kind());
    }
    outcome
}
