//! Minimal HTTP/1.0 plumbing for the control page.

pub mod headers;
pub mod reader;
pub mod request;
pub mod response;

use core::fmt;

use embedded_io_async::ErrorKind;

pub use headers::{HeaderSkip, skip_headers};
pub use reader::LineReader;
pub use request::{HttpMethod, Request, parse_request_line};
pub use response::{Body, ContentType, Response, ResponseHeaders, StatusCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The underlying stream failed.
    Io(ErrorKind),
    /// Response headers did not fit the header buffer.
    FormatHeaders,
}

impl From<fmt::Error> for Error {
    fn from(_error: fmt::Error) -> Self {
        Error::FormatHeaders
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(kind) => write!(f, "stream error: {:?}", kind),
            Error::FormatHeaders => f.write_str("response headers overflow"),
        }
    }
}

impl core::error::Error for Error {}

pub type HttpResult = Result<(), Error>;
