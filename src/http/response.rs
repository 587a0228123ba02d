use core::fmt::Write as _;

use embedded_io_async::{Error as _, Write};
use heapless::String;

use super::{Error, HttpResult};
use crate::template::Page;

const HEADER_BUFFER_SIZE: usize = 128;

pub type StatusCode = u16;

fn reason_phrase(code: StatusCode) -> &'static str {
    match code {
        200 => "OK",
        303 => "See Other",
        _ => "Unknown",
    }
}

/// HTTP Content Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ContentType {
    TextHtml,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TextHtml => "text/html",
        }
    }
}

/// Status line and headers of an HTTP/1.0 response.
///
/// No `Content-Length` is sent: the body ends when the server closes the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseHeaders {
    status: StatusCode,
    location: Option<&'static str>,
    content_type: Option<ContentType>,
}

impl ResponseHeaders {
    /// Create response headers with a status code.
    pub const fn from_code(status: StatusCode) -> Self {
        Self {
            status,
            location: None,
            content_type: None,
        }
    }

    pub const fn success() -> Self {
        Self::from_code(200)
    }

    /// `303 See Other` pointing at `location`.
    pub const fn see_other(location: &'static str) -> Self {
        Self::from_code(303).with_location(location)
    }

    #[must_use]
    pub const fn with_location(mut self, location: &'static str) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub const fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn location(&self) -> Option<&'static str> {
        self.location
    }

    pub const fn content_type(&self) -> Option<ContentType> {
        self.content_type
    }

    /// Write the status line, headers and the terminating blank line.
    pub fn write_to(&self, writer: &mut impl core::fmt::Write) -> core::fmt::Result {
        write!(
            writer,
            "HTTP/1.0 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        )?;
        if let Some(location) = self.location {
            write!(writer, "Location: {}\r\n", location)?;
        }
        if let Some(content_type) = &self.content_type {
            write!(writer, "Content-Type: {}\r\n", content_type.as_str())?;
        }
        writer.write_str("\r\n")
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    Empty,
    Page(Page<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct Response<'a> {
    pub headers: ResponseHeaders,
    pub body: Body<'a>,
}

impl Response<'_> {
    pub fn status(&self) -> StatusCode {
        self.headers.status()
    }

    /// Write the whole response and flush the stream.
    pub async fn write_to<W: Write>(&self, writer: &mut W) -> HttpResult {
        let mut head = String::<HEADER_BUFFER_SIZE>::new();
        self.headers.write_to(&mut head)?;
        writer
            .write_all(head.as_bytes())
            .await
            .map_err(|e| Error::Io(e.kind()))?;

        if let Body::Page(page) = &self.body {
            page.write_to(writer).await?;
        }

        writer.flush().await.map_err(|e| Error::Io(e.kind()))
    }
}
