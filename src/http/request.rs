use heapless::String;

/// Longest path kept from a request line. Longer paths are cut at a char boundary.
pub const PATH_CAPACITY: usize = 64;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "OPTIONS" => HttpMethod::Options,
            "HEAD" => HttpMethod::Head,
            _ => return None,
        })
    }
}

/// First line of a request.
///
/// The method is kept for logging only; routing looks at the path alone.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Request {
    pub method: Option<HttpMethod>,
    pub path: String<PATH_CAPACITY>,
}

/// Parse `METHOD PATH [VERSION]`.
///
/// Never fails: a line with fewer than two tokens yields an empty path, and bytes
/// after the first invalid UTF-8 sequence are ignored.
pub fn parse_request_line(line: &[u8]) -> Request {
    let text = match core::str::from_utf8(line) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&line[..e.valid_up_to()]).unwrap_or_default(),
    };

    let mut parts = text.split_ascii_whitespace();
    let method = parts.next().and_then(HttpMethod::parse);
    let mut path = String::new();
    for c in parts.next().unwrap_or_default().chars() {
        if path.push(c).is_err() {
            break;
        }
    }

    Request { method, path }
}
