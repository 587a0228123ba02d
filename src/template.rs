//! Status page template.
//!
//! The page is a plain text file with `{status}` markers. It is validated once at boot
//! and rendered without allocating: the source is streamed around the markers.

use core::fmt;

use embedded_io_async::{Error as _, Write};

use crate::actuator::SwitchState;
use crate::http::Error;

/// Substitution marker replaced by `on` / `off`.
pub const STATUS_MARKER: &str = "{status}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemplateError {
    /// The source has no `{status}` marker.
    MissingMarker,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MissingMarker => {
                write!(f, "template has no {} marker", STATUS_MARKER)
            }
        }
    }
}

impl core::error::Error for TemplateError {}

/// Validated, read-only page template.
#[derive(Debug, Clone, Copy)]
pub struct Template<'a> {
    source: &'a str,
}

impl<'a> Template<'a> {
    pub fn new(source: &'a str) -> Result<Self, TemplateError> {
        if !source.contains(STATUS_MARKER) {
            return Err(TemplateError::MissingMarker);
        }
        Ok(Self { source })
    }

    /// Bind the template to a switch state.
    ///
    /// Every occurrence of the marker is substituted.
    pub fn render(self, state: SwitchState) -> Page<'a> {
        Page {
            template: self,
            value: state.as_str(),
        }
    }
}

/// A template bound to a value, ready to be written out.
#[derive(Debug, Clone, Copy)]
pub struct Page<'a> {
    template: Template<'a>,
    value: &'static str,
}

impl Page<'_> {
    pub async fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        for (i, part) in self.template.source.split(STATUS_MARKER).enumerate() {
            if i > 0 {
                writer
                    .write_all(self.value.as_bytes())
                    .await
                    .map_err(|e| Error::Io(e.kind()))?;
            }
            writer
                .write_all(part.as_bytes())
                .await
                .map_err(|e| Error::Io(e.kind()))?;
        }
        Ok(())
    }
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.template.source.split(STATUS_MARKER).enumerate() {
            if i > 0 {
                f.write_str(self.value)?;
            }
            f.write_str(part)?;
        }
        Ok(())
    }
}
