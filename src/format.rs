//! Purpose: Centralize JSON document encoding and decoding for both API surfaces.
//! Exports: `Indent`, plus crate-internal `encode_document` and `decode_document`.
//! Role: Single codec seam so blocking and async entry points share one routine.
//! Invariants: Encoded documents end with exactly one trailing newline.
//! Invariants: A present indent is handed to the serializer verbatim; absent means compact.
//! Notes: Callsites attach path context to errors so domain context stays explicit.

use std::borrow::Cow;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Error, ErrorKind};

/// Indentation unit for serialized output.
///
/// `Spaces(n)` indents nested levels by `n` spaces; `Literal` supplies the
/// unit string directly (tabs, for example). No indent configured on the
/// accessor means the most compact encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Indent {
    Spaces(usize),
    Literal(String),
}

impl Indent {
    fn unit(&self) -> Cow<'_, str> {
        match self {
            Self::Spaces(width) => Cow::Owned(" ".repeat(*width)),
            Self::Literal(unit) => Cow::Borrowed(unit),
        }
    }
}

/// Serializes `value` at the given indent and appends the trailing newline.
pub(crate) fn encode_document<T: Serialize + ?Sized>(
    value: &T,
    indent: Option<&Indent>,
) -> Result<String, Error> {
    let mut text = match indent {
        None => serde_json::to_string(value).map_err(encode_error)?,
        Some(indent) => {
            let unit = indent.unit();
            let formatter = PrettyFormatter::with_indent(unit.as_bytes());
            let mut buf = Vec::new();
            let mut serializer = Serializer::with_formatter(&mut buf, formatter);
            value.serialize(&mut serializer).map_err(encode_error)?;
            String::from_utf8(buf).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("serializer produced non-UTF-8 output")
                    .with_source(err)
            })?
        }
    };
    text.push('\n');
    Ok(text)
}

/// Parses one JSON document into any owned deserialize target.
pub(crate) fn decode_document<T: DeserializeOwned>(text: &str) -> Result<T, Error> {
    serde_json::from_str(text).map_err(|err| {
        Error::new(ErrorKind::Malformed)
            .with_message("invalid JSON document")
            .with_source(err)
    })
}

fn encode_error(err: serde_json::Error) -> Error {
    Error::new(ErrorKind::Unrepresentable)
        .with_message("value cannot be encoded as JSON")
        .with_source(err)
}
