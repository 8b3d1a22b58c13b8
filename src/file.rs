//! Purpose: File-backed JSON accessor with blocking and async entry points.
//! Exports: `JsonFile`, `ReadOptions`.
//! Role: Thin façade routing one shared codec through `std::fs` or `tokio::fs`.
//! Invariants: Encoding happens before any filesystem call; encode failure writes nothing.
//! Invariants: Storage errors always propagate; only lenient reads swallow decode errors.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;

use crate::error::{Error, ErrorKind};
use crate::format::{self, Indent};

/// Options for read operations.
#[derive(Clone, Copy, Debug)]
pub struct ReadOptions {
    /// When false, a malformed document decodes to `None` instead of an
    /// error. Storage failures propagate regardless.
    pub strict: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Reads and writes JSON documents stored one per file.
///
/// Every serializing operation reads the accessor's indent at call time, so
/// changing it affects subsequent calls only. Files are plain UTF-8 JSON
/// followed by a single newline; no framing, header, or checksum.
///
/// Concurrent writers to one path are not coordinated: the final content is
/// whatever the platform's own write semantics produce, typically
/// last-writer-wins.
#[derive(Clone, Debug, Default)]
pub struct JsonFile {
    indent: Option<Indent>,
}

impl JsonFile {
    /// Accessor with compact output (no indent).
    pub fn new() -> Self {
        Self { indent: None }
    }

    /// Accessor that pretty-prints with the given indent unit.
    pub fn with_indent(indent: Indent) -> Self {
        Self {
            indent: Some(indent),
        }
    }

    pub fn indent(&self) -> Option<&Indent> {
        self.indent.as_ref()
    }

    /// Sets the indent used by subsequent write and append calls.
    pub fn set_indent(&mut self, indent: Option<Indent>) {
        self.indent = indent;
    }

    /// Reads `path` and decodes its contents as one JSON document.
    pub fn read_sync<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| storage_error(err, path))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read json document");
        format::decode_document(&text).map_err(|err| err.with_path(path))
    }

    /// Like [`read_sync`](Self::read_sync), honoring [`ReadOptions`].
    ///
    /// With `strict: false` a malformed document yields `Ok(None)`; a
    /// missing or unreadable file still fails.
    pub fn read_sync_with<T: DeserializeOwned>(
        &self,
        path: impl AsRef<Path>,
        options: ReadOptions,
    ) -> Result<Option<T>, Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| storage_error(err, path))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read json document");
        match format::decode_document(&text) {
            Ok(value) => Ok(Some(value)),
            Err(_) if !options.strict => Ok(None),
            Err(err) => Err(err.with_path(path)),
        }
    }

    /// Encodes `value` and writes it to `path`, replacing existing content.
    pub fn write_sync<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let doc = self.encode(value, path)?;
        std::fs::write(path, &doc).map_err(|err| storage_error(err, path))?;
        tracing::debug!(path = %path.display(), bytes = doc.len(), "wrote json document");
        Ok(())
    }

    /// Encodes `value` and appends it to `path`, creating the file if absent.
    pub fn append_sync<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let doc = self.encode(value, path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| storage_error(err, path))?;
        file.write_all(doc.as_bytes())
            .map_err(|err| storage_error(err, path))?;
        tracing::debug!(path = %path.display(), bytes = doc.len(), "appended json document");
        Ok(())
    }

    /// Async [`read_sync`](Self::read_sync). Decoding itself stays
    /// synchronous; only the filesystem call suspends.
    pub async fn read<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> Result<T, Error> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| storage_error(err, path))?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "read json document");
        format::decode_document(&text).map_err(|err| err.with_path(path))
    }

    /// Async [`write_sync`](Self::write_sync).
    pub async fn write<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let doc = self.encode(value, path)?;
        tokio::fs::write(path, &doc)
            .await
            .map_err(|err| storage_error(err, path))?;
        tracing::debug!(path = %path.display(), bytes = doc.len(), "wrote json document");
        Ok(())
    }

    /// Async [`append_sync`](Self::append_sync).
    pub async fn append<T: Serialize + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        value: &T,
    ) -> Result<(), Error> {
        let path = path.as_ref();
        let doc = self.encode(value, path)?;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|err| storage_error(err, path))?;
        file.write_all(doc.as_bytes())
            .await
            .map_err(|err| storage_error(err, path))?;
        file.flush().await.map_err(|err| storage_error(err, path))?;
        tracing::debug!(path = %path.display(), bytes = doc.len(), "appended json document");
        Ok(())
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T, path: &Path) -> Result<String, Error> {
        format::encode_document(value, self.indent.as_ref()).map_err(|err| err.with_path(path))
    }
}

fn storage_error(err: io::Error, path: &Path) -> Error {
    let kind = match err.kind() {
        io::ErrorKind::NotFound => ErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => ErrorKind::Permission,
        _ => ErrorKind::Io,
    };
    Error::new(kind).with_path(path).with_source(err)
}
