//! Purpose: Read, write, and append JSON documents stored one per file.
//! Exports: `JsonFile`, `ReadOptions`, `Indent`, `Error`, `ErrorKind`.
//! Role: Convenience layer pairing `serde_json` with blocking and async file I/O.
//! Invariants: Persisted documents always end with exactly one trailing newline.
//! Invariants: Storage and format failures remain distinct error kinds end to end.
pub mod error;
pub mod file;
pub mod format;

pub use error::{Error, ErrorKind};
pub use file::{JsonFile, ReadOptions};
pub use format::Indent;
