//! glica-storage
//!
//! The document-store collaborator: patient history entries persisted as
//! JSON documents in S3. Thin wrapper around the AWS S3 SDK plus the
//! append-only history operations built on it.

pub mod documents;
pub mod error;
pub mod history;
pub mod keys;
