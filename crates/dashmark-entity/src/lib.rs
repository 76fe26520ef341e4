//! # dashmark-entity
//!
//! Domain models for Dashmark. [`bookmark`] mirrors the node shape the
//! host bookmark store hands out; [`scan`] holds the query modes, result
//! records, and the request/response envelopes exchanged with callers.

pub mod bookmark;
pub mod scan;
