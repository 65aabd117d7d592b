//! The editable document: parse entry points, lookups and mutations.
//!
//! Mutations never fail. They either update a value in the property table
//! or append a line record; the record sequence is never reordered.

pub mod document;

pub use document::Document;
