//! # Tuple Descriptors and Records
//!
//! This module provides the schema descriptor ([`TupleDesc`]) and the
//! schema-bound record ([`Tuple`]) that together define the fixed-width
//! tuple encoding used by heap pages.
//!
//! ## Tuple Binary Layout
//!
//! A tuple occupies exactly `desc.byte_size()` bytes: the fixed-width
//! encodings of its fields concatenated in schema order, no header.
//!
//! ```text
//! +-----------+-----------+------ ... ------+
//! | field 0   | field 1   | field N-1       |
//! | (width 0) | (width 1) | (width N-1)     |
//! +-----------+-----------+------ ... ------+
//! ```
//!
//! The occupancy bookkeeping lives in the page header, not in the tuple:
//! a slot's bytes are meaningful only when its bitmap bit is set.
//!
//! ## Text Encoding
//!
//! [`Tuple::encode_text`] renders a record as tab-separated field values
//! terminated by a newline. This is the interchange format used by golden
//! file tests and debugging output.
//!
//! ## Descriptor Equality
//!
//! Two descriptors compare equal iff they have the same field count and the
//! same type sequence; field names are deliberately excluded. See
//! [`TupleDesc`] for the rationale.

mod schema;
mod tuple;

pub use schema::{FieldDef, TupleDesc};
pub use tuple::{RecordId, Tuple};
