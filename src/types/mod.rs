//! # Field Type System
//!
//! This module provides the two fixed-width scalar types supported by the
//! storage layer, together with their runtime value representation and the
//! per-field binary codec.
//!
//! ## Fixed-Width Encoding
//!
//! Every field type has an encoded byte width that is a pure function of the
//! type, independent of the value stored:
//!
//! | Type | Width | Encoding |
//! |------|-------|----------|
//! | `Int` | 4 | little-endian i32 |
//! | `Str(max_len)` | max_len + 4 | u32 length prefix + bytes + zero padding |
//!
//! Fixed widths are what make page capacity derivable from the schema alone:
//! a tuple's on-disk size is the sum of its field widths, and a page holds a
//! fixed number of tuple slots.
//!
//! ## String Semantics
//!
//! Strings are truncated to `max_len` bytes on encode (at a char boundary)
//! and padded with zeros. The length prefix records the live byte count, so
//! decode never has to scan for padding. A length prefix larger than
//! `max_len`, or bytes that are not UTF-8, are surfaced as corruption errors
//! rather than coerced.

use std::fmt;

use eyre::{bail, ensure, Result};
use zerocopy::little_endian::{I32, U32};
use zerocopy::{FromBytes, IntoBytes};

/// Default maximum byte length for `string` fields declared without an
/// explicit length (schema DSL `string` token).
pub const DEFAULT_STRING_LEN: usize = 128;

/// A fixed-width scalar field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// 32-bit signed integer, 4 bytes on disk.
    Int,
    /// Fixed-capacity string; `max_len + 4` bytes on disk.
    Str(usize),
}

impl FieldType {
    /// Encoded byte width of a field of this type.
    pub const fn byte_len(&self) -> usize {
        match self {
            FieldType::Int => 4,
            FieldType::Str(max_len) => *max_len + 4,
        }
    }

    /// The zero value stored in unset tuple slots.
    pub fn default_value(&self) -> Field {
        match self {
            FieldType::Int => Field::Int(0),
            FieldType::Str(_) => Field::Str(String::new()),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Int => write!(f, "int"),
            FieldType::Str(max_len) => write!(f, "string({})", max_len),
        }
    }
}

/// Runtime value of a single tuple field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Int(i32),
    Str(String),
}

impl Field {
    /// Returns true if this value is storable under the given type.
    pub fn matches(&self, ty: FieldType) -> bool {
        matches!(
            (self, ty),
            (Field::Int(_), FieldType::Int) | (Field::Str(_), FieldType::Str(_))
        )
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Field::Int(v) => Some(*v),
            Field::Str(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Str(s) => Some(s),
            Field::Int(_) => None,
        }
    }

    /// Appends the fixed-width encoding of this value to `buf`.
    ///
    /// Always writes exactly `ty.byte_len()` bytes. Strings longer than the
    /// type's capacity are truncated at a char boundary.
    pub fn encode_into(&self, ty: FieldType, buf: &mut Vec<u8>) -> Result<()> {
        match (self, ty) {
            (Field::Int(v), FieldType::Int) => {
                buf.extend_from_slice(I32::new(*v).as_bytes());
            }
            (Field::Str(s), FieldType::Str(max_len)) => {
                let mut end = s.len().min(max_len);
                while !s.is_char_boundary(end) {
                    end -= 1;
                }
                let bytes = &s.as_bytes()[..end];
                buf.extend_from_slice(U32::new(bytes.len() as u32).as_bytes());
                buf.extend_from_slice(bytes);
                buf.resize(buf.len() + (max_len - bytes.len()), 0);
            }
            (value, ty) => bail!("cannot encode {:?} as {}", value, ty),
        }
        Ok(())
    }

    /// Decodes a value of type `ty` from the front of `bytes`.
    ///
    /// `bytes` must hold at least `ty.byte_len()` bytes; trailing bytes are
    /// ignored so callers can pass a whole slot.
    pub fn decode(ty: FieldType, bytes: &[u8]) -> Result<Field> {
        ensure!(
            bytes.len() >= ty.byte_len(),
            "field slot too small: {} < {} for {}",
            bytes.len(),
            ty.byte_len(),
            ty
        );

        match ty {
            FieldType::Int => {
                let raw = I32::read_from_bytes(&bytes[..4])
                    .map_err(|_| eyre::eyre!("failed to read int field"))?;
                Ok(Field::Int(raw.get()))
            }
            FieldType::Str(max_len) => {
                let prefix = U32::read_from_bytes(&bytes[..4])
                    .map_err(|_| eyre::eyre!("failed to read string length prefix"))?;
                let len = prefix.get() as usize;
                ensure!(
                    len <= max_len,
                    "string length prefix {} exceeds field capacity {}",
                    len,
                    max_len
                );
                let text = std::str::from_utf8(&bytes[4..4 + len])
                    .map_err(|e| eyre::eyre!("string field is not valid UTF-8: {}", e))?;
                Ok(Field::Str(text.to_string()))
            }
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Int(v) => write!(f, "{}", v),
            Field::Str(s) => write!(f, "{}", s),
        }
    }
}
