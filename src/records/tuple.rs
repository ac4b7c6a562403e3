//! # Tuple - A Schema-Bound Record
//!
//! A `Tuple` is an array of field values bound to a [`TupleDesc`], plus an
//! optional [`RecordId`] naming the page slot it was read from or placed
//! into. Tuples are produced by the page codec during a scan or constructed
//! fresh by an operator.

use std::fmt;
use std::sync::Arc;

use eyre::{ensure, Result};

use crate::records::TupleDesc;
use crate::storage::PageId;
use crate::types::Field;

/// On-disk location of a tuple: the page it lives on and its slot number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    pub page_id: PageId,
    pub slot: usize,
}

impl RecordId {
    pub fn new(page_id: PageId, slot: usize) -> Self {
        Self { page_id, slot }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.page_id, self.slot)
    }
}

/// A record: one value slot per descriptor field, in schema order.
///
/// Unset slots hold the type's zero value (0, empty string) rather than an
/// absent marker, so a freshly constructed tuple is always encodable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    desc: Arc<TupleDesc>,
    fields: Vec<Field>,
    record_id: Option<RecordId>,
}

impl Tuple {
    /// Creates a tuple with default-valued slots for every field.
    pub fn new(desc: Arc<TupleDesc>) -> Self {
        let fields = desc
            .iter()
            .map(|f| f.field_type.default_value())
            .collect();
        Self {
            desc,
            fields,
            record_id: None,
        }
    }

    pub fn desc(&self) -> &Arc<TupleDesc> {
        &self.desc
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.record_id
    }

    pub fn set_record_id(&mut self, rid: RecordId) {
        self.record_id = Some(rid);
    }

    /// Value of the `i`-th field, or `None` when `i` is out of range.
    pub fn field(&self, i: usize) -> Option<&Field> {
        self.fields.get(i)
    }

    /// Sets the `i`-th field. Writes outside the field range are silently
    /// ignored; callers that need the stricter check should consult
    /// `desc().field_count()` first. (Deliberately lenient contract.)
    pub fn set_field(&mut self, i: usize, value: Field) {
        if let Some(slot) = self.fields.get_mut(i) {
            *slot = value;
        }
    }

    /// Fresh iterator over field values in schema order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Tab-separated field values, newline-terminated.
    pub fn encode_text(&self) -> String {
        let mut out = String::new();
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                out.push('\t');
            }
            out.push_str(&field.to_string());
        }
        out.push('\n');
        out
    }

    /// Appends this tuple's `desc().byte_size()`-byte binary image to `buf`.
    pub fn encode_into(&self, buf: &mut Vec<u8>) -> Result<()> {
        for (i, field) in self.fields.iter().enumerate() {
            field.encode_into(self.desc.field_type(i)?, buf)?;
        }
        Ok(())
    }

    /// Decodes a tuple from exactly `desc.byte_size()` leading bytes.
    pub fn decode(desc: Arc<TupleDesc>, bytes: &[u8]) -> Result<Tuple> {
        ensure!(
            bytes.len() >= desc.byte_size(),
            "tuple slot too small: {} < {}",
            bytes.len(),
            desc.byte_size()
        );

        let mut fields = Vec::with_capacity(desc.field_count());
        let mut offset = 0;
        for def in desc.iter() {
            let width = def.field_type.byte_len();
            fields.push(Field::decode(def.field_type, &bytes[offset..offset + width])?);
            offset += width;
        }

        Ok(Tuple {
            desc,
            fields,
            record_id: None,
        })
    }
}
