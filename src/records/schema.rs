//! # TupleDesc - Schema of a Tuple
//!
//! A `TupleDesc` is the ordered list of `(name, type)` pairs describing a
//! record layout. It is built once per table at catalog-load time and
//! immutable afterwards; `merge` produces a new descriptor without touching
//! its operands.

use std::fmt;

use eyre::{ensure, Result};

use crate::types::FieldType;

/// A single `(name, type)` entry of a tuple descriptor.
///
/// Names may be empty (anonymous fields); they participate in name lookup
/// and display but not in descriptor equality.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Ordered field-type/name description of a record layout.
#[derive(Debug, Clone)]
pub struct TupleDesc {
    fields: Vec<FieldDef>,
}

impl TupleDesc {
    /// Creates a descriptor from the given field definitions.
    ///
    /// A descriptor must have at least one field; zero-field construction
    /// is rejected.
    pub fn new(fields: Vec<FieldDef>) -> Result<Self> {
        ensure!(
            !fields.is_empty(),
            "tuple descriptor requires at least one field"
        );
        Ok(Self { fields })
    }

    /// Creates a descriptor with anonymous (empty-named) fields.
    pub fn from_types(types: Vec<FieldType>) -> Result<Self> {
        Self::new(
            types
                .into_iter()
                .map(|ty| FieldDef::new("", ty))
                .collect(),
        )
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Type of the `i`-th field; errors when `i` is out of range.
    pub fn field_type(&self, i: usize) -> Result<FieldType> {
        self.fields
            .get(i)
            .map(|f| f.field_type)
            .ok_or_else(|| eyre::eyre!("no field at index {} (descriptor has {})", i, self.fields.len()))
    }

    /// Name of the `i`-th field; errors when `i` is out of range.
    pub fn field_name(&self, i: usize) -> Result<&str> {
        self.fields
            .get(i)
            .map(|f| f.name.as_str())
            .ok_or_else(|| eyre::eyre!("no field at index {} (descriptor has {})", i, self.fields.len()))
    }

    /// Index of the first field with the given name, in declaration order.
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| eyre::eyre!("no field named '{}' in descriptor", name))
    }

    /// Total on-disk byte size of a tuple with this descriptor.
    pub fn byte_size(&self) -> usize {
        self.fields.iter().map(|f| f.field_type.byte_len()).sum()
    }

    /// Concatenates two descriptors: `a`'s fields followed by `b`'s.
    pub fn merge(a: &TupleDesc, b: &TupleDesc) -> TupleDesc {
        let mut fields = Vec::with_capacity(a.fields.len() + b.fields.len());
        fields.extend(a.fields.iter().cloned());
        fields.extend(b.fields.iter().cloned());
        // Both operands are non-empty, so the result is too.
        TupleDesc { fields }
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter()
    }
}

/// Structural equality on field count and type sequence only.
///
/// Field names are excluded on purpose: `users(id int)` and `orders(n int)`
/// describe the same physical layout and must be interchangeable wherever a
/// layout check is performed (e.g. validating a tuple against a page's
/// descriptor). `Hash` is intentionally not implemented; descriptors are
/// never used as map keys.
impl PartialEq for TupleDesc {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(other.fields.iter())
                .all(|(a, b)| a.field_type == b.field_type)
    }
}

impl Eq for TupleDesc {}

impl fmt::Display for TupleDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}({})", field.name, field.field_type)?;
        }
        Ok(())
    }
}
