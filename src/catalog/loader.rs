//! # Schema File Loader
//!
//! Parses the line-oriented schema DSL and registers the described tables.
//! One table per line:
//!
//! ```text
//! users(id int pk, name string)
//! orders(id int pk, user_id int, note string)
//! ```
//!
//! Field types are `int` or `string` (case-insensitive); `string` fields
//! get the default capacity. At most one field per line may carry the `pk`
//! annotation. Each table's data is expected at `<schema dir>/<name>.dat`.
//!
//! Parsing is strict: a malformed line, unknown type, or unknown annotation
//! is a fatal configuration error surfaced to the caller with line context,
//! never skipped.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use eyre::{bail, ensure, Result, WrapErr};
use log::info;

use crate::catalog::Catalog;
use crate::records::{FieldDef, TupleDesc};
use crate::storage::HeapFile;
use crate::types::{FieldType, DEFAULT_STRING_LEN};

impl Catalog {
    /// Loads a schema file and registers every table it describes.
    ///
    /// Backing data files are resolved relative to the schema file's
    /// directory with the `.dat` suffix and must already exist.
    pub fn load_schema(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("cannot read schema file {}", path.display()))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.load_table_line(base_dir, line).wrap_err_with(|| {
                format!("invalid catalog entry at {}:{}", path.display(), line_no + 1)
            })?;
        }

        Ok(())
    }

    fn load_table_line(&self, base_dir: &Path, line: &str) -> Result<()> {
        let (name, rest) = line
            .split_once('(')
            .ok_or_else(|| eyre::eyre!("expected 'name(field type, ...)', got '{}'", line))?;
        let name = name.trim();
        ensure!(!name.is_empty(), "missing table name in '{}'", line);

        let fields_text = rest
            .strip_suffix(')')
            .ok_or_else(|| eyre::eyre!("missing closing ')' in '{}'", line))?;

        let mut fields = Vec::new();
        let mut primary_key: Option<String> = None;

        for entry in fields_text.split(',') {
            let mut tokens = entry.split_whitespace();
            let field_name = tokens
                .next()
                .ok_or_else(|| eyre::eyre!("empty field entry in '{}'", line))?;
            let type_token = tokens
                .next()
                .ok_or_else(|| eyre::eyre!("field '{}' is missing a type", field_name))?;

            let field_type = if type_token.eq_ignore_ascii_case("int") {
                FieldType::Int
            } else if type_token.eq_ignore_ascii_case("string") {
                FieldType::Str(DEFAULT_STRING_LEN)
            } else {
                bail!("unknown type '{}' for field '{}'", type_token, field_name);
            };

            if let Some(annotation) = tokens.next() {
                ensure!(
                    annotation == "pk",
                    "unknown annotation '{}' on field '{}'",
                    annotation,
                    field_name
                );
                ensure!(
                    primary_key.is_none(),
                    "duplicate pk annotation on field '{}'",
                    field_name
                );
                primary_key = Some(field_name.to_string());
            }
            if let Some(extra) = tokens.next() {
                bail!("unexpected token '{}' on field '{}'", extra, field_name);
            }

            fields.push(FieldDef::new(field_name, field_type));
        }

        let desc = TupleDesc::new(fields)?;
        let data_path = base_dir.join(format!("{}.dat", name));
        let file = HeapFile::open(&data_path, desc)
            .wrap_err_with(|| format!("cannot open data file for table '{}'", name))?;

        info!(
            "registered table {} ({}) from {}",
            name,
            file.desc(),
            data_path.display()
        );
        self.register_table(Arc::new(file), name, primary_key.as_deref());
        Ok(())
    }
}
