//! Fixed-width record layout for persisting token metadata.
//!
//! # Row and Column Views
//!
//! ```text
//! rows:     { token: "do",  pos: "AUX",  dep: "aux",  norm: "do",  is_ent: false }
//!           { token: "n't", pos: "PART", dep: "neg",  norm: "not", is_ent: false }
//!
//! columns:  token  = ["do",  "n't"]
//!           pos    = ["AUX", "PART"]
//!           ...
//!           is_ent = [false, false]
//! ```
//!
//! # Null Sentinels
//!
//! Rows have no nullable fields. Absent string attributes are stored as `""`
//! and an absent `is_ent` as `false`, so filler records do not round-trip:
//! "not an entity" and "unknown" read back the same.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use metalign_core::TokenMetadata;

use crate::{Error, Result};

/// Column names, in row field order.
pub const FIELD_NAMES: [&str; 5] = ["token", "pos", "dep", "norm", "is_ent"];

/// One persisted metadata record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    /// Surface text
    pub token: String,
    /// Part-of-speech tag, `""` if absent
    pub pos: String,
    /// Dependency label, `""` if absent
    pub dep: String,
    /// Normalized form, `""` if absent
    pub norm: String,
    /// Entity membership, `false` if absent
    pub is_ent: bool,
}

impl From<&TokenMetadata> for TabularRow {
    fn from(meta: &TokenMetadata) -> Self {
        Self {
            token: meta.text.clone(),
            pos: meta.pos.clone().unwrap_or_default(),
            dep: meta.dep.clone().unwrap_or_default(),
            norm: meta.norm.clone().unwrap_or_default(),
            is_ent: meta.is_ent.unwrap_or(false),
        }
    }
}

impl TabularRow {
    /// Back to a tagged record. Sentinels come back as present values.
    #[must_use]
    pub fn into_metadata(self) -> TokenMetadata {
        TokenMetadata::tagged(self.token, self.pos, self.dep, self.norm, self.is_ent)
    }
}

/// Borrowed view of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column<'a> {
    /// A string-valued column
    Text(&'a [String]),
    /// A boolean column
    Flag(&'a [bool]),
}

impl Column<'_> {
    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Text(values) => values.len(),
            Column::Flag(values) => values.len(),
        }
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Columnar view of a row set: one vector per field, row order preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataColumns {
    /// Surface texts
    pub token: Vec<String>,
    /// Part-of-speech tags
    pub pos: Vec<String>,
    /// Dependency labels
    pub dep: Vec<String>,
    /// Normalized forms
    pub norm: Vec<String>,
    /// Entity membership flags
    pub is_ent: Vec<bool>,
}

impl MetadataColumns {
    /// Look up a column by field name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        match name {
            "token" => Some(Column::Text(&self.token)),
            "pos" => Some(Column::Text(&self.pos)),
            "dep" => Some(Column::Text(&self.dep)),
            "norm" => Some(Column::Text(&self.norm)),
            "is_ent" => Some(Column::Flag(&self.is_ent)),
            _ => None,
        }
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.token.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// Rebuild row `idx`.
    #[must_use]
    pub fn row(&self, idx: usize) -> Option<TabularRow> {
        Some(TabularRow {
            token: self.token.get(idx)?.clone(),
            pos: self.pos.get(idx)?.clone(),
            dep: self.dep.get(idx)?.clone(),
            norm: self.norm.get(idx)?.clone(),
            is_ent: *self.is_ent.get(idx)?,
        })
    }
}

/// Convert metadata records to rows, substituting null sentinels.
#[must_use]
pub fn encode(metas: &[TokenMetadata]) -> Vec<TabularRow> {
    metas.iter().map(TabularRow::from).collect()
}

/// Transpose rows into columns.
///
/// Zero rows is an error: there is nothing to infer a layout from.
pub fn decode(rows: &[TabularRow]) -> Result<MetadataColumns> {
    if rows.is_empty() {
        return Err(Error::empty_input("cannot decode zero rows"));
    }
    let n = rows.len();
    let mut columns = MetadataColumns {
        token: Vec::with_capacity(n),
        pos: Vec::with_capacity(n),
        dep: Vec::with_capacity(n),
        norm: Vec::with_capacity(n),
        is_ent: Vec::with_capacity(n),
    };
    for row in rows {
        columns.token.push(row.token.clone());
        columns.pos.push(row.pos.clone());
        columns.dep.push(row.dep.clone());
        columns.norm.push(row.norm.clone());
        columns.is_ent.push(row.is_ent);
    }
    Ok(columns)
}

/// Write rows as JSON lines, one object per line.
pub fn write_rows<W: Write>(mut writer: W, rows: &[TabularRow]) -> Result<()> {
    for row in rows {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Read JSON-lines rows. Blank lines are skipped.
pub fn read_rows<R: BufRead>(reader: R) -> Result<Vec<TabularRow>> {
    let mut rows = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let row = serde_json::from_str(&line)
            .map_err(|e| Error::parse(format!("line {}: {}", lineno + 1, e)))?;
        rows.push(row);
    }
    Ok(rows)
}
