//! Clustering order within a partition.
//!
//! A [`ClusteringSpec`] lists a table's clustering columns and their sort
//! direction. Values are encoded into row keys whose ascending byte order is
//! exactly the declared clustering order: every component is fixed-width
//! lowercase hex, bit-inverted for descending columns, and components are
//! joined by [`SEPARATOR`]. An engine that iterates keys in ascending order
//! therefore returns rows newest-first for the descending tables below, with
//! no sort at read time.

use crate::error::CoreError;
use crate::keys::table;
use crate::predicate::{ColumnRange, KeyRange};

pub const SEPARATOR: char = '-';

/// Row key of the single row in a table without clustering columns.
pub const STATIC_ROW: &str = "static";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    I8,
    I64,
    Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusteringColumn {
    pub name: &'static str,
    pub kind: ColumnKind,
    pub order: SortOrder,
}

/// A single clustering column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ClusteringValue {
    I8(i8),
    I64(i64),
    Uuid(u128),
}

impl ClusteringValue {
    fn kind(&self) -> ColumnKind {
        match self {
            ClusteringValue::I8(_) => ColumnKind::I8,
            ClusteringValue::I64(_) => ColumnKind::I64,
            ClusteringValue::Uuid(_) => ColumnKind::Uuid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusteringSpec {
    pub table: &'static str,
    pub columns: &'static [ClusteringColumn],
}

pub const CONVERSATIONS: ClusteringSpec = ClusteringSpec {
    table: table::CONVERSATIONS,
    columns: &[],
};

pub const CHAT_MESSAGES: ClusteringSpec = ClusteringSpec {
    table: table::CHAT_MESSAGES,
    columns: &[ClusteringColumn {
        name: "message_id",
        kind: ColumnKind::Uuid,
        order: SortOrder::Descending,
    }],
};

pub const SENSOR_METRICS: ClusteringSpec = ClusteringSpec {
    table: table::SENSOR_METRICS,
    columns: &[
        ClusteringColumn {
            name: "day",
            kind: ColumnKind::I8,
            order: SortOrder::Descending,
        },
        ClusteringColumn {
            name: "hour",
            kind: ColumnKind::I8,
            order: SortOrder::Descending,
        },
        ClusteringColumn {
            name: "recorded_at",
            kind: ColumnKind::I64,
            order: SortOrder::Descending,
        },
    ],
};

impl ClusteringSpec {
    /// Encode a full clustering key. `values` must cover every column.
    pub fn encode_key(&self, values: &[ClusteringValue]) -> Result<String, CoreError> {
        if values.len() != self.columns.len() {
            return Err(CoreError::InvalidKey(format!(
                "{} rows need {} clustering values, got {}",
                self.table,
                self.columns.len(),
                values.len()
            )));
        }
        if values.is_empty() {
            return Ok(STATIC_ROW.to_string());
        }
        let parts = self.encode_components(values)?;
        Ok(parts.join(&SEPARATOR.to_string()))
    }

    /// Encode a key prefix fixing the leading `values.len()` columns.
    ///
    /// Every full key whose leading columns equal `values` starts with the
    /// returned string. An empty `values` yields the empty prefix.
    pub fn encode_prefix(&self, values: &[ClusteringValue]) -> Result<String, CoreError> {
        if values.len() > self.columns.len() {
            return Err(CoreError::InvalidArgument(format!(
                "{} has {} clustering columns, prefix has {}",
                self.table,
                self.columns.len(),
                values.len()
            )));
        }
        let mut prefix = String::new();
        for part in self.encode_components(values)? {
            prefix.push_str(&part);
            prefix.push(SEPARATOR);
        }
        Ok(prefix)
    }

    /// Key range holding exactly the rows that match a prefix.
    pub fn prefix_range(&self, values: &[ClusteringValue]) -> Result<KeyRange, CoreError> {
        let prefix = self.encode_prefix(values)?;
        if prefix.is_empty() {
            return Ok(KeyRange::all());
        }
        let end = prefix_successor(&prefix);
        KeyRange::new(Some(prefix), end)
    }

    /// Key range for an inclusive range on the first column after `fixed`.
    ///
    /// Fails with `InvalidArgument` when `low > high`, when the range column
    /// does not exist, or when a value's kind does not match its column.
    pub fn column_range(&self, range: &ColumnRange) -> Result<KeyRange, CoreError> {
        let index = range.fixed().len();
        let column = self.columns.get(index).ok_or_else(|| {
            CoreError::InvalidArgument(format!(
                "{} has no clustering column after {index} fixed columns",
                self.table
            ))
        })?;
        if range.low().kind() != column.kind || range.high().kind() != column.kind {
            return Err(CoreError::InvalidArgument(format!(
                "range bounds do not match column {}",
                column.name
            )));
        }
        if range.low() > range.high() {
            return Err(CoreError::InvalidArgument(format!(
                "range on {} is empty: {:?} > {:?}",
                column.name,
                range.low(),
                range.high()
            )));
        }

        let mut low = range.fixed().to_vec();
        low.push(range.low());
        let mut high = range.fixed().to_vec();
        high.push(range.high());
        let low = self.encode_prefix(&low)?;
        let high = self.encode_prefix(&high)?;

        // Descending columns store the high bound first.
        let (first, last) = match column.order {
            SortOrder::Ascending => (low, high),
            SortOrder::Descending => (high, low),
        };
        let end = prefix_successor(&last);
        KeyRange::new(Some(first), end)
    }

    fn encode_components(&self, values: &[ClusteringValue]) -> Result<Vec<String>, CoreError> {
        values
            .iter()
            .zip(self.columns)
            .map(|(value, column)| encode_component(column, value))
            .collect()
    }
}

fn encode_component(
    column: &ClusteringColumn,
    value: &ClusteringValue,
) -> Result<String, CoreError> {
    if value.kind() != column.kind {
        return Err(CoreError::InvalidKey(format!(
            "clustering column {} expects {:?}, got {value:?}",
            column.name, column.kind
        )));
    }
    let descending = column.order == SortOrder::Descending;
    // Signed values are biased so that ascending byte order is numeric order.
    let encoded = match *value {
        ClusteringValue::I8(v) => {
            let biased = (v as u8) ^ 0x80;
            format!("{:02x}", if descending { !biased } else { biased })
        }
        ClusteringValue::I64(v) => {
            let biased = (v as u64) ^ (1 << 63);
            format!("{:016x}", if descending { !biased } else { biased })
        }
        ClusteringValue::Uuid(v) => format!("{:032x}", if descending { !v } else { v }),
    };
    Ok(encoded)
}

/// Smallest string greater than every string starting with `prefix`.
fn prefix_successor(prefix: &str) -> Option<String> {
    let mut chars: Vec<char> = prefix.chars().collect();
    let last = chars.pop()?;
    let next = char::from_u32(last as u32 + 1)?;
    chars.push(next);
    Some(chars.into_iter().collect())
}

