//! Attribute-to-column mapping.
//!
//! Plan conditions reference resource attributes by dotted path
//! (`request.resource.attr.ownedBy`); the caller decides which database
//! column each path denotes. Columns carry their table origin so that
//! multi-table plans can be checked against the supplied joins.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use sea_query::{Alias, Expr};

/// A fully qualified column reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableColumn {
    table: String,
    column: String,
}

impl TableColumn {
    /// Creates a column reference for `table`.`column`.
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Table the column lives in.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Column name.
    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    /// A fresh `sea_query` expression referencing this column.
    #[must_use]
    pub fn expr(&self) -> Expr {
        Expr::col((Alias::new(&self.table), Alias::new(&self.column)))
    }
}

impl fmt::Display for TableColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table, self.column)
    }
}

/// Mapping from attribute paths to database columns.
///
/// Only mapped attributes can appear in a compilable condition; a lookup
/// miss aborts compilation. The map is supplied per call and never
/// mutated by the compiler.
#[derive(Debug, Clone, Default)]
pub struct AttributeMap {
    columns: HashMap<String, TableColumn>,
}

impl AttributeMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mapping, consuming and returning the map for chaining.
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, column: TableColumn) -> Self {
        self.insert(attribute, column);
        self
    }

    /// Adds a mapping in place.
    pub fn insert(&mut self, attribute: impl Into<String>, column: TableColumn) {
        self.columns.insert(attribute.into(), column);
    }

    /// Looks up the column for an attribute path.
    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&TableColumn> {
        self.columns.get(attribute)
    }

    /// Distinct table origins of all mapped columns, sorted.
    #[must_use]
    pub fn tables(&self) -> BTreeSet<&str> {
        self.columns.values().map(TableColumn::table).collect()
    }

    /// Number of mapped attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, TableColumn)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, TableColumn)>>(iter: I) -> Self {
        Self {
            columns: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        }
    }
}
