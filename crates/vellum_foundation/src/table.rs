//! Homogeneous arrays and the tabular boundary type.

use im::Vector;

use crate::error::{Error, Result};
use crate::kind::{Kind, mask};
use crate::value::Variant;

/// A homogeneous vector of one primitive kind.
///
/// The element kind is fixed at construction; it must be primitive and not
/// `Any`. Both codecs write the kind once and the elements untagged.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedArray {
    element_kind: Kind,
    items: Vector<Variant>,
}

impl TypedArray {
    /// Creates an empty array of `element_kind` elements.
    pub fn new(element_kind: Kind) -> Result<Self> {
        if !element_kind.is(mask::PRIMITIVE) || element_kind == Kind::Any {
            return Err(Error::type_mismatch("use as array element", element_kind));
        }
        Ok(Self {
            element_kind,
            items: Vector::new(),
        })
    }

    /// The fixed element kind.
    #[must_use]
    pub fn element_kind(&self) -> Kind {
        self.element_kind
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all elements; the element kind is unchanged.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Appends a value of the element kind.
    pub fn push(&mut self, value: Variant) -> Result<()> {
        if value.kind() != self.element_kind {
            return Err(Error::type_mismatch("insert into typed array", value.kind()));
        }
        self.items.push_back(value);
        Ok(())
    }

    /// The element at `index`.
    pub fn get(&self, index: usize) -> Result<&Variant> {
        self.items
            .get(index)
            .ok_or_else(|| Error::index_out_of_range(index, self.items.len()))
    }

    /// Replaces the element at `index` with a value of the element kind.
    pub fn set(&mut self, index: usize, value: Variant) -> Result<()> {
        if value.kind() != self.element_kind {
            return Err(Error::type_mismatch("insert into typed array", value.kind()));
        }
        if index >= self.items.len() {
            return Err(Error::index_out_of_range(index, self.items.len()));
        }
        self.items.set(index, value);
        Ok(())
    }

    /// Iterates the elements in order.
    pub fn iter(&self) -> impl Iterator<Item = &Variant> {
        self.items.iter()
    }
}

/// One named, kind-typed column of a [`DataTable`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Kind of every cell in the column.
    pub kind: Kind,
    cells: Vector<Variant>,
}

impl Column {
    /// The cells, top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = &Variant> {
        self.cells.iter()
    }
}

/// A thin column-store: named, kind-typed columns of equal length.
///
/// This is a serialization boundary for external tabular types, not a
/// relational structure; it only stores and hands back cells.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataTable {
    columns: Vector<Column>,
    rows: usize,
}

impl DataTable {
    /// Creates a table with the given column schema and no rows.
    ///
    /// Column kinds must be primitive and not `Any`.
    pub fn new(schema: impl IntoIterator<Item = (String, Kind)>) -> Result<Self> {
        let mut columns = Vector::new();
        for (name, kind) in schema {
            if !kind.is(mask::PRIMITIVE) || kind == Kind::Any {
                return Err(Error::type_mismatch("use as table column", kind));
            }
            columns.push_back(Column {
                name,
                kind,
                cells: Vector::new(),
            });
        }
        Ok(Self { columns, rows: 0 })
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows
    }

    /// The columns, in declaration order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Appends a row; `cells` must match the schema in arity and kinds.
    pub fn push_row(&mut self, cells: impl IntoIterator<Item = Variant>) -> Result<()> {
        let cells: Vec<Variant> = cells.into_iter().collect();
        if cells.len() != self.columns.len() {
            return Err(Error::index_out_of_range(cells.len(), self.columns.len()));
        }
        // An unset cell stays None; the codecs reject it at encode time.
        for (column, cell) in self.columns.iter().zip(&cells) {
            if cell.kind() != column.kind && !matches!(cell, Variant::None) {
                return Err(Error::type_mismatch("insert into table column", cell.kind()));
            }
        }
        for (index, cell) in cells.into_iter().enumerate() {
            // Arity was checked above.
            if let Some(column) = self.columns.get_mut(index) {
                column.cells.push_back(cell);
            }
        }
        self.rows += 1;
        Ok(())
    }

    /// Builds a table directly from complete columns, as decoders do.
    pub fn from_columns(columns: impl IntoIterator<Item = (String, Kind, Vec<Variant>)>) -> Result<Self> {
        let mut table = Vector::new();
        let mut rows = None;
        for (name, kind, cells) in columns {
            if !kind.is(mask::PRIMITIVE) || kind == Kind::Any {
                return Err(Error::type_mismatch("use as table column", kind));
            }
            match rows {
                None => rows = Some(cells.len()),
                Some(expected) if expected != cells.len() => {
                    return Err(Error::format(format!(
                        "ragged table: column {name:?} has {} cells, expected {expected}",
                        cells.len()
                    )));
                }
                Some(_) => {}
            }
            for cell in &cells {
                if cell.kind() != kind && !matches!(cell, Variant::None) {
                    return Err(Error::type_mismatch("insert into table column", cell.kind()));
                }
            }
            table.push_back(Column {
                name,
                kind,
                cells: cells.into_iter().collect(),
            });
        }
        Ok(Self {
            columns: table,
            rows: rows.unwrap_or(0),
        })
    }

    /// The cell at (`row`, `col`).
    pub fn cell(&self, row: usize, col: usize) -> Result<&Variant> {
        let column = self
            .columns
            .get(col)
            .ok_or_else(|| Error::index_out_of_range(col, self.columns.len()))?;
        column
            .cells
            .get(row)
            .ok_or_else(|| Error::index_out_of_range(row, self.rows))
    }
}
