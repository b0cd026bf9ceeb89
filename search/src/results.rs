//! Search results types.

use aeon_core::types::{RowId, RowTable};

/// Matched rows of a query, ordered by row id.
///
/// Borrows the row table from the SearchEngine. Use `iter()` to walk the
/// matched rows without collecting.
#[derive(Debug)]
pub struct SearchResults<'a> {
    pub(crate) table: &'a RowTable,
    pub(crate) row_ids: Vec<RowId>,
}

impl<'a> SearchResults<'a> {
    /// Iterates over matched rows together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (RowId, &'a str)> + '_ {
        let table = self.table;
        self.row_ids
            .iter()
            .filter_map(move |&id| table.get(id).map(|row| (id, row)))
    }

    /// Iterates over matched row texts.
    pub fn rows(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.iter().map(|(_, row)| row)
    }

    pub fn row_ids(&self) -> &[RowId] {
        &self.row_ids
    }

    pub fn len(&self) -> usize {
        self.row_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_ids.is_empty()
    }
}
