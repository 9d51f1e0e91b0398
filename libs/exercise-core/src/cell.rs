//! Word cells and the columns that hold them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display state of a single word cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellStatus {
    #[default]
    Normal,
    Selected,
    Matched,
    Disabled,
    Error,
}

impl CellStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Selected => "selected",
            Self::Matched => "matched",
            Self::Disabled => "disabled",
            Self::Error => "error",
        }
    }

    /// Only normal and selected cells react to taps.
    pub fn is_tappable(self) -> bool {
        matches!(self, Self::Normal | Self::Selected)
    }
}

impl fmt::Display for CellStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the two columns of a match-the-pairs exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A labeled tile. The word is also the cell's ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub word: String,
    pub status: CellStatus,
}

impl Cell {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            status: CellStatus::Normal,
        }
    }

    pub fn id(&self) -> &str {
        &self.word
    }
}

/// Ordered cells with an index of the selected one.
///
/// Statuses are only changed by the engines in this crate, through
/// `set_status`, so the selection index never drifts from the cells.
///
/// ```compile_fail
/// use exercise_core::{CellStatus, Column};
///
/// let mut column = Column::new(["pas", "mačka"]);
/// column.set_status(0, CellStatus::Selected);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    cells: Vec<Cell>,
    selected: Option<usize>,
}

impl Column {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: words.into_iter().map(Cell::new).collect(),
            selected: None,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.cells.iter().position(|cell| cell.id() == id)
    }

    pub fn get(&self, id: &str) -> Option<&Cell> {
        self.cells.iter().find(|cell| cell.id() == id)
    }

    pub(crate) fn cell_at(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Index of the selected cell, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_cell(&self) -> Option<&Cell> {
        self.selected.map(|index| &self.cells[index])
    }

    /// First cell with the given status.
    pub fn first_with(&self, status: CellStatus) -> Option<usize> {
        self.cells.iter().position(|cell| cell.status == status)
    }

    pub fn all(&self, status: CellStatus) -> bool {
        self.cells.iter().all(|cell| cell.status == status)
    }

    pub(crate) fn set_status(&mut self, index: usize, status: CellStatus) {
        self.cells[index].status = status;
        if status == CellStatus::Selected {
            debug_assert!(
                self.selected.map_or(true, |current| current == index),
                "column already has a selected cell"
            );
            self.selected = Some(index);
        } else if self.selected == Some(index) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_column_is_normal() {
        let column = Column::new(["pas", "mačka"]);
        assert_eq!(column.len(), 2);
        assert!(column.all(CellStatus::Normal));
        assert_eq!(column.selected(), None);
    }

    #[test]
    fn test_selection_index_follows_status() {
        let mut column = Column::new(["pas", "mačka", "kuća"]);

        column.set_status(1, CellStatus::Selected);
        assert_eq!(column.selected_cell().map(Cell::id), Some("mačka"));

        column.set_status(1, CellStatus::Matched);
        assert_eq!(column.selected(), None);

        column.set_status(2, CellStatus::Selected);
        column.set_status(0, CellStatus::Error);
        assert_eq!(column.selected(), Some(2));
    }

    #[test]
    fn test_lookup_by_id() {
        let column = Column::new(["pas", "mačka"]);
        assert_eq!(column.position("mačka"), Some(1));
        assert_eq!(column.get("pas").map(|c| c.status), Some(CellStatus::Normal));
        assert!(column.get("dog").is_none());
    }

    #[test]
    fn test_tappable_statuses() {
        assert!(CellStatus::Normal.is_tappable());
        assert!(CellStatus::Selected.is_tappable());
        assert!(!CellStatus::Matched.is_tappable());
        assert!(!CellStatus::Disabled.is_tappable());
        assert!(!CellStatus::Error.is_tappable());
    }

    #[test]
    fn test_side_opposite() {
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
        assert_eq!(Side::Right.to_string(), "right");
    }
}
