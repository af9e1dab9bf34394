//! Enter-key movement between grid cells.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusMove {
    /// Focus an existing cell.
    To(CellPos),
    /// Append a blank row, then focus this cell of it.
    AppendThen(CellPos),
}

/// Next column in the row; past the last column, first column of the next
/// row; past the last row, a new row.
pub fn next_focus(current: CellPos, columns: usize, rows: usize) -> FocusMove {
    if columns == 0 {
        return FocusMove::To(current);
    }
    if current.col + 1 < columns {
        return FocusMove::To(CellPos {
            row: current.row,
            col: current.col + 1,
        });
    }
    let next_row = current.row + 1;
    let target = CellPos {
        row: next_row,
        col: 0,
    };
    if next_row < rows {
        FocusMove::To(target)
    } else {
        FocusMove::AppendThen(target)
    }
}

pub fn cell_dom_id(row: usize, col: usize) -> String {
    format!("me-cell-{}-{}", row, col)
}
