//! Fixed-width bordered tables
//!
//! ```text
//! +------------------------+
//! | keys | types | percents |
//! |------|-------|----------|
//! | a    | Long  |    100.0 |
//! +------------------------+
//! ```

/// Horizontal alignment of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// A rendered cell with its alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub align: Align,
}

impl Cell {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        Self {
            text: text.into(),
            align,
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

/// Render rows as a table. The first row is the header.
///
/// Every column is as wide as its widest cell; cells are padded by one
/// space on each side. An empty slice renders as just the two border lines.
pub fn render(rows: &[Vec<Cell>]) -> String {
    let columns = rows.first().map_or(0, Vec::len);
    let mut widths = vec![0; columns];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let inner = (3 * columns + widths.iter().sum::<usize>()).saturating_sub(1);
    let border = format!("+{}+", "-".repeat(inner));

    let mut table = String::new();
    table.push_str(&border);
    table.push('\n');

    if let Some((header, body)) = rows.split_first() {
        push_row(&mut table, header, &widths);

        table.push('|');
        for width in &widths {
            table.push_str(&"-".repeat(width + 2));
            table.push('|');
        }
        table.push('\n');

        for row in body {
            push_row(&mut table, row, &widths);
        }
    }

    table.push_str(&border);
    table.push('\n');
    table
}

fn push_row(table: &mut String, row: &[Cell], widths: &[usize]) {
    table.push('|');
    for (cell, width) in row.iter().zip(widths) {
        let pad = " ".repeat(width - cell.width());
        table.push(' ');
        match cell.align {
            Align::Left => {
                table.push_str(&cell.text);
                table.push_str(&pad);
            }
            Align::Right => {
                table.push_str(&pad);
                table.push_str(&cell.text);
            }
        }
        table.push_str(" |");
    }
    table.push('\n');
}
