//! Plain-text grid format:
//!
//! ```text
//! <rows>
//! <cols>
//! <row 0 values, space-separated>
//! ...
//! <row rows-1 values, space-separated>
//! ```

use std::{fs, path::Path};

use log::debug;

use crate::{
    error::{Error, Result},
    grid::{cell_count, IterationGrid},
};

pub fn serialize(grid: &IterationGrid) -> String {
    let mut out = String::with_capacity(grid.as_slice().len().saturating_mul(4) + 16);
    out.push_str(&grid.rows().to_string());
    out.push('\n');
    out.push_str(&grid.cols().to_string());
    out.push('\n');
    for row in grid.iter_rows() {
        let line: Vec<String> = row.iter().map(u32::to_string).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

pub fn deserialize(text: &str) -> Result<IterationGrid> {
    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));

    let rows = read_header(lines.next(), 1, "rows")?;
    let cols = read_header(lines.next(), 2, "cols")?;

    if cell_count(rows, cols).is_none() {
        return Err(Error::malformed(2, format!("{rows}x{cols} grid is too large")));
    }

    // grown row by row so a bogus header cannot force a huge allocation
    let mut data = Vec::new();
    for row in 0..rows {
        let (line_no, line) = lines.next().ok_or_else(|| {
            Error::malformed(row + 3, format!("expected {rows} data rows, found {row}"))
        })?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != cols {
            return Err(Error::malformed(
                line_no,
                format!("expected {cols} values, found {}", tokens.len()),
            ));
        }
        for token in tokens {
            let value: u32 = token
                .parse()
                .map_err(|_| Error::malformed(line_no, format!("invalid value {token:?}")))?;
            data.push(value);
        }
    }

    if let Some((line_no, _)) = lines.find(|(_, l)| !l.trim().is_empty()) {
        return Err(Error::malformed(
            line_no,
            format!("unexpected data after {rows} rows"),
        ));
    }
    IterationGrid::from_vec(rows, cols, data)
}

fn read_header(line: Option<(usize, &str)>, line_no: usize, field: &str) -> Result<usize> {
    let (_, text) = line.ok_or_else(|| Error::malformed(line_no, format!("missing {field}")))?;
    let text = text.trim();
    match text.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::malformed(
            line_no,
            format!("{field} must be a positive integer, got {text:?}"),
        )),
    }
}

// ------------------------- File IO -------------------------

pub fn write_grid(path: &Path, grid: &IterationGrid) -> Result<()> {
    fs::write(path, serialize(grid))?;
    debug!(
        "wrote {}x{} grid to {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(())
}

pub fn read_grid(path: &Path) -> Result<IterationGrid> {
    let text = fs::read_to_string(path)?;
    let grid = deserialize(&text)?;
    debug!(
        "read {}x{} grid from {}",
        grid.rows(),
        grid.cols(),
        path.display()
    );
    Ok(grid)
}
