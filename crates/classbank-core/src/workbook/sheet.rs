use super::format::HeaderFormat;

/// One named tab: a grid of text cells stored row by row.
///
/// Rows may be ragged and may carry trailing blank rows; the occupied extent
/// is what [`Sheet::last_row`] reports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
    header_format: Option<HeaderFormat>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            rows: Vec::new(),
            header_format: None,
        }
    }

    pub fn with_rows(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Sheet {
            name: name.into(),
            rows,
            header_format: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All stored rows, including any trailing blank ones.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 1-based index of the last row holding a non-empty cell, 0 when the sheet is blank.
    pub fn last_row(&self) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.iter().any(|cell| !cell.is_empty()))
            .map_or(0, |idx| idx + 1)
    }

    /// Rows below the header, floored at zero.
    pub fn data_row_count(&self) -> usize {
        self.last_row().saturating_sub(1)
    }

    /// Values of a 1-based row, padded with empty strings or truncated to `width`.
    pub fn row_values(&self, row: usize, width: usize) -> Vec<String> {
        let source = row
            .checked_sub(1)
            .and_then(|idx| self.rows.get(idx))
            .map(Vec::as_slice)
            .unwrap_or_default();
        (0..width)
            .map(|col| source.get(col).cloned().unwrap_or_default())
            .collect()
    }

    /// Rows after the header, up to the last occupied row.
    pub fn data_rows(&self) -> &[Vec<String>] {
        let last = self.last_row();
        if last <= 1 {
            return &[];
        }
        &self.rows[1..last]
    }

    /// Write `values` into the row after the last occupied one.
    pub fn append_row<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let last = self.last_row();
        self.rows.truncate(last);
        self.rows.push(values.into_iter().map(Into::into).collect());
    }

    pub fn header_format(&self) -> Option<&HeaderFormat> {
        self.header_format.as_ref()
    }

    pub fn set_header_format(&mut self, format: HeaderFormat) {
        self.header_format = Some(format);
    }
}
