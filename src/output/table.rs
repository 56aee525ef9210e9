use std::io::{self, Write};

use crate::output::colors::{paint, Attribute};

/// How a column's text is placed within the column width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justify {
    #[default]
    Left,
    Right,
    Center,
}

/// Per-column alignment. `center_header` overrides `justify` for row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnAlign {
    pub justify: Justify,
    pub center_header: bool,
}

impl ColumnAlign {
    pub fn left() -> Self {
        Self::default()
    }

    pub fn right() -> Self {
        Self {
            justify: Justify::Right,
            ..Self::default()
        }
    }

    pub fn center() -> Self {
        Self {
            justify: Justify::Center,
            ..Self::default()
        }
    }

    pub fn with_center_header(mut self) -> Self {
        self.center_header = true;
        self
    }

    fn resolve(&self, header: bool) -> Justify {
        if header && self.center_header {
            Justify::Center
        } else {
            self.justify
        }
    }
}

/// A single cell
#[derive(Debug, Clone, Default)]
pub struct Column {
    pub text: String,
    pub format: Vec<Attribute>,
}

impl Column {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: Vec::new(),
        }
    }

    pub fn with_format(mut self, format: Vec<Attribute>) -> Self {
        self.format = format;
        self
    }

    /// Visible width, escape sequences excluded.
    fn width(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Row {
    pub columns: Vec<Column>,
}

/// Plain-text table with aligned columns.
///
/// Rows may have different lengths; short rows are filled with empty cells
/// when written.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Row>,
    padding: usize,
    pad: String,
    alignment: Vec<ColumnAlign>,
}

impl Table {
    /// `pad` is repeated `padding` times between adjacent columns.
    pub fn new(padding: usize, pad: impl Into<String>, alignment: Vec<ColumnAlign>) -> Self {
        Self {
            rows: Vec::new(),
            padding,
            pad: pad.into(),
            alignment,
        }
    }

    pub fn add_row(&mut self, columns: Vec<Column>) {
        self.rows.push(Row { columns });
    }

    pub fn add_row_strings<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_row(cells.into_iter().map(Column::new).collect());
    }

    /// Widest cell per column index over all rows, header included.
    pub fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = Vec::new();
        for row in &self.rows {
            for (i, column) in row.columns.iter().enumerate() {
                let width = column.width();
                match widths.get_mut(i) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }
        widths
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let widths = self.column_widths();
        let separator = self.pad.repeat(self.padding);
        let empty = Column::default();

        for (row_index, row) in self.rows.iter().enumerate() {
            for (i, &width) in widths.iter().enumerate() {
                let column = row.columns.get(i).unwrap_or(&empty);
                w.write_all(self.format_column(i, width, column, row_index == 0).as_bytes())?;

                if i + 1 < widths.len() {
                    w.write_all(separator.as_bytes())?;
                }
            }
            w.write_all(b"\n")?;
        }
        Ok(())
    }

    fn format_column(&self, index: usize, width: usize, column: &Column, header: bool) -> String {
        let justify = self
            .alignment
            .get(index)
            .map(|a| a.resolve(header))
            .unwrap_or_default();
        let text = paint(&column.text, &column.format);
        let fill = width.saturating_sub(column.width());

        let (left, right) = match justify {
            Justify::Left => (0, fill),
            Justify::Right => (fill, 0),
            // alternating units starting on the right
            Justify::Center => (fill / 2, fill - fill / 2),
        };
        format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::Color;

    fn render(table: &Table) -> String {
        let mut out = Vec::new();
        table.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn strip_escapes(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_column_widths_include_header() {
        let mut table = Table::new(1, " ", vec![]);
        table.add_row_strings(["Domain", "Days"]);
        table.add_row_strings(["a.example.com", "5"]);
        table.add_row_strings(["b", "12345", "extra"]);
        assert_eq!(table.column_widths(), vec![13, 5, 5]);
    }

    #[test]
    fn test_left_right_alignment() {
        let mut table = Table::new(1, "|", vec![ColumnAlign::left(), ColumnAlign::right()]);
        table.add_row_strings(["abc", "1"]);
        table.add_row_strings(["a", "100"]);
        assert_eq!(render(&table), "abc|  1\na  |100\n");
    }

    #[test]
    fn test_missing_alignment_defaults_to_left() {
        let mut table = Table::new(1, " ", vec![]);
        table.add_row_strings(["x", "y"]);
        table.add_row_strings(["long", "z"]);
        assert_eq!(render(&table), "x    y\nlong z\n");
    }

    #[test]
    fn test_center_puts_extra_unit_on_right() {
        let mut table = Table::new(0, "", vec![ColumnAlign::center()]);
        table.add_row_strings(["abcdef"]);
        table.add_row_strings(["ab"]);
        table.add_row_strings(["abc"]);
        assert_eq!(render(&table), "abcdef\n  ab  \n abc  \n");
    }

    #[test]
    fn test_center_header_only_applies_to_first_row() {
        let align = vec![ColumnAlign::right().with_center_header()];
        let mut table = Table::new(0, "", align);
        table.add_row_strings(["ab"]);
        table.add_row_strings(["abcdef"]);
        table.add_row_strings(["x"]);
        assert_eq!(render(&table), "  ab  \nabcdef\n     x\n");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(2, "-", vec![]);
        table.add_row_strings(["a", "b", "c"]);
        table.add_row_strings(["dd"]);
        assert_eq!(render(&table), "a --b--c\ndd-- -- \n");
    }

    #[test]
    fn test_padding_repeats_pad_between_columns_only() {
        let mut table = Table::new(3, " ", vec![]);
        table.add_row_strings(["a", "b"]);
        assert_eq!(render(&table), "a   b\n");
    }

    #[test]
    fn test_attributes_do_not_affect_width() {
        let mut table = Table::new(1, " ", vec![ColumnAlign::right(), ColumnAlign::left()]);
        table.add_row(vec![
            Column::new("Days").with_format(vec![Attribute::Bold]),
            Column::new("Status"),
        ]);
        table.add_row(vec![
            Column::new("5").with_format(vec![Attribute::Fg(Color::Red)]),
            Column::new("ok").with_format(vec![Attribute::Fg(Color::Green)]),
        ]);
        let output = render(&table);
        assert_eq!(
            output,
            "\x1b[1mDays\x1b[0m Status\n   \x1b[31m5\x1b[0m \x1b[32mok\x1b[0m    \n"
        );
        assert_eq!(strip_escapes(&output), "Days Status\n   5 ok    \n");
    }

    #[test]
    fn test_every_row_has_full_width() {
        let align = vec![
            ColumnAlign::left().with_center_header(),
            ColumnAlign::right().with_center_header(),
            ColumnAlign::center().with_center_header(),
        ];
        let mut table = Table::new(3, " ", align);
        table.add_row_strings(["Domain", "Days left", "Status"]);
        table.add_row(vec![
            Column::new("example.com"),
            Column::new("42").with_format(vec![Attribute::Fg(Color::Green)]),
        ]);
        table.add_row_strings(["a.b", "-7", "connection refused"]);

        let widths = table.column_widths();
        let expected: usize = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
        for line in strip_escapes(&render(&table)).lines() {
            assert_eq!(line.chars().count(), expected, "line: {:?}", line);
        }
    }
}
