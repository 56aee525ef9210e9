mod colors;
mod report;
mod table;

pub use colors::{paint, status_color, Attribute};
pub use report::{render, write_json, write_table, write_text};
pub use table::{Column, ColumnAlign, Justify, Row, Table};
