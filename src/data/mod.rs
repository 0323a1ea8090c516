pub mod columns;
pub mod csv;

pub use columns::{class_count, extract_first_column, extract_last_column};
pub use csv::{parse_csv, CsvParseError, ParseOptions};
