pub mod json_records;
pub mod text;

pub use json_records::JsonRecordsFormatter;
pub use text::TextFormatter;
