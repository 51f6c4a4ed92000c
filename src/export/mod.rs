pub mod html;
pub mod spreadsheet;

pub use html::export_html;
pub use spreadsheet::export_csv;
