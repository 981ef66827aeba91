pub mod workbook_loader;

pub use workbook_loader::{decode_workbook, decode_workbook_owned, read_spreadsheet_file};
