mod summary_table;

pub use summary_table::{open_path, SummaryTableReader};
