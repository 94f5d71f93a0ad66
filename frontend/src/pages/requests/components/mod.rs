pub mod request_table;
pub mod status_label;

pub use request_table::RequestTable;
pub use status_label::StatusLabel;
