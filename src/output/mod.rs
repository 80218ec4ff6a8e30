//! Output writers: the cluster dump consumed by the visualiser and the
//! terminal report.

pub mod json;
pub mod terminal;

pub use json::{render_cluster_dump, write_cluster_dump};
pub use terminal::print_report;
