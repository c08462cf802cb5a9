//! Port traits separating the domain from I/O and pluggable collaborators.

pub mod config_port;
pub mod data_port;
pub mod indicator_port;
pub mod report_port;
