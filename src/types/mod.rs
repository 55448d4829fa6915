pub mod date_arg;
pub mod endpoint;
pub mod location;
pub mod resolution;
pub mod response_table;
pub mod units;
