pub mod error;
pub(crate) mod query;
pub(crate) mod validate;
