pub mod error;
pub(crate) mod flatten;
pub(crate) mod model;
