pub mod comparison_service;
pub use comparison_service::{ComparisonError, ComparisonService};
