//! Write-path validation shared by every entity.

mod validation;
pub use validation::RequestValidator;
