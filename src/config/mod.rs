//! Configuration for lintdelta.
//!
//! An optional `.lintdelta.yml` at the working directory supplies defaults;
//! command-line flags override individual fields. Unknown YAML fields are
//! ignored for forward compatibility.

mod filters;
mod model;
mod operations;


pub use filters::CompiledFilters;
pub use model::{CONFIG_FILE_NAME, Config};
