//! Schema representation: column profiles, role verdicts, star-schema specs.

mod profile;
mod star;
mod types;

pub use profile::ColumnProfile;
pub use star::{DimensionSpec, MaterializedTable, StarSchema};
pub use types::{ColumnDtype, RoleVerdict};
