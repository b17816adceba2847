pub use crate::error::LinkError;
pub use crate::file::{DistMetadata, File, Yanked};
pub use crate::link::{Link, VcsKind};

mod error;
mod file;
mod link;
