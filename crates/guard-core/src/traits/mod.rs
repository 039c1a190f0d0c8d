//! Repository traits (ports)

mod repositories;

pub use repositories::{BanRepository, OffenderRepository, RepoResult};
