//! GitHub domain - repository references and summary objects

mod reference;
mod summary;

pub use reference::RepoRef;
pub use summary::{ReadmeDigest, RepoSummary};
