//! CLI commands for release-manager
//!
//! - **release**: the full pipeline (interactive or scripted)
//! - **bump**: write the version into every manifest
//! - **clean**: remove cache directories and stale archives
//! - **archive**: build the release zip
//! - **publish**: commit and push the version bump
//! - **show**: print the resolved configuration and current versions
//!
//! All commands accept `&ReleaseContext` so the configuration is loaded once.

pub mod archive;
pub mod bump;
pub mod clean;
pub mod publish;
pub mod release;
pub mod show;

pub use archive::run_archive;
pub use bump::run_bump;
pub use clean::run_clean;
pub use publish::run_publish;
pub use release::run_release;
pub use show::run_show;
