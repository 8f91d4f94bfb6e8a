//! Git operations by shelling out to the system `git` binary.

pub mod adapter;
pub mod status;

pub use adapter::{DiffScope, GitCli, StagedFileSet, StagedFilter, Vcs, check_git_installed};
pub use status::{StatusEntry, first_changed_path, parse_porcelain_z};
