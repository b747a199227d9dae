mod file_handoff;
mod file_ops;

pub use {
    file_handoff::{FileHandoff, HandoffReport},
    file_ops::{FileOps, SystemFileOps},
};
