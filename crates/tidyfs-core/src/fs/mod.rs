//! Filesystem layer for tidyfs.
//!
//! [`entry::FileEntry`] describes a single path, [`walk`] is the traversal
//! primitive every analyzer builds on, [`hash`] computes streaming content
//! fingerprints, [`ops`] holds the raw mutation primitives and [`platform`]
//! abstracts the OS services for opening and trashing paths.

pub mod entry;
pub mod hash;
pub mod ops;
pub mod platform;
pub mod walk;

pub use entry::FileEntry;
pub use hash::{Fingerprint, Fingerprinter, HashAlgorithm};
pub use platform::{Opener, SystemOpener, SystemTrash, Trash};
pub use walk::{read_directory, walk, WalkOptions};
