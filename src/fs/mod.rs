//! # File System Module
//!
//! This is a container for file system modules.  File system modules read
//! directories and files out of an already indexed disk image; the only one
//! here is FAT8.

pub mod fat8;
