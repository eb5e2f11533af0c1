//! Random-access byte reading for volume images.

mod byte_source;

pub use byte_source::{ByteSource, FileSource, MemorySource};
