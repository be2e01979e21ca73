//! Testing utilities for guidecam.
//!
//! Provides a synthetic capture source and in-memory service fakes,
//! enabling reliable offline testing without camera hardware or a real
//! photo library.

pub mod mock;
pub mod synthetic;

pub use mock::{MemoryFilesystem, MemoryLibrary, RecordingCropper, StubCamera};
pub use synthetic::SyntheticCamera;
