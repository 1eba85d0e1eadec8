//! Test harness for integration tests.
//!
//! Provides isolated Apple Notes containers (a `NoteStore.sqlite` plus its
//! media tree), programmatic note creation, and CLI assertion helpers using
//! `assert_cmd`.

mod command;
mod env;
mod note;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::NoteportCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use note::TestNote;
