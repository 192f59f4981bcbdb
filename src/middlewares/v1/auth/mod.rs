pub mod authenticated;
pub(crate) mod internal;

// Re-export Authenticated and its Auth context for handlers
pub use authenticated::{Auth, Authenticated};
