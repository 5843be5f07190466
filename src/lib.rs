#![deny(warnings, rust_2024_compatibility)]
// Specific pedantic lints enforced (not blanket allow):
#![deny(
    clippy::explicit_iter_loop,
    clippy::manual_let_else,
    clippy::semicolon_if_nothing_returned,
    clippy::inconsistent_struct_constructor
)]
// Noisy pedantic lints suppressed with justification:
#![allow(
    clippy::cast_lossless,           // Infallible casts are clear enough with `as`
    clippy::missing_errors_doc,      // Internal API
    clippy::missing_panics_doc,      // Internal API
    clippy::module_name_repetitions, // e.g. CodecError in codec module
    clippy::must_use_candidate,      // Annotated selectively on critical APIs
    clippy::doc_markdown             // Internal API
)]

pub mod app;
pub mod batch;
pub mod codec;
pub mod forwarder;
pub mod sender;
pub mod session;

// Re-export main types for easy access
pub use app::{App, Config};
pub use forwarder::EventForwarder;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
