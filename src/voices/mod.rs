//! Pre-built voices.
//!
//! Each voice is a ready-to-use node graph built from the graph combinators.
//!
//! # Example
//!
//! ```ignore
//! use dub_siren::voices;
//! use dub_siren::SirenOptions;
//!
//! let voice = voices::siren(&SirenOptions::default());
//! ```

pub mod siren;

pub use siren::siren;
