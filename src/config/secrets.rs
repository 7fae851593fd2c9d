//! Secret handling utilities.
//!
//! Re-exports secrecy types for working with the Render API token.

pub use secrecy::{ExposeSecret, SecretString};
