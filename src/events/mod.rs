//! Event types and observers.
//!
//! Submodules:
//! - [`landed`] – an actor came to rest on something; refills jump charges
pub mod landed;
