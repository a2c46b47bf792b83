//! Shared Kernel - Domain-crossing minimal core
//!
//! The vocabulary every crate in the workspace agrees on:
//! - [`error::app_error::AppError`] and its HTTP classification
//! - Typed UUID identifiers ([`id::Id`])
//!
//! Only things with a stable meaning across crates belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
