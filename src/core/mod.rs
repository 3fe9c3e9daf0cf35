//! The core module holds the value types shared by every part of the resolver.

pub mod command;
pub mod error;
pub mod index;
pub mod settings;
