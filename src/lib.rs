#![allow(clippy::doc_markdown)]
#![doc = include_str!("../README.md")]

pub mod api;
pub mod core;
pub mod error;
pub mod ops;
pub mod prelude;
pub mod quantity;
pub mod session;
pub mod settings;
pub mod statistics;

pub use self::error::Error;
