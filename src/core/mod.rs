// src/core/mod.rs

pub mod error;
pub mod html;
pub mod net;
pub mod sanitize;

pub use error::{ExportError, ScrapeError};
