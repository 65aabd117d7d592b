//! # nestprops-engine
//!
//! Format-preserving parser and renderer for properties files extended with
//! nested prefix blocks and templates.
//!
//! ```text
//! Text → Template expansion → Line classification/scanning → Document
//!                                                              ↓ put/remove
//!                                                   Text ← Renderer
//! ```
//!
//! The input format:
//!
//! ```text
//! # Comments start with # or !
//! bind = 0.0.0.0
//! greeting = "  quoted keeps its spaces  "
//! multiline = first \
//!             second
//!
//! <defaults>
//! timeout = 30
//! </defaults>
//!
//! server
//! {
//!     port = 8080
//!     log
//!     {
//!         level = debug
//!     }
//!     %defaults%
//! }
//! ```
//!
//! yields `server.port`, `server.log.level` and `server.timeout` among others.
//! Only `=` assigns, so keys may contain `:`.

pub mod editing;
pub mod error;
pub mod io;
pub mod models;
pub mod parsing;
pub mod rendering;

pub use editing::Document;
pub use error::ParseError;
pub use models::{LineKind, LineRecord, Property};
pub use rendering::{RenderOptions, Renderer};
