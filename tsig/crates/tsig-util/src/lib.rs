//! Shared data model for the `tsig` toolchain: source positions and ranges,
//! buffers, locations with named sub-children, a global symbol interner,
//! and diagnostic reporting.
//!
//! `tsig-lex` and `tsig-par` depend on the data model modules
//! ([`pos`], [`buffer`], [`location`], [`symbol`]) directly; [`diagnostic`]
//! is consumed one layer up, by `tsigc`, to render the fatal error the
//! parsing core returns.

pub mod buffer;
pub mod diagnostic;
pub mod error;
pub mod location;
pub mod pos;
pub mod symbol;

pub use buffer::Buffer;
pub use location::Location;
pub use pos::{Position, Range};
pub use symbol::Symbol;
