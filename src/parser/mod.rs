//! Parsers for the text inputs of skingen.
//!
//! - [`parse_notation`] reads the key-value notation of extracted
//!   `.props.txt` files into a generic [`Tree`].
//! - [`parse_decalspec`] reads the decal placement mini-language.
//!
//! # Usage
//!
//! ```ignore
//! use skingen::parser::parse_notation;
//!
//! let source = std::fs::read_to_string("Mati_Blue_Body.props.txt")?;
//! let tree = parse_notation(&source)?;
//! println!("{} root keys", tree.len());
//! ```

pub mod decalspec;
mod notation;
pub mod span;
mod tree;

pub use decalspec::{parse_decalspec, validate_decalspec};
pub use notation::parse_notation;
pub use span::Location;
pub use tree::{Tree, Value};
