//! Lexer and parser for **styling attribute sheets**.
//!
//! A sheet is a list of named blocks holding `key: value` attributes. It is
//! the construction-time styling input for widgets; the widget layer decides
//! which keys it understands.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`sheet`] | `StyleSheet`, `StyleBlock`, `Attr`, `Value` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token`, `TokenWithPos` |
//! | [`parser`] | `parse_str` entry point |
//!
//! ```rust
//! use clockface_attrs::parse_str;
//!
//! let sheet = parse_str(r#"
//!     // hands
//!     Clock {
//!         hour_color: #1e3cff
//!         hour_width: 20
//!         time_zone: "Europe/Moscow"
//!     }
//! "#).unwrap();
//!
//! let clock = sheet.get("Clock").unwrap();
//! assert_eq!(clock.get("hour_width").and_then(|v| v.as_number()), Some(20.0));
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod sheet;

pub use error::ParseError;
pub use parser::parse_str;
pub use sheet::{Attr, StyleBlock, StyleSheet, Value};
