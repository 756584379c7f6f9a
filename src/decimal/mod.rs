//! Packed decimal numbers and their textual shapes.
//!
//! The subsystem has three pieces:
//!
//! - [`value`] - the 128-bit packed [`DecimalValue`] itself
//! - [`format`] - the 32-bit [`NumberFormat`] layout descriptor
//! - [`text`] - the literal parser/formatter pair connecting the two
//!
//! Parsing a literal yields both the value and the format that respells
//! it, which is what lets the stream reader and writer round-trip JSON
//! numbers byte for byte:
//!
//! ```
//! use decjson::{DecimalValue, NumberFormat};
//!
//! let (value, format) = DecimalValue::parse("1.50e+03").unwrap();
//! assert_eq!(i64::try_from(value).unwrap(), 1500);
//! assert_eq!(value.format(&format), "1.50e+03");
//! assert_eq!(value.format(&NumberFormat::DECIMAL), "1500");
//! ```

pub mod format;
pub mod text;
pub mod value;

pub use format::NumberFormat;
pub use value::DecimalValue;
