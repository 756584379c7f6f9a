//! decjson - JSON processing with lossless numeric round-tripping.
//!
//! Most JSON libraries read `1.50e+03` and remember only the number. This
//! crate remembers the spelling too: parsing a numeric literal yields a
//! 128-bit packed [`DecimalValue`] *and* a [`NumberFormat`] describing the
//! literal's shape (leading and trailing zeros, exponent letter case, sign
//! style, point position), so writing the pair back reproduces the
//! original text byte for byte.
//!
//! # Architecture
//!
//! - [`decimal`] - the packed decimal value, the format descriptor, and
//!   the literal parser/formatter connecting them
//! - [`reader`] - a pull tokenizer over an abstract character source,
//!   with string, byte-stream and char-iterator adapters, line/column
//!   tracking and position snapshots
//! - [`writer`] - the emitting counterpart, validating the same grammar
//!   from the write side
//! - [`error`] - the crate-wide error enum
//!
//! # Example
//!
//! ```
//! use decjson::{JsonReader, JsonWriter};
//!
//! let text = "[0.50, 1e+06, -0]";
//! let mut reader = JsonReader::from_str(text);
//! let mut writer = JsonWriter::new(Vec::new());
//! reader.read_next().unwrap();
//! reader.copy_value_to(&mut writer).unwrap();
//! // Every numeric literal kept its exact shape.
//! assert_eq!(writer.finish().unwrap(), b"[0.50,1e+06,-0]");
//! ```

// The round-trip guarantees depend on never losing an error: library code
// must propagate, not panic. Tests are exempt.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod decimal;
pub mod error;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use decimal::{DecimalValue, NumberFormat};
pub use error::{Error, Result};
pub use reader::{ByteSource, CharIterSource, CharSource, JsonReader, Snapshot, StrSource, TokenKind};
pub use writer::{JsonWriter, WriteOptions};
