//! Streaming JSON reading.
//!
//! The reader subsystem is organized into focused modules:
//!
//! - [`source`] - the [`CharSource`] abstraction and its three adapters
//! - [`token`] - token kinds and payloads
//! - [`tokenizer`] - the pull tokenizer itself, one state machine shared
//!   by every source
//!
//! ```
//! use decjson::JsonReader;
//!
//! let mut reader = JsonReader::from_str(r#"{"n": 1.50e+2}"#);
//! reader.read_next().unwrap();
//! reader.read_next().unwrap();
//! assert_eq!(reader.as_str().unwrap(), "n");
//! reader.read_next().unwrap();
//! let (value, format) = reader.as_number().unwrap();
//! // The literal's exact shape survives the trip through the reader.
//! assert_eq!(value.format(&format), "1.50e+2");
//! ```

pub mod source;
pub mod token;
pub mod tokenizer;

pub use source::{ByteSource, CharIterSource, CharSource, StrSource};
pub use token::TokenKind;
pub use tokenizer::{JsonReader, Snapshot};
