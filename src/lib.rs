#![warn(
//    missing_docs,
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![allow(clippy::cast_lossless)]

//! # NVF
//!
//! NVF ("named value format") is a compact, self-describing binary
//! serialization format for small documents of named scalar values and
//! nested records. Every element in a stream carries a one-byte tag and a
//! length-prefixed name, so a reader needs no schema to walk a document it
//! has never seen.
//!
//! It is not the fastest or smallest way to move structured data between
//! machines. It is a format that is easy to emit by hand, easy to inspect
//! when something goes wrong, and reproducible bit for bit: encoding the
//! same document always yields the same bytes.
//!
//! # Usage
//!
//! ## Quickstart
//!
//! A document is a `Vec<Entry>`. Build one, encode it, decode it back:
//!
//! ```
//! use nvf::prelude::*;
//!
//! let doc = vec![
//!     Entry::new("a", 5i32),
//!     Entry::new("b", vec![Entry::new("c", true)]),
//!     Entry::new("d", "hi"),
//! ];
//!
//! let enc = encode_full(&doc).unwrap();
//! let dec = decode_full(&enc).unwrap();
//!
//! assert_eq!(dec, doc);
//! ```
//!
//! ## Streaming
//!
//! [`Encoder`](encoding::Encoder) writes elements as they are produced and
//! checks that every struct opened is eventually closed. The bytes are the
//! same as encoding the equivalent tree in one shot:
//!
//! ```
//! use nvf::prelude::*;
//!
//! let mut enc = Encoder::new(Vec::new());
//!
//! enc.put_i32("a", 5).unwrap();
//! enc.begin_struct("b").unwrap();
//! enc.put_bool("c", true).unwrap();
//! enc.end_struct().unwrap();
//!
//! let doc = vec![
//!     Entry::new("a", 5i32),
//!     Entry::new("b", vec![Entry::new("c", true)]),
//! ];
//!
//! assert_eq!(enc.finish().unwrap(), encode_full(&doc).unwrap());
//! ```
//!
//! Opening a struct and never closing it is caught at `finish`:
//!
//! ```
//! use nvf::prelude::*;
//!
//! let mut enc = Encoder::new(Vec::new());
//! enc.begin_struct("open").unwrap();
//!
//! assert!(enc.finish().is_err());
//! ```
//!
//! ## Reading from IO
//!
//! [`IoSource`](encoding::IoSource) decodes from any [`std::io::BufRead`]
//! without slurping the input up front:
//!
//! ```
//! use nvf::prelude::*;
//! use std::io::Cursor;
//!
//! let doc = vec![Entry::new("a", 5i32)];
//! let enc = encode_full(&doc).unwrap();
//!
//! let mut src = IoSource::new(Cursor::new(enc));
//!
//! assert_eq!(decode(&mut src).unwrap(), doc);
//! ```
//!
//! ## Printing
//!
//! Entries and values implement [`Display`](std::fmt::Display), rendering
//! one line per scalar and an indented block per struct:
//!
//! ```
//! use nvf::prelude::*;
//!
//! let doc = vec![
//!     Entry::new("a", 5i32),
//!     Entry::new("b", vec![Entry::new("c", true)]),
//! ];
//!
//! let lines: Vec<String> = doc.iter().map(|e| e.to_string()).collect();
//!
//! assert_eq!(
//!     lines.join("\n"),
//!     "a = 5 (int32)\nb (struct) {\n  c = true (boolean)\n} // b"
//! );
//! ```
//!
//! # Specification
//!
//! All multi-byte integers on the wire are big endian.
//!
//! ## Tags
//!
//! The first byte of every element is its tag:
//!
//! | Tag | Element   |
//! | --- | ---       |
//! | `0` | Int32     |
//! | `1` | UInt32    |
//! | `2` | Boolean   |
//! | `3` | Float     |
//! | `4` | String    |
//! | `5` | Struct    |
//! | `6` | StructEnd |
//!
//! Tag bytes `7` through `255` are invalid. Every element except StructEnd
//! is followed by a name, encoded the same way as a string payload.
//!
//! ## Names and strings
//!
//! A string is a 4-byte unsigned length followed by that many raw bytes.
//! There is no terminator and no encoding constraint; names and string
//! payloads are byte sequences, not text.
//!
//! ## Integers and booleans
//!
//! Int32 payloads are 4 bytes, two's complement. UInt32 payloads are 4
//! bytes, unsigned. A boolean payload is one byte, `0x00` for false and
//! `0x01` for true; the decoder accepts any nonzero byte as true.
//!
//! ## Floats
//!
//! A float payload is 4 bytes: one signed exponent byte, then a 3-byte
//! mantissa field. To pack an `f32` the encoder decomposes it with `frexp`
//! into a fraction with magnitude in `[0.5, 1)` and a binary exponent,
//! scales the fraction by `2^24` truncating toward zero, and stores the
//! exponent with the low 24 bits of the result. The decoder reads the mantissa field
//! unsigned and rebuilds `mant / 2^24 * 2^exp`, so a negative float comes
//! back as its positive complement; see [`Float24`](float::Float24) for
//! the details. NaN, the infinities, and exponents outside `[-128, 127]`
//! have no wire form and packing reports them instead of writing garbage.
//!
//! ## Structs
//!
//! A struct is its tag and name, any number of complete elements, and a
//! single StructEnd tag. Structs nest arbitrarily deep. Entry order is
//! preserved and duplicate names are allowed. A document is the top level
//! of a stream: any number of complete elements, delimited by the end of
//! input.

pub mod encoding;
pub mod errors;
pub mod float;
pub mod prelude;
pub mod rep;
mod util;

use bytes::Bytes;
use errors::FloatError;
use float::Float24;
use std::{convert::TryFrom, fmt};

/// A value in an NVF document.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
pub enum Value {
    /// A signed 32-bit integer.
    ///
    /// # Example
    ///
    /// ```
    /// use nvf::prelude::*;
    ///
    /// let v = Value::from(-5i32);
    ///
    /// assert_eq!(v.to_i32(), Some(-5));
    /// ```
    I32(i32),
    /// An unsigned 32-bit integer.
    U32(u32),
    /// A boolean.
    Bool(bool),
    /// A float in the 24-bit packed wire form.
    ///
    /// # Example
    ///
    /// ```
    /// use nvf::prelude::*;
    ///
    /// let v = Value::try_from(0.5f32).unwrap();
    ///
    /// assert_eq!(v.to_f32(), Some(0.5));
    /// ```
    Float(Float24),
    /// A string, stored as raw bytes.
    Str(Bytes),
    /// A nested record of named values.
    ///
    /// # Example
    ///
    /// ```
    /// use nvf::prelude::*;
    ///
    /// let v = Value::from(vec![Entry::new("c", true)]);
    ///
    /// assert!(v.is_struct());
    /// ```
    Struct(Vec<Entry>),
}

use Value::*;

/// A named value, the unit an NVF document is made of.
///
/// # Example
///
/// ```
/// use nvf::prelude::*;
///
/// let e = Entry::new("a", 5i32);
///
/// assert_eq!(e.value.to_i32(), Some(5));
/// ```
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug)]
pub struct Entry {
    /// The name, raw bytes with no encoding constraint.
    pub name: Bytes,
    /// The value.
    pub value: Value,
}

impl Entry {
    /// Creates a named value.
    pub fn new<N: Into<Bytes>, V: Into<Value>>(name: N, value: V) -> Entry {
        Entry {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Value {
    /// Converts a static bytestring literal to a string [`Value`].
    pub fn from_static(bytes: &'static [u8]) -> Value { Str(Bytes::from_static(bytes)) }

    /// Gets the value as an [`i32`] if it is one.
    ///
    /// # Example
    ///
    /// ```
    /// use nvf::prelude::*;
    ///
    /// let v = Value::from(5i32);
    ///
    /// assert_eq!(v.to_i32(), Some(5));
    /// assert_eq!(v.to_u32(), None);
    /// ```
    pub fn to_i32(&self) -> Option<i32> {
        match self {
            I32(i) => Some(*i),
            _ => None,
        }
    }

    /// Gets the value as a [`u32`] if it is one.
    pub fn to_u32(&self) -> Option<u32> {
        match self {
            U32(u) => Some(*u),
            _ => None,
        }
    }

    /// Gets the value as a [`bool`] if it is one.
    pub fn to_bool(&self) -> Option<bool> {
        match self {
            Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Gets the packed float if the value is one.
    pub fn to_float(&self) -> Option<Float24> {
        match self {
            Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Unpacks the value to an [`f32`] if it is a float.
    ///
    /// # Example
    ///
    /// ```
    /// use nvf::prelude::*;
    ///
    /// let v = Value::try_from(1.5f32).unwrap();
    ///
    /// assert_eq!(v.to_f32(), Some(1.5));
    /// ```
    pub fn to_f32(&self) -> Option<f32> {
        match self {
            Float(f) => Some(f32::from(*f)),
            _ => None,
        }
    }

    /// Gets the value as bytes if it is a string.
    pub fn to_str(&self) -> Option<&Bytes> {
        match self {
            Str(s) => Some(s),
            _ => None,
        }
    }

    /// Consumes the value, taking its bytes if it is a string.
    pub fn into_str(self) -> Option<Bytes> {
        match self {
            Str(s) => Some(s),
            _ => None,
        }
    }

    /// Gets the entries if the value is a struct.
    pub fn to_struct(&self) -> Option<&Vec<Entry>> {
        match self {
            Struct(entries) => Some(entries),
            _ => None,
        }
    }

    /// Consumes the value, taking its entries if it is a struct.
    pub fn into_struct(self) -> Option<Vec<Entry>> {
        match self {
            Struct(entries) => Some(entries),
            _ => None,
        }
    }

    /// Whether the value is a struct.
    pub fn is_struct(&self) -> bool {
        match self {
            Struct(_) => true,
            _ => false,
        }
    }

    fn type_label(&self) -> &'static str {
        match self {
            I32(_) => "int32",
            U32(_) => "uint32",
            Bool(_) => "boolean",
            Float(_) => "float",
            Str(_) => "string",
            Struct(_) => "struct",
        }
    }
}

/// Names print bare when they are UTF-8 and as a `b"..."` hex literal
/// otherwise.
fn fmt_name(name: &Bytes, f: &mut fmt::Formatter) -> fmt::Result {
    match std::str::from_utf8(name) {
        Ok(s) => write!(f, "{}", s),
        Err(_) => {
            write!(f, "b\"")?;
            for b in name.as_ref() {
                write!(f, "{:02x}", b)?;
            }
            write!(f, "\"")
        }
    }
}

fn fmt_str(bytes: &Bytes, f: &mut fmt::Formatter) -> fmt::Result {
    match std::str::from_utf8(bytes) {
        Ok(s) => write!(f, "\"{}\"", s),
        Err(_) => {
            write!(f, "b\"")?;
            for b in bytes.as_ref() {
                write!(f, "{:02x}", b)?;
            }
            write!(f, "\"")
        }
    }
}

fn fmt_entry(e: &Entry, f: &mut fmt::Formatter, indent: usize) -> fmt::Result {
    write!(f, "{:indent$}", "", indent = indent)?;
    fmt_name(&e.name, f)?;
    match &e.value {
        Struct(entries) => {
            writeln!(f, " (struct) {{")?;
            for child in entries {
                fmt_entry(child, f, indent + 2)?;
                writeln!(f)?;
            }
            write!(f, "{:indent$}}} // ", "", indent = indent)?;
            fmt_name(&e.name, f)
        }
        value => write!(f, " = {} ({})", value, value.type_label()),
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { fmt_entry(self, f, 0) }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            I32(i) => write!(f, "{}", i),
            U32(u) => write!(f, "{}", u),
            Bool(b) => write!(f, "{}", b),
            Float(fl) => write!(f, "{}", f32::from(*fl)),
            Str(s) => fmt_str(s, f),
            Struct(entries) => {
                writeln!(f, "{{")?;
                for e in entries {
                    fmt_entry(e, f, 2)?;
                    writeln!(f)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// i32 -> Value, From
from_fn!(Value, i32, I32);
// Value -> i32, TryFrom
try_from_ctor!(Value, i32, I32);

// u32 -> Value, From
from_fn!(Value, u32, U32);
// Value -> u32, TryFrom
try_from_ctor!(Value, u32, U32);

// bool -> Value, From
from_fn!(Value, bool, Bool);
// Value -> bool, TryFrom
try_from_ctor!(Value, bool, Bool);

// Float24 -> Value, From
from_fn!(Value, Float24, Float);
// Value -> Float24, TryFrom
try_from_ctor!(Value, Float24, Float);

// Bytes -> Value, From
from_fn!(Value, Bytes, Str);
// Value -> Bytes, TryFrom
try_from_ctor!(Value, Bytes, Str);

// Vec<Entry> -> Value, From
from_fn!(Value, Vec<Entry>, Struct);
// Value -> Vec<Entry>, TryFrom
try_from_ctor!(Value, Vec<Entry>, Struct);

// narrower integers widen to the wire's 32-bit types
from_as!(Value, i8, i32);
from_as!(Value, i16, i32);
from_as!(Value, u8, u32);
from_as!(Value, u16, u32);

impl From<&'static str> for Value {
    fn from(s: &'static str) -> Value { Str(Bytes::from(s)) }
}

impl From<String> for Value {
    fn from(s: String) -> Value { Str(Bytes::from(s)) }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Value { Str(Bytes::from(v)) }
}

impl TryFrom<f32> for Value {
    type Error = FloatError;

    fn try_from(f: f32) -> Result<Value, FloatError> { Ok(Float(Float24::try_from(f)?)) }
}
