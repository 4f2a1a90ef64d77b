use failure::Fail;
use std::io;

/// An error encountered when packing an `f32` into its wire form.
#[derive(Clone, Copy, Debug, Eq, Fail, PartialEq)]
pub enum FloatError {
    /// The input was NaN or infinite.
    #[fail(display = "cannot pack a non-finite float")]
    NonFinite,
    /// The binary exponent does not fit in the wire's single signed byte.
    #[fail(display = "exponent {} does not fit in a signed byte", exp)]
    ExponentOutOfRange {
        /// The exponent produced by `frexpf`.
        exp: i32,
    },
}

/// An error encountered when encoding fails.
#[derive(Debug, Fail)]
pub enum EncodeError {
    /// The sink refused bytes.
    #[fail(display = "sink write failed: {}", _0)]
    Sink(#[fail(cause)] io::Error),
    /// A float could not be packed.
    #[fail(display = "float packing failed: {}", _0)]
    Float(#[fail(cause)] FloatError),
    /// A name or string payload was too long for its length field.
    #[fail(display = "string of {} bytes does not fit a u32 length field", len)]
    StringTooLong {
        /// The offending length.
        len: usize,
    },
    /// A struct was closed with no struct open.
    #[fail(display = "unbalanced struct end, no struct is open")]
    UnbalancedStructEnd,
    /// The output was finished with structs still open.
    #[fail(display = "{} struct(s) left open", open)]
    UnclosedStruct {
        /// How many structs were never closed.
        open: usize,
    },
}

/// An error encountered when decoding fails.
#[derive(Debug, Fail)]
pub enum DecodeError {
    /// The source failed to produce bytes.
    #[fail(display = "source read failed: {}", _0)]
    Source(#[fail(cause)] io::Error),
    /// The input ended in the middle of an element.
    #[fail(display = "unexpected end of input, needed {} bytes but had {}", need, have)]
    UnexpectedEof {
        /// Bytes the current element still needed.
        need: usize,
        /// Bytes actually available.
        have: usize,
    },
    /// A tag byte was not one of the seven known tags.
    #[fail(display = "found unknown tag: {:#04x}", tag)]
    UnknownTag {
        /// The offending byte.
        tag: u8,
    },
    /// A struct end appeared with no struct open.
    #[fail(display = "unbalanced struct end, no struct is open")]
    UnbalancedStructEnd,
    /// The input ended with structs still open.
    #[fail(display = "input ended with {} struct(s) still open", open)]
    UnclosedStruct {
        /// How many structs were never closed.
        open: usize,
    },
}

impl From<io::Error> for EncodeError {
    fn from(e: io::Error) -> EncodeError { EncodeError::Sink(e) }
}

impl From<FloatError> for EncodeError {
    fn from(e: FloatError) -> EncodeError { EncodeError::Float(e) }
}

impl From<io::Error> for DecodeError {
    fn from(e: io::Error) -> DecodeError { DecodeError::Source(e) }
}
