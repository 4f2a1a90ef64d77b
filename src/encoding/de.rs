use super::*;
use bytes::{Buf, Bytes};
use smallvec::SmallVec;
use std::io;
use Tag::*;

/// Wire tags, one per element kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Tag {
    /// Signed 32-bit integer.
    I32,
    /// Unsigned 32-bit integer.
    U32,
    /// Boolean.
    Bool,
    /// Packed float.
    Float,
    /// Length-prefixed string.
    Str,
    /// Struct open.
    Struct,
    /// Struct close.
    StructEnd,
}

impl Tag {
    /// Classifies a tag byte.
    pub fn from_byte(byte: u8) -> Result<Tag, DecodeError> {
        match byte {
            TAG_I32 => Ok(I32),
            TAG_U32 => Ok(U32),
            TAG_BOOL => Ok(Bool),
            TAG_FLOAT => Ok(Float),
            TAG_STR => Ok(Str),
            TAG_STRUCT => Ok(Struct),
            TAG_STRUCT_END => Ok(StructEnd),
            unknown => Err(DecodeError::UnknownTag { tag: unknown }),
        }
    }
}

#[cold]
#[inline]
fn eof(need: usize, have: usize) -> DecodeError { DecodeError::UnexpectedEof { need, have } }

/// A byte source the decoder reads from.
pub trait Deserializer {
    /// Removes and returns the next byte.
    fn take_byte(&mut self) -> Result<u8, DecodeError>;
    /// Removes and returns the next `len` bytes.
    fn take_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError>;
    /// True when the source is exhausted.
    fn at_end(&mut self) -> Result<bool, DecodeError>;
}

impl Deserializer for Bytes {
    fn take_byte(&mut self) -> Result<u8, DecodeError> {
        if self.is_empty() {
            return Err(eof(1, 0));
        }
        let byte = self[0];
        self.advance(1);
        Ok(byte)
    }

    fn take_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        if self.len() < len {
            return Err(eof(len, self.len()));
        }
        Ok(self.split_to(len))
    }

    fn at_end(&mut self) -> Result<bool, DecodeError> { Ok(self.is_empty()) }
}

impl<'a> Deserializer for &'a [u8] {
    fn take_byte(&mut self) -> Result<u8, DecodeError> {
        match self.split_first() {
            Some((byte, rest)) => {
                *self = rest;
                Ok(*byte)
            }
            None => Err(eof(1, 0)),
        }
    }

    fn take_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        if self.len() < len {
            return Err(eof(len, self.len()));
        }
        let (head, rest) = self.split_at(len);
        *self = rest;
        Ok(Bytes::copy_from_slice(head))
    }

    fn at_end(&mut self) -> Result<bool, DecodeError> { Ok(self.is_empty()) }
}

/// Upper bound on a single read from an io source.
const CHUNK: usize = 64 * 1024;

/// A source that reads from any [`io::BufRead`].
///
/// Length-prefixed payloads are pulled in chunks of at most 64KiB, so
/// a length field that overstates the stream fails with an eof error
/// once the transport runs dry instead of reserving the whole claimed
/// size up front.
#[derive(Debug)]
pub struct IoSource<R>(R);

impl<R: io::BufRead> IoSource<R> {
    /// Wraps a reader.
    pub fn new(r: R) -> IoSource<R> { IoSource(r) }

    /// Unwraps the reader.
    pub fn into_inner(self) -> R { self.0 }
}

impl<R: io::BufRead> Deserializer for IoSource<R> {
    fn take_byte(&mut self) -> Result<u8, DecodeError> {
        let mut byte = [0u8];
        match self.0.read_exact(&mut byte) {
            Ok(()) => Ok(byte[0]),
            Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(eof(1, 0)),
            Err(e) => Err(e.into()),
        }
    }

    fn take_bytes(&mut self, len: usize) -> Result<Bytes, DecodeError> {
        let mut out = Vec::with_capacity(len.min(CHUNK));
        while out.len() < len {
            let want = (len - out.len()).min(CHUNK);
            let start = out.len();
            out.resize(start + want, 0);
            match self.0.read_exact(&mut out[start..]) {
                Ok(()) => {}
                Err(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    return Err(eof(len, start));
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(Bytes::from(out))
    }

    fn at_end(&mut self) -> Result<bool, DecodeError> { Ok(self.0.fill_buf()?.is_empty()) }
}

/// Primitive reads shared by everything the decoder does, implemented
/// for every [`Deserializer`].
pub trait DeserializerExt: Deserializer {
    /// Reads a big-endian [`u32`].
    fn read_u32_be(&mut self) -> Result<u32, DecodeError>;
    /// Reads a big-endian two's-complement [`i32`].
    fn read_i32_be(&mut self) -> Result<i32, DecodeError>;
    /// Reads a length-prefixed byte sequence.
    fn read_len_bytes(&mut self) -> Result<Bytes, DecodeError>;
    /// Reads a boolean payload byte; any nonzero byte is true.
    fn read_bool(&mut self) -> Result<bool, DecodeError>;
    /// Reads a packed float.
    fn read_float(&mut self) -> Result<Float24, DecodeError>;
    /// Reads and classifies a tag byte.
    fn read_tag(&mut self) -> Result<Tag, DecodeError>;
}

impl<D: Deserializer> DeserializerExt for D {
    fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
        let bs = self.take_bytes(4)?;
        Ok(u32::from_be_bytes([bs[0], bs[1], bs[2], bs[3]]))
    }

    fn read_i32_be(&mut self) -> Result<i32, DecodeError> { Ok(self.read_u32_be()? as i32) }

    fn read_len_bytes(&mut self) -> Result<Bytes, DecodeError> {
        let len = self.read_u32_be()?;
        self.take_bytes(len as usize)
    }

    fn read_bool(&mut self) -> Result<bool, DecodeError> { Ok(self.take_byte()? != 0) }

    fn read_float(&mut self) -> Result<Float24, DecodeError> {
        Ok(Float24::from_bits(self.read_u32_be()?))
    }

    fn read_tag(&mut self) -> Result<Tag, DecodeError> { Tag::from_byte(self.take_byte()?) }
}

/// Decodes a whole document into its ordered list of top-level
/// entries.
///
/// Struct nesting is tracked with an explicit frame stack, so depth is
/// bounded by memory rather than the call stack. Decoding is atomic:
/// malformed or truncated input fails the whole call and any partially
/// built tree is discarded.
///
/// # Example
///
/// ```
/// use nvf::prelude::*;
///
/// let doc = vec![Entry::new("a", 5i32)];
/// let enc = encode_full(&doc).unwrap();
///
/// let dec = decode(&mut Bytes::from(enc)).unwrap();
/// assert_eq!(dec, doc);
/// ```
pub fn decode<D: Deserializer>(data: &mut D) -> Result<Vec<Entry>, DecodeError> {
    let mut top = Vec::new();
    let mut frames: SmallVec<[(Bytes, Vec<Entry>); 8]> = SmallVec::new();

    loop {
        if data.at_end()? {
            if frames.is_empty() {
                return Ok(top);
            }
            return Err(DecodeError::UnclosedStruct { open: frames.len() });
        }

        let entry = match data.read_tag()? {
            I32 => {
                let name = data.read_len_bytes()?;
                Entry::new(name, Value::I32(data.read_i32_be()?))
            }
            U32 => {
                let name = data.read_len_bytes()?;
                Entry::new(name, Value::U32(data.read_u32_be()?))
            }
            Bool => {
                let name = data.read_len_bytes()?;
                Entry::new(name, Value::Bool(data.read_bool()?))
            }
            Float => {
                let name = data.read_len_bytes()?;
                Entry::new(name, Value::Float(data.read_float()?))
            }
            Str => {
                let name = data.read_len_bytes()?;
                Entry::new(name, Value::Str(data.read_len_bytes()?))
            }
            Struct => {
                frames.push((data.read_len_bytes()?, Vec::new()));
                continue;
            }
            StructEnd => match frames.pop() {
                Some((name, entries)) => Entry::new(name, Value::Struct(entries)),
                None => return Err(DecodeError::UnbalancedStructEnd),
            },
        };

        match frames.last_mut() {
            Some((_, entries)) => entries.push(entry),
            None => top.push(entry),
        }
    }
}
