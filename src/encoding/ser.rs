use super::*;
use crate::Value::*;
use bytes::Bytes;
use smallvec::SmallVec;
use std::{convert::TryFrom, io};

/// A byte sink the encoder writes into.
pub trait Serializer {
    /// The type of the output value.
    type Out;
    /// Add a byte to the output value.
    fn put_u8(&mut self, u: u8) -> Result<(), EncodeError>;
    /// Add a slice to the output value.
    fn put_slice(&mut self, slice: &[u8]) -> Result<(), EncodeError>;
    /// Return the output value.
    fn finalize(self) -> Result<Self::Out, EncodeError>;
}

/// Tagged named-value writes, implemented for every [`Serializer`].
///
/// These are the raw wire operations. They do not track struct
/// nesting; callers must close every `begin_struct` with exactly one
/// `end_struct`. [`Encoder`] layers that bookkeeping on top.
pub trait SerializerExt: Serializer {
    /// Add a length-prefixed byte sequence to the output value.
    ///
    /// # Arguments
    ///
    /// * `b: &[u8]` - The bytes to be added.
    fn put_len_bytes(&mut self, b: &[u8]) -> Result<(), EncodeError>;
    /// Add a named [`i32`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `name: &[u8]` - The name of the value.
    /// * `i: i32` - The value to be added.
    fn put_i32(&mut self, name: &[u8], i: i32) -> Result<(), EncodeError>;
    /// Add a named [`u32`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `name: &[u8]` - The name of the value.
    /// * `u: u32` - The value to be added.
    fn put_u32(&mut self, name: &[u8], u: u32) -> Result<(), EncodeError>;
    /// Add a named [`bool`] to the output value.
    ///
    /// # Arguments
    ///
    /// * `name: &[u8]` - The name of the value.
    /// * `b: bool` - The value to be added.
    fn put_bool(&mut self, name: &[u8], b: bool) -> Result<(), EncodeError>;
    /// Add a named packed float to the output value.
    ///
    /// # Arguments
    ///
    /// * `name: &[u8]` - The name of the value.
    /// * `f: Float24` - The value to be added.
    fn put_float(&mut self, name: &[u8], f: Float24) -> Result<(), EncodeError>;
    /// Pack an [`f32`] and add it to the output value under `name`.
    ///
    /// Fails with a float error when `f` is not finite or its
    /// exponent does not fit the wire's signed byte.
    fn put_f32(&mut self, name: &[u8], f: f32) -> Result<(), EncodeError>;
    /// Add a named string to the output value.
    ///
    /// # Arguments
    ///
    /// * `name: &[u8]` - The name of the value.
    /// * `s: &[u8]` - The string bytes to be added.
    fn put_str(&mut self, name: &[u8], s: &[u8]) -> Result<(), EncodeError>;
    /// Open a named struct in the output value.
    fn begin_struct(&mut self, name: &[u8]) -> Result<(), EncodeError>;
    /// Close the innermost open struct.
    fn end_struct(&mut self) -> Result<(), EncodeError>;
}

impl Serializer for Vec<u8> {
    type Out = Self;

    fn put_u8(&mut self, u: u8) -> Result<(), EncodeError> {
        self.push(u);
        Ok(())
    }

    fn put_slice(&mut self, slice: &[u8]) -> Result<(), EncodeError> {
        self.extend_from_slice(slice);
        Ok(())
    }

    fn finalize(self) -> Result<Self::Out, EncodeError> { Ok(self) }
}

/// A sink that writes to any [`io::Write`], flushing on `finalize`.
#[derive(Debug)]
pub struct IoSink<W>(W);

impl<W: io::Write> IoSink<W> {
    /// Wraps a writer.
    pub fn new(w: W) -> IoSink<W> { IoSink(w) }
}

impl<W: io::Write> Serializer for IoSink<W> {
    type Out = W;

    fn put_u8(&mut self, u: u8) -> Result<(), EncodeError> { Ok(self.0.write_all(&[u])?) }

    fn put_slice(&mut self, slice: &[u8]) -> Result<(), EncodeError> {
        Ok(self.0.write_all(slice)?)
    }

    fn finalize(mut self) -> Result<Self::Out, EncodeError> {
        self.0.flush()?;
        Ok(self.0)
    }
}

impl<S: Serializer> SerializerExt for S {
    fn put_len_bytes(&mut self, b: &[u8]) -> Result<(), EncodeError> {
        if b.len() > u32::MAX as usize {
            return Err(EncodeError::StringTooLong { len: b.len() });
        }
        self.put_slice(&(b.len() as u32).to_be_bytes())?;
        self.put_slice(b)
    }

    fn put_i32(&mut self, name: &[u8], i: i32) -> Result<(), EncodeError> {
        self.put_u8(TAG_I32)?;
        self.put_len_bytes(name)?;
        self.put_slice(&i.to_be_bytes())
    }

    fn put_u32(&mut self, name: &[u8], u: u32) -> Result<(), EncodeError> {
        self.put_u8(TAG_U32)?;
        self.put_len_bytes(name)?;
        self.put_slice(&u.to_be_bytes())
    }

    fn put_bool(&mut self, name: &[u8], b: bool) -> Result<(), EncodeError> {
        self.put_u8(TAG_BOOL)?;
        self.put_len_bytes(name)?;
        self.put_u8(b as u8)
    }

    fn put_float(&mut self, name: &[u8], f: Float24) -> Result<(), EncodeError> {
        self.put_u8(TAG_FLOAT)?;
        self.put_len_bytes(name)?;
        self.put_slice(&f.to_bits().to_be_bytes())
    }

    fn put_f32(&mut self, name: &[u8], f: f32) -> Result<(), EncodeError> {
        // pack before touching the sink so a bad float writes nothing
        let packed = Float24::try_from(f)?;
        self.put_float(name, packed)
    }

    fn put_str(&mut self, name: &[u8], s: &[u8]) -> Result<(), EncodeError> {
        self.put_u8(TAG_STR)?;
        self.put_len_bytes(name)?;
        self.put_len_bytes(s)
    }

    fn begin_struct(&mut self, name: &[u8]) -> Result<(), EncodeError> {
        self.put_u8(TAG_STRUCT)?;
        self.put_len_bytes(name)
    }

    fn end_struct(&mut self) -> Result<(), EncodeError> { self.put_u8(TAG_STRUCT_END) }
}

/// A strict streaming encoder.
///
/// It tracks the names of the structs currently open and refuses to
/// close a struct that was never opened or to [`finish`](Encoder::finish)
/// while one is still open, so every stream it produces is well
/// nested.
///
/// # Example
///
/// ```
/// use nvf::prelude::*;
///
/// let mut enc = Encoder::new(Vec::new());
/// enc.begin_struct("b").unwrap();
/// enc.put_bool("c", true).unwrap();
/// enc.end_struct().unwrap();
///
/// let bytes = enc.finish().unwrap();
/// assert_eq!(bytes[0], 5);
/// assert_eq!(*bytes.last().unwrap(), 6);
/// ```
#[derive(Debug)]
pub struct Encoder<S> {
    out: S,
    open: SmallVec<[Bytes; 8]>,
}

impl<S: Serializer> Encoder<S> {
    /// Creates an encoder writing into `out`.
    pub fn new(out: S) -> Encoder<S> {
        Encoder {
            out,
            open: SmallVec::new(),
        }
    }

    /// The number of structs currently open.
    pub fn depth(&self) -> usize { self.open.len() }

    /// Writes a named [`i32`].
    pub fn put_i32(&mut self, name: impl AsRef<[u8]>, i: i32) -> Result<(), EncodeError> {
        self.out.put_i32(name.as_ref(), i)
    }

    /// Writes a named [`u32`].
    pub fn put_u32(&mut self, name: impl AsRef<[u8]>, u: u32) -> Result<(), EncodeError> {
        self.out.put_u32(name.as_ref(), u)
    }

    /// Writes a named [`bool`].
    pub fn put_bool(&mut self, name: impl AsRef<[u8]>, b: bool) -> Result<(), EncodeError> {
        self.out.put_bool(name.as_ref(), b)
    }

    /// Writes a named packed float.
    pub fn put_float(&mut self, name: impl AsRef<[u8]>, f: Float24) -> Result<(), EncodeError> {
        self.out.put_float(name.as_ref(), f)
    }

    /// Packs and writes a named [`f32`].
    pub fn put_f32(&mut self, name: impl AsRef<[u8]>, f: f32) -> Result<(), EncodeError> {
        self.out.put_f32(name.as_ref(), f)
    }

    /// Writes a named string.
    pub fn put_str(
        &mut self,
        name: impl AsRef<[u8]>,
        s: impl AsRef<[u8]>,
    ) -> Result<(), EncodeError> {
        self.out.put_str(name.as_ref(), s.as_ref())
    }

    /// Writes a whole entry, including any nested struct contents.
    pub fn put_entry(&mut self, e: &Entry) -> Result<(), EncodeError> { e.ser(&mut self.out) }

    /// Opens a named struct.
    pub fn begin_struct(&mut self, name: impl Into<Bytes>) -> Result<(), EncodeError> {
        let name = name.into();
        self.out.begin_struct(&name)?;
        self.open.push(name);
        Ok(())
    }

    /// Closes the innermost open struct.
    pub fn end_struct(&mut self) -> Result<(), EncodeError> {
        match self.open.pop() {
            Some(_) => self.out.end_struct(),
            None => Err(EncodeError::UnbalancedStructEnd),
        }
    }

    /// Checks that every struct was closed, then finalizes the sink.
    pub fn finish(self) -> Result<S::Out, EncodeError> {
        if !self.open.is_empty() {
            return Err(EncodeError::UnclosedStruct {
                open: self.open.len(),
            });
        }
        self.out.finalize()
    }
}

/// A value that can be serialized.
pub trait Ser {
    /// Writes the wire form of `self` into `s`.
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), EncodeError>;
}

impl Ser for Entry {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), EncodeError> {
        match &self.value {
            I32(i) => s.put_i32(&self.name, *i),
            U32(u) => s.put_u32(&self.name, *u),
            Bool(b) => s.put_bool(&self.name, *b),
            Float(f) => s.put_float(&self.name, *f),
            Str(bs) => s.put_str(&self.name, bs),
            Struct(entries) => {
                s.begin_struct(&self.name)?;
                for e in entries {
                    e.ser(s)?;
                }
                s.end_struct()
            }
        }
    }
}

impl Ser for [Entry] {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), EncodeError> {
        for e in self {
            e.ser(s)?;
        }
        Ok(())
    }
}

impl Ser for Vec<Entry> {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), EncodeError> { self.as_slice().ser(s) }
}

impl<T: Ser + ?Sized> Ser for &T {
    fn ser<S: Serializer>(&self, s: &mut S) -> Result<(), EncodeError> { (**self).ser(s) }
}
