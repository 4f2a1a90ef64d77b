//! A wrapper around the most commonly used types and traits in this crate.

pub use crate::{
    encoding::{
        decode, decode_full, encode, encode_full, Deserializer, DeserializerExt, Encoder, IoSink,
        IoSource, Ser, Serializer, SerializerExt, Tag,
    },
    errors::{DecodeError, EncodeError, FloatError},
    float::Float24,
    rep::*,
    Entry, Value,
};
pub use bytes::Bytes;
pub use std::convert::TryFrom;
