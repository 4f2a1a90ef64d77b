//! Conversions between plain Rust types and NVF [`Value`]s.
//!
//! There is no impl for `f32`: packing is lossy for negative values, so it
//! stays behind the fallible [`Float24`] conversion.

use crate::{float::Float24, Entry, Value, Value::*};
use bytes::Bytes;
use std::convert::TryInto;

/// A type with a canonical representation as an NVF [`Value`].
///
/// Implementors must override at least one of [`to_value`](NvfRep::to_value)
/// and [`into_value`](NvfRep::into_value).
///
/// # Example
///
/// ```
/// use nvf::prelude::*;
///
/// let v = 5i32.into_value();
///
/// assert_eq!(i32::from_value(v), Some(5));
/// ```
pub trait NvfRep: Clone + Sized {
    /// Converts a reference to a [`Value`].
    fn to_value(&self) -> Value { self.clone().into_value() }

    /// Consumes the receiver, converting it to a [`Value`].
    fn into_value(self) -> Value { self.to_value() }

    /// Recovers the type from a [`Value`], if the variant and range fit.
    fn from_value(v: Value) -> Option<Self>;
}

impl NvfRep for Value {
    fn into_value(self) -> Value { self }

    fn from_value(v: Value) -> Option<Value> { Some(v) }
}

macro_rules! try_from_value_rep {
    ($t:ty) => {
        impl NvfRep for $t {
            fn into_value(self) -> Value { self.into() }

            fn from_value(v: Value) -> Option<$t> { v.try_into().ok() }
        }
    };
}

try_from_value_rep!(i32);
try_from_value_rep!(u32);
try_from_value_rep!(bool);
try_from_value_rep!(Float24);
try_from_value_rep!(Bytes);
try_from_value_rep!(Vec<Entry>);

/// Integers narrower than the wire's 32-bit types widen on the way in and
/// range-check on the way out.
macro_rules! narrow_from_value_rep {
    ($t:ty, $via:ty) => {
        impl NvfRep for $t {
            fn into_value(self) -> Value { self.into() }

            fn from_value(v: Value) -> Option<$t> { <$via>::from_value(v)?.try_into().ok() }
        }
    };
}

narrow_from_value_rep!(i8, i32);
narrow_from_value_rep!(i16, i32);
narrow_from_value_rep!(u8, u32);
narrow_from_value_rep!(u16, u32);

impl NvfRep for String {
    fn to_value(&self) -> Value { Str(Bytes::copy_from_slice(self.as_bytes())) }

    fn into_value(self) -> Value { Str(Bytes::from(self)) }

    fn from_value(v: Value) -> Option<String> {
        String::from_utf8(Bytes::from_value(v)?.to_vec()).ok()
    }
}

impl NvfRep for Vec<u8> {
    fn to_value(&self) -> Value { Str(Bytes::copy_from_slice(self)) }

    fn into_value(self) -> Value { Str(Bytes::from(self)) }

    fn from_value(v: Value) -> Option<Vec<u8>> { Some(v.into_str()?.to_vec()) }
}
