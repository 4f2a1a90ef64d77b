//! # NVF binary encoder and decoder
//!
//! Encode and decode functions for NVF documents.
//!
//! # Example
//!
//! ```
//! use nvf::prelude::*;
//!
//! // a document with one struct in it
//! let doc = vec![
//!     Entry::new("a", 5i32),
//!     Entry::new("b", vec![Entry::new("c", true)]),
//!     Entry::new("d", "hi"),
//! ];
//!
//! // encode it
//! let enc_full = encode_full(&doc).unwrap();
//!
//! // encode it a different way too
//! let out = &mut Vec::new();
//! encode(&doc, out).unwrap();
//!
//! // but they are equivalent
//! assert_eq!(*out, enc_full);
//!
//! // decoding returns a `Result`
//! let dec = decode_full(&enc_full).unwrap();
//!
//! // round trip
//! assert_eq!(dec, doc);
//! ```

use crate::{
    errors::{DecodeError, EncodeError},
    float::Float24,
    Entry, Value,
};

pub mod ser;
pub use ser::*;
pub mod de;
pub use de::*;
mod constants;
use constants::*;

/// Encode a value into its binary representation, writing the output
/// to `out`.
///
/// # Arguments
///
/// * `t` - The value to be encoded, usually a document or a single
///   [`Entry`].
/// * `out` - The [`Serializer`] the output is written into.
///
/// # Example
///
/// ```
/// use nvf::prelude::*;
///
/// // output buffer
/// let out = &mut Vec::new();
/// // value to encode
/// let e = Entry::new("a", 5i32);
///
/// // encode value
/// encode(&e, out).unwrap();
/// ```
pub fn encode<T: Ser, S: Serializer>(t: T, out: &mut S) -> Result<(), EncodeError> { t.ser(out) }

/// Encodes a value into a vector of bytes.
///
/// # Arguments
///
/// * `t` - The value to be encoded.
///
/// # Example
///
/// ```
/// use nvf::prelude::*;
///
/// // value to encode
/// let doc = vec![Entry::new("a", 5i32)];
///
/// // encoded value
/// let enc: Vec<u8> = encode_full(&doc).unwrap();
/// ```
pub fn encode_full<T: Ser>(t: T) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    t.ser(&mut out)?;
    Ok(out)
}

/// Decodes a bytestring into a document, returning an error if
/// decoding fails.
///
/// # Arguments
///
/// * `bs` - A buffer containing the bytestring to be decoded.
///
/// # Example
///
/// ```
/// use nvf::prelude::*;
///
/// // encoded value
/// let bs = encode_full(&vec![Entry::new("a", 5i32)]).unwrap();
///
/// // decode value
/// let dec: Result<Vec<Entry>, DecodeError> = decode_full(&bs);
/// ```
pub fn decode_full<B: AsRef<[u8]>>(bs: B) -> Result<Vec<Entry>, DecodeError> {
    decode(&mut bs.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::convert::TryFrom;

    fn reference_doc() -> Vec<Entry> {
        vec![
            Entry::new("a", 5i32),
            Entry::new("b", vec![Entry::new("c", true)]),
            Entry::new("d", "hi"),
        ]
    }

    #[rustfmt::skip]
    const REFERENCE: [u8; 36] = [
        0x00, 0x00, 0x00, 0x00, 0x01, b'a', 0x00, 0x00, 0x00, 0x05,
        0x05, 0x00, 0x00, 0x00, 0x01, b'b',
        0x02, 0x00, 0x00, 0x00, 0x01, b'c', 0x01,
        0x06,
        0x04, 0x00, 0x00, 0x00, 0x01, b'd', 0x00, 0x00, 0x00, 0x02, b'h', b'i',
    ];

    #[test]
    fn i32_wire_shape() {
        let out = encode_full(&Entry::new("a", 5i32)).unwrap();

        // tag
        assert_eq!(out[0], 0x00);
        // name length
        assert_eq!(out[1..5], [0, 0, 0, 1]);
        // name
        assert_eq!(out[5], b'a');
        // payload, big endian
        assert_eq!(out[6..], [0, 0, 0, 5]);
    }

    #[test]
    fn i32_negative_wire_shape() {
        let out = encode_full(&Entry::new("a", -1i32)).unwrap();

        // two's complement
        assert_eq!(out[6..], [0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn u32_wire_shape() {
        let out = encode_full(&Entry::new("a", 0xDEAD_BEEFu32)).unwrap();

        // tag
        assert_eq!(out[0], 0x01);
        // payload, big endian
        assert_eq!(out[6..], [0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn bool_wire_shape() {
        let out = encode_full(&Entry::new("a", true)).unwrap();

        // tag
        assert_eq!(out[0], 0x02);
        // payload
        assert_eq!(out[6..], [0x01]);

        let out = encode_full(&Entry::new("a", false)).unwrap();

        assert_eq!(out[6..], [0x00]);
    }

    #[test]
    fn float_wire_shape() {
        let f = Float24::try_from(1.0f32).unwrap();
        let out = encode_full(&Entry::new("a", f)).unwrap();

        // tag
        assert_eq!(out[0], 0x03);
        // exponent byte, then mantissa big endian
        assert_eq!(out[6..], [0x01, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn str_wire_shape() {
        let out = encode_full(&Entry::new("d", "hi")).unwrap();

        // tag
        assert_eq!(out[0], 0x04);
        // name
        assert_eq!(out[1..6], [0, 0, 0, 1, b'd']);
        // value length, then bytes
        assert_eq!(out[6..], [0, 0, 0, 2, b'h', b'i']);
    }

    #[test]
    fn struct_wire_shape() {
        let out = encode_full(&Entry::new("s", Vec::<Entry>::new())).unwrap();

        // open tag, name, close tag
        assert_eq!(out[..], [0x05, 0, 0, 0, 1, b's', 0x06]);
    }

    #[test]
    fn empty_name() {
        let out = encode_full(&Entry::new("", 5i32)).unwrap();

        assert_eq!(out[..], [0x00, 0, 0, 0, 0, 0, 0, 0, 5]);
    }

    #[test]
    fn document_wire_shape() {
        let out = encode_full(&reference_doc()).unwrap();

        assert_eq!(out[..], REFERENCE[..]);
    }

    #[test]
    fn document_roundtrip() {
        let dec = decode_full(&REFERENCE[..]).unwrap();

        assert_eq!(dec, reference_doc());
    }

    #[test]
    fn empty_document() {
        assert_eq!(encode_full(&Vec::<Entry>::new()).unwrap(), Vec::<u8>::new());
        assert_eq!(decode_full([]).unwrap(), vec![]);
    }

    #[test]
    fn bytes_source_matches_slice_source() {
        let enc = encode_full(&reference_doc()).unwrap();

        let from_slice = decode_full(&enc).unwrap();
        let from_bytes = decode(&mut Bytes::from(enc)).unwrap();

        assert_eq!(from_slice, from_bytes);
    }
}
