use bytes::Bytes;
use nvf::{float::Float24, Entry, Value};
use proptest::prelude::*;

/// arbitrary Bytes for use with proptest
pub fn arb_bs() -> impl Strategy<Value = Bytes> {
    prop_oneof![
        ".*".prop_map(|s| -> Bytes { Bytes::from(s) }),
        prop::collection::vec(any::<u8>(), 0..64).prop_map(|v| -> Bytes { Bytes::from(v) }),
    ]
}

/// arbitrary packed float for use with proptest
pub fn arb_float() -> impl Strategy<Value = Float24> {
    any::<u32>().prop_map(Float24::from_bits)
}

/// arbitrary NVF value for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        // integers
        any::<i32>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        // misc scalars
        any::<bool>().prop_map(Value::from),
        arb_float().prop_map(Value::from),
        // bytestrings
        arb_bs().prop_map(Value::from),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        8,  // max items per collection
        |inner| {
            prop::collection::vec((arb_bs(), inner), 0..8).prop_map(|fields| -> Value {
                Value::Struct(fields.into_iter().map(|(n, v)| Entry::new(n, v)).collect())
            })
        },
    )
}

/// arbitrary NVF entry for use with proptest
pub fn arb_entry() -> impl Strategy<Value = Entry> {
    (arb_bs(), arb_value()).prop_map(|(name, value)| Entry::new(name, value))
}

/// arbitrary NVF document for use with proptest
pub fn arb_document() -> impl Strategy<Value = Vec<Entry>> {
    prop::collection::vec(arb_entry(), 0..8)
}
