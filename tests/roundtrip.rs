use nvf::prelude::*;
use nvf_strategy::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, ..ProptestConfig::default() })]

    #[test]
    fn encode_decode(doc in arb_document()) {
        let enc = encode_full(&doc).unwrap();
        let dec = decode_full(&enc).unwrap();

        assert_eq!(dec, doc);
    }

    #[test]
    fn encode_is_deterministic(doc in arb_document()) {
        assert_eq!(encode_full(&doc).unwrap(), encode_full(&doc).unwrap());
    }

    #[test]
    fn float_wire_roundtrip(f in arb_float()) {
        let enc = encode_full(&vec![Entry::new("f", f)]).unwrap();
        let dec = decode_full(&enc).unwrap();

        assert_eq!(dec[0].value.to_float(), Some(f));
    }

    #[test]
    fn nonnegative_floats_pack_exactly(f in 1.0e-35f32..1.0e30f32) {
        let packed = Float24::try_from(f).unwrap();

        assert_eq!(f32::from(packed), f);
    }

    #[test]
    fn streaming_scalars_match_tree_encoding(name in arb_bs(), i in any::<i32>(), b in any::<bool>()) {
        let mut enc = Encoder::new(Vec::new());
        enc.put_i32(&name, i).unwrap();
        enc.put_bool(&name, b).unwrap();

        let doc = vec![Entry::new(name.clone(), i), Entry::new(name, b)];

        assert_eq!(enc.finish().unwrap(), encode_full(&doc).unwrap());
    }
}
