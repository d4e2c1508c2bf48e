use formgate_hidden::{pack, unpack};
use proptest::prelude::*;

proptest! {
    #[test]
    fn unpack_restores_any_packed_fields(
        fields in prop::collection::vec(("[a-z_.=|\\\\]{0,8}", "\\PC{0,12}"), 1..6)
    ) {
        let packed = pack(fields.iter().map(|(n, v)| (n, v)));
        let restored = unpack(&packed).unwrap();
        prop_assert_eq!(restored, fields);
    }

    #[test]
    fn unpack_never_panics(input in "\\PC{0,32}") {
        let _ = unpack(&input);
    }
}
