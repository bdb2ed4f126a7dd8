use sternbuf::{Builder, Unpack, field_offset, pack_finished};

use crate::enums::OptionalByte;
use crate::scalar_stuff::{ScalarStuff, ScalarStuffBuilder, ScalarStuffT, root_as_scalar_stuff};

fn empty() -> Vec<u8> {
    let mut b = Builder::new();
    let root = ScalarStuffBuilder::new(&mut b).unwrap().finish().unwrap();
    b.finish(root, false).unwrap();
    b.finished_data().unwrap().to_vec()
}

#[test]
fn empty_table_reads_defaults() {
    let buf = empty();
    let s = root_as_scalar_stuff(&buf).unwrap();

    assert_eq!(s.just_i8(), 0);
    assert_eq!(s.maybe_i8(), None);
    assert_eq!(s.default_i8(), 42);
    assert_eq!(s.just_u64(), 0);
    assert_eq!(s.maybe_u64(), None);
    assert_eq!(s.default_u64(), 42);
    assert_eq!(s.just_f64(), 0.0);
    assert_eq!(s.maybe_f64(), None);
    assert_eq!(s.default_f64(), 42.0);
    assert!(!s.just_bool());
    assert_eq!(s.maybe_bool(), None);
    assert!(s.default_bool());
    assert_eq!(s.just_enum(), OptionalByte::NONE);
    assert_eq!(s.maybe_enum(), None);
    assert_eq!(s.default_enum(), OptionalByte::ONE);
}

#[test]
fn explicit_zero_is_present_for_optional_fields() {
    let mut b = Builder::new();
    let mut sb = ScalarStuffBuilder::new(&mut b).unwrap();
    sb.add_just_i32(0).unwrap();
    sb.add_maybe_i32(Some(0)).unwrap();
    sb.add_default_i32(42).unwrap();
    sb.add_maybe_bool(Some(false)).unwrap();
    sb.add_maybe_u16(None).unwrap();
    let root = sb.finish().unwrap();
    b.finish(root, false).unwrap();
    let s = root_as_scalar_stuff(b.finished_data().unwrap()).unwrap();

    assert_eq!(s.maybe_i32(), Some(0));
    assert_eq!(s.maybe_bool(), Some(false));
    assert_eq!(s.maybe_u16(), None);
    // Plain fields equal to their default are not stored.
    assert!(!s.table().has_field(field_offset(12)));
    assert!(!s.table().has_field(field_offset(14)));
    assert!(s.table().has_field(field_offset(13)));
}

#[test]
fn non_default_values() {
    let mut b = Builder::new();
    let mut sb = ScalarStuffBuilder::new(&mut b).unwrap();
    sb.add_just_u8(200).unwrap();
    sb.add_maybe_i16(Some(-300)).unwrap();
    sb.add_default_u32(7).unwrap();
    sb.add_just_f32(-0.5).unwrap();
    sb.add_default_bool(false).unwrap();
    sb.add_maybe_enum(Some(OptionalByte::TWO)).unwrap();
    let root = sb.finish().unwrap();
    b.finish(root, false).unwrap();
    let s = root_as_scalar_stuff(b.finished_data().unwrap()).unwrap();

    assert_eq!(s.just_u8(), 200);
    assert_eq!(s.maybe_i16(), Some(-300));
    assert_eq!(s.default_u32(), 7);
    assert_eq!(s.just_f32(), -0.5);
    assert!(!s.default_bool());
    assert_eq!(s.maybe_enum(), Some(OptionalByte::TWO));
    assert_eq!(s.default_enum(), OptionalByte::ONE);
}

#[test]
fn default_native_packs_to_an_empty_table() {
    let mut b = Builder::new();
    let buf = pack_finished(&mut b, &ScalarStuffT::default(), false).unwrap();
    let s = root_as_scalar_stuff(buf).unwrap();
    assert_eq!(s.table().vtable().num_slots(), 0);
    assert_eq!(s.unpack(), ScalarStuffT::default());
}

#[test]
fn forced_defaults_store_plain_fields_only() {
    let mut b = Builder::new();
    b.force_defaults(true);
    let buf = pack_finished(&mut b, &ScalarStuffT::default(), false).unwrap();
    let t = root_as_scalar_stuff(buf).unwrap().table();

    assert_eq!(t.vtable().num_slots(), ScalarStuff::FIELD_COUNT);
    assert!(t.has_field(field_offset(0)));
    assert!(!t.has_field(field_offset(1)));
    assert!(t.has_field(field_offset(35)));
    assert!(!t.has_field(field_offset(34)));
}

#[test]
fn native_round_trip() {
    let native = ScalarStuffT {
        just_i8: -1,
        maybe_u8: Some(0),
        default_i16: i16::MIN,
        maybe_u32: Some(u32::MAX),
        just_i64: i64::MIN,
        maybe_u64: Some(1 << 63),
        maybe_f32: Some(0.0),
        default_f64: -42.0,
        maybe_bool: Some(true),
        just_enum: OptionalByte::TWO,
        maybe_enum: Some(OptionalByte::NONE),
        ..ScalarStuffT::default()
    };
    let mut b = Builder::new();
    let buf = pack_finished(&mut b, &native, true).unwrap();
    let s = ScalarStuff::from_table(sternbuf::size_prefixed_root_table(buf).unwrap());
    assert_eq!(s.unpack(), native);

    let json = serde_json::to_string(&native).unwrap();
    let back: ScalarStuffT = serde_json::from_str(&json).unwrap();
    assert_eq!(back, native);
}
