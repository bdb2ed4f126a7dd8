//! Byte layout tests.
//!
//! Each case drives the builder step by step and compares the written region
//! (`data()`, from head to tail) against the exact expected bytes.

use super::Builder;
use crate::offsets::TailOffset;

/// Hex listing, one 4-byte word per line.
fn words(bytes: &[u8]) -> String {
    bytes
        .chunks(4)
        .map(|word| {
            word.iter()
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn scalars_pad_to_their_width() {
    let mut b = Builder::with_capacity(0);
    assert!(b.data().is_empty());
    b.prepend(true);
    assert_eq!(b.data(), [1]);
    b.prepend(-127i8);
    assert_eq!(b.data(), [129, 1]);
    b.prepend(255u8);
    assert_eq!(b.data(), [255, 129, 1]);
    b.prepend(-32222i16);
    assert_eq!(b.data(), [0x22, 0x82, 0, 255, 129, 1]);
    b.prepend(0xFEEEu16);
    assert_eq!(b.data(), [0xEE, 0xFE, 0x22, 0x82, 0, 255, 129, 1]);
    b.prepend(-53687092i32);
    assert_eq!(
        b.data(),
        [204, 204, 204, 252, 0xEE, 0xFE, 0x22, 0x82, 0, 255, 129, 1]
    );
    b.prepend(0x98765432u32);
    assert_eq!(
        b.data(),
        [
            0x32, 0x54, 0x76, 0x98, 204, 204, 204, 252, 0xEE, 0xFE, 0x22, 0x82, 0, 255, 129, 1
        ]
    );
}

#[test]
fn u64_layout() {
    let mut b = Builder::with_capacity(0);
    b.prepend(0x1122334455667788u64);
    assert_eq!(b.data(), [0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
}

#[test]
fn one_byte_vector() {
    let mut b = Builder::with_capacity(0);
    b.start_vector(1, 1, 1).unwrap();
    assert_eq!(b.data(), [0, 0, 0]);
    b.prepend(1u8);
    assert_eq!(b.data(), [1, 0, 0, 0]);
    b.end_vector(1).unwrap();
    assert_eq!(b.data(), [1, 0, 0, 0, 1, 0, 0, 0]);
}

#[test]
fn two_byte_vector() {
    let mut b = Builder::with_capacity(0);
    b.start_vector(1, 2, 1).unwrap();
    assert_eq!(b.data(), [0, 0]);
    b.prepend(1u8);
    b.prepend(2u8);
    assert_eq!(b.data(), [2, 1, 0, 0]);
    b.end_vector(2).unwrap();
    assert_eq!(b.data(), [2, 0, 0, 0, 2, 1, 0, 0]);
}

#[test]
fn u16_vectors() {
    let mut b = Builder::with_capacity(0);
    b.start_vector(2, 1, 1).unwrap();
    assert_eq!(b.data(), [0, 0]);
    b.prepend(1u16);
    b.end_vector(1).unwrap();
    assert_eq!(b.data(), [1, 0, 0, 0, 1, 0, 0, 0]);

    let mut b = Builder::with_capacity(0);
    b.start_vector(2, 2, 1).unwrap();
    assert!(b.data().is_empty());
    b.prepend(0xABCDu16);
    b.prepend(0xDCBAu16);
    b.end_vector(2).unwrap();
    assert_eq!(b.data(), [2, 0, 0, 0, 0xBA, 0xDC, 0xCD, 0xAB]);
}

#[test]
fn typed_vector_matches_manual_vector() {
    let mut b = Builder::with_capacity(0);
    b.create_vector(&[0xABCDu16, 0xDCBA]).unwrap();
    assert_eq!(b.data(), [2, 0, 0, 0, 0xCD, 0xAB, 0xBA, 0xDC]);
}

#[test]
fn strings_are_nul_terminated_and_padded() {
    let mut b = Builder::with_capacity(0);
    b.create_string("foo").unwrap();
    assert_eq!(b.data(), [3, 0, 0, 0, b'f', b'o', b'o', 0]);
    b.create_string("moop").unwrap();
    insta::assert_snapshot!(words(b.data()), @r"
    04 00 00 00
    6d 6f 6f 70
    00 00 00 00
    03 00 00 00
    66 6f 6f 00
    ");
}

#[test]
fn unicode_string() {
    let mut b = Builder::with_capacity(0);
    b.create_string("\u{65e5}\u{672c}\u{8a9e}").unwrap();
    assert_eq!(
        b.data(),
        [9, 0, 0, 0, 230, 151, 165, 230, 156, 172, 232, 170, 158, 0, 0, 0]
    );
}

#[test]
fn byte_string_uses_string_framing() {
    let mut b = Builder::with_capacity(0);
    b.create_byte_string(b"foo").unwrap();
    b.create_byte_string(b"moop").unwrap();
    assert_eq!(
        b.data(),
        [4, 0, 0, 0, b'm', b'o', b'o', b'p', 0, 0, 0, 0, 3, 0, 0, 0, b'f', b'o', b'o', 0]
    );
}

#[test]
fn byte_vector_pads_to_alignment() {
    let mut b = Builder::with_capacity(0);
    b.create_byte_vector(&[7, 8, 9]).unwrap();
    // Trailing zero is alignment padding for the length word.
    assert_eq!(b.data(), [3, 0, 0, 0, 7, 8, 9, 0]);
}

#[test]
fn byte_vector_has_no_nul() {
    let mut b = Builder::with_capacity(0);
    b.create_byte_vector(&[7, 8, 9, 10]).unwrap();
    assert_eq!(b.data(), [4, 0, 0, 0, 7, 8, 9, 10]);

    let mut b = Builder::with_capacity(0);
    b.create_byte_string(&[7, 8, 9, 10]).unwrap();
    assert_eq!(b.data(), [4, 0, 0, 0, 7, 8, 9, 10, 0, 0, 0, 0]);
}

#[test]
fn empty_table() {
    let mut b = Builder::with_capacity(0);
    b.start_table(0).unwrap();
    assert!(b.data().is_empty());
    b.end_table().unwrap();
    assert_eq!(b.data(), [4, 0, 4, 0, 4, 0, 0, 0]);
}

#[test]
fn one_true_bool() {
    let mut b = Builder::with_capacity(0);
    b.start_table(1).unwrap();
    b.prepend_slot(0, true, false).unwrap();
    b.end_table().unwrap();
    assert_eq!(b.data(), [6, 0, 8, 0, 7, 0, 6, 0, 0, 0, 0, 0, 0, 1]);
}

#[test]
fn default_bool_is_omitted() {
    let mut b = Builder::with_capacity(0);
    b.start_table(1).unwrap();
    b.prepend_slot(0, false, false).unwrap();
    b.end_table().unwrap();
    assert_eq!(b.data(), [4, 0, 4, 0, 4, 0, 0, 0]);
}

#[test]
fn two_default_bools_leave_minimal_vtable() {
    let mut b = Builder::with_capacity(0);
    b.start_table(2).unwrap();
    b.prepend_slot(0, false, false).unwrap();
    b.prepend_slot(1, false, false).unwrap();
    let root = b.end_table().unwrap();
    b.finish(root, false).unwrap();
    assert_eq!(
        b.finished_data().unwrap(),
        [8, 0, 0, 0, 4, 0, 4, 0, 4, 0, 0, 0]
    );
}

#[test]
fn int16_tables() {
    let mut b = Builder::with_capacity(0);
    b.start_table(1).unwrap();
    b.prepend_slot(0, 0x789Ai16, 0).unwrap();
    b.end_table().unwrap();
    assert_eq!(b.data(), [6, 0, 8, 0, 6, 0, 6, 0, 0, 0, 0, 0, 0x9A, 0x78]);

    let mut b = Builder::with_capacity(0);
    b.start_table(2).unwrap();
    b.prepend_slot(0, 0x3456i16, 0).unwrap();
    b.prepend_slot(1, 0x789Ai16, 0).unwrap();
    b.end_table().unwrap();
    assert_eq!(
        b.data(),
        [8, 0, 8, 0, 6, 0, 4, 0, 8, 0, 0, 0, 0x9A, 0x78, 0x56, 0x34]
    );

    let mut b = Builder::with_capacity(0);
    b.start_table(2).unwrap();
    b.prepend_slot(0, 0x3456i16, 0).unwrap();
    b.prepend_slot(1, true, false).unwrap();
    b.end_table().unwrap();
    assert_eq!(
        b.data(),
        [8, 0, 8, 0, 6, 0, 5, 0, 8, 0, 0, 0, 0, 1, 0x56, 0x34]
    );
}

#[test]
fn table_with_empty_vector() {
    let mut b = Builder::with_capacity(0);
    b.start_vector(1, 0, 1).unwrap();
    let vec = b.end_vector(0).unwrap();
    b.start_table(1).unwrap();
    b.prepend_offset_slot(0, vec).unwrap();
    b.end_table().unwrap();
    assert_eq!(
        b.data(),
        [6, 0, 8, 0, 4, 0, 6, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0]
    );

    let mut b = Builder::with_capacity(0);
    b.start_vector(1, 0, 1).unwrap();
    let vec = b.end_vector(0).unwrap();
    b.start_table(2).unwrap();
    b.prepend_slot(0, 55i16, 0).unwrap();
    b.prepend_offset_slot(1, vec).unwrap();
    b.end_table().unwrap();
    insta::assert_snapshot!(words(b.data()), @r"
    08 00 0c 00
    0a 00 04 00
    08 00 00 00
    08 00 00 00
    00 00 37 00
    00 00 00 00
    ");
}

#[test]
fn table_with_int16_and_vector() {
    let mut b = Builder::with_capacity(0);
    b.start_vector(2, 2, 1).unwrap();
    b.prepend(0x1234i16);
    b.prepend(0x5678i16);
    let vec = b.end_vector(2).unwrap();
    b.start_table(2).unwrap();
    b.prepend_offset_slot(1, vec).unwrap();
    b.prepend_slot(0, 55i16, 0).unwrap();
    b.end_table().unwrap();
    assert_eq!(
        b.data(),
        [
            8, 0, 12, 0, 6, 0, 8, 0, 8, 0, 0, 0, 0, 0, 55, 0, 4, 0, 0, 0, 2, 0, 0, 0, 0x78, 0x56,
            0x34, 0x12
        ]
    );
}

#[test]
fn hand_placed_struct_slot() {
    let mut b = Builder::with_capacity(64);
    b.start_table(1).unwrap();
    b.prepend(55i8);
    b.pad(3);
    b.prepend(0x1234i16);
    b.pad(2);
    b.prepend(0x12345678i32);
    let start = b.offset();
    b.prepend_struct_slot(0, start, TailOffset(0)).unwrap();
    b.end_table().unwrap();
    assert_eq!(
        b.data(),
        [
            6, 0, 16, 0, 4, 0, 6, 0, 0, 0, 0x78, 0x56, 0x34, 0x12, 0, 0, 0x34, 0x12, 0, 0, 0, 55
        ]
    );
}

#[test]
fn vector_of_two_byte_structs() {
    let mut b = Builder::with_capacity(0);
    b.start_vector(2, 2, 1).unwrap();
    b.prepend(33i8);
    b.prepend(44i8);
    b.prepend(55i8);
    b.prepend(66i8);
    let vec = b.end_vector(2).unwrap();
    b.start_table(1).unwrap();
    b.prepend_offset_slot(0, vec).unwrap();
    b.end_table().unwrap();
    assert_eq!(
        b.data(),
        [6, 0, 8, 0, 4, 0, 6, 0, 0, 0, 4, 0, 0, 0, 2, 0, 0, 0, 66, 55, 44, 33]
    );
}

#[test]
fn finished_table() {
    let mut b = Builder::with_capacity(0);
    b.start_table(2).unwrap();
    b.prepend_slot(0, 33i8, 0).unwrap();
    b.prepend_slot(1, 66i16, 0).unwrap();
    let root = b.end_table().unwrap();
    b.finish(root, false).unwrap();
    insta::assert_snapshot!(words(b.finished_data().unwrap()), @r"
    0c 00 00 00
    08 00 08 00
    07 00 04 00
    08 00 00 00
    42 00 00 21
    ");
}

#[test]
fn eight_bools() {
    let mut b = Builder::with_capacity(0);
    b.start_table(8).unwrap();
    for slot in 0..8 {
        b.prepend_slot(slot, true, false).unwrap();
    }
    let root = b.end_table().unwrap();
    b.finish(root, false).unwrap();
    assert_eq!(
        b.finished_data().unwrap(),
        [
            24, 0, 0, 0, 20, 0, 12, 0, 11, 0, 10, 0, 9, 0, 8, 0, 7, 0, 6, 0, 5, 0, 4, 0, 20, 0, 0,
            0, 1, 1, 1, 1, 1, 1, 1, 1
        ]
    );
}

#[test]
fn three_bools_pad_after_root() {
    let mut b = Builder::with_capacity(0);
    b.start_table(3).unwrap();
    for slot in 0..3 {
        b.prepend_slot(slot, true, false).unwrap();
    }
    let root = b.end_table().unwrap();
    b.finish(root, false).unwrap();
    assert_eq!(
        b.finished_data().unwrap(),
        [
            16, 0, 0, 0, 0, 0, 10, 0, 8, 0, 7, 0, 6, 0, 5, 0, 10, 0, 0, 0, 0, 1, 1, 1
        ]
    );
}

#[test]
fn float_slot() {
    let mut b = Builder::with_capacity(0);
    b.start_table(1).unwrap();
    b.prepend_slot(0, 1.0f32, 0.0).unwrap();
    b.end_table().unwrap();
    assert_eq!(b.data(), [6, 0, 8, 0, 4, 0, 6, 0, 0, 0, 0, 0, 128, 63]);
}

#[test]
fn size_prefix_counts_following_bytes() {
    let mut b = Builder::with_capacity(0);
    b.start_table(1).unwrap();
    b.prepend_slot(0, true, false).unwrap();
    let root = b.end_table().unwrap();
    b.finish(root, true).unwrap();
    let data = b.finished_data().unwrap();
    assert_eq!(
        data,
        [
            20, 0, 0, 0, 12, 0, 0, 0, 0, 0, 6, 0, 8, 0, 7, 0, 6, 0, 0, 0, 0, 0, 0, 1
        ]
    );
    let prefix = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    assert_eq!(prefix as usize, data.len() - 4);
}

#[test]
fn identifier_follows_root_offset() {
    let mut b = Builder::with_capacity(0);
    b.start_table(0).unwrap();
    let root = b.end_table().unwrap();
    b.finish_with_identifier(root, *b"MONS", false).unwrap();
    assert_eq!(
        b.finished_data().unwrap(),
        [12, 0, 0, 0, b'M', b'O', b'N', b'S', 4, 0, 4, 0, 4, 0, 0, 0]
    );
}

#[test]
fn growth_keeps_tail_offsets() {
    let mut b = Builder::with_capacity(1);
    let s = b.create_string("a string long enough to force several doublings").unwrap();
    assert_eq!(s, TailOffset(52));
    assert!(b.capacity() >= 52);
    assert_eq!(b.data()[..4], [47, 0, 0, 0]);
}
