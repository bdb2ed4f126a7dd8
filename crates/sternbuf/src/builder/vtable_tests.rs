use super::Builder;
use super::vtable::encode_vtable;
use crate::offsets::TailOffset;
use crate::reader::Table;

#[test]
fn trailing_absent_slots_are_trimmed() {
    assert_eq!(encode_vtable(&[0, 0, 0], 4, 0), [4, 0, 4, 0]);
    assert_eq!(encode_vtable(&[0, 3, 0], 8, 0), [8, 0, 8, 0, 0, 0, 5, 0]);
}

#[test]
fn slots_are_relative_to_table_start() {
    // Table ends at tail offset 20 and started at 8.
    assert_eq!(encode_vtable(&[12, 16], 20, 8), [8, 0, 12, 0, 8, 0, 4, 0]);
}

fn three_tables(b: &mut Builder) -> Vec<TailOffset> {
    [(11u8, 22u8, 33i16), (44, 55, 66), (77, 88, 99)]
        .into_iter()
        .map(|(x, y, z)| {
            b.start_table(4).unwrap();
            b.prepend_slot(0, 0u8, 0).unwrap();
            b.prepend_slot(1, x, 0).unwrap();
            b.prepend_slot(2, y, 0).unwrap();
            b.prepend_slot(3, z, 0).unwrap();
            b.end_table().unwrap()
        })
        .collect()
}

#[test]
fn identical_tables_share_one_vtable() {
    let mut b = Builder::with_capacity(0);
    three_tables(&mut b);
    assert_eq!(b.vtable_count(), 1);
    assert_eq!(
        b.data(),
        [
            240, 255, 255, 255, 99, 0, 88, 77, // backpointer -12
            248, 255, 255, 255, 66, 0, 55, 44, // backpointer -8
            12, 0, 8, 0, 0, 0, 7, 0, 6, 0, 4, 0, // the only vtable
            12, 0, 0, 0, 33, 0, 22, 11,
        ]
    );
}

#[test]
fn shared_vtable_is_reachable_from_every_table() {
    let mut b = Builder::with_capacity(0);
    let offsets = three_tables(&mut b);
    let data = b.data();
    let vtables: Vec<usize> = offsets
        .iter()
        .map(|off| Table::new(data, off.resolve(data.len())).vtable().loc())
        .collect();
    assert!(vtables.iter().all(|&vt| vt == vtables[0]));
}

#[test]
fn different_object_sizes_get_separate_vtables() {
    let mut b = Builder::with_capacity(0);
    b.start_table(1).unwrap();
    b.prepend_slot(0, 1u32, 0).unwrap();
    b.end_table().unwrap();

    b.start_table(1).unwrap();
    b.prepend(0u32);
    b.prepend_slot(0, 1u32, 0).unwrap();
    b.end_table().unwrap();

    assert_eq!(b.vtable_count(), 2);
}

#[test]
fn reset_forgets_vtables() {
    let mut b = Builder::with_capacity(0);
    three_tables(&mut b);
    b.reset();
    assert_eq!(b.vtable_count(), 0);
    three_tables(&mut b);
    assert_eq!(b.vtable_count(), 1);
    assert_eq!(b.data().len(), 36);
}
