#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Accessors for the sample game schema.
//!
//! This crate has the shape a schema compiler emits for a `sternbuf` schema:
//! per table a zero-copy view, a builder, a mutator and an owned native type
//! with [`Pack`](sternbuf::Pack) / [`Unpack`](sternbuf::Unpack). Root type is
//! [`Monster`].

pub mod enums;
pub mod equipment;
pub mod monster;
pub mod scalar_stuff;
pub mod stat;
pub mod structs;
pub mod weapon;

#[cfg(test)]
mod scalar_stuff_tests;

pub use enums::{Color, EquipmentType, OptionalByte};
pub use equipment::{Equipment, EquipmentT};
pub use monster::{
    MONSTER_IDENTIFIER, Monster, MonsterBuilder, MonsterMut, MonsterT, create_sorted_minions,
    create_sorted_stats, finish_monster_buffer, monster_buffer_has_identifier, root_as_monster,
    root_as_monster_mut, size_prefixed_root_as_monster, size_prefixed_root_as_monster_mut,
};
pub use scalar_stuff::{ScalarStuff, ScalarStuffBuilder, ScalarStuffT, root_as_scalar_stuff};
pub use stat::{Stat, StatArgs, StatBuilder, StatMut, StatT, root_as_stat};
pub use structs::{Ability, Vec3};
pub use weapon::{Weapon, WeaponArgs, WeaponBuilder, WeaponMut, WeaponT};
