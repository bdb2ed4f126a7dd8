//! `table Monster`, the root type of the sample schema.
//!
//! ```text
//! table Monster {
//!   pos: Vec3;                    // 0
//!   mana: short = 150;            // 1
//!   hp: short = 100;              // 2
//!   name: string (key);           // 3
//!   inventory: [ubyte];           // 4
//!   color: Color = Blue;          // 5
//!   equipped: Equipment;          // 6 (type), 7 (value)
//!   abilities: [Ability];         // 8
//!   tags: [string];               // 9
//!   minions: [Monster];           // 10, sorted by name
//!   enemy: Monster;               // 11
//!   stats: [Stat];                // 12, sorted by count
//!   friendly: bool = false;       // 13
//!   nan_default: float = nan;     // 14
//! }
//! root_type Monster;
//! file_identifier "MONS";
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sternbuf::{
    BuildError, Builder, Element, Pack, ReadError, StructView, Table, TableMut, TailOffset, Unpack,
    VOffset, Vector, buffer_has_identifier, field_offset, pack_vector_of_tables, root_table,
    root_table_mut, size_prefixed_root_table, size_prefixed_root_table_mut, unpack_vector,
};

use crate::enums::{Color, EquipmentType};
use crate::equipment::{Equipment, EquipmentT};
use crate::stat::{Stat, StatMut, StatT};
use crate::structs::{Ability, Vec3};
use crate::weapon::WeaponMut;

pub const MONSTER_IDENTIFIER: [u8; 4] = *b"MONS";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Monster<'a> {
    table: Table<'a>,
}

impl<'a> Monster<'a> {
    pub const FIELD_COUNT: usize = 15;
    pub const VT_POS: VOffset = field_offset(0);
    pub const VT_MANA: VOffset = field_offset(1);
    pub const VT_HP: VOffset = field_offset(2);
    pub const VT_NAME: VOffset = field_offset(3);
    pub const VT_INVENTORY: VOffset = field_offset(4);
    pub const VT_COLOR: VOffset = field_offset(5);
    pub const VT_EQUIPPED_TYPE: VOffset = field_offset(6);
    pub const VT_EQUIPPED: VOffset = field_offset(7);
    pub const VT_ABILITIES: VOffset = field_offset(8);
    pub const VT_TAGS: VOffset = field_offset(9);
    pub const VT_MINIONS: VOffset = field_offset(10);
    pub const VT_ENEMY: VOffset = field_offset(11);
    pub const VT_STATS: VOffset = field_offset(12);
    pub const VT_FRIENDLY: VOffset = field_offset(13);
    pub const VT_NAN_DEFAULT: VOffset = field_offset(14);

    pub const DEFAULT_MANA: i16 = 150;
    pub const DEFAULT_HP: i16 = 100;
    pub const DEFAULT_COLOR: Color = Color::BLUE;
    pub const DEFAULT_NAN: f32 = f32::NAN;

    pub fn from_table(table: Table<'a>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> Table<'a> {
        self.table
    }

    pub fn pos(&self) -> Option<Vec3> {
        self.table.get_struct_value(Self::VT_POS)
    }

    /// In-place view of `pos`, for reading single members.
    pub fn pos_view(&self) -> Option<StructView<'a>> {
        self.table.get_struct(Self::VT_POS)
    }

    pub fn mana(&self) -> i16 {
        self.table.get(Self::VT_MANA, Self::DEFAULT_MANA)
    }

    pub fn hp(&self) -> i16 {
        self.table.get(Self::VT_HP, Self::DEFAULT_HP)
    }

    pub fn name(&self) -> Option<Result<&'a str, ReadError>> {
        self.table.get_str(Self::VT_NAME)
    }

    /// `name` as stored, whether or not it is UTF-8.
    pub fn name_bytes(&self) -> Option<&'a [u8]> {
        self.table.get_bytes(Self::VT_NAME)
    }

    pub fn inventory(&self) -> Option<&'a [u8]> {
        self.table.get_bytes(Self::VT_INVENTORY)
    }

    pub fn color(&self) -> Color {
        self.table.get(Self::VT_COLOR, Self::DEFAULT_COLOR)
    }

    pub fn equipped_type(&self) -> EquipmentType {
        self.table.get(Self::VT_EQUIPPED_TYPE, EquipmentType::NONE)
    }

    pub fn equipped(&self) -> Equipment<'a> {
        self.table.get_union(Self::VT_EQUIPPED_TYPE, Self::VT_EQUIPPED)
    }

    pub fn abilities(&self) -> Option<Vector<'a, Ability>> {
        self.table.get_vector(Self::VT_ABILITIES)
    }

    pub fn tags(&self) -> Option<Vector<'a, Result<&'a str, ReadError>>> {
        self.table.get_vector(Self::VT_TAGS)
    }

    pub fn minions(&self) -> Option<Vector<'a, Monster<'a>>> {
        self.table.get_vector(Self::VT_MINIONS)
    }

    pub fn enemy(&self) -> Option<Monster<'a>> {
        self.table.get_table(Self::VT_ENEMY).map(Monster::from_table)
    }

    pub fn stats(&self) -> Option<Vector<'a, Stat<'a>>> {
        self.table.get_vector(Self::VT_STATS)
    }

    pub fn friendly(&self) -> bool {
        self.table.get(Self::VT_FRIENDLY, false)
    }

    pub fn nan_default(&self) -> f32 {
        self.table.get(Self::VT_NAN_DEFAULT, Self::DEFAULT_NAN)
    }

    /// Binary search `minions` by name.
    pub fn minion_by_key(&self, name: &str) -> Option<Monster<'a>> {
        self.minions()?
            .lookup_by_key(name, |minion, key| minion.key_compare_with_value(key))
    }

    /// Binary search `stats` by count.
    pub fn stat_by_count(&self, count: u16) -> Option<Stat<'a>> {
        self.stats()?
            .lookup_by_key(&count, |s, key| s.key_compare_with_value(*key))
    }

    /// Keys compare as bytes, which orders valid UTF-8 the same as `str`.
    pub fn key_compare_with_value(&self, key: &str) -> Ordering {
        self.name_bytes().unwrap_or_default().cmp(key.as_bytes())
    }

    pub fn compare_by_key(a: &Table<'_>, b: &Table<'_>) -> Ordering {
        let a = a.get_bytes(Self::VT_NAME).unwrap_or_default();
        let b = b.get_bytes(Self::VT_NAME).unwrap_or_default();
        a.cmp(b)
    }
}

impl<'a> Element<'a> for Monster<'a> {
    const WIDTH: usize = <Table<'a> as Element<'a>>::WIDTH;

    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        Self::from_table(<Table<'a> as Element<'a>>::read_at(buf, loc))
    }
}

pub fn root_as_monster(buf: &[u8]) -> Result<Monster<'_>, ReadError> {
    root_table(buf).map(Monster::from_table)
}

pub fn size_prefixed_root_as_monster(buf: &[u8]) -> Result<Monster<'_>, ReadError> {
    size_prefixed_root_table(buf).map(Monster::from_table)
}

pub fn root_as_monster_mut(buf: &mut [u8]) -> Result<MonsterMut<'_>, ReadError> {
    root_table_mut(buf).map(MonsterMut::from_table)
}

pub fn size_prefixed_root_as_monster_mut(buf: &mut [u8]) -> Result<MonsterMut<'_>, ReadError> {
    size_prefixed_root_table_mut(buf).map(MonsterMut::from_table)
}

pub fn monster_buffer_has_identifier(buf: &[u8], size_prefixed: bool) -> bool {
    buffer_has_identifier(buf, MONSTER_IDENTIFIER, size_prefixed)
}

/// Finish `builder` with `root` and the `MONS` identifier.
pub fn finish_monster_buffer(
    builder: &mut Builder,
    root: TailOffset,
    size_prefixed: bool,
) -> Result<(), BuildError> {
    builder.finish_with_identifier(root, MONSTER_IDENTIFIER, size_prefixed)
}

pub struct MonsterBuilder<'b> {
    fbb: &'b mut Builder,
}

impl<'b> MonsterBuilder<'b> {
    pub fn new(fbb: &'b mut Builder) -> Result<Self, BuildError> {
        fbb.start_table(Monster::FIELD_COUNT)?;
        Ok(Self { fbb })
    }

    pub fn add_pos(&mut self, pos: &Vec3) -> Result<(), BuildError> {
        self.fbb.push_struct_slot(0, pos)
    }

    pub fn add_mana(&mut self, mana: i16) -> Result<(), BuildError> {
        self.fbb.prepend_slot(1, mana, Monster::DEFAULT_MANA)
    }

    pub fn add_hp(&mut self, hp: i16) -> Result<(), BuildError> {
        self.fbb.prepend_slot(2, hp, Monster::DEFAULT_HP)
    }

    pub fn add_name(&mut self, name: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(3, name)
    }

    pub fn add_inventory(&mut self, inventory: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(4, inventory)
    }

    pub fn add_color(&mut self, color: Color) -> Result<(), BuildError> {
        self.fbb.prepend_slot(5, color, Monster::DEFAULT_COLOR)
    }

    pub fn add_equipped_type(&mut self, tag: EquipmentType) -> Result<(), BuildError> {
        self.fbb.prepend_slot(6, tag, EquipmentType::NONE)
    }

    pub fn add_equipped(&mut self, value: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(7, value)
    }

    pub fn add_abilities(&mut self, abilities: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(8, abilities)
    }

    pub fn add_tags(&mut self, tags: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(9, tags)
    }

    pub fn add_minions(&mut self, minions: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(10, minions)
    }

    pub fn add_enemy(&mut self, enemy: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(11, enemy)
    }

    pub fn add_stats(&mut self, stats: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(12, stats)
    }

    pub fn add_friendly(&mut self, friendly: bool) -> Result<(), BuildError> {
        self.fbb.prepend_slot(13, friendly, false)
    }

    pub fn add_nan_default(&mut self, value: f32) -> Result<(), BuildError> {
        self.fbb.prepend_slot(14, value, Monster::DEFAULT_NAN)
    }

    pub fn finish(self) -> Result<TailOffset, BuildError> {
        self.fbb.end_table()
    }
}

/// Write `minions` as a name-sorted vector, ready for [`Monster::minion_by_key`].
pub fn create_sorted_minions(
    builder: &mut Builder,
    minions: &mut [TailOffset],
) -> Result<TailOffset, BuildError> {
    builder.create_vector_of_sorted_tables(minions, Monster::compare_by_key)
}

/// Write `stats` as a count-sorted vector, ready for [`Monster::stat_by_count`].
pub fn create_sorted_stats(
    builder: &mut Builder,
    stats: &mut [TailOffset],
) -> Result<TailOffset, BuildError> {
    builder.create_vector_of_sorted_tables(stats, Stat::compare_by_key)
}

pub struct MonsterMut<'a> {
    table: TableMut<'a>,
}

impl<'a> MonsterMut<'a> {
    pub fn from_table(table: TableMut<'a>) -> Self {
        Self { table }
    }

    pub fn as_monster(&self) -> Monster<'_> {
        Monster::from_table(self.table.as_table())
    }

    pub fn mutate_mana(&mut self, mana: i16) -> bool {
        self.table.mutate(Monster::VT_MANA, mana)
    }

    pub fn mutate_hp(&mut self, hp: i16) -> bool {
        self.table.mutate(Monster::VT_HP, hp)
    }

    pub fn mutate_color(&mut self, color: Color) -> bool {
        self.table.mutate(Monster::VT_COLOR, color)
    }

    pub fn mutate_friendly(&mut self, friendly: bool) -> bool {
        self.table.mutate(Monster::VT_FRIENDLY, friendly)
    }

    pub fn mutate_nan_default(&mut self, value: f32) -> bool {
        self.table.mutate(Monster::VT_NAN_DEFAULT, value)
    }

    pub fn mutate_pos_x(&mut self, x: f32) -> bool {
        self.table.mutate_struct_field(Monster::VT_POS, Vec3::X_OFFSET, x)
    }

    pub fn mutate_pos_dist(&mut self, dist: f64) -> bool {
        self.table
            .mutate_struct_field(Monster::VT_POS, Vec3::DIST_OFFSET, dist)
    }

    pub fn mutate_pos_ability_level(&mut self, level: i8) -> bool {
        self.table.mutate_struct_field(
            Monster::VT_POS,
            Vec3::ABILITY_OFFSET + Ability::LEVEL_OFFSET,
            level,
        )
    }

    pub fn mutate_inventory(&mut self, idx: usize, value: u8) -> bool {
        self.table.mutate_vector_element(Monster::VT_INVENTORY, idx, value)
    }

    pub fn enemy_mut(&mut self) -> Option<MonsterMut<'_>> {
        self.table
            .table_mut(Monster::VT_ENEMY)
            .map(MonsterMut::from_table)
    }

    /// Mutable view of the equipped weapon, if a weapon is equipped.
    pub fn equipped_weapon_mut(&mut self) -> Option<WeaponMut<'_>> {
        if self.as_monster().equipped_type() != EquipmentType::WEAPON {
            return None;
        }
        self.table
            .table_mut(Monster::VT_EQUIPPED)
            .map(WeaponMut::from_table)
    }

    /// Mutable view of `stats[idx]`.
    pub fn stat_mut(&mut self, idx: usize) -> Option<StatMut<'_>> {
        self.table
            .vector_table_mut(Monster::VT_STATS, idx)
            .map(StatMut::from_table)
    }
}

/// Owned `Monster`.
///
/// Equality compares `nan_default` by bit pattern, so the NaN default equals
/// itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MonsterT {
    pub pos: Option<Vec3>,
    pub mana: i16,
    pub hp: i16,
    pub name: Option<String>,
    pub inventory: Option<Vec<u8>>,
    pub color: Color,
    pub equipped: EquipmentT,
    pub abilities: Option<Vec<Ability>>,
    pub tags: Option<Vec<String>>,
    pub minions: Option<Vec<MonsterT>>,
    pub enemy: Option<Box<MonsterT>>,
    pub stats: Option<Vec<StatT>>,
    pub friendly: bool,
    /// JSON has no NaN; a NaN is left out and reads back as the default.
    #[serde(skip_serializing_if = "is_nan")]
    pub nan_default: f32,
}

fn is_nan(v: &f32) -> bool {
    v.is_nan()
}

impl PartialEq for MonsterT {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
            && self.mana == other.mana
            && self.hp == other.hp
            && self.name == other.name
            && self.inventory == other.inventory
            && self.color == other.color
            && self.equipped == other.equipped
            && self.abilities == other.abilities
            && self.tags == other.tags
            && self.minions == other.minions
            && self.enemy == other.enemy
            && self.stats == other.stats
            && self.friendly == other.friendly
            && self.nan_default.to_bits() == other.nan_default.to_bits()
    }
}

impl Default for MonsterT {
    fn default() -> Self {
        Self {
            pos: None,
            mana: Monster::DEFAULT_MANA,
            hp: Monster::DEFAULT_HP,
            name: None,
            inventory: None,
            color: Monster::DEFAULT_COLOR,
            equipped: EquipmentT::None,
            abilities: None,
            tags: None,
            minions: None,
            enemy: None,
            stats: None,
            friendly: false,
            nan_default: Monster::DEFAULT_NAN,
        }
    }
}

impl Pack for MonsterT {
    /// Vectors keep their order; sort `minions` by name and `stats` by count
    /// beforehand if the packed buffer will be searched by key.
    fn pack(&self, builder: &mut Builder) -> Result<TailOffset, BuildError> {
        let name = self
            .name
            .as_deref()
            .map(|name| builder.create_string(name))
            .transpose()?;
        let inventory = self
            .inventory
            .as_deref()
            .map(|bytes| builder.create_byte_vector(bytes))
            .transpose()?;
        let abilities = self
            .abilities
            .as_deref()
            .map(|items| builder.create_vector_of_structs(items))
            .transpose()?;
        let tags = self
            .tags
            .as_deref()
            .map(|items| builder.create_vector_of_strings(items))
            .transpose()?;
        let minions = self
            .minions
            .as_deref()
            .map(|items| pack_vector_of_tables(builder, items))
            .transpose()?;
        let enemy = self
            .enemy
            .as_ref()
            .map(|enemy| enemy.pack(builder))
            .transpose()?;
        let stats = self
            .stats
            .as_deref()
            .map(|items| pack_vector_of_tables(builder, items))
            .transpose()?;
        let equipped = self.equipped.pack(builder)?;

        let mut b = MonsterBuilder::new(builder)?;
        if let Some(pos) = &self.pos {
            b.add_pos(pos)?;
        }
        b.add_nan_default(self.nan_default)?;
        if let Some(name) = name {
            b.add_name(name)?;
        }
        if let Some(inventory) = inventory {
            b.add_inventory(inventory)?;
        }
        if let Some(equipped) = equipped {
            b.add_equipped(equipped)?;
        }
        if let Some(abilities) = abilities {
            b.add_abilities(abilities)?;
        }
        if let Some(tags) = tags {
            b.add_tags(tags)?;
        }
        if let Some(minions) = minions {
            b.add_minions(minions)?;
        }
        if let Some(enemy) = enemy {
            b.add_enemy(enemy)?;
        }
        if let Some(stats) = stats {
            b.add_stats(stats)?;
        }
        b.add_mana(self.mana)?;
        b.add_hp(self.hp)?;
        b.add_color(self.color)?;
        b.add_equipped_type(self.equipped.equipment_type())?;
        b.add_friendly(self.friendly)?;
        b.finish()
    }
}

impl Unpack for Monster<'_> {
    type Native = MonsterT;

    fn unpack(&self) -> MonsterT {
        MonsterT {
            pos: self.pos(),
            mana: self.mana(),
            hp: self.hp(),
            name: self.table.get_str_lossy(Self::VT_NAME).map(Cow::into_owned),
            inventory: self.inventory().map(<[u8]>::to_vec),
            color: self.color(),
            equipped: EquipmentT::from(&self.equipped()),
            abilities: self.abilities().map(|v| v.iter().collect()),
            tags: self.table.get_vector::<&[u8]>(Self::VT_TAGS).map(|v| {
                v.iter()
                    .map(|tag| String::from_utf8_lossy(tag).into_owned())
                    .collect()
            }),
            minions: self.minions().map(unpack_vector),
            enemy: self.enemy().map(|e| Box::new(e.unpack())),
            stats: self.stats().map(unpack_vector),
            friendly: self.friendly(),
            nan_default: self.nan_default(),
        }
    }
}
