//! `union Equipment { Monster, Weapon }`

use serde::{Deserialize, Serialize};
use sternbuf::{BuildError, Builder, Pack, Table, TailOffset, UnionVariant};

use crate::enums::EquipmentType;
use crate::monster::{Monster, MonsterT};
use crate::weapon::{Weapon, WeaponT};

/// Zero-copy view of an `Equipment` value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Equipment<'a> {
    None,
    Monster(Monster<'a>),
    Weapon(Weapon<'a>),
    /// A tag this schema does not declare, with a value present.
    Unknown(EquipmentType),
}

impl<'a> Equipment<'a> {
    pub fn equipment_type(&self) -> EquipmentType {
        match self {
            Equipment::None => EquipmentType::NONE,
            Equipment::Monster(_) => EquipmentType::MONSTER,
            Equipment::Weapon(_) => EquipmentType::WEAPON,
            Equipment::Unknown(tag) => *tag,
        }
    }
}

impl<'a> UnionVariant<'a> for Equipment<'a> {
    fn from_tag(tag: u8, value: Option<Table<'a>>) -> Self {
        let Some(value) = value else {
            return Equipment::None;
        };
        match EquipmentType(tag) {
            EquipmentType::NONE => Equipment::None,
            EquipmentType::MONSTER => Equipment::Monster(Monster::from_table(value)),
            EquipmentType::WEAPON => Equipment::Weapon(Weapon::from_table(value)),
            other => Equipment::Unknown(other),
        }
    }
}

/// Owned `Equipment` value.
///
/// Unknown tags unpack to `None`: their value's layout is not known here.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum EquipmentT {
    #[default]
    None,
    Monster(Box<MonsterT>),
    Weapon(Box<WeaponT>),
}

impl EquipmentT {
    pub fn equipment_type(&self) -> EquipmentType {
        match self {
            EquipmentT::None => EquipmentType::NONE,
            EquipmentT::Monster(_) => EquipmentType::MONSTER,
            EquipmentT::Weapon(_) => EquipmentType::WEAPON,
        }
    }

    /// Pack the selected value, if any.
    pub fn pack(&self, builder: &mut Builder) -> Result<Option<TailOffset>, BuildError> {
        match self {
            EquipmentT::None => Ok(None),
            EquipmentT::Monster(m) => m.pack(builder).map(Some),
            EquipmentT::Weapon(w) => w.pack(builder).map(Some),
        }
    }

    pub fn as_weapon(&self) -> Option<&WeaponT> {
        match self {
            EquipmentT::Weapon(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_monster(&self) -> Option<&MonsterT> {
        match self {
            EquipmentT::Monster(m) => Some(m),
            _ => None,
        }
    }
}

impl From<&Equipment<'_>> for EquipmentT {
    fn from(value: &Equipment<'_>) -> Self {
        use sternbuf::Unpack;

        match value {
            Equipment::Monster(m) => EquipmentT::Monster(Box::new(m.unpack())),
            Equipment::Weapon(w) => EquipmentT::Weapon(Box::new(w.unpack())),
            Equipment::None | Equipment::Unknown(_) => EquipmentT::None,
        }
    }
}
