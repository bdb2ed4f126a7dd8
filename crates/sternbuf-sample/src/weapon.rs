//! `table Weapon { name: string (key); damage: short; }`

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sternbuf::{
    BuildError, Builder, Element, Pack, ReadError, Table, TableMut, TailOffset, Unpack, VOffset,
    field_offset,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weapon<'a> {
    table: Table<'a>,
}

impl<'a> Weapon<'a> {
    pub const FIELD_COUNT: usize = 2;
    pub const VT_NAME: VOffset = field_offset(0);
    pub const VT_DAMAGE: VOffset = field_offset(1);

    pub fn from_table(table: Table<'a>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> Table<'a> {
        self.table
    }

    pub fn name(&self) -> Option<Result<&'a str, ReadError>> {
        self.table.get_str(Self::VT_NAME)
    }

    pub fn damage(&self) -> i16 {
        self.table.get(Self::VT_DAMAGE, 0)
    }

    pub fn key_compare_with_value(&self, key: &str) -> Ordering {
        let name = self.table.get_bytes(Self::VT_NAME).unwrap_or_default();
        name.cmp(key.as_bytes())
    }

    pub fn compare_by_key(a: &Table<'_>, b: &Table<'_>) -> Ordering {
        let a = a.get_bytes(Self::VT_NAME).unwrap_or_default();
        let b = b.get_bytes(Self::VT_NAME).unwrap_or_default();
        a.cmp(b)
    }

    pub fn create(builder: &mut Builder, args: &WeaponArgs) -> Result<TailOffset, BuildError> {
        let mut b = WeaponBuilder::new(builder)?;
        if let Some(name) = args.name {
            b.add_name(name)?;
        }
        b.add_damage(args.damage)?;
        b.finish()
    }
}

impl<'a> Element<'a> for Weapon<'a> {
    const WIDTH: usize = <Table<'a> as Element<'a>>::WIDTH;

    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        Self::from_table(<Table<'a> as Element<'a>>::read_at(buf, loc))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct WeaponArgs {
    pub name: Option<TailOffset>,
    pub damage: i16,
}

pub struct WeaponBuilder<'b> {
    fbb: &'b mut Builder,
}

impl<'b> WeaponBuilder<'b> {
    pub fn new(fbb: &'b mut Builder) -> Result<Self, BuildError> {
        fbb.start_table(Weapon::FIELD_COUNT)?;
        Ok(Self { fbb })
    }

    pub fn add_name(&mut self, name: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(0, name)
    }

    pub fn add_damage(&mut self, damage: i16) -> Result<(), BuildError> {
        self.fbb.prepend_slot(1, damage, 0)
    }

    pub fn finish(self) -> Result<TailOffset, BuildError> {
        self.fbb.end_table()
    }
}

pub struct WeaponMut<'a> {
    table: TableMut<'a>,
}

impl<'a> WeaponMut<'a> {
    pub fn from_table(table: TableMut<'a>) -> Self {
        Self { table }
    }

    pub fn as_weapon(&self) -> Weapon<'_> {
        Weapon::from_table(self.table.as_table())
    }

    pub fn mutate_damage(&mut self, damage: i16) -> bool {
        self.table.mutate(Weapon::VT_DAMAGE, damage)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponT {
    pub name: Option<String>,
    pub damage: i16,
}

impl Pack for WeaponT {
    fn pack(&self, builder: &mut Builder) -> Result<TailOffset, BuildError> {
        let name = self
            .name
            .as_deref()
            .map(|name| builder.create_string(name))
            .transpose()?;
        Weapon::create(
            builder,
            &WeaponArgs {
                name,
                damage: self.damage,
            },
        )
    }
}

impl Unpack for Weapon<'_> {
    type Native = WeaponT;

    fn unpack(&self) -> WeaponT {
        WeaponT {
            name: self.table.get_str_lossy(Self::VT_NAME).map(Cow::into_owned),
            damage: self.damage(),
        }
    }
}
