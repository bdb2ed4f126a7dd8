//! `table Stat { id: string; val: long; count: ushort (key); }`

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sternbuf::{
    BuildError, Builder, Element, Pack, ReadError, Table, TableMut, TailOffset, Unpack, VOffset,
    field_offset, root_table,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stat<'a> {
    table: Table<'a>,
}

impl<'a> Stat<'a> {
    pub const FIELD_COUNT: usize = 3;
    pub const VT_ID: VOffset = field_offset(0);
    pub const VT_VAL: VOffset = field_offset(1);
    pub const VT_COUNT: VOffset = field_offset(2);

    pub fn from_table(table: Table<'a>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> Table<'a> {
        self.table
    }

    pub fn id(&self) -> Option<Result<&'a str, ReadError>> {
        self.table.get_str(Self::VT_ID)
    }

    pub fn val(&self) -> i64 {
        self.table.get(Self::VT_VAL, 0)
    }

    pub fn count(&self) -> u16 {
        self.table.get(Self::VT_COUNT, 0)
    }

    pub fn key_compare_with_value(&self, key: u16) -> Ordering {
        self.count().cmp(&key)
    }

    /// Sort order of `count`-keyed vectors.
    pub fn compare_by_key(a: &Table<'_>, b: &Table<'_>) -> Ordering {
        let count = |t: &Table<'_>| t.get(Self::VT_COUNT, 0u16);
        count(a).cmp(&count(b))
    }

    pub fn create(builder: &mut Builder, args: &StatArgs) -> Result<TailOffset, BuildError> {
        let mut b = StatBuilder::new(builder)?;
        b.add_val(args.val)?;
        if let Some(id) = args.id {
            b.add_id(id)?;
        }
        b.add_count(args.count)?;
        b.finish()
    }
}

impl<'a> Element<'a> for Stat<'a> {
    const WIDTH: usize = <Table<'a> as Element<'a>>::WIDTH;

    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        Self::from_table(<Table<'a> as Element<'a>>::read_at(buf, loc))
    }
}

pub fn root_as_stat(buf: &[u8]) -> Result<Stat<'_>, ReadError> {
    root_table(buf).map(Stat::from_table)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StatArgs {
    pub id: Option<TailOffset>,
    pub val: i64,
    pub count: u16,
}

pub struct StatBuilder<'b> {
    fbb: &'b mut Builder,
}

impl<'b> StatBuilder<'b> {
    pub fn new(fbb: &'b mut Builder) -> Result<Self, BuildError> {
        fbb.start_table(Stat::FIELD_COUNT)?;
        Ok(Self { fbb })
    }

    pub fn add_id(&mut self, id: TailOffset) -> Result<(), BuildError> {
        self.fbb.prepend_offset_slot(0, id)
    }

    pub fn add_val(&mut self, val: i64) -> Result<(), BuildError> {
        self.fbb.prepend_slot(1, val, 0)
    }

    pub fn add_count(&mut self, count: u16) -> Result<(), BuildError> {
        self.fbb.prepend_slot(2, count, 0)
    }

    pub fn finish(self) -> Result<TailOffset, BuildError> {
        self.fbb.end_table()
    }
}

pub struct StatMut<'a> {
    table: TableMut<'a>,
}

impl<'a> StatMut<'a> {
    pub fn from_table(table: TableMut<'a>) -> Self {
        Self { table }
    }

    pub fn as_stat(&self) -> Stat<'_> {
        Stat::from_table(self.table.as_table())
    }

    pub fn mutate_val(&mut self, val: i64) -> bool {
        self.table.mutate(Stat::VT_VAL, val)
    }

    pub fn mutate_count(&mut self, count: u16) -> bool {
        self.table.mutate(Stat::VT_COUNT, count)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatT {
    pub id: Option<String>,
    pub val: i64,
    pub count: u16,
}

impl Pack for StatT {
    fn pack(&self, builder: &mut Builder) -> Result<TailOffset, BuildError> {
        let id = self
            .id
            .as_deref()
            .map(|id| builder.create_string(id))
            .transpose()?;
        Stat::create(
            builder,
            &StatArgs {
                id,
                val: self.val,
                count: self.count,
            },
        )
    }
}

impl Unpack for Stat<'_> {
    type Native = StatT;

    fn unpack(&self) -> StatT {
        StatT {
            id: self.table.get_str_lossy(Self::VT_ID).map(Cow::into_owned),
            val: self.val(),
            count: self.count(),
        }
    }
}
