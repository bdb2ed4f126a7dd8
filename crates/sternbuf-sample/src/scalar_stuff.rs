//! `table ScalarStuff`: every scalar type in three flavours.
//!
//! - `just_*`: plain field with a zero default
//! - `maybe_*`: optional field, absent unless explicitly set
//! - `default_*`: plain field with a non-zero default
//!
//! Slots are assigned in that order per type, so `just_i8` is slot 0,
//! `maybe_i8` slot 1, `default_i8` slot 2, `just_u8` slot 3 and so on.

use serde::{Deserialize, Serialize};
use sternbuf::{
    BuildError, Builder, Pack, ReadError, Table, TailOffset, Unpack, field_offset, root_table,
};

use crate::enums::OptionalByte;

macro_rules! scalar_stuff {
    ($(
        $ty:ty {
            $just:ident / $add_just:ident @ $js:literal = $zero:expr,
            $maybe:ident / $add_maybe:ident @ $ms:literal,
            $default:ident / $add_default:ident @ $ds:literal = $dv:expr $(,)?
        }
    )+) => {
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub struct ScalarStuff<'a> {
            table: Table<'a>,
        }

        impl<'a> ScalarStuff<'a> {
            pub fn from_table(table: Table<'a>) -> Self {
                Self { table }
            }

            pub fn table(&self) -> Table<'a> {
                self.table
            }

            $(
                pub fn $just(&self) -> $ty {
                    self.table.get(field_offset($js), $zero)
                }

                pub fn $maybe(&self) -> Option<$ty> {
                    self.table.get_optional(field_offset($ms))
                }

                pub fn $default(&self) -> $ty {
                    self.table.get(field_offset($ds), $dv)
                }
            )+
        }

        pub struct ScalarStuffBuilder<'b> {
            fbb: &'b mut Builder,
        }

        impl<'b> ScalarStuffBuilder<'b> {
            pub fn new(fbb: &'b mut Builder) -> Result<Self, BuildError> {
                fbb.start_table(ScalarStuff::FIELD_COUNT)?;
                Ok(Self { fbb })
            }

            $(
                pub fn $add_just(&mut self, value: $ty) -> Result<(), BuildError> {
                    self.fbb.prepend_slot($js, value, $zero)
                }

                /// `None` leaves the field absent.
                pub fn $add_maybe(&mut self, value: Option<$ty>) -> Result<(), BuildError> {
                    match value {
                        Some(value) => self.fbb.prepend_slot_always($ms, value),
                        None => Ok(()),
                    }
                }

                pub fn $add_default(&mut self, value: $ty) -> Result<(), BuildError> {
                    self.fbb.prepend_slot($ds, value, $dv)
                }
            )+

            pub fn finish(self) -> Result<TailOffset, BuildError> {
                self.fbb.end_table()
            }
        }

        #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct ScalarStuffT {
            $(
                pub $just: $ty,
                pub $maybe: Option<$ty>,
                pub $default: $ty,
            )+
        }

        impl Default for ScalarStuffT {
            fn default() -> Self {
                Self {
                    $(
                        $just: $zero,
                        $maybe: None,
                        $default: $dv,
                    )+
                }
            }
        }

        impl Pack for ScalarStuffT {
            fn pack(&self, builder: &mut Builder) -> Result<TailOffset, BuildError> {
                let mut b = ScalarStuffBuilder::new(builder)?;
                $(
                    b.$add_just(self.$just)?;
                    b.$add_maybe(self.$maybe)?;
                    b.$add_default(self.$default)?;
                )+
                b.finish()
            }
        }

        impl Unpack for ScalarStuff<'_> {
            type Native = ScalarStuffT;

            fn unpack(&self) -> ScalarStuffT {
                ScalarStuffT {
                    $(
                        $just: self.$just(),
                        $maybe: self.$maybe(),
                        $default: self.$default(),
                    )+
                }
            }
        }
    };
}

scalar_stuff! {
    i8 {
        just_i8 / add_just_i8 @ 0 = 0,
        maybe_i8 / add_maybe_i8 @ 1,
        default_i8 / add_default_i8 @ 2 = 42,
    }
    u8 {
        just_u8 / add_just_u8 @ 3 = 0,
        maybe_u8 / add_maybe_u8 @ 4,
        default_u8 / add_default_u8 @ 5 = 42,
    }
    i16 {
        just_i16 / add_just_i16 @ 6 = 0,
        maybe_i16 / add_maybe_i16 @ 7,
        default_i16 / add_default_i16 @ 8 = 42,
    }
    u16 {
        just_u16 / add_just_u16 @ 9 = 0,
        maybe_u16 / add_maybe_u16 @ 10,
        default_u16 / add_default_u16 @ 11 = 42,
    }
    i32 {
        just_i32 / add_just_i32 @ 12 = 0,
        maybe_i32 / add_maybe_i32 @ 13,
        default_i32 / add_default_i32 @ 14 = 42,
    }
    u32 {
        just_u32 / add_just_u32 @ 15 = 0,
        maybe_u32 / add_maybe_u32 @ 16,
        default_u32 / add_default_u32 @ 17 = 42,
    }
    i64 {
        just_i64 / add_just_i64 @ 18 = 0,
        maybe_i64 / add_maybe_i64 @ 19,
        default_i64 / add_default_i64 @ 20 = 42,
    }
    u64 {
        just_u64 / add_just_u64 @ 21 = 0,
        maybe_u64 / add_maybe_u64 @ 22,
        default_u64 / add_default_u64 @ 23 = 42,
    }
    f32 {
        just_f32 / add_just_f32 @ 24 = 0.0,
        maybe_f32 / add_maybe_f32 @ 25,
        default_f32 / add_default_f32 @ 26 = 42.0,
    }
    f64 {
        just_f64 / add_just_f64 @ 27 = 0.0,
        maybe_f64 / add_maybe_f64 @ 28,
        default_f64 / add_default_f64 @ 29 = 42.0,
    }
    bool {
        just_bool / add_just_bool @ 30 = false,
        maybe_bool / add_maybe_bool @ 31,
        default_bool / add_default_bool @ 32 = true,
    }
    OptionalByte {
        just_enum / add_just_enum @ 33 = OptionalByte::NONE,
        maybe_enum / add_maybe_enum @ 34,
        default_enum / add_default_enum @ 35 = OptionalByte::ONE,
    }
}

impl ScalarStuff<'_> {
    pub const FIELD_COUNT: usize = 36;
}

pub fn root_as_scalar_stuff(buf: &[u8]) -> Result<ScalarStuff<'_>, ReadError> {
    root_table(buf).map(ScalarStuff::from_table)
}
