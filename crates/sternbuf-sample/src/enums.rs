//! Schema enums.
//!
//! Enums are open: a buffer may carry a value the schema does not declare,
//! and reading it back yields that value unchanged. Each enum is therefore a
//! transparent newtype over its underlying integer rather than a Rust `enum`.

use std::fmt;

use serde::{Deserialize, Serialize};
use sternbuf::Scalar;

macro_rules! schema_enum {
    (
        $(#[$meta:meta])*
        $name:ident($repr:ty) {
            $($variant:ident = $value:literal => $label:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(pub $repr);

        impl $name {
            $(pub const $variant: Self = Self($value);)+

            pub const ENUM_VALUES: &'static [Self] = &[$(Self::$variant),+];

            /// Declared name of this value, `None` for undeclared values.
            pub fn variant_name(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($label),)+
                    _ => None,
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($label => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn is_declared(self) -> bool {
                self.variant_name().is_some()
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.variant_name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "<UNKNOWN {}>", self.0),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.variant_name() {
                    Some(name) => f.write_str(name),
                    None => write!(f, "{}", self.0),
                }
            }
        }

        impl Scalar for $name {
            const SIZE: usize = <$repr as Scalar>::SIZE;

            #[inline]
            fn read_le(bytes: &[u8]) -> Self {
                Self(<$repr>::read_le(bytes))
            }

            #[inline]
            fn write_le(self, out: &mut [u8]) {
                self.0.write_le(out)
            }
        }
    };
}

schema_enum! {
    /// Monster colour. Values are bit positions, not a dense range.
    Color(u8) {
        RED = 1 => "Red",
        GREEN = 2 => "Green",
        BLUE = 8 => "Blue",
    }
}

schema_enum! {
    OptionalByte(i8) {
        NONE = 0 => "None",
        ONE = 1 => "One",
        TWO = 2 => "Two",
    }
}

schema_enum! {
    /// Tag selecting the member of the `Equipment` union.
    EquipmentType(u8) {
        NONE = 0 => "NONE",
        MONSTER = 1 => "Monster",
        WEAPON = 2 => "Weapon",
    }
}
