//! Schema structs: fixed-layout values stored inline.

use serde::{Deserialize, Serialize};
use sternbuf::{Element, InlineStruct, Scalar};

use crate::enums::Color;

/// `struct Ability { id: short; level: byte; }`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: i16,
    pub level: i8,
}

impl Ability {
    pub const ID_OFFSET: usize = 0;
    pub const LEVEL_OFFSET: usize = 2;

    pub fn new(id: i16, level: i8) -> Self {
        Self { id, level }
    }
}

impl InlineStruct for Ability {
    const SIZE: usize = 4;
    const ALIGN: usize = 2;

    fn write_le(&self, out: &mut [u8]) {
        self.id.write_le(&mut out[Self::ID_OFFSET..]);
        self.level.write_le(&mut out[Self::LEVEL_OFFSET..]);
        out[3] = 0;
    }

    fn read_le(bytes: &[u8]) -> Self {
        Self {
            id: i16::read_le(&bytes[Self::ID_OFFSET..]),
            level: i8::read_le(&bytes[Self::LEVEL_OFFSET..]),
        }
    }
}

impl<'a> Element<'a> for Ability {
    const WIDTH: usize = <Ability as InlineStruct>::SIZE;

    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        <Ability as InlineStruct>::read_le(&buf[loc..])
    }
}

/// `struct Vec3 { x, y, z: float; dist: double; color: Color; ability: Ability; }`
///
/// Layout (32 bytes, 8-aligned):
///
/// ```text
///  0 x   4 y   8 z   12 pad
/// 16 dist
/// 24 color  25 pad  26 ability.id  28 ability.level  29 pad
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub dist: f64,
    pub color: Color,
    pub ability: Ability,
}

impl Vec3 {
    pub const X_OFFSET: usize = 0;
    pub const Y_OFFSET: usize = 4;
    pub const Z_OFFSET: usize = 8;
    pub const DIST_OFFSET: usize = 16;
    pub const COLOR_OFFSET: usize = 24;
    pub const ABILITY_OFFSET: usize = 26;
}

impl InlineStruct for Vec3 {
    const SIZE: usize = 32;
    const ALIGN: usize = 8;

    fn write_le(&self, out: &mut [u8]) {
        out[..Self::SIZE].fill(0);
        self.x.write_le(&mut out[Self::X_OFFSET..]);
        self.y.write_le(&mut out[Self::Y_OFFSET..]);
        self.z.write_le(&mut out[Self::Z_OFFSET..]);
        self.dist.write_le(&mut out[Self::DIST_OFFSET..]);
        self.color.write_le(&mut out[Self::COLOR_OFFSET..]);
        self.ability.write_le(&mut out[Self::ABILITY_OFFSET..]);
    }

    fn read_le(bytes: &[u8]) -> Self {
        Self {
            x: f32::read_le(&bytes[Self::X_OFFSET..]),
            y: f32::read_le(&bytes[Self::Y_OFFSET..]),
            z: f32::read_le(&bytes[Self::Z_OFFSET..]),
            dist: f64::read_le(&bytes[Self::DIST_OFFSET..]),
            color: Color::read_le(&bytes[Self::COLOR_OFFSET..]),
            ability: <Ability as InlineStruct>::read_le(&bytes[Self::ABILITY_OFFSET..]),
        }
    }
}

impl<'a> Element<'a> for Vec3 {
    const WIDTH: usize = <Vec3 as InlineStruct>::SIZE;

    fn read_at(buf: &'a [u8], loc: usize) -> Self {
        <Vec3 as InlineStruct>::read_le(&buf[loc..])
    }
}
