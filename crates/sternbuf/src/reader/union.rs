use super::table::Table;

/// Tag value meaning "no variant".
pub const UNION_NONE: u8 = 0;

/// A tagged enum with one constructor per declared union member.
///
/// Implementations match on `tag` exhaustively and keep unknown tags as a
/// distinct variant instead of failing.
pub trait UnionVariant<'a>: Sized {
    /// `value` is the table the union's value field points to, if present.
    fn from_tag(tag: u8, value: Option<Table<'a>>) -> Self;
}

/// Raw access for callers that dispatch on the tag themselves.
impl<'a> UnionVariant<'a> for (u8, Option<Table<'a>>) {
    fn from_tag(tag: u8, value: Option<Table<'a>>) -> Self {
        (tag, value)
    }
}
