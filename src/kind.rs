//! Tag kinds.
//!
//! Every tag in a tree has one of thirteen kinds. The numeric id of a kind is
//! what the binary format writes in front of each named tag and each list.

use std::fmt;

/// The closed set of tag kinds.
///
/// [`TagKind::End`] only exists on the wire, where it terminates a compound
/// (or marks the element kind of an empty, untyped list). It never appears as
/// the kind of a [`Tag`](crate::Tag).
///
/// # Examples
///
/// ```rust
/// use nbt_codec::TagKind;
///
/// assert_eq!(TagKind::Compound.id(), 10);
/// assert_eq!(TagKind::from_id(3), Some(TagKind::Int));
/// assert_eq!(TagKind::from_id(13), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TagKind {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

const KINDS: [TagKind; 13] = [
    TagKind::End,
    TagKind::Byte,
    TagKind::Short,
    TagKind::Int,
    TagKind::Long,
    TagKind::Float,
    TagKind::Double,
    TagKind::ByteArray,
    TagKind::String,
    TagKind::List,
    TagKind::Compound,
    TagKind::IntArray,
    TagKind::LongArray,
];

const NAMES: [&str; 13] = [
    "TAG_End",
    "TAG_Byte",
    "TAG_Short",
    "TAG_Int",
    "TAG_Long",
    "TAG_Float",
    "TAG_Double",
    "TAG_Byte_Array",
    "TAG_String",
    "TAG_List",
    "TAG_Compound",
    "TAG_Int_Array",
    "TAG_Long_Array",
];

impl TagKind {
    /// Returns the wire id of this kind.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Looks up a kind by its wire id.
    #[inline]
    #[must_use]
    pub const fn from_id(id: u8) -> Option<TagKind> {
        if (id as usize) < KINDS.len() {
            Some(KINDS[id as usize])
        } else {
            None
        }
    }

    /// Returns the conventional `TAG_*` name of this kind.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Returns `true` for the fixed-width numeric kinds.
    #[inline]
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            TagKind::Byte
                | TagKind::Short
                | TagKind::Int
                | TagKind::Long
                | TagKind::Float
                | TagKind::Double
        )
    }

    /// Returns `true` for `ByteArray`, `IntArray` and `LongArray`.
    #[inline]
    #[must_use]
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            TagKind::ByteArray | TagKind::IntArray | TagKind::LongArray
        )
    }

    /// Returns `true` for `List` and `Compound`.
    #[inline]
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, TagKind::List | TagKind::Compound)
    }
}

impl TryFrom<u8> for TagKind {
    type Error = u8;

    fn try_from(id: u8) -> std::result::Result<Self, u8> {
        TagKind::from_id(id).ok_or(id)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_table_positions() {
        for id in 0..13u8 {
            let kind = TagKind::from_id(id).unwrap();
            assert_eq!(kind.id(), id);
        }
    }

    #[test]
    fn test_unknown_id() {
        assert_eq!(TagKind::try_from(42), Err(42));
        assert_eq!(TagKind::from_id(255), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(TagKind::ByteArray.to_string(), "TAG_Byte_Array");
        assert_eq!(TagKind::End.to_string(), "TAG_End");
    }
}
