//! The tag data model.
//!
//! This module provides [`Tag`], a named node of a tag tree, and [`TagValue`],
//! the payload sum type with one variant per tag kind (except `End`, which is
//! a wire marker and never a value).
//!
//! ## Core Types
//!
//! - [`Tag`]: a name plus a payload. The payload's kind cannot change after
//!   construction; [`Tag::set_value`] and [`Tag::edit`] reject other kinds.
//! - [`TagValue`]: the payload. Containers are [`CompoundTag`] and [`ListTag`].
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use nbt_codec::{CompoundTag, Tag, TagValue};
//!
//! let byte = TagValue::Byte(1);
//! let int = TagValue::from(42);
//! let text = TagValue::from("hello");
//!
//! let mut root = CompoundTag::new();
//! root.push(Tag::new("level", 42));
//! let root = Tag::new("root", root);
//! assert!(root.value().is_compound());
//! ```
//!
//! ### Type-checked Updates
//!
//! ```rust
//! use nbt_codec::{Tag, TagValue};
//!
//! let mut tag = Tag::new("health", 20.0f32);
//! tag.set_value(TagValue::Float(19.5)).unwrap();
//! assert!(tag.set_value(TagValue::Int(19)).is_err());
//! ```
//!
//! ### Converting to Other Formats
//!
//! `TagValue` implements `Serialize`, so any serde format can render it:
//!
//! ```rust
//! use nbt_codec::from_snbt;
//!
//! let value = from_snbt("{name: Steve, level: 42}").unwrap();
//! let json = serde_json::to_string(&value).unwrap();
//! assert_eq!(json, r#"{"name":"Steve","level":42}"#);
//! ```

use crate::{CompoundTag, Error, ListTag, Result, TagKind};
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A tag payload.
///
/// # Examples
///
/// ```rust
/// use nbt_codec::{TagKind, TagValue};
///
/// let value = TagValue::LongArray(vec![1, 2, 3]);
/// assert_eq!(value.kind(), TagKind::LongArray);
/// assert!(value.is_array());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum TagValue {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(ListTag),
    Compound(CompoundTag),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl TagValue {
    /// Returns the kind of this payload.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        match self {
            TagValue::Byte(_) => TagKind::Byte,
            TagValue::Short(_) => TagKind::Short,
            TagValue::Int(_) => TagKind::Int,
            TagValue::Long(_) => TagKind::Long,
            TagValue::Float(_) => TagKind::Float,
            TagValue::Double(_) => TagKind::Double,
            TagValue::ByteArray(_) => TagKind::ByteArray,
            TagValue::String(_) => TagKind::String,
            TagValue::List(_) => TagKind::List,
            TagValue::Compound(_) => TagKind::Compound,
            TagValue::IntArray(_) => TagKind::IntArray,
            TagValue::LongArray(_) => TagKind::LongArray,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_compound(&self) -> bool {
        matches!(self, TagValue::Compound(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, TagValue::List(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, TagValue::String(_))
    }

    /// Returns `true` for the six fixed-width numeric kinds.
    #[inline]
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        self.kind().is_array()
    }

    #[inline]
    #[must_use]
    pub fn as_byte(&self) -> Option<i8> {
        match self {
            TagValue::Byte(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_short(&self) -> Option<i16> {
        match self {
            TagValue::Short(v) => Some(*v),
            _ => None,
        }
    }

    /// If the value is an `Int`, returns it. Otherwise returns `None`.
    ///
    /// No widening happens: a `Byte` is not an `Int`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::TagValue;
    ///
    /// assert_eq!(TagValue::Int(7).as_int(), Some(7));
    /// assert_eq!(TagValue::Byte(7).as_int(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i32> {
        match self {
            TagValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_long(&self) -> Option<i64> {
        match self {
            TagValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f32> {
        match self {
            TagValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            TagValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Interprets a `Byte` as a boolean (non-zero is `true`).
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_byte().map(|b| b != 0)
    }

    /// Widens any integral scalar to `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TagValue::Byte(v) => Some(i64::from(*v)),
            TagValue::Short(v) => Some(i64::from(*v)),
            TagValue::Int(v) => Some(i64::from(*v)),
            TagValue::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// Widens any numeric scalar to `f64`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TagValue::Float(v) => Some(f64::from(*v)),
            TagValue::Double(v) => Some(*v),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TagValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_byte_array(&self) -> Option<&[i8]> {
        match self {
            TagValue::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_int_array(&self) -> Option<&[i32]> {
        match self {
            TagValue::IntArray(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_long_array(&self) -> Option<&[i64]> {
        match self {
            TagValue::LongArray(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&ListTag> {
        match self {
            TagValue::List(l) => Some(l),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut ListTag> {
        match self {
            TagValue::List(l) => Some(l),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_compound(&self) -> Option<&CompoundTag> {
        match self {
            TagValue::Compound(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub fn as_compound_mut(&mut self) -> Option<&mut CompoundTag> {
        match self {
            TagValue::Compound(c) => Some(c),
            _ => None,
        }
    }
}

impl AsRef<TagValue> for TagValue {
    fn as_ref(&self) -> &TagValue {
        self
    }
}

/// Renders the compact stringified form.
impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::snbt::to_string(self, &crate::SnbtOptions::default()))
    }
}

/// A named tag.
///
/// The name of an unnamed tag (list elements, text-form roots) is the empty
/// string, [`Tag::UNNAMED`].
#[derive(Clone, Debug, PartialEq)]
pub struct Tag {
    name: String,
    value: TagValue,
}

impl Tag {
    /// The name used when a tag has none.
    pub const UNNAMED: &'static str = "";

    /// Creates a named tag.
    pub fn new(name: impl Into<String>, value: impl Into<TagValue>) -> Self {
        Tag {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Creates a tag with the empty name.
    pub fn unnamed(value: impl Into<TagValue>) -> Self {
        Self::new(Self::UNNAMED, value)
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> TagKind {
        self.value.kind()
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &TagValue {
        &self.value
    }

    #[must_use]
    pub fn into_value(self) -> TagValue {
        self.value
    }

    /// Splits the tag into its name and payload.
    #[must_use]
    pub fn into_parts(self) -> (String, TagValue) {
        (self.name, self.value)
    }

    /// Replaces the payload with one of the same kind and returns the old one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if `value` has a different kind.
    pub fn set_value(&mut self, value: TagValue) -> Result<TagValue> {
        if value.kind() != self.kind() {
            return Err(Error::type_mismatch(self.kind(), value.kind()));
        }
        Ok(std::mem::replace(&mut self.value, value))
    }

    /// Replaces name and payload with `replacement`, which must be of the
    /// same kind. Returns the previous tag.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the kinds differ.
    pub fn edit(&mut self, replacement: Tag) -> Result<Tag> {
        if replacement.kind() != self.kind() {
            return Err(Error::type_mismatch(self.kind(), replacement.kind()));
        }
        Ok(std::mem::replace(self, replacement))
    }

    pub fn as_compound_mut(&mut self) -> Option<&mut CompoundTag> {
        self.value.as_compound_mut()
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListTag> {
        self.value.as_list_mut()
    }

    /// Mutable access to the element vector of an array tag.
    pub fn as_byte_array_mut(&mut self) -> Option<&mut Vec<i8>> {
        match &mut self.value {
            TagValue::ByteArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int_array_mut(&mut self) -> Option<&mut Vec<i32>> {
        match &mut self.value {
            TagValue::IntArray(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_long_array_mut(&mut self) -> Option<&mut Vec<i64>> {
        match &mut self.value {
            TagValue::LongArray(v) => Some(v),
            _ => None,
        }
    }
}

impl AsRef<TagValue> for Tag {
    fn as_ref(&self) -> &TagValue {
        &self.value
    }
}

impl From<TagValue> for Tag {
    fn from(value: TagValue) -> Self {
        Tag::unnamed(value)
    }
}

// From implementations for creating TagValue from Rust payload types
impl From<i8> for TagValue {
    fn from(value: i8) -> Self {
        TagValue::Byte(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        TagValue::Byte(i8::from(value))
    }
}

impl From<i16> for TagValue {
    fn from(value: i16) -> Self {
        TagValue::Short(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        TagValue::Int(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        TagValue::Long(value)
    }
}

impl From<f32> for TagValue {
    fn from(value: f32) -> Self {
        TagValue::Float(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        TagValue::Double(value)
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        TagValue::String(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        TagValue::String(value.to_string())
    }
}

impl From<Vec<i8>> for TagValue {
    fn from(value: Vec<i8>) -> Self {
        TagValue::ByteArray(value)
    }
}

impl From<Vec<i32>> for TagValue {
    fn from(value: Vec<i32>) -> Self {
        TagValue::IntArray(value)
    }
}

impl From<Vec<i64>> for TagValue {
    fn from(value: Vec<i64>) -> Self {
        TagValue::LongArray(value)
    }
}

impl From<ListTag> for TagValue {
    fn from(value: ListTag) -> Self {
        TagValue::List(value)
    }
}

impl From<CompoundTag> for TagValue {
    fn from(value: CompoundTag) -> Self {
        TagValue::Compound(value)
    }
}

impl Serialize for TagValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TagValue::Byte(v) => serializer.serialize_i8(*v),
            TagValue::Short(v) => serializer.serialize_i16(*v),
            TagValue::Int(v) => serializer.serialize_i32(*v),
            TagValue::Long(v) => serializer.serialize_i64(*v),
            TagValue::Float(v) => serializer.serialize_f32(*v),
            TagValue::Double(v) => serializer.serialize_f64(*v),
            TagValue::ByteArray(v) => v.serialize(serializer),
            TagValue::String(s) => serializer.serialize_str(s),
            TagValue::List(list) => {
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for item in list {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            TagValue::Compound(compound) => {
                let mut map = serializer.serialize_map(Some(compound.len()))?;
                for tag in compound {
                    map.serialize_entry(tag.name(), tag.value())?;
                }
                map.end()
            }
            TagValue::IntArray(v) => v.serialize(serializer),
            TagValue::LongArray(v) => v.serialize(serializer),
        }
    }
}

/// A tag serializes as a single-entry map from its name to its payload.
impl Serialize for Tag {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.name, &self.value)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for TagValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TagValueVisitor;

        impl<'de> Visitor<'de> for TagValueVisitor {
            type Value = TagValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a value representable as a tag")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(TagValue::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(match i32::try_from(value) {
                    Ok(v) => TagValue::Int(v),
                    Err(_) => TagValue::Long(value),
                })
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                if let Ok(v) = i32::try_from(value) {
                    Ok(TagValue::Int(v))
                } else if let Ok(v) = i64::try_from(value) {
                    Ok(TagValue::Long(v))
                } else {
                    Err(E::custom(format!("integer {} does not fit in a long", value)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(TagValue::Double(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(TagValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(TagValue::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("null has no tag representation"))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut list = ListTag::untyped();
                while let Some(value) = seq.next_element::<TagValue>()? {
                    list.push(value).map_err(de::Error::custom)?;
                }
                Ok(TagValue::List(list))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut compound = CompoundTag::new();
                while let Some((key, value)) = map.next_entry::<String, TagValue>()? {
                    compound.push(Tag::new(key, value));
                }
                Ok(TagValue::Compound(compound))
            }
        }

        deserializer.deserialize_any(TagValueVisitor)
    }
}
