//! Ordered compound container.
//!
//! [`CompoundTag`] keeps its children in insertion order, which is the order
//! both codecs write them in. Children are full [`Tag`]s: each carries its own
//! name.
//!
//! ## Duplicate names
//!
//! The binary format does not forbid two children with the same name, so a
//! decoded compound may contain duplicates. Name-based accessors ([`get`],
//! [`get_mut`], [`edit`], [`remove`], [`insert`]) act on the *first* match.
//! Later duplicates are kept, written back out unchanged, and reachable
//! through [`get_all`] and [`iter`].
//!
//! [`get`]: CompoundTag::get
//! [`get_mut`]: CompoundTag::get_mut
//! [`edit`]: CompoundTag::edit
//! [`remove`]: CompoundTag::remove
//! [`insert`]: CompoundTag::insert
//! [`get_all`]: CompoundTag::get_all
//! [`iter`]: CompoundTag::iter
//!
//! ## Examples
//!
//! ```rust
//! use nbt_codec::{CompoundTag, Tag, TagValue};
//!
//! let mut compound = CompoundTag::new();
//! compound.push(Tag::new("name", "Steve"));
//! compound.push(Tag::new("level", 42));
//!
//! assert_eq!(compound.len(), 2);
//! assert_eq!(compound.get("level").and_then(|t| t.value().as_int()), Some(42));
//! ```

use crate::{Error, Result, Tag, TagValue};

/// An insertion-ordered sequence of named tags.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundTag {
    tags: Vec<Tag>,
}

impl CompoundTag {
    /// Creates an empty `CompoundTag`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::CompoundTag;
    ///
    /// let compound = CompoundTag::new();
    /// assert!(compound.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        CompoundTag { tags: Vec::new() }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        CompoundTag {
            tags: Vec::with_capacity(capacity),
        }
    }

    /// Appends a child, even if one with the same name already exists.
    pub fn push(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    /// Replaces the first child named like `tag`, or appends it.
    ///
    /// The replaced child is returned. Unlike [`edit`](CompoundTag::edit) the
    /// kind may change.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::{CompoundTag, Tag};
    ///
    /// let mut compound = CompoundTag::new();
    /// assert!(compound.insert(Tag::new("key", 42)).is_none());
    /// assert!(compound.insert(Tag::new("key", "text")).is_some());
    /// assert_eq!(compound.len(), 1);
    /// ```
    pub fn insert(&mut self, tag: Tag) -> Option<Tag> {
        match self.position(tag.name()) {
            Some(index) => Some(std::mem::replace(&mut self.tags[index], tag)),
            None => {
                self.tags.push(tag);
                None
            }
        }
    }

    /// Returns the first child named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name() == name)
    }

    /// Returns the first child named `name` for in-place editing.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Tag> {
        self.tags.iter_mut().find(|t| t.name() == name)
    }

    /// Returns every child named `name`, in order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nbt_codec::{CompoundTag, Tag};
    ///
    /// let mut compound = CompoundTag::new();
    /// compound.push(Tag::new("dup", 1));
    /// compound.push(Tag::new("dup", 2));
    /// assert_eq!(compound.get_all("dup").count(), 2);
    /// ```
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Tag> + 'a {
        self.tags.iter().filter(move |t| t.name() == name)
    }

    /// Returns the payload of the first child named `name`.
    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&TagValue> {
        self.get(name).map(Tag::value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Replaces the first child named `name` with `replacement`.
    ///
    /// The replacement keeps its own name. Returns the previous child.
    ///
    /// # Errors
    ///
    /// Fails if no child is named `name`, or with a type mismatch if the
    /// replacement's kind differs from the existing child's kind.
    pub fn edit(&mut self, name: &str, replacement: Tag) -> Result<Tag> {
        let tag = self
            .get_mut(name)
            .ok_or_else(|| Error::custom(format!("no tag named \"{}\"", name)))?;
        tag.edit(replacement)
    }

    /// Removes and returns the first child named `name`.
    pub fn remove(&mut self, name: &str) -> Option<Tag> {
        self.position(name).map(|index| self.tags.remove(index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Tag> {
        self.tags.iter_mut()
    }

    /// Child names in order, duplicates included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(Tag::name)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.name() == name)
    }
}

impl IntoIterator for CompoundTag {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.into_iter()
    }
}

impl<'a> IntoIterator for &'a CompoundTag {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

impl FromIterator<Tag> for CompoundTag {
    fn from_iter<T: IntoIterator<Item = Tag>>(iter: T) -> Self {
        CompoundTag {
            tags: iter.into_iter().collect(),
        }
    }
}
