//! Homogeneous list container.
//!
//! A [`ListTag`] holds unnamed values that all share one element kind. The kind
//! is either given up front ([`ListTag::new`]) or taken from the first value
//! added to an untyped list ([`ListTag::untyped`]). Once fixed it never
//! changes, even if every element is removed again.
//!
//! ```rust
//! use nbt_codec::{ListTag, TagKind, TagValue};
//!
//! let mut list = ListTag::untyped();
//! list.push(TagValue::Int(1)).unwrap();
//! list.push(TagValue::Int(2)).unwrap();
//! assert_eq!(list.element_kind(), TagKind::Int);
//!
//! // a String does not fit into a list of ints, and the list is left as is
//! assert!(list.push(TagValue::from("three")).is_err());
//! assert_eq!(list.len(), 2);
//! ```

use crate::{CompoundTag, Error, Result, TagKind, TagValue};

/// An ordered list of values of a single kind.
#[derive(Clone, Debug, Default)]
pub struct ListTag {
    element_kind: Option<TagKind>,
    items: Vec<TagValue>,
}

impl ListTag {
    /// Creates an empty list whose element kind is fixed to `kind`.
    ///
    /// # Errors
    ///
    /// `TagKind::End` cannot be an element kind.
    pub fn new(kind: TagKind) -> Result<Self> {
        if kind == TagKind::End {
            return Err(Error::custom("TAG_End is not a valid list element kind"));
        }
        Ok(ListTag {
            element_kind: Some(kind),
            items: Vec::new(),
        })
    }

    /// Creates an empty list that takes its element kind from the first push.
    #[must_use]
    pub fn untyped() -> Self {
        Self::default()
    }

    /// Builds a list from `values`, inferring the element kind from the first.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if the values are not all of one kind.
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = TagValue>,
    {
        let mut list = ListTag::untyped();
        for value in values {
            list.push(value)?;
        }
        Ok(list)
    }

    /// The element kind, or `Compound` for a list that was never typed.
    #[inline]
    #[must_use]
    pub fn element_kind(&self) -> TagKind {
        self.element_kind.unwrap_or(TagKind::Compound)
    }

    /// Returns `true` once the element kind has been fixed.
    #[inline]
    #[must_use]
    pub fn is_typed(&self) -> bool {
        self.element_kind.is_some()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TagValue> {
        self.items.get(index)
    }

    /// Mutable access to a compound element, for editing nested trees.
    pub fn compound_mut(&mut self, index: usize) -> Option<&mut CompoundTag> {
        self.items.get_mut(index).and_then(TagValue::as_compound_mut)
    }

    /// Mutable access to a list element, for editing nested trees.
    pub fn list_mut(&mut self, index: usize) -> Option<&mut ListTag> {
        self.items.get_mut(index).and_then(TagValue::as_list_mut)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagValue> {
        self.items.iter()
    }

    /// Appends a value.
    ///
    /// # Errors
    ///
    /// Returns a type mismatch if `value` is not of the element kind.
    pub fn push(&mut self, value: TagValue) -> Result<()> {
        self.check(&value)?;
        self.element_kind = Some(value.kind());
        self.items.push(value);
        Ok(())
    }

    /// Inserts a value at `index`, shifting later elements.
    ///
    /// # Errors
    ///
    /// Fails on a kind mismatch or if `index > len`.
    pub fn insert(&mut self, index: usize, value: TagValue) -> Result<()> {
        self.check(&value)?;
        if index > self.items.len() {
            return Err(index_error(index, self.items.len()));
        }
        self.element_kind = Some(value.kind());
        self.items.insert(index, value);
        Ok(())
    }

    /// Replaces the value at `index` and returns the old one.
    ///
    /// # Errors
    ///
    /// Fails on a kind mismatch or if `index` is out of bounds.
    pub fn set(&mut self, index: usize, value: TagValue) -> Result<TagValue> {
        self.check(&value)?;
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or_else(|| index_error(index, len))?;
        Ok(std::mem::replace(slot, value))
    }

    /// Removes and returns the value at `index`.
    ///
    /// The element kind stays fixed even when the list becomes empty.
    pub fn remove(&mut self, index: usize) -> Option<TagValue> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    fn check(&self, value: &TagValue) -> Result<()> {
        match self.element_kind {
            Some(kind) if kind != value.kind() => Err(Error::type_mismatch(kind, value.kind())),
            _ => Ok(()),
        }
    }

    /// Pushes a value the binary reader has already decoded as the element kind.
    pub(crate) fn push_unchecked(&mut self, value: TagValue) {
        debug_assert_eq!(Some(value.kind()), self.element_kind);
        self.items.push(value);
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.items.reserve(additional);
    }
}

fn index_error(index: usize, len: usize) -> Error {
    Error::custom(format!("list index {} out of bounds (len {})", index, len))
}

/// Two lists are equal when their effective element kinds and values match,
/// so an untyped empty list equals an empty list of compounds.
impl PartialEq for ListTag {
    fn eq(&self, other: &Self) -> bool {
        self.element_kind() == other.element_kind() && self.items == other.items
    }
}

impl IntoIterator for ListTag {
    type Item = TagValue;
    type IntoIter = std::vec::IntoIter<TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ListTag {
    type Item = &'a TagValue;
    type IntoIter = std::slice::Iter<'a, TagValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untyped_defaults_to_compound() {
        let list = ListTag::untyped();
        assert!(!list.is_typed());
        assert_eq!(list.element_kind(), TagKind::Compound);
    }

    #[test]
    fn test_end_is_rejected_as_element_kind() {
        assert!(ListTag::new(TagKind::End).is_err());
    }

    #[test]
    fn test_kind_is_inferred_from_first_push() {
        let mut list = ListTag::untyped();
        list.push(TagValue::Short(3)).unwrap();
        assert!(list.is_typed());
        assert_eq!(list.element_kind(), TagKind::Short);
    }

    #[test]
    fn test_mismatch_leaves_list_untouched() {
        let mut list = ListTag::new(TagKind::Byte).unwrap();
        list.push(TagValue::Byte(1)).unwrap();

        let err = list.push(TagValue::Int(2)).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: TagKind::Byte,
                found: TagKind::Int
            }
        ));
        assert!(list.insert(0, TagValue::Long(2)).is_err());
        assert!(list.set(0, TagValue::Double(2.0)).is_err());
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0), Some(&TagValue::Byte(1)));
    }

    #[test]
    fn test_kind_survives_removal() {
        let mut list = ListTag::from_values(vec![TagValue::Int(1)]).unwrap();
        assert_eq!(list.remove(0), Some(TagValue::Int(1)));
        assert!(list.is_empty());
        assert!(list.push(TagValue::from("x")).is_err());
    }

    #[test]
    fn test_set_and_insert() {
        let mut list = ListTag::from_values(vec![TagValue::Int(1), TagValue::Int(3)]).unwrap();
        list.insert(1, TagValue::Int(2)).unwrap();
        let old = list.set(2, TagValue::Int(4)).unwrap();
        assert_eq!(old, TagValue::Int(3));
        let values: Vec<_> = list.iter().cloned().collect();
        assert_eq!(
            values,
            vec![TagValue::Int(1), TagValue::Int(2), TagValue::Int(4)]
        );
        assert!(list.insert(9, TagValue::Int(0)).is_err());
        assert!(list.set(9, TagValue::Int(0)).is_err());
    }

    #[test]
    fn test_untyped_empty_equals_empty_compound_list() {
        assert_eq!(
            ListTag::untyped(),
            ListTag::new(TagKind::Compound).unwrap()
        );
        assert_ne!(ListTag::untyped(), ListTag::new(TagKind::Int).unwrap());
    }
}
