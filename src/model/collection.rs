//! Index-addressed record collections
//!
//! Every repeated section of an itinerary is a [`Collection`]: records are
//! appended, edited one field at a time by index, and removed by index.
//! Records that carry a sequence number (days, installments) are renumbered
//! after every insertion and removal so their numbers stay contiguous from 1.

use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

/// A record that can live in a [`Collection`]
pub trait Record: Default {
    /// Section name used in error messages
    const SECTION: &'static str;

    /// Set one field by its persisted name, parsing numeric fields from text
    fn set_field(&mut self, field: &str, value: &str) -> Result<()>;

    /// Called with the record's 0-based position after the collection changes
    fn renumber(&mut self, _position: usize) {}

    /// Called once on a record created by [`Collection::add`], after renumbering
    fn init_new(&mut self, _position: usize) {}
}

/// Ordered, index-addressed list of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    /// Append a default record and return its index
    pub fn add(&mut self) -> usize {
        let index = self.push(T::default());
        self.items[index].init_new(index);
        index
    }

    /// Append a record and return its index
    pub fn push(&mut self, item: T) -> usize {
        self.items.push(item);
        self.renumber();
        self.items.len() - 1
    }

    /// Update one field of the record at `index`
    pub fn update(&mut self, index: usize, field: &str, value: &str) -> Result<()> {
        self.get_mut(index)?.set_field(field, value)
    }

    /// Remove the record at `index`, renumbering the rest
    pub fn remove(&mut self, index: usize) -> Result<T> {
        self.check(index)?;
        let removed = self.items.remove(index);
        self.renumber();
        Ok(removed)
    }

    /// Mutable access to the record at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check(index)?;
        Ok(&mut self.items[index])
    }

    /// Recompute sequence numbers from positions
    pub fn renumber(&mut self) {
        for (position, item) in self.items.iter_mut().enumerate() {
            item.renumber(position);
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                section: T::SECTION,
                index,
                len: self.items.len(),
            })
        }
    }
}

impl<T> Collection<T> {
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }
}

impl<T: Record> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut collection = Self { items: iter.into_iter().collect() };
        collection.renumber();
        collection
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Free-text entries such as flight notes
impl Record for String {
    const SECTION: &'static str = "flight_notes";

    fn set_field(&mut self, _field: &str, value: &str) -> Result<()> {
        *self = value.to_string();
        Ok(())
    }
}

/// Parse a numeric form value; blank text counts as zero
pub(crate) fn parse_count(section: &'static str, field: &'static str, value: &str) -> Result<u32> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| Error::InvalidField {
        section,
        field,
        value: value.to_string(),
    })
}

pub(crate) fn unknown_field(section: &'static str, field: &str) -> Error {
    Error::UnknownField {
        section,
        field: field.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Numbered {
        number: usize,
        label: String,
    }

    impl Record for Numbered {
        const SECTION: &'static str = "numbered";

        fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
            match field {
                "label" => self.label = value.to_string(),
                _ => return Err(unknown_field(Self::SECTION, field)),
            }
            Ok(())
        }

        fn renumber(&mut self, position: usize) {
            self.number = position + 1;
        }
    }

    fn numbers(collection: &Collection<Numbered>) -> Vec<usize> {
        collection.iter().map(|n| n.number).collect()
    }

    #[test]
    fn test_add_assigns_next_number() {
        let mut collection: Collection<Numbered> = Collection::default();
        assert_eq!(collection.add(), 0);
        assert_eq!(collection.add(), 1);
        assert_eq!(numbers(&collection), vec![1, 2]);
    }

    #[test]
    fn test_remove_renumbers_contiguously() {
        let mut collection: Collection<Numbered> = Collection::default();
        for label in ["a", "b", "c"] {
            let index = collection.add();
            collection.update(index, "label", label).unwrap();
        }

        let removed = collection.remove(1).unwrap();
        assert_eq!(removed.label, "b");
        assert_eq!(numbers(&collection), vec![1, 2]);
        assert_eq!(collection.get(1).unwrap().label, "c");
    }

    #[test]
    fn test_out_of_range_leaves_collection_untouched() {
        let mut collection: Collection<Numbered> = Collection::default();
        collection.add();

        let err = collection.remove(3).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 3, len: 1, .. }));
        assert!(collection.update(5, "label", "x").is_err());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut collection: Collection<Numbered> = Collection::default();
        collection.add();
        let err = collection.update(0, "colour", "red").unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("hotels", "nights", "").unwrap(), 0);
        assert_eq!(parse_count("hotels", "nights", " 3 ").unwrap(), 3);
        assert!(parse_count("hotels", "nights", "three").is_err());
        assert!(parse_count("hotels", "nights", "-1").is_err());
    }
}
