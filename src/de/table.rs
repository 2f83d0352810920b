use crate::Error;
use std::slice;

/// The default capacity of each shared string table.
///
/// Smile back-references carry at most 10 bits of index, so no conformant encoder refers to more entries than this.
pub const DEFAULT_CAPACITY: usize = 1024;

/// The behavior of a [`ReferenceTable`] that is asked to store a string while full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableOverflow {
    /// Clear the table and start numbering entries from zero again.
    ///
    /// Jackson's encoder resets its own table at the same point.
    Reset,
    /// Fail the decode with an error of kind [`ErrorKind::TableOverflow`](crate::ErrorKind::TableOverflow).
    Reject,
    /// Keep the existing entries and drop the new one.
    Ignore,
}

impl Default for TableOverflow {
    fn default() -> Self {
        TableOverflow::Reset
    }
}

/// A table of previously seen strings addressable by Smile back-references.
///
/// Each decode session owns two of these: one for field names and one for short string values. Entries borrow from
/// the input buffer.
#[derive(Debug)]
pub struct ReferenceTable<'a> {
    vec: Vec<&'a str>,
    capacity: usize,
    overflow: TableOverflow,
}

impl<'a> ReferenceTable<'a> {
    pub(crate) fn new(capacity: usize, overflow: TableOverflow) -> Self {
        ReferenceTable {
            vec: vec![],
            capacity,
            overflow,
        }
    }

    /// Stores a string, returning its index, or `None` if it was dropped under [`TableOverflow::Ignore`].
    ///
    /// `offset` is only used to report a [`TableOverflow::Reject`] failure.
    pub(crate) fn add(&mut self, s: &'a str, offset: usize) -> Result<Option<usize>, Error> {
        if self.vec.len() >= self.capacity {
            match self.overflow {
                TableOverflow::Reset => {
                    log::trace!("shared string table reached {} entries, resetting", self.capacity);
                    self.vec.clear();
                    // a zero capacity table never holds anything
                    if self.capacity == 0 {
                        return Ok(None);
                    }
                }
                TableOverflow::Reject => return Err(Error::shared_table_full(offset)),
                TableOverflow::Ignore => return Ok(None),
            }
        }

        self.vec.push(s);
        Ok(Some(self.vec.len() - 1))
    }

    /// Looks up a back-reference.
    pub(crate) fn resolve(&self, index: usize, offset: usize) -> Result<&'a str, Error> {
        self.get(index)
            .ok_or_else(|| Error::invalid_string_reference(offset))
    }

    /// Returns the string stored at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.vec.get(index).copied()
    }

    /// Returns the number of strings currently stored.
    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Returns `true` if the table holds no strings.
    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    /// Returns the maximum number of strings the table holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns an iterator over the stored strings in index order.
    pub fn iter(&self) -> TableIter<'_, 'a> {
        TableIter(self.vec.iter())
    }
}

/// An iterator over the strings of a [`ReferenceTable`].
pub struct TableIter<'b, 'a>(slice::Iter<'b, &'a str>);

impl<'a> Iterator for TableIter<'_, 'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<&'a str> {
        self.0.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn add_and_resolve() {
        let mut table = ReferenceTable::new(4, TableOverflow::Reset);
        assert_eq!(table.add("a", 0).unwrap(), Some(0));
        assert_eq!(table.add("b", 0).unwrap(), Some(1));
        assert_eq!(table.resolve(1, 0).unwrap(), "b");

        let err = table.resolve(2, 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidBackReference);
        assert_eq!(err.offset(), 7);
    }

    #[test]
    fn reset_on_overflow() {
        let mut table = ReferenceTable::new(2, TableOverflow::Reset);
        table.add("a", 0).unwrap();
        table.add("b", 0).unwrap();
        assert_eq!(table.add("c", 0).unwrap(), Some(0));
        assert_eq!(table.iter().collect::<Vec<_>>(), ["c"]);
    }

    #[test]
    fn reject_on_overflow() {
        let mut table = ReferenceTable::new(1, TableOverflow::Reject);
        table.add("a", 0).unwrap();
        let err = table.add("b", 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TableOverflow);
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn ignore_on_overflow() {
        let mut table = ReferenceTable::new(1, TableOverflow::Ignore);
        table.add("a", 0).unwrap();
        assert_eq!(table.add("b", 0).unwrap(), None);
        assert_eq!(table.iter().collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn zero_capacity() {
        let mut table = ReferenceTable::new(0, TableOverflow::Reset);
        assert_eq!(table.add("a", 0).unwrap(), None);
        assert!(table.is_empty());
    }
}
