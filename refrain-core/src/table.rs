//! Fixed-capacity hash table with separate chaining.
//!
//! Each slot is an [`OrderedList`] bucket. The bucket count is chosen at
//! construction and never changes: there is no rehashing, so the load factor
//! grows without bound and chains simply get longer.
//!
//! The table has set semantics for lookup but does not enforce uniqueness on
//! insert. Callers that need unique keys check [`ChainedTable::contains`]
//! before [`ChainedTable::add`].
//!
//! ## Slot Selection
//!
//! Elements are hashed through a [`BuildHasher`] (`FxBuildHasher` by
//! default). The 64-bit hash is read as a signed integer `h` and the slot is
//! `|h mod capacity|`. Taking the remainder before the absolute value means
//! `h == i64::MIN` never needs an unrepresentable `|i64::MIN|`.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

use refrain_types::CollectionError;
use rustc_hash::FxBuildHasher;

use crate::list::OrderedList;

/// Maps a signed hash onto `0..capacity`.
#[inline(always)]
pub(crate) fn slot_for(hash: i64, capacity: NonZeroUsize) -> usize {
    (hash % capacity.get() as i64).unsigned_abs() as usize
}

/// Hash table with one [`OrderedList`] per slot.
pub struct ChainedTable<T, S = FxBuildHasher> {
    buckets: Vec<OrderedList<T>>,
    capacity: NonZeroUsize,
    len: usize,
    hasher: S,
}

impl<T> ChainedTable<T> {
    /// Creates a table with `capacity` buckets.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, CollectionError> {
        Self::with_hasher(capacity, FxBuildHasher)
    }

    /// Creates a table with a bucket count that is known to be valid.
    pub fn with_buckets(capacity: NonZeroUsize) -> Self {
        Self::with_buckets_and_hasher(capacity, FxBuildHasher)
    }
}

impl<T, S> ChainedTable<T, S> {
    /// Creates a table with `capacity` buckets and a custom hasher.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError::InvalidArgument` if `capacity` is zero.
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self, CollectionError> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CollectionError::InvalidArgument(
            "table capacity must be greater than zero",
        ))?;
        Ok(Self::with_buckets_and_hasher(capacity, hasher))
    }

    /// Creates a table from a validated bucket count and a hasher.
    pub fn with_buckets_and_hasher(capacity: NonZeroUsize, hasher: S) -> Self {
        Self {
            buckets: (0..capacity.get()).map(|_| OrderedList::new()).collect(),
            capacity,
            len: 0,
            hasher,
        }
    }

    /// Returns the number of stored elements.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no elements are stored.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed bucket count.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity.get() as f64
    }

    /// Returns the number of elements chained in `bucket`.
    pub fn bucket_len(&self, bucket: usize) -> Result<usize, CollectionError> {
        self.bucket(bucket).map(OrderedList::len)
    }

    /// Iterates in bucket order, then insertion order within a bucket.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flat_map(OrderedList::iter)
    }

    /// Collects every element in [`iter`](Self::iter) order.
    pub fn all_elements(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Removes every element. The bucket count is kept.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    fn bucket(&self, bucket: usize) -> Result<&OrderedList<T>, CollectionError> {
        self.buckets
            .get(bucket)
            .ok_or(CollectionError::IndexOutOfBounds {
                index: bucket,
                len: self.buckets.len(),
            })
    }
}

impl<T, S: BuildHasher> ChainedTable<T, S> {
    #[inline]
    fn slot<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        slot_for(self.hasher.hash_one(key) as i64, self.capacity)
    }

    /// Appends `element` to the end of its bucket. Duplicates are not rejected.
    pub fn add(&mut self, element: T)
    where
        T: Hash,
    {
        let slot = self.slot(&element);
        self.buckets[slot].add_last(element);
        self.len += 1;
    }

    /// Returns the bucket index holding an element equal to `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot(key);
        self.buckets[slot]
            .iter()
            .any(|e| <T as Borrow<Q>>::borrow(e) == key)
            .then_some(slot)
    }

    /// Returns `true` if an element equal to `key` is stored.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the first stored element equal to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot(key);
        self.buckets[slot].iter().find(|e| <T as Borrow<Q>>::borrow(e) == key)
    }

    /// Removes and returns the first stored element equal to `key`.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = self.slot(key);
        let bucket = &mut self.buckets[slot];
        bucket.position_at_first();
        while !bucket.is_at_end() {
            if <T as Borrow<Q>>::borrow(bucket.cursor_value().ok()?) == key {
                let removed = bucket.remove_at_cursor().ok()?;
                self.len -= 1;
                return Some(removed);
            }
            bucket.advance().ok()?;
        }
        None
    }

    /// Removes the first stored element equal to `key`.
    ///
    /// Returns `true` if an element was removed.
    #[inline]
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.take(key).is_some()
    }
}

impl<T: Hash> ChainedTable<T> {
    /// Builds a table with `capacity` buckets holding every element of `iter`.
    pub fn from_iter_with_capacity<I>(iter: I, capacity: usize) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut table = Self::new(capacity)?;
        for element in iter {
            table.add(element);
        }
        Ok(table)
    }
}

impl<T: fmt::Display, S> ChainedTable<T, S> {
    /// Renders one bucket's chain.
    pub fn bucket_string(&self, bucket: usize) -> Result<String, CollectionError> {
        self.bucket(bucket).map(ToString::to_string)
    }

    /// Renders `"Bucket i: <first element or empty>"` per bucket, one per line.
    pub fn row_summary(&self) -> String {
        let mut out = String::new();
        for (i, bucket) in self.buckets.iter().enumerate() {
            match bucket.first() {
                Ok(first) => out.push_str(&format!("Bucket {i}: {first}\n")),
                Err(_) => out.push_str(&format!("Bucket {i}: empty\n")),
            }
        }
        out
    }
}

impl<T: fmt::Debug, S> fmt::Debug for ChainedTable<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedTable")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("buckets", &self.buckets)
            .finish()
    }
}
