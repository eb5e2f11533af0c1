//! Growable record store with explicit doubling.
//!
//! Records live in one contiguous vector and are addressed by index. Capacity
//! is tracked here rather than left to `Vec`'s growth policy so that the
//! doubling behavior is observable.

use std::ops::{Deref, DerefMut};

use crate::error::StoreError;

/// Ordered sequence of records with amortized O(1) append.
#[derive(Debug, Clone)]
pub struct RecordStore<T> {
    records: Vec<T>,
    capacity: usize,
    released: bool,
}

impl<T> RecordStore<T> {
    /// Create an empty store. The first append allocates room for one record.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            capacity: 0,
            released: false,
        }
    }

    /// Create a store with room for `capacity` records.
    pub fn with_capacity(capacity: usize) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.init(capacity)?;
        Ok(store)
    }

    /// (Re)initialize the store with room for `capacity` records.
    ///
    /// Any existing records are dropped. A released store becomes usable again.
    pub fn init(&mut self, capacity: usize) -> Result<(), StoreError> {
        let mut records = Vec::new();
        records
            .try_reserve_exact(capacity)
            .map_err(|_| StoreError::Allocation(capacity))?;
        self.records = records;
        self.capacity = capacity;
        self.released = false;
        Ok(())
    }

    /// Number of records the store holds before it has to grow.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a record, doubling capacity first if the store is full.
    pub fn push(&mut self, record: T) -> Result<(), StoreError> {
        self.reserve_one()?;
        self.records.push(record);
        Ok(())
    }

    /// Remove the record at `index`, moving the last record into its slot.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn swap_remove(&mut self, index: usize) -> T {
        self.records.swap_remove(index)
    }

    /// Free the backing storage. The store is unusable until [`init`](Self::init).
    pub fn release(&mut self) {
        self.records = Vec::new();
        self.capacity = 0;
        self.released = true;
    }

    /// Whether [`release`](Self::release) was called since the last init.
    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Consume the store, returning its records in order.
    pub fn into_vec(self) -> Vec<T> {
        self.records
    }

    fn reserve_one(&mut self) -> Result<(), StoreError> {
        if self.released {
            return Err(StoreError::Released);
        }
        if self.records.len() < self.capacity {
            return Ok(());
        }

        let grown = (self.capacity * 2).max(1);
        self.records
            .try_reserve_exact(grown - self.records.len())
            .map_err(|_| StoreError::Allocation(grown))?;
        self.capacity = grown;
        Ok(())
    }
}

impl<T: Default> RecordStore<T> {
    /// Reserve a default-initialized record at the end and return it.
    ///
    /// Records below the new length keep their indices.
    pub fn append_slot(&mut self) -> Result<&mut T, StoreError> {
        self.push(T::default())?;
        let last = self.records.len() - 1;
        Ok(&mut self.records[last])
    }
}

/// Stores are equal when their records are; capacity is not compared.
impl<T: PartialEq> PartialEq for RecordStore<T> {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl<T: Eq> Eq for RecordStore<T> {}

impl<T> Default for RecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for RecordStore<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.records
    }
}

impl<T> DerefMut for RecordStore<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.records
    }
}

impl<'a, T> IntoIterator for &'a RecordStore<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl<T> From<Vec<T>> for RecordStore<T> {
    fn from(records: Vec<T>) -> Self {
        let capacity = records.len();
        Self {
            records,
            capacity,
            released: false,
        }
    }
}
