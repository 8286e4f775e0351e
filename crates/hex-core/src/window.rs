//! Fixed-capacity ring buffer.
//!
//! The template scanner keeps one slot per edge column that still has live
//! templates starting at it. Slots are appended at the back as the scan moves
//! along the edge and dropped from the front once they are dead, so the buffer
//! never needs more room than the widest template.

use crate::error::HexError;

/// A FIFO of at most `2^capacity_log` values with indexed access from the front
#[derive(Debug, Clone)]
pub struct SlidingWindow<T> {
    elements: Vec<T>,
    /// `capacity - 1`; capacity is a power of two so wrapping is a mask
    mask: usize,
    start: usize,
    len: usize,
}

impl<T: Copy + Default> SlidingWindow<T> {
    /// A window holding up to `2^capacity_log` values
    pub fn new(capacity_log: u32) -> Self {
        let capacity = 1usize << capacity_log;
        Self {
            elements: vec![T::default(); capacity],
            mask: capacity - 1,
            start: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.elements.len()
    }

    /// Append at the back
    pub fn push(&mut self, value: T) -> Result<(), HexError> {
        if self.len == self.capacity() {
            return Err(HexError::WindowOverflow {
                capacity: self.capacity(),
            });
        }
        let slot = (self.start + self.len) & self.mask;
        self.elements[slot] = value;
        self.len += 1;
        Ok(())
    }

    /// Remove from the front
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let value = self.elements[self.start];
        self.start = (self.start + 1) & self.mask;
        self.len -= 1;
        Some(value)
    }

    /// The front value
    pub fn front(&self) -> Option<T> {
        (self.len > 0).then(|| self.elements[self.start])
    }

    pub fn clear(&mut self) {
        self.start = 0;
        self.len = 0;
    }

    /// Value `index` places behind the front
    pub fn get(&self, index: usize) -> Result<T, HexError> {
        let slot = self.slot(index)?;
        Ok(self.elements[slot])
    }

    /// Overwrite the value `index` places behind the front
    pub fn set(&mut self, index: usize, value: T) -> Result<(), HexError> {
        let slot = self.slot(index)?;
        self.elements[slot] = value;
        Ok(())
    }

    /// Front to back
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.len).map(move |i| self.elements[(self.start + i) & self.mask])
    }

    fn slot(&self, index: usize) -> Result<usize, HexError> {
        if index >= self.len {
            return Err(HexError::WindowIndex {
                index,
                len: self.len,
            });
        }
        Ok((self.start + index) & self.mask)
    }
}
