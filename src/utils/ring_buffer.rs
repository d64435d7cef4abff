//! Fixed-capacity circular buffer
//!
//! Keeps a rolling window of the most recent samples without allocating after
//! creation. Logical index `0` is the oldest retained element and `-1` the
//! newest, so a chart can walk the window in either direction.

use crate::error::RingBufferError;

/// Generic wrap-around store with a fixed capacity
///
/// While filling, elements are appended in place and the cursor stays at
/// zero. Once `len == capacity` every push overwrites the slot under the
/// cursor, which is always the oldest element, and advances it.
#[derive(Debug, Clone, PartialEq)]
pub struct RingBuffer<T> {
    storage: Vec<T>,
    capacity: usize,
    cursor: usize,
}

impl<T> RingBuffer<T> {
    /// Allocate a buffer holding at most `capacity` elements
    pub fn new(capacity: usize) -> Result<Self, RingBufferError> {
        if capacity == 0 {
            return Err(RingBufferError::InvalidArgument);
        }

        Ok(Self {
            storage: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.storage.len() == self.capacity
    }

    /// Store `value`, overwriting the oldest element once full
    pub fn push(&mut self, value: T) {
        if self.storage.len() < self.capacity {
            self.storage.push(value);
        } else {
            self.storage[self.cursor] = value;
            self.cursor = (self.cursor + 1) % self.capacity;
        }
    }

    /// Element at logical `index`
    ///
    /// Non-negative indices count from the oldest element, negative ones from
    /// the newest (`-1` is the most recent push).
    pub fn get(&self, index: isize) -> Result<&T, RingBufferError> {
        self.physical_index(index)
            .map(|slot| &self.storage[slot])
            .ok_or(RingBufferError::OutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Most recently pushed element
    pub fn latest(&self) -> Option<&T> {
        self.get(-1).ok()
    }

    /// Forget every element but keep the allocation
    pub fn reset(&mut self) {
        self.storage.clear();
        self.cursor = 0;
    }

    /// Free the backing storage
    ///
    /// Consumes the buffer; a new one has to be created with [`RingBuffer::new`].
    pub fn release(self) {
        drop(self.storage);
    }

    /// Contents in logical order as two contiguous runs
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (front, back) = self.storage.split_at(self.cursor);
        (back, front)
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        let (older, newer) = self.as_slices();
        older.iter().chain(newer)
    }

    fn physical_index(&self, index: isize) -> Option<usize> {
        let len = self.len();
        let logical = if index < 0 {
            len.checked_sub(index.unsigned_abs())?
        } else {
            let index = index as usize;
            if index >= len {
                return None;
            }
            index
        };

        Some((self.cursor + logical) % len)
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copy the window out in logical order
    pub fn to_vec(&self) -> Vec<T> {
        let (older, newer) = self.as_slices();
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(older);
        out.extend_from_slice(newer);
        out
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, count: usize) -> RingBuffer<usize> {
        let mut buffer = RingBuffer::new(capacity).unwrap();
        buffer.extend(0..count);
        buffer
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        assert_eq!(
            RingBuffer::<f32>::new(0).unwrap_err(),
            RingBufferError::InvalidArgument
        );
    }

    #[test]
    fn test_new_buffer_is_empty() {
        let buffer = RingBuffer::<f32>::new(256).unwrap();
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.capacity(), 256);
        assert!(buffer.is_empty());
        assert!(!buffer.is_full());
        assert_eq!(buffer.latest(), None);
        assert_eq!(
            buffer.get(0).unwrap_err(),
            RingBufferError::OutOfRange { index: 0, len: 0 }
        );
        assert!(buffer.get(-1).is_err());
    }

    #[test]
    fn test_filling_to_capacity() {
        for capacity in 1..=16 {
            let buffer = filled(capacity, capacity);
            assert_eq!(buffer.len(), capacity);
            assert!(buffer.is_full());
            for i in 0..capacity {
                assert_eq!(*buffer.get(i as isize).unwrap(), i);
            }
            assert_eq!(*buffer.get(-1).unwrap(), capacity - 1);
        }
    }

    #[test]
    fn test_overflow_keeps_last_capacity_values() {
        for capacity in 1..=16 {
            for extra in 1..=(2 * capacity + 1) {
                let total = capacity + extra;
                let buffer = filled(capacity, total);

                assert_eq!(buffer.len(), capacity);
                let expected: Vec<usize> = (total - capacity..total).collect();
                assert_eq!(buffer.to_vec(), expected);
                assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), expected);
                assert_eq!(*buffer.get(0).unwrap(), total - capacity);
                assert_eq!(*buffer.get(-1).unwrap(), total - 1);
            }
        }
    }

    #[test]
    fn test_negative_indices_count_from_newest() {
        let buffer = filled(4, 6); // holds 2, 3, 4, 5
        assert_eq!(*buffer.get(-1).unwrap(), 5);
        assert_eq!(*buffer.get(-2).unwrap(), 4);
        assert_eq!(*buffer.get(-4).unwrap(), 2);
        assert_eq!(
            buffer.get(-5).unwrap_err(),
            RingBufferError::OutOfRange { index: -5, len: 4 }
        );
    }

    #[test]
    fn test_out_of_range_while_filling() {
        let buffer = filled(8, 3);
        assert_eq!(*buffer.get(2).unwrap(), 2);
        assert_eq!(*buffer.get(-3).unwrap(), 0);
        assert!(buffer.get(3).is_err());
        assert!(buffer.get(7).is_err());
        assert!(buffer.get(-4).is_err());
        assert!(buffer.get(isize::MIN).is_err());
        assert!(buffer.get(isize::MAX).is_err());
    }

    #[test]
    fn test_reset_then_push() {
        let mut buffer = filled(5, 12);
        let allocated = buffer.storage.capacity();

        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.capacity(), 5);
        assert_eq!(buffer.storage.capacity(), allocated);

        buffer.push(42);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.get(0).unwrap(), buffer.get(-1).unwrap());
        assert_eq!(*buffer.get(0).unwrap(), 42);
    }

    #[test]
    fn test_push_never_reallocates() {
        let mut buffer = RingBuffer::new(3).unwrap();
        let allocated = buffer.storage.capacity();
        buffer.extend(0..100);
        assert_eq!(buffer.storage.capacity(), allocated);
    }

    #[test]
    fn test_as_slices_after_wrap() {
        let buffer = filled(4, 6);
        let (older, newer) = buffer.as_slices();
        assert_eq!(older, &[2, 3]);
        assert_eq!(newer, &[4, 5]);
    }

    #[test]
    fn test_release_consumes_buffer() {
        let buffer = filled(4, 2);
        buffer.release();
    }
}
