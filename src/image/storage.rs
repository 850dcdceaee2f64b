//! Shared pixel storage.
//!
//! A [`SharedPix`] is a window `[start, start + len)` into a
//! reference-counted byte vector. Sub-images hold windows into their
//! parent's vector, so writes through one view are seen by every other.

use std::ops::{Deref, DerefMut, Range};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug)]
pub struct SharedPix {
    data: Arc<RwLock<Vec<u8>>>,
    start: usize,
    len: usize,
}

impl SharedPix {
    pub fn zeroed(len: usize) -> Self {
        Self::from_vec(vec![0u8; len])
    }

    pub fn from_vec(v: Vec<u8>) -> Self {
        let len = v.len();
        Self {
            data: Arc::new(RwLock::new(v)),
            start: 0,
            len,
        }
    }

    pub fn empty() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// A view of this window from `offset` to its end, sharing storage.
    pub fn tail(&self, offset: usize) -> SharedPix {
        let offset = offset.min(self.len);
        SharedPix {
            data: Arc::clone(&self.data),
            start: self.start + offset,
            len: self.len - offset,
        }
    }

    pub fn shares_storage(&self, other: &SharedPix) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Read access to the window. Holding it while writing through any
    /// view of the same storage on the same thread deadlocks.
    pub fn read(&self) -> PixRef<'_> {
        PixRef {
            guard: self.data.read().unwrap_or_else(PoisonError::into_inner),
            range: self.range(),
        }
    }

    pub fn write(&self) -> PixMut<'_> {
        PixMut {
            guard: self.data.write().unwrap_or_else(PoisonError::into_inner),
            range: self.range(),
        }
    }

    /// Copies the window out.
    pub fn to_vec(&self) -> Vec<u8> {
        self.read().to_vec()
    }

    fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

pub struct PixRef<'a> {
    guard: RwLockReadGuard<'a, Vec<u8>>,
    range: Range<usize>,
}

impl Deref for PixRef<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.guard[self.range.clone()]
    }
}

pub struct PixMut<'a> {
    guard: RwLockWriteGuard<'a, Vec<u8>>,
    range: Range<usize>,
}

impl Deref for PixMut<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.guard[self.range.clone()]
    }
}

impl DerefMut for PixMut<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        let range = self.range.clone();
        &mut self.guard[range]
    }
}
