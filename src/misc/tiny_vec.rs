use std::{fmt::Debug, mem::MaybeUninit, ops::Deref};

/// Fixed capacity vector stored inline. Used for pending dice and the moves
/// of a single turn, both of which never exceed four entries.
#[derive(Clone, Copy)]
pub struct TinyVec<T, const N: usize>
where
    T: Copy,
{
    buf: [MaybeUninit<T>; N],
    len: u8,
}

impl<T, const N: usize> TinyVec<T, N>
where
    T: Copy,
{
    pub const fn new() -> Self {
        const { assert!(N <= 255, "TinyVec supports up to 255 elements") }
        TinyVec { buf: [const { MaybeUninit::uninit() }; N], len: 0 }
    }

    /// Copies `values` into a new vector. Panics if `values` exceeds the capacity.
    pub fn from_slice(values: &[T]) -> Self {
        let mut vec = Self::new();
        for &value in values {
            vec.push(value);
        }
        vec
    }

    pub fn push(&mut self, val: T) {
        assert!((self.len as usize) < N, "TinyVec is full");
        self.buf[self.len as usize].write(val);
        self.len += 1;
    }

    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 { return None; }
        self.len -= 1;
        // SAFETY: previously pushed, so initialized
        Some(unsafe { self.buf[self.len as usize].assume_init_read() })
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        if idx < self.len as usize {
            // SAFETY: the slot was initialized
            Some(unsafe { &*self.buf[idx].as_ptr() })
        } else { None }
    }

    pub fn len(&self) -> u8 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Removes the first element equal to `value`, keeping the order of the rest.
    /// Returns `false` if no such element exists.
    pub fn remove_first(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let Some(pos) = self.iter().position(|v| v == value) else {
            return false;
        };
        for i in pos..(self.len as usize - 1) {
            self.buf[i] = self.buf[i + 1];
        }
        self.len -= 1;
        true
    }
}

impl<T: Copy, const N: usize> Default for TinyVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, const N: usize> Deref for TinyVec<T, N> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        // SAFETY: Only the first `self.len` elements are initialized
        unsafe {
            std::slice::from_raw_parts(self.buf.as_ptr() as *const T, self.len as usize)
        }
    }
}

impl<T: Copy + PartialEq, const N: usize> PartialEq for TinyVec<T, N> {
    fn eq(&self, other: &Self) -> bool {
        **self == **other
    }
}

impl<T: Copy + Eq, const N: usize> Eq for TinyVec<T, N> {}

impl<T: Copy + Debug, const N: usize> Debug for TinyVec<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
