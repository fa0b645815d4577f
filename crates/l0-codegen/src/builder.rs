//! A growable, arena-backed byte buffer (§4.8).
//!
//! Growth doubles capacity and re-homes the contents into a fresh arena
//! allocation rather than reallocating in place — the same "alloc new,
//! memcpy, leak the old block" strategy `Arena` itself uses when a bump
//! block fills up.

use l0_mem::Arena;
use std::cell::RefCell;
use std::fmt;

struct BuilderState<'arena> {
    buf: &'arena mut [u8],
    len: usize,
}

/// A growable byte buffer. Cheap to pass by shared reference: all mutation
/// goes through an internal `RefCell`.
pub struct StringBuilder<'arena> {
    arena: &'arena Arena,
    state: RefCell<BuilderState<'arena>>,
}

impl<'arena> StringBuilder<'arena> {
    /// Creates a builder with at least `capacity` bytes of initial backing
    /// storage.
    #[must_use]
    pub fn init(arena: &'arena Arena, capacity: usize) -> Self {
        let buf = arena.alloc_bytes(capacity.max(1));
        StringBuilder {
            arena,
            state: RefCell::new(BuilderState { buf, len: 0 }),
        }
    }

    /// Appends raw bytes, growing the backing buffer first if needed.
    pub fn append_bytes(&self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let mut state = self.state.borrow_mut();
        self.ensure_capacity(&mut state, bytes.len());
        let start = state.len;
        state.buf[start..start + bytes.len()].copy_from_slice(bytes);
        state.len += bytes.len();
    }

    /// Appends a `str` (the common case; `append_bytes` exists for raw
    /// data callers that don't already have a `str`).
    pub fn append_str(&self, text: &str) {
        self.append_bytes(text.as_bytes());
    }

    fn ensure_capacity(&self, state: &mut BuilderState<'arena>, additional: usize) {
        let needed = state.len + additional;
        if needed <= state.buf.len() {
            return;
        }
        let mut new_capacity = state.buf.len().max(1);
        while new_capacity < needed {
            new_capacity *= 2;
        }
        let new_buf = self.arena.alloc_bytes(new_capacity);
        new_buf[..state.len].copy_from_slice(&state.buf[..state.len]);
        state.buf = new_buf;
    }

    /// Copies the accumulated bytes out as an owned `String`. Contents are
    /// always valid UTF-8 since every append goes through `append_str` or
    /// `fmt::Write`.
    #[must_use]
    pub fn finish(&self) -> String {
        let state = self.state.borrow();
        String::from_utf8(state.buf[..state.len].to_vec())
            .expect("StringBuilder only ever receives UTF-8 text")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.borrow().len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Write for StringBuilder<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.append_str(s);
        Ok(())
    }
}
