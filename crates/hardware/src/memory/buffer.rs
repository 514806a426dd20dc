//! Word buffer backing the memory store.
//!
//! The full device is 16 Mi words, most of which a test never touches. On Unix
//! the buffer is an anonymous private `mmap`, so pages are only committed when
//! first written and untouched words read as zero. Elsewhere, or if the
//! mapping is refused, it falls back to a zeroed heap allocation.

use std::fmt;
use std::slice;

/// Where the words of a [`WordBuffer`] live.
enum Backing {
    /// Anonymous mapping owned by this buffer.
    #[cfg(unix)]
    Mapped { ptr: *mut u16, len: usize },
    /// Zeroed heap allocation.
    Heap(Box<[u16]>),
}

/// A fixed-size, zero-initialized array of 16-bit words.
pub struct WordBuffer {
    backing: Backing,
}

// SAFETY: the mapping is owned exclusively by this buffer and only reached
// through `&self`/`&mut self`, so it follows the same aliasing rules as a Box.
unsafe impl Send for WordBuffer {}
// SAFETY: shared access only ever produces `&[u16]`.
unsafe impl Sync for WordBuffer {}

impl WordBuffer {
    /// Allocates a buffer of `len` zeroed words.
    ///
    /// # Arguments
    ///
    /// * `len` - Number of 16-bit words.
    pub fn new(len: usize) -> Self {
        #[cfg(unix)]
        if let Some(backing) = Self::map(len) {
            return Self { backing };
        }
        Self {
            backing: Backing::Heap(vec![0u16; len].into_boxed_slice()),
        }
    }

    #[cfg(unix)]
    fn map(len: usize) -> Option<Backing> {
        let bytes = len.checked_mul(std::mem::size_of::<u16>())?;
        if bytes == 0 {
            return None;
        }
        // SAFETY: anonymous private mapping with no fixed address; the kernel
        // returns either MAP_FAILED or a fresh zero-filled region of `bytes`.
        let ptr = unsafe {
            libc::mmap(
                std::ptr::null_mut(),
                bytes,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            )
        };
        if ptr == libc::MAP_FAILED {
            tracing::warn!(bytes, "mmap refused, falling back to heap word buffer");
            return None;
        }
        Some(Backing::Mapped {
            ptr: ptr as *mut u16,
            len,
        })
    }

    /// Returns the number of words in the buffer.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns `true` if the buffer holds no words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the buffer is backed by a lazy anonymous mapping.
    pub fn is_mapped(&self) -> bool {
        match self.backing {
            #[cfg(unix)]
            Backing::Mapped { .. } => true,
            Backing::Heap(_) => false,
        }
    }

    /// Views the buffer as a word slice.
    pub fn as_slice(&self) -> &[u16] {
        match &self.backing {
            #[cfg(unix)]
            // SAFETY: `ptr` is a live mapping of exactly `len` u16s, page
            // aligned, zero-initialized and owned by `self`.
            Backing::Mapped { ptr, len } => unsafe { slice::from_raw_parts(*ptr, *len) },
            Backing::Heap(words) => words,
        }
    }

    /// Views the buffer as a mutable word slice.
    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        match &mut self.backing {
            #[cfg(unix)]
            // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
            Backing::Mapped { ptr, len } => unsafe { slice::from_raw_parts_mut(*ptr, *len) },
            Backing::Heap(words) => words,
        }
    }

    /// Zeroes every word.
    pub fn clear(&mut self) {
        self.as_mut_slice().fill(0);
    }
}

impl Drop for WordBuffer {
    fn drop(&mut self) {
        #[cfg(unix)]
        self.unmap();
    }
}

impl WordBuffer {
    #[cfg(unix)]
    fn unmap(&mut self) {
        if let Backing::Mapped { ptr, len } = self.backing {
            // SAFETY: `ptr`/`len` describe the mapping created in `map`, which
            // nothing else references once the buffer is dropped.
            let _ = unsafe { libc::munmap(ptr.cast(), len * std::mem::size_of::<u16>()) };
        }
    }
}

impl fmt::Debug for WordBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WordBuffer")
            .field("len", &self.len())
            .field("mapped", &self.is_mapped())
            .finish()
    }
}
