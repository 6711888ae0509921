//! Shared immutable storage for scanner text.
//!
//! One allocation is shared by a parent scanner and every sub-view carved out
//! of it; handles are a single pointer clone. Nothing ever mutates the bytes,
//! so sharing across handles (and threads) is unrestricted.

use alloc::{string::String, sync::Arc};
use core::{fmt, str};

use bstr::ByteSlice;

use crate::error::{Result, ScanError};

/// Reference-counted UTF-8 bytes.
///
/// Invariant: the full contents are valid UTF-8. The infallible constructors
/// get this from `str`; [`SharedBytes::from_bytes`] validates once up front.
#[derive(Clone)]
pub(crate) struct SharedBytes {
    data: Arc<[u8]>,
}

impl SharedBytes {
    pub(crate) fn from_text(text: &str) -> Self {
        Self {
            data: Arc::from(text.as_bytes()),
        }
    }

    pub(crate) fn from_string(text: String) -> Self {
        Self {
            data: text.into_bytes().into(),
        }
    }

    pub(crate) fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match str::from_utf8(bytes) {
            Ok(_) => Ok(Self {
                data: Arc::from(bytes),
            }),
            Err(err) => Err(ScanError::InvalidUtf8(err.valid_up_to())),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Both offsets must sit on scalar boundaries; the scanner's range checks
    /// uphold this for every slice it requests.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &str {
        let bytes = &self.data[start..end];
        debug_assert!(str::from_utf8(bytes).is_ok());
        unsafe { str::from_utf8_unchecked(bytes) }
    }
}

impl fmt::Debug for SharedBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.data.as_bstr(), f)
    }
}
