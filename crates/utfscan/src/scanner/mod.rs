//! The scanning engine: one shared buffer, a fixed byte range, one cursor.
//!
//! What it does
//! - Walks a `[start, end)` window of a shared UTF-8 buffer one scalar at a
//!   time, forward and backward, via the codec in [`crate::utf8`].
//! - Tests-and-consumes characters, sets, and literal strings, rewinding to
//!   the entry position when a match fails.
//! - Carves out sub-views by scanning forward for a character, set,
//!   predicate, or literal substring; a successful search returns the span
//!   before the delimiter and parks the cursor *at* the delimiter, so "read
//!   field, then consume separator" composes naturally.
//!
//! Invariants
//! - `start <= index <= end`, and `index` is always a scalar boundary. Both
//!   range endpoints are boundary-checked at construction, which is what
//!   makes span extraction infallible.
//! - Sub-views share the buffer allocation and carry their own cursor;
//!   creating or moving one never disturbs the parent.
//! - Failed operations restore the cursor before returning, except the
//!   multi-step movements (`advance_by`, `retreat_by`, `read_count`), which
//!   deliberately keep partial progress.

use alloc::string::String;
use core::fmt;

use bstr::ByteSlice;

use crate::{
    buffer::SharedBytes,
    classify::Classify,
    error::{Result, ScanError},
    utf8,
};

/// What a `read_until_*` search does when it exhausts the range without
/// finding its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AtEnd {
    /// Restore the cursor to its entry position and fail with
    /// [`ScanError::EndOfInput`].
    #[default]
    Fail,
    /// Return the span up to the end of the range and leave the cursor there.
    Stop,
}

/// A cursor-based scanner over a shared UTF-8 buffer.
///
/// Cheap to clone and to sub-divide: handles share one allocation and differ
/// only in their range and cursor. See the [crate docs](crate) for a worked
/// example.
#[derive(Clone)]
pub struct Scanner {
    bytes: SharedBytes,
    start: usize,
    end: usize,
    index: usize,
}

impl Scanner {
    /// Scanner over the whole of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::over(SharedBytes::from_text(text))
    }

    /// Scanner over the whole of `text`, taking ownership of the allocation.
    #[must_use]
    pub fn from_string(text: String) -> Self {
        Self::over(SharedBytes::from_string(text))
    }

    /// Scanner over raw bytes, validated as UTF-8 once up front.
    ///
    /// # Errors
    ///
    /// [`ScanError::InvalidUtf8`] at the first malformed offset.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::over(SharedBytes::from_bytes(bytes)?))
    }

    fn over(bytes: SharedBytes) -> Self {
        let end = bytes.len();
        Self {
            bytes,
            start: 0,
            end,
            index: 0,
        }
    }

    /// Sub-view over `[start, end)` of this scanner's range (offsets relative
    /// to the range), with its own cursor at the sub-range start.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfInput`] if the window extends past the range, and
    /// [`ScanError::InvalidUtf8`] if either endpoint lands inside a
    /// multi-byte scalar.
    pub fn window(&self, start: usize, end: usize) -> Result<Self> {
        if start > end || self.start + end > self.end {
            return Err(ScanError::EndOfInput);
        }
        let lo = self.start + start;
        let hi = self.start + end;
        for offset in [lo, hi] {
            if let Some(&byte) = self.bytes.as_bytes().get(offset) {
                if utf8::is_continuation(byte) {
                    return Err(ScanError::InvalidUtf8(offset));
                }
            }
        }
        Ok(self.subview(lo, hi))
    }

    /// Sub-view over already boundary-checked absolute offsets.
    fn subview(&self, start: usize, end: usize) -> Self {
        Self {
            bytes: self.bytes.clone(),
            start,
            end,
            index: start,
        }
    }

    /// Bytes spanned by this scanner's range.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range spans no bytes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The full range as text, cursor position notwithstanding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.bytes.slice(self.start, self.end)
    }

    /// The unconsumed tail, from the cursor to the end of the range.
    #[must_use]
    pub fn remaining(&self) -> &str {
        self.bytes.slice(self.index, self.end)
    }

    /// Whether the cursor sits at the end of the range.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.index == self.end
    }

    // ---- Cursor movement --------------------------------------------------

    /// The scalar under the cursor, consuming nothing.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfInput`] exactly when [`Scanner::at_end`] is true.
    pub fn peek(&self) -> Result<char> {
        if self.at_end() {
            return Err(ScanError::EndOfInput);
        }
        let (ch, _) = utf8::decode(self.range_bytes(), self.index)?;
        Ok(ch)
    }

    /// Non-failing [`Scanner::peek`]: NUL at the end of the range, for call
    /// sites where "no character" is an answer rather than an error.
    #[must_use]
    pub fn peek_or_nul(&self) -> char {
        self.peek().unwrap_or('\0')
    }

    /// Moves the cursor forward by exactly one scalar.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfInput`] if already at the end of the range.
    pub fn advance(&mut self) -> Result<()> {
        if self.at_end() {
            return Err(ScanError::EndOfInput);
        }
        self.index = utf8::next_boundary(self.range_bytes(), self.index)?;
        Ok(())
    }

    /// Moves the cursor backward by exactly one scalar.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfInput`] if already at the start of the range.
    pub fn retreat(&mut self) -> Result<()> {
        self.index = utf8::prev_boundary(self.bytes.as_bytes(), self.start, self.index)?;
        Ok(())
    }

    /// Repeats [`Scanner::advance`] `n` times.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfInput`] the moment the range end is hit, leaving the
    /// cursor at the point of failure (partial progress is kept).
    pub fn advance_by(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }

    /// Repeats [`Scanner::retreat`] `n` times.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfInput`] the moment the range start is hit, leaving
    /// the cursor at the point of failure (partial progress is kept).
    pub fn retreat_by(&mut self, n: usize) -> Result<()> {
        for _ in 0..n {
            self.retreat()?;
        }
        Ok(())
    }

    // ---- Match primitives -------------------------------------------------

    /// Consumes the current scalar iff it equals `ch`; rewinds otherwise.
    pub fn eat_char(&mut self, ch: char) -> bool {
        let entry = self.index;
        match self.next_scalar() {
            Ok(found) if found == ch => true,
            _ => {
                self.index = entry;
                false
            }
        }
    }

    /// Consumes the current scalar iff it is a member of `set`; rewinds
    /// otherwise.
    pub fn eat_any(&mut self, set: &[char]) -> bool {
        let entry = self.index;
        match self.next_scalar() {
            Ok(found) if set.contains(&found) => true,
            _ => {
                self.index = entry;
                false
            }
        }
    }

    /// Consumes `s` if the text at the cursor equals it; rewinds and returns
    /// `Ok(false)` on a mismatch or when fewer scalars remain than `s` holds.
    ///
    /// # Errors
    ///
    /// [`ScanError::EmptyTarget`] if `s` is empty.
    pub fn eat_str(&mut self, s: &str) -> Result<bool> {
        if s.is_empty() {
            return Err(ScanError::EmptyTarget);
        }
        let entry = self.index;
        let outcome = match self.read_count(s.chars().count()) {
            Ok(text) => Ok(text == s),
            Err(ScanError::EndOfInput) => Ok(false),
            Err(err) => Err(err),
        };
        match outcome {
            Ok(true) => Ok(true),
            Ok(false) => {
                self.index = entry;
                Ok(false)
            }
            Err(err) => {
                self.index = entry;
                Err(err)
            }
        }
    }

    /// Consumes the current scalar, requiring it to equal `ch`.
    ///
    /// # Errors
    ///
    /// [`ScanError::Unexpected`] carrying the scalar actually found (cursor
    /// rewound), or [`ScanError::EndOfInput`] at the end of the range.
    pub fn expect_char(&mut self, ch: char) -> Result<()> {
        let entry = self.index;
        let found = self.next_scalar()?;
        if found == ch {
            Ok(())
        } else {
            self.index = entry;
            Err(ScanError::Unexpected(found))
        }
    }

    /// Consumes the next `n` scalars and returns them as text.
    ///
    /// # Errors
    ///
    /// [`ScanError::EndOfInput`] if fewer than `n` scalars remain; the cursor
    /// stays at the point of failure (partial progress is kept).
    pub fn read_count(&mut self, n: usize) -> Result<&str> {
        let entry = self.index;
        self.advance_by(n)?;
        Ok(self.bytes.slice(entry, self.index))
    }

    /// Decode-and-advance, the shared step under the match primitives.
    fn next_scalar(&mut self) -> Result<char> {
        if self.at_end() {
            return Err(ScanError::EndOfInput);
        }
        let (ch, next) = utf8::decode(self.range_bytes(), self.index)?;
        self.index = next;
        Ok(ch)
    }

    // ---- Search combinators -----------------------------------------------

    /// Scans forward to the first scalar equal to `ch`, returning the span
    /// skipped and leaving the cursor at the match.
    ///
    /// # Errors
    ///
    /// Under [`AtEnd::Fail`], [`ScanError::EndOfInput`] with the cursor
    /// restored when the range ends first.
    pub fn read_until_char(&mut self, ch: char, at_end: AtEnd) -> Result<Self> {
        self.scan_until(|found| found == ch, at_end)
    }

    /// Scans forward to the first scalar that is a member of `set`.
    ///
    /// # Errors
    ///
    /// Under [`AtEnd::Fail`], [`ScanError::EndOfInput`] with the cursor
    /// restored when the range ends first.
    pub fn read_until_any(&mut self, set: &[char], at_end: AtEnd) -> Result<Self> {
        self.scan_until(|found| set.contains(&found), at_end)
    }

    /// Scans forward to the first scalar satisfying `pred`.
    ///
    /// # Errors
    ///
    /// Under [`AtEnd::Fail`], [`ScanError::EndOfInput`] with the cursor
    /// restored when the range ends first.
    pub fn read_until(&mut self, pred: impl Fn(char) -> bool, at_end: AtEnd) -> Result<Self> {
        self.scan_until(pred, at_end)
    }

    fn scan_until(&mut self, pred: impl Fn(char) -> bool, at_end: AtEnd) -> Result<Self> {
        let entry = self.index;
        loop {
            if self.at_end() {
                return match at_end {
                    AtEnd::Stop => Ok(self.subview(entry, self.index)),
                    AtEnd::Fail => {
                        self.index = entry;
                        Err(ScanError::EndOfInput)
                    }
                };
            }
            let (ch, next) = match utf8::decode(self.range_bytes(), self.index) {
                Ok(step) => step,
                Err(err) => {
                    self.index = entry;
                    return Err(err);
                }
            };
            if pred(ch) {
                return Ok(self.subview(entry, self.index));
            }
            self.index = next;
        }
    }

    /// Scans forward for the literal `needle`, returning the span before its
    /// first occurrence and leaving the cursor at the occurrence's start.
    ///
    /// The scan is byte-level; a valid-UTF-8 needle found inside a
    /// valid-UTF-8 buffer always starts on a scalar boundary, so the cursor
    /// invariant holds without re-decoding.
    ///
    /// # Errors
    ///
    /// [`ScanError::EmptyTarget`] for an empty needle; under
    /// [`AtEnd::Fail`], [`ScanError::EndOfInput`] with the cursor unmoved
    /// when the needle does not occur before the range end.
    pub fn read_until_str(&mut self, needle: &str, at_end: AtEnd) -> Result<Self> {
        if needle.is_empty() {
            return Err(ScanError::EmptyTarget);
        }
        let entry = self.index;
        let found = {
            let haystack = &self.bytes.as_bytes()[entry..self.end];
            let target = needle.as_bytes();
            haystack.windows(target.len()).position(|span| span == target)
        };
        match found {
            Some(offset) => {
                let span = self.subview(entry, entry + offset);
                self.index = entry + offset;
                Ok(span)
            }
            None => match at_end {
                AtEnd::Stop => {
                    let span = self.subview(entry, self.end);
                    self.index = self.end;
                    Ok(span)
                }
                AtEnd::Fail => Err(ScanError::EndOfInput),
            },
        }
    }

    /// Consumes everything from the cursor to the end of the range,
    /// returning it as a sub-view. Never fails.
    pub fn read_to_end(&mut self) -> Self {
        let span = self.subview(self.index, self.end);
        self.index = self.end;
        span
    }

    /// Consumes scalars equal to `ch` and returns how many were consumed.
    pub fn read_while_char(&mut self, ch: char) -> usize {
        let mut count = 0;
        while self.eat_char(ch) {
            count += 1;
        }
        count
    }

    /// Consumes scalars while they are members of `set`, returning the
    /// (possibly empty) span consumed. Never fails.
    pub fn read_while_any(&mut self, set: &[char]) -> Self {
        self.scan_while(|found| set.contains(&found))
    }

    /// Consumes scalars while `pred` holds, returning the (possibly empty)
    /// span consumed. Never fails.
    pub fn read_while(&mut self, pred: impl Fn(char) -> bool) -> Self {
        self.scan_while(pred)
    }

    fn scan_while(&mut self, pred: impl Fn(char) -> bool) -> Self {
        let entry = self.index;
        while let Ok((ch, next)) = utf8::decode(self.range_bytes(), self.index) {
            if !pred(ch) {
                break;
            }
            self.index = next;
        }
        self.subview(entry, self.index)
    }

    // ---- Classification conveniences --------------------------------------

    /// Consumes leading whitespace per `classes`, returning the number of
    /// scalars consumed.
    pub fn skip_whitespace<C: Classify>(&mut self, classes: &C) -> usize {
        self.scan_while(|ch| classes.classify(ch).is_whitespace)
            .as_str()
            .chars()
            .count()
    }

    /// Span up to the next newline per `classes`, or to the end of the range
    /// if none occurs; the cursor is left at the newline (or range end).
    ///
    /// # Errors
    ///
    /// Only a codec failure on a malformed caller-supplied window; scanners
    /// built from validated text cannot fail here.
    pub fn read_line<C: Classify>(&mut self, classes: &C) -> Result<Self> {
        self.scan_until(|ch| classes.classify(ch).is_newline, AtEnd::Stop)
    }

    fn range_bytes(&self) -> &[u8] {
        &self.bytes.as_bytes()[..self.end]
    }
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("range", &(self.start..self.end))
            .field("index", &self.index)
            .field(
                "remaining",
                &self.bytes.as_bytes()[self.index..self.end].as_bstr(),
            )
            .finish()
    }
}
