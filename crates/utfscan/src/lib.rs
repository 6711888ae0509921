//! A backtracking cursor and scanning engine over shared UTF-8 buffers.
//!
//! The entry point is [`Scanner`]: a cheap handle holding a reference-counted
//! byte buffer, a fixed `[start, end)` byte range, and one mutable cursor that
//! always sits on a scalar boundary. Scanners walk the range one Unicode
//! scalar at a time in either direction, test-and-consume characters, sets,
//! and literal strings, and carve out sub-views by searching forward for a
//! delimiter. Failed matches restore the cursor to its entry position, so
//! alternatives can be tried without bookkeeping on the caller's side.
//!
//! Sub-views returned by the `read_*` searches are themselves scanners over
//! the same shared buffer; producing one never copies text.
//!
//! ```rust
//! use utfscan::{AtEnd, ScanError, Scanner};
//!
//! fn main() -> Result<(), ScanError> {
//!     let mut scan = Scanner::new("héllo, wörld");
//!     let greeting = scan.read_until_char(',', AtEnd::Fail)?;
//!     assert_eq!(greeting.as_str(), "héllo");
//!
//!     // The cursor stops *at* the delimiter; consume it separately.
//!     assert!(scan.eat_char(','));
//!     assert_eq!(scan.read_while_char(' '), 1);
//!     assert_eq!(scan.read_to_end().as_str(), "wörld");
//!     Ok(())
//! }
//! ```
//!
//! Unicode property queries (whitespace, newline, letter, number) are not
//! baked in; they go through the [`Classify`] trait, with [`UnicodeClasses`]
//! as the standard-library-backed default.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod classify;
mod error;
mod scanner;
mod utf8;

#[cfg(test)]
mod tests;

pub use classify::{CharClass, Classify, UnicodeClasses};
pub use error::{Result, ScanError};
pub use scanner::{AtEnd, Scanner};
