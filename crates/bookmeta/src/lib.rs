#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]

//! # bookmeta
//!
//! bookmeta looks up a book by ISBN-10 or ISBN-13 and normalizes the catalog record into a
//! [`BookRecord`]: title, subtitle, edition, authors, publishers, subjects and every known
//! ISBN alias of the book.
//!
//! The lookup itself goes through a [`Transport`], which is [`OpenLibrary`] for [`load`] but can
//! be any `Fn(&str) -> Result<String, Error>` when using [`load_with`].

mod api;
mod edition;
mod error;
mod isbn;
mod record;

pub use api::{Client, OpenLibrary, Transport};
pub use error::{Error, ErrorKind};
pub use isbn::{Isbn, IsbnKind};
pub use record::BookRecord;

use log::trace;

/// Load the [`BookRecord`] for `isbn` from Open Library.
///
/// Hyphens in `isbn` are ignored, so `978-1285741550` and `9781285741550` load the same record.
///
/// # Errors
///
/// See [`load_with`].
#[inline]
pub fn load(isbn: &str) -> Result<BookRecord, Error> {
    trace!("Load book record by ISBN of '{isbn}'");
    load_with(isbn, &OpenLibrary::<reqwest::blocking::Client>::default())
}

/// Load the [`BookRecord`] for `isbn` using the given `transport`.
///
/// The ISBN is validated before the transport is called.
///
/// # Errors
///
/// An [`ErrorKind::InvalidFormat`] `Err` is returned when `isbn` is not 10 or 13 digits after
/// removing hyphens.
/// An [`ErrorKind::NotFound`] `Err` is returned when the catalog has no record for `isbn`.
/// An [`ErrorKind::MalformedResponse`] `Err` is returned when the response cannot be parsed into
/// a [`BookRecord`].
/// Any `Err` of the transport itself is returned unchanged.
#[inline]
pub fn load_with<T: Transport + ?Sized>(isbn: &str, transport: &T) -> Result<BookRecord, Error> {
    BookRecord::load(isbn, transport)
}
