use std::fmt;

use log::trace;
use serde::Serialize;

use crate::{api::Transport, Error, Isbn};

/// Normalized metadata of a single book, produced by one successful lookup.
///
/// A list field is either `None` (the catalog had nothing for it) or a non-empty list in the
/// order the catalog returned it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BookRecord {
    pub(crate) title: Option<String>,
    pub(crate) subtitle: Option<String>,
    pub(crate) edition: Option<String>,
    pub(crate) authors: Option<Vec<String>>,
    pub(crate) publishers: Option<Vec<String>>,
    pub(crate) subjects: Option<Vec<String>>,
    pub(crate) input_isbn: String,
    pub(crate) isbn_10_aliases: Option<Vec<String>>,
    pub(crate) isbn_13_aliases: Option<Vec<String>>,
}

impl BookRecord {
    /// Validates `isbn` and loads the record for it using `transport`.
    ///
    /// # Errors
    ///
    /// See [`crate::load_with`].
    pub fn load<T: Transport + ?Sized>(isbn: &str, transport: &T) -> Result<Self, Error> {
        trace!("Loading book record for '{isbn}'");
        let isbn = Isbn::parse(isbn)?;
        let body = transport.fetch(isbn.as_str())?;
        crate::api::open_library::record_from_response(&body, isbn)
    }

    /// The title of the book.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The subtitle of the book.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// The edition of the book as a decimal string, e.g. `"8"`.
    #[must_use]
    pub fn edition(&self) -> Option<&str> {
        self.edition.as_deref()
    }

    /// Author names in catalog order.
    #[must_use]
    pub fn authors(&self) -> Option<&[String]> {
        self.authors.as_deref()
    }

    /// Publishers in catalog order.
    #[must_use]
    pub fn publishers(&self) -> Option<&[String]> {
        self.publishers.as_deref()
    }

    /// Subjects in catalog order.
    #[must_use]
    pub fn subjects(&self) -> Option<&[String]> {
        self.subjects.as_deref()
    }

    /// The ISBN this record was loaded with, without hyphens.
    #[must_use]
    pub fn input_isbn(&self) -> &str {
        &self.input_isbn
    }

    /// Every ISBN-10 the catalog knows for this book.
    #[must_use]
    pub fn isbn_10_aliases(&self) -> Option<&[String]> {
        self.isbn_10_aliases.as_deref()
    }

    /// Every ISBN-13 the catalog knows for this book.
    #[must_use]
    pub fn isbn_13_aliases(&self) -> Option<&[String]> {
        self.isbn_13_aliases.as_deref()
    }
}

struct Field<'a, T: ?Sized>(Option<&'a T>);

impl fmt::Display for Field<'_, str> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.unwrap_or("None"))
    }
}

impl fmt::Display for Field<'_, [String]> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(values) => f.write_str(&values.join(", ")),
            None => f.write_str("None"),
        }
    }
}

impl fmt::Display for BookRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", Field(self.title()))?;
        writeln!(f, "Subtitle: {}", Field(self.subtitle()))?;
        writeln!(f, "Edition: {}", Field(self.edition()))?;
        writeln!(f, "Author: {}", Field(self.authors()))?;
        writeln!(f, "Publisher: {}", Field(self.publishers()))?;
        writeln!(f, "Subject: {}", Field(self.subjects()))?;
        writeln!(f, "Input ISBN: {}", self.input_isbn)?;
        writeln!(f, "All ISBN-10: {}", Field(self.isbn_10_aliases()))?;
        writeln!(f, "All ISBN-13: {}", Field(self.isbn_13_aliases()))
    }
}
