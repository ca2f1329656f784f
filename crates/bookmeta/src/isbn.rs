//! Validation of ISBN-10 and ISBN-13 identifiers.
//!
//! Only the shape of the identifier is checked: hyphens are removed and what remains must be
//! exactly 10 or 13 ASCII digits. Check digits are not verified.

use std::{fmt, str::FromStr};

use crate::{Error, ErrorKind};

/// The standard an [`Isbn`] belongs to, decided by its length.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IsbnKind {
    /// A 10 digit identifier.
    Isbn10,
    /// A 13 digit identifier.
    Isbn13,
}

impl fmt::Display for IsbnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IsbnKind::Isbn10 => f.write_str("ISBN-10"),
            IsbnKind::Isbn13 => f.write_str("ISBN-13"),
        }
    }
}

/// A hyphen-stripped ISBN that is known to be 10 or 13 digits long.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Isbn(String);

impl Isbn {
    /// Strips all hyphens from `isbn` and validates what remains.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::InvalidFormat`] error is returned when the stripped string is not 10 or 13
    /// characters long, or when it contains anything other than the digits `0-9`.
    pub fn parse(isbn: &str) -> Result<Self, Error> {
        let isbn = isbn.replace('-', "");

        let len = isbn.chars().count();
        if len != 10 && len != 13 {
            return Err(Error::new(
                ErrorKind::InvalidFormat,
                format!("length is wrong: {isbn}"),
            ));
        }

        if !isbn.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::new(
                ErrorKind::InvalidFormat,
                format!("contains illegal characters: {isbn}"),
            ));
        }

        Ok(Self(isbn))
    }

    /// The identifier without hyphens.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is an ISBN-10 or an ISBN-13.
    #[must_use]
    pub fn kind(&self) -> IsbnKind {
        if self.0.len() == 10 {
            IsbnKind::Isbn10
        } else {
            IsbnKind::Isbn13
        }
    }
}

impl FromStr for Isbn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
