pub(crate) mod open_library;

pub use open_library::OpenLibrary;

/// The HTTP seam used by [`OpenLibrary`].
pub trait Client
where
    Self: Default,
{
    /// Sends a GET request to `url` and returns the body as text.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error when the request cannot be sent or the body cannot be read.
    fn get_text(&self, url: &str) -> Result<String, Error>;
}

impl Client for reqwest::blocking::Client {
    fn get_text(&self, url: &str) -> Result<String, Error> {
        self.get(url)
            .send()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?
            .text()
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
    }
}

/// Performs the round trip for one ISBN and returns the raw response body.
///
/// Any function or closure of the form `Fn(&str) -> Result<String, Error>` is a transport, which
/// makes it straightforward to load records from a source other than the default catalog:
///
/// ```
/// let transport = |isbn: &str| -> Result<String, bookmeta::Error> {
///     Ok(format!(r#"{{"ISBN:{isbn}": {{"details": {{"title": "Calculus"}}}}}}"#))
/// };
/// let record = bookmeta::load_with("978-1285741550", &transport).unwrap();
///
/// assert_eq!(Some("Calculus"), record.title());
/// assert_eq!("9781285741550", record.input_isbn());
/// ```
pub trait Transport {
    /// Fetches the catalog document for a validated, hyphen-stripped `isbn`.
    ///
    /// # Errors
    ///
    /// Any error is returned to the caller of [`crate::load_with`] unchanged.
    fn fetch(&self, isbn: &str) -> Result<String, Error>;
}

impl<F> Transport for F
where
    F: Fn(&str) -> Result<String, Error>,
{
    fn fetch(&self, isbn: &str) -> Result<String, Error> {
        self(isbn)
    }
}

#[cfg(test)]
pub(crate) use test::{
    assert_url, impl_text_producer, MockClient, NetworkErrorProducer, Producer, URL_SINK,
};

use crate::{Error, ErrorKind};
