use log::{info, trace};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::{edition, BookRecord, Error, ErrorKind, Isbn};

use super::{Client, Transport};

const OPEN_LIBRARY_URL: &str = "https://openlibrary.org/api/books";

/// The default [`Transport`], which looks books up in the Open Library books API.
#[derive(Debug)]
pub struct OpenLibrary<C: Client = reqwest::blocking::Client> {
    client: C,
    base_url: String,
}

impl<C: Client> Default for OpenLibrary<C> {
    fn default() -> Self {
        Self {
            client: C::default(),
            base_url: OPEN_LIBRARY_URL.to_owned(),
        }
    }
}

impl<C: Client> OpenLibrary<C> {
    /// Uses `client` to send requests.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            ..Self::default()
        }
    }

    /// Replaces the books API endpoint, `https://openlibrary.org/api/books` by default.
    #[must_use]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn url(&self, isbn: &str) -> String {
        format!(
            "{}?bibkeys=ISBN:{isbn}&jscmd=details&format=json",
            self.base_url
        )
    }
}

impl<C: Client> Transport for OpenLibrary<C> {
    fn fetch(&self, isbn: &str) -> Result<String, Error> {
        info!("Searching for ISBN '{isbn}' using Open Library API");
        let body = self.client.get_text(&self.url(isbn))?;
        trace!("Request was successful");
        Ok(body)
    }
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Entry {
    details: Details,
}

/// The `details` object of a catalog entry; the working record for field extraction.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Details {
    title: Option<String>,
    subtitle: Option<String>,
    /// `None` only when the key is missing; a `null` value is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present")]
    edition_name: Option<Value>,
    authors: Option<Vec<Author>>,
    publishers: Option<Vec<String>>,
    subjects: Option<Vec<String>>,
    isbn_10: Option<Vec<String>>,
    isbn_13: Option<Vec<String>>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Author {
    name: String,
}

pub(crate) fn record_from_response(body: &str, isbn: Isbn) -> Result<BookRecord, Error> {
    unwrap_details(body, &isbn).map(|details| details.into_record(isbn))
}

fn unwrap_details(body: &str, isbn: &Isbn) -> Result<Details, Error> {
    let document: Value = serde_json::from_str(body).map_err(|e| {
        Error::wrap(ErrorKind::MalformedResponse, e).with_message("Response is not valid JSON")
    })?;

    let mut document: Map<String, Value> = match document {
        Value::Object(map) => map,
        _ => {
            return Err(Error::new(
                ErrorKind::MalformedResponse,
                "Response is not a JSON object",
            ))
        }
    };

    if document.is_empty() {
        return Err(Error::new(
            ErrorKind::NotFound,
            format!("ISBN '{isbn}' not found at openlibrary.org"),
        ));
    }

    let key = format!("ISBN:{isbn}");
    let entry = document.remove(&key).ok_or_else(|| {
        Error::new(
            ErrorKind::MalformedResponse,
            format!("Response does not contain the key '{key}'"),
        )
    })?;

    serde_json::from_value::<Entry>(entry)
        .map(|entry| entry.details)
        .map_err(|e| {
            Error::wrap(ErrorKind::MalformedResponse, e)
                .with_message(format!("Unexpected shape of '{key}'"))
        })
}

/// Present-but-empty lists count as absent.
fn non_empty(list: Option<Vec<String>>) -> Option<Vec<String>> {
    list.filter(|list| !list.is_empty())
}

impl Details {
    fn into_record(self, isbn: Isbn) -> BookRecord {
        // Deconstruct details to take ownership of fields (avoids cloning).
        let Details {
            title,
            subtitle,
            edition_name,
            authors,
            publishers,
            subjects,
            isbn_10,
            isbn_13,
        } = self;

        // An edition_name key is the only source once present, even when it holds no text.
        let edition = match &edition_name {
            Some(Value::String(name)) => edition::extract(Some(name.as_str()), None),
            Some(_) => None,
            None => edition::extract(None, title.as_deref()),
        };
        let authors = authors.map(|authors| authors.into_iter().map(|a| a.name).collect());

        BookRecord {
            title,
            subtitle,
            edition,
            authors: non_empty(authors),
            publishers: non_empty(publishers),
            subjects: non_empty(subjects),
            input_isbn: isbn.into(),
            isbn_10_aliases: non_empty(isbn_10),
            isbn_13_aliases: non_empty(isbn_13),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OpenLibrary;
    use crate::{
        api::{assert_url, impl_text_producer, MockClient, NetworkErrorProducer},
        BookRecord, Error, ErrorKind,
    };

    const CALCULUS_JSON: &str = include_str!("../../tests/data/open_library_9781285741550.json");
    const SEDGEWICK_JSON: &str = include_str!("../../tests/data/open_library_0134076427.json");
    const HANDBOOK_JSON: &str = include_str!("../../tests/data/open_library_9781259642586.json");

    impl_text_producer! {
        CalculusProducer => Ok(CALCULUS_JSON.to_owned()),
        SedgewickProducer => Ok(SEDGEWICK_JSON.to_owned()),
        HandbookProducer => Ok(HANDBOOK_JSON.to_owned()),
        NotJsonProducer => Ok("<html>Service Unavailable</html>".to_owned()),
        EmptyBodyProducer => Ok(String::new()),
        ArrayProducer => Ok("[]".to_owned()),
        OtherKeyProducer => Ok(r#"{"ISBN:0000000000": {"details": {}}}"#.to_owned()),
        NoDetailsProducer => Ok(r#"{"ISBN:0134076427": {"info_url": "x"}}"#.to_owned()),
        NamelessAuthorProducer => Ok(
            r#"{
                "ISBN:0134076427": {
                    "details": {
                        "authors": [{"key": "/authors/OL1A"}]
                    }
                }
            }"#.to_owned()
        ),
        WrongTypeProducer => Ok(
            r#"{"ISBN:0134076427": {"details": {"title": ["Computer Science"]}}}"#.to_owned()
        ),
        NullEditionNameProducer => Ok(
            r#"{
                "ISBN:0134076427": {
                    "details": {
                        "edition_name": null,
                        "title": "Calculus, 8th edition"
                    }
                }
            }"#.to_owned()
        ),
        NumericEditionNameProducer => Ok(
            r#"{
                "ISBN:0134076427": {
                    "details": {
                        "edition_name": 8,
                        "title": "Calculus, 8th edition"
                    }
                }
            }"#.to_owned()
        ),
        SparseProducer => Ok(
            r#"{
                "ISBN:0134076427": {
                    "details": {
                        "subtitle": null,
                        "publishers": [],
                        "subjects": [],
                        "isbn_10": ["0134076427"],
                        "number_of_pages": 1146
                    }
                }
            }"#.to_owned()
        ),
    }

    fn load<C: crate::api::Client>(isbn: &str) -> Result<BookRecord, Error> {
        BookRecord::load(isbn, &OpenLibrary::<C>::default())
    }

    fn load_err<C: crate::api::Client>(isbn: &str) -> ErrorKind {
        load::<C>(isbn).expect_err("Loading should fail").kind()
    }

    #[test]
    fn isbn_13_url_format_is_correct() {
        assert!(load::<MockClient<CalculusProducer>>("978-1285741550").is_ok());
        // should strip the hyphen in a ISBN-13 string
        assert_url!(
            "https://openlibrary.org/api/books?bibkeys=ISBN:9781285741550&jscmd=details&format=json"
        );
    }

    #[test]
    fn base_url_can_be_replaced() {
        let transport = OpenLibrary::<MockClient<SedgewickProducer>>::default()
            .with_base_url("http://localhost/books");
        assert!(BookRecord::load("0134076427", &transport).is_ok());
        assert_url!("http://localhost/books?bibkeys=ISBN:0134076427&jscmd=details&format=json");
    }

    #[test]
    fn open_library_can_wrap_a_client() {
        let transport = OpenLibrary::new(MockClient::<SedgewickProducer>::default());
        let book = BookRecord::load("0134076427", &transport).unwrap();

        assert_eq!(Some("Computer Science"), book.title());
        assert_url!(
            "https://openlibrary.org/api/books?bibkeys=ISBN:0134076427&jscmd=details&format=json"
        );
    }

    #[test]
    fn invalid_isbn_does_not_send_request() {
        for isbn in ["1234", "", "12345678910111213", "013407642X"] {
            assert_eq!(ErrorKind::InvalidFormat, load_err::<MockClient<CalculusProducer>>(isbn));
        }
        assert_url!("", "No request should be made for an invalid ISBN");
    }

    #[test]
    fn calculus_is_extracted() {
        let book = load::<MockClient<CalculusProducer>>("9781285741550").unwrap();

        assert_eq!(Some("Calculus"), book.title());
        assert_eq!(Some("early transcendentals"), book.subtitle());
        assert_eq!(Some("8"), book.edition());
        assert_eq!("James Stewart", book.authors().unwrap()[0]);
        assert_eq!(None, book.publishers());
        assert_eq!(
            Some(&["Calculus".to_owned(), "Textbooks".to_owned()][..]),
            book.subjects()
        );
        assert_eq!("9781285741550", book.input_isbn());
        assert_eq!(
            Some(&["1285741552".to_owned(), "1305270363".to_owned()][..]),
            book.isbn_10_aliases()
        );
        let isbn_13 = book.isbn_13_aliases().unwrap();
        assert_eq!(3, isbn_13.len());
        assert_eq!(
            ["9781285741550", "9781305272354", "9781305270367"],
            [&*isbn_13[0], &*isbn_13[1], &*isbn_13[2]]
        );
    }

    #[test]
    fn hyphenated_isbn_produces_identical_record() {
        let plain = load::<MockClient<CalculusProducer>>("9781285741550").unwrap();
        let hyphenated = load::<MockClient<CalculusProducer>>("978-1285741550").unwrap();

        assert_eq!(plain, hyphenated);
    }

    #[test]
    fn loading_twice_is_idempotent() {
        let first = load::<MockClient<SedgewickProducer>>("0134076427").unwrap();
        let second = load::<MockClient<SedgewickProducer>>("0134076427").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn sedgewick_is_extracted() {
        let book = load::<MockClient<SedgewickProducer>>("0134076427").unwrap();

        assert_eq!(Some("Computer Science"), book.title());
        assert_eq!(Some("An Interdisciplinary Approach"), book.subtitle());
        assert_eq!(None, book.edition());
        assert_eq!(
            Some(&["Robert Sedgewick".to_owned(), "Kevin Wayne".to_owned()][..]),
            book.authors()
        );
        assert_eq!("Addison-Wesley Professional", book.publishers().unwrap()[0]);
        assert_eq!(None, book.subjects());
        assert_eq!("0134076427", book.input_isbn());
        assert_eq!("0134076427", book.isbn_10_aliases().unwrap()[0]);
        assert_eq!("9780134076423", book.isbn_13_aliases().unwrap()[0]);
    }

    #[test]
    fn edition_is_found_in_title() {
        let book = load::<MockClient<HandbookProducer>>("978-1259642586").unwrap();

        assert_eq!(
            Some("Standard Handbook for Electrical Engineers, Seventeenth Edition"),
            book.title()
        );
        assert_eq!(None, book.subtitle());
        assert_eq!(Some("17"), book.edition());
        assert_eq!("Surya Santoso", book.authors().unwrap()[0]);
        assert_eq!("H. Wayne Beaty", book.authors().unwrap()[1]);
        assert_eq!("McGraw-Hill Education", book.publishers().unwrap()[0]);
        assert_eq!("9781259642586", book.input_isbn());
        assert_eq!("1259642585", book.isbn_10_aliases().unwrap()[0]);
        assert_eq!("9781259642586", book.isbn_13_aliases().unwrap()[0]);
    }

    #[test]
    fn empty_object_is_not_found() {
        assert_eq!(ErrorKind::NotFound, load_err::<MockClient>("0000000000"));
        assert_eq!(ErrorKind::NotFound, load_err::<MockClient>("000-0000000000"));
        assert_eq!(ErrorKind::NotFound, load_err::<MockClient>("1941691242"));
    }

    #[test]
    fn transport_error_is_passed_through() {
        let err = load::<MockClient<NetworkErrorProducer>>("0134076427").unwrap_err();

        assert_eq!(ErrorKind::IO, err.kind());
        assert_eq!("IO error: Network error", err.to_string());
    }

    #[test]
    fn unparsable_response_is_malformed() {
        assert_eq!(
            ErrorKind::MalformedResponse,
            load_err::<MockClient<NotJsonProducer>>("0134076427")
        );
        assert_eq!(
            ErrorKind::MalformedResponse,
            load_err::<MockClient<EmptyBodyProducer>>("0134076427")
        );
        assert_eq!(
            ErrorKind::MalformedResponse,
            load_err::<MockClient<ArrayProducer>>("0134076427")
        );
    }

    #[test]
    fn missing_keys_are_malformed() {
        assert_eq!(
            ErrorKind::MalformedResponse,
            load_err::<MockClient<OtherKeyProducer>>("0134076427")
        );
        assert_eq!(
            ErrorKind::MalformedResponse,
            load_err::<MockClient<NoDetailsProducer>>("0134076427")
        );
    }

    #[test]
    fn author_without_name_is_malformed() {
        assert_eq!(
            ErrorKind::MalformedResponse,
            load_err::<MockClient<NamelessAuthorProducer>>("0134076427")
        );
    }

    #[test]
    fn field_of_wrong_type_is_malformed() {
        assert_eq!(
            ErrorKind::MalformedResponse,
            load_err::<MockClient<WrongTypeProducer>>("0134076427")
        );
    }

    #[test]
    fn null_edition_name_does_not_fall_back_to_title() {
        let book = load::<MockClient<NullEditionNameProducer>>("0134076427").unwrap();

        assert_eq!(Some("Calculus, 8th edition"), book.title());
        assert_eq!(None, book.edition());
    }

    #[test]
    fn non_text_edition_name_does_not_fall_back_to_title() {
        let book = load::<MockClient<NumericEditionNameProducer>>("0134076427").unwrap();

        assert_eq!(None, book.edition());
    }

    #[test]
    fn null_and_empty_fields_are_absent() {
        let book = load::<MockClient<SparseProducer>>("0134076427").unwrap();

        assert_eq!(None, book.title());
        assert_eq!(None, book.subtitle());
        assert_eq!(None, book.edition());
        assert_eq!(None, book.authors());
        assert_eq!(None, book.publishers());
        assert_eq!(None, book.subjects());
        assert_eq!(Some(&["0134076427".to_owned()][..]), book.isbn_10_aliases());
        assert_eq!(None, book.isbn_13_aliases());
    }
}
