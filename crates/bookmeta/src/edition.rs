use log::debug;

/// Recognized edition markers as `(position, word marker, abbreviated marker)`.
///
/// Scanned in order, so the lowest position wins when a text contains more than one marker.
pub(crate) const EDITIONS: [(u8, &str, &str); 20] = [
    (1, "first edition", "1st"),
    (2, "second edition", "2nd"),
    (3, "third edition", "3rd"),
    (4, "fourth edition", "4th"),
    (5, "fifth edition", "5th"),
    (6, "sixth edition", "6th"),
    (7, "seventh edition", "7th"),
    (8, "eighth edition", "8th"),
    (9, "ninth edition", "9th"),
    (10, "tenth edition", "10th"),
    (11, "eleventh edition", "11th"),
    (12, "twelfth edition", "12th"),
    (13, "thirteenth edition", "13th"),
    (14, "fourteenth edition", "14th"),
    (15, "fifteenth edition", "15th"),
    (16, "sixteenth edition", "16th"),
    (17, "seventeenth edition", "17th"),
    (18, "eighteenth edition", "18th"),
    (19, "nineteenth edition", "19th"),
    (20, "twentieth edition", "20th"),
];

/// Finds the edition number of a book as a decimal string.
///
/// `edition_name` is used when present, otherwise the `title` is scanned. The title is never
/// consulted when an edition name exists, even if nothing in the edition name matches.
pub(crate) fn extract(edition_name: Option<&str>, title: Option<&str>) -> Option<String> {
    let (source, text) = match (edition_name, title) {
        (Some(edition_name), _) => ("edition_name", edition_name),
        (None, Some(title)) => ("title", title),
        (None, None) => return None,
    };

    let edition = scan(text);
    debug!("Edition from {source} '{text}': {edition:?}");
    edition.map(|position| position.to_string())
}

fn scan(text: &str) -> Option<u8> {
    let text = text.to_lowercase();
    EDITIONS
        .iter()
        .find(|(_, word, abbrev)| text.contains(word) || text.contains(abbrev))
        .map(|&(position, _, _)| position)
}
