/// Delimiters that separate an artist prefix from the track title.
/// Both the plain hyphen and the en dash show up in resolved titles.
const TITLE_DELIMITERS: [&str; 2] = [" - ", " – "];

/// Replace characters that cannot appear in a single path component.
pub fn sanitize_component(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '-',
            other => other,
        })
        .collect()
}

/// Split a raw title of the form "Artist - Title" on the first delimiter.
pub fn split_artist_title(raw: &str) -> Option<(String, String)> {
    for delim in TITLE_DELIMITERS {
        if let Some((artist, title)) = raw.split_once(delim) {
            return Some((artist.trim().to_string(), title.trim().to_string()));
        }
    }
    None
}

/// The part of a title after the first artist delimiter, if any.
pub fn strip_artist_prefix(raw: &str) -> Option<String> {
    split_artist_title(raw).map(|(_, title)| title)
}
