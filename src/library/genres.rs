use std::collections::HashMap;

/// Folder name used for genres that have no entry in the mapping.
pub const UNKNOWN_GENRE_FOLDER: &str = "Unknown";

/// Maps a raw genre tag to the relative folder path a track should live
/// under. Matching is exact and case-sensitive; tags that differ only in
/// casing from a mapped genre land in the Unknown bucket.
#[derive(Debug, Clone)]
pub struct GenreMap {
    entries: HashMap<String, String>,
}

impl GenreMap {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// The stock mapping for a house/techno-leaning library.
    pub fn default_mapping() -> Self {
        let entries = [
            ("House", "House"),
            ("Bass House", "House/Bass House"),
            ("Afro House", "House/Afro House"),
            ("Funky House", "House/Funky House"),
            ("Latin House", "House/Latin House"),
            ("Latin Tech House", "House/Latin House"),
            ("Tech House", "House/Tech House"),
            ("Deep House", "House/Deep House"),
            ("Progressive House", "House/Progressive House"),
            ("Melodic House & Techno", "House/Melodic House & Techno"),
            ("Hip Hop House", "House/Hip Hop House"),
            ("Hip Hop", "Hip Hop"),
            ("Drum & Bass", "Drum and Bass"),
            ("Dubstep", "Electronic"),
            ("Dance & EDM", "Electronic"),
            ("Electronic", "Electronic"),
            ("Mainstage", "Electronic"),
            ("Indie Dance", "Dance"),
            ("Dance / Electro Pop", "Dance"),
            ("Dance", "Dance"),
            ("Hard Techno", "Techno"),
            ("Techno", "Techno"),
            ("Rap", "Hip Hop"),
        ];
        Self::new(
            entries
                .into_iter()
                .map(|(genre, folder)| (genre.to_string(), folder.to_string())),
        )
    }

    /// The folder path for a genre, or the Unknown bucket when unmapped.
    pub fn folder_for(&self, genre: &str) -> &str {
        self.entries
            .get(genre)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_GENRE_FOLDER)
    }
}

impl Default for GenreMap {
    fn default() -> Self {
        Self::default_mapping()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn maps_known_genres_verbatim() {
        let map = GenreMap::default_mapping();
        assert_eq!(map.folder_for("Tech House"), "House/Tech House");
        assert_eq!(map.folder_for("Latin Tech House"), "House/Latin House");
        assert_eq!(map.folder_for("Rap"), "Hip Hop");
        assert_eq!(map.folder_for("Drum & Bass"), "Drum and Bass");
    }

    #[test]
    fn unmapped_genre_falls_back_to_unknown() {
        let map = GenreMap::default_mapping();
        assert_eq!(map.folder_for("Salsa"), "Unknown");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let map = GenreMap::default_mapping();
        assert_eq!(map.folder_for("tech house"), "Unknown");
    }

    #[test]
    fn custom_mapping_overrides_defaults() {
        let map = GenreMap::new([("Ambient".to_string(), "Chill/Ambient".to_string())]);
        assert_eq!(map.folder_for("Ambient"), "Chill/Ambient");
        assert_eq!(map.folder_for("House"), "Unknown");
    }
}
