pub mod convert;
pub mod discover_urls;
pub mod download_list;
pub mod song_info;
