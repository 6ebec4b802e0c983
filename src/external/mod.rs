pub mod converter;
pub mod downloader;
pub mod resolver;
