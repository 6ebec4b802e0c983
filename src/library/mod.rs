pub mod genres;
pub mod migrate;
pub mod transfer;
