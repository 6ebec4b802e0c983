pub mod edit;
pub mod tags;
