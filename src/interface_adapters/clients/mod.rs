pub mod dictionary;
pub mod host;
