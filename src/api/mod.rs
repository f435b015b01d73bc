pub mod client;
pub mod lcu;
pub mod models;
pub mod sources;
