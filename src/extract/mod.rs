pub mod embedded;
pub mod navigator;
