pub mod cluster;
pub mod remove;
