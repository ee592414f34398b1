pub mod client;
pub mod v1;
