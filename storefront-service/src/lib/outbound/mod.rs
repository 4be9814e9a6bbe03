pub mod repositories;
pub mod store_client;
