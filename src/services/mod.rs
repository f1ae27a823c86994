// Service exports
pub mod appwrite;
pub mod postgres;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use postgres::{PostgresClient, PostgresError};
