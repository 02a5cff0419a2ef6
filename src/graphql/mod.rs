pub mod executor;
pub mod queries;
pub mod response_models;

pub use executor::{DliveClient, QueryExecutor};
pub use queries::{GraphQlRequest, FOLLOWING_PAGE_SIZE};
