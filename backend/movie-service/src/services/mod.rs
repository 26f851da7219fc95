pub mod cast_client;

pub use cast_client::{CastClient, CastClientError};
