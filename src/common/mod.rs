pub mod comment;
pub mod env;
pub mod query;

pub use comment::*;
pub use env::{EnvProvider, SystemEnvProvider};
pub use query::QueryWindow;

#[cfg(test)]
pub use env::MockEnvProvider;
