pub mod connection;
pub mod leagues;
pub mod matches;
pub mod models;
pub mod players;
pub mod ratings;
pub mod sessions;
pub mod setup;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use leagues::LeagueStore;
pub use models::*;
