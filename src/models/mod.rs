pub mod anime;

pub use anime::{AnimeEntry, UserList};
