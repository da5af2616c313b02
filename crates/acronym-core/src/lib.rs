pub mod config;
pub mod dictionary;
pub mod error;
pub mod feed;
pub mod formatter;
pub mod io;
pub mod matcher;
pub mod paths;
pub mod reddit;
pub mod scan;
pub mod state;

pub use error::{BotError, FeedError, Result};
