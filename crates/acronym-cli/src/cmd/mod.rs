pub mod config;
pub mod explain;
pub mod run;
pub mod state;
