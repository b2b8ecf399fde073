pub mod collect;
pub mod config;
pub mod credentials;
pub mod github;
pub mod output;
pub mod report;
pub mod time;
pub mod viewer;
