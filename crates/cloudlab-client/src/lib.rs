pub mod channel;
pub mod config;
pub mod features;
pub mod report;
pub mod shared;
