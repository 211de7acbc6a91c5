pub mod badge;
pub mod config;
pub mod generate;
pub mod http;
pub mod runtime;
pub mod source;

pub use generate::{DownloadSummary, generate};
