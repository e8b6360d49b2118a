pub mod downloader;
pub mod loader;

pub use downloader::ModelFiles;
pub use loader::{load, Loaded};
