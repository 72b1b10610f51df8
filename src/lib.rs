pub mod download;
pub mod error;
pub mod format;
pub mod paths;
pub mod preview;
pub mod tags;
pub mod transfer;
pub mod wizard;
