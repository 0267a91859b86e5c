//! devcon - debug console command language and dispatch

pub mod error;
pub mod executor;
pub mod logger;
pub mod parser;
pub mod registry;
