mod config;
mod observe;
mod ring;

pub mod error;

pub use config::*;
pub use observe::*;
pub use ring::*;
