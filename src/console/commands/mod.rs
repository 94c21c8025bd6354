pub mod certificate;
pub mod debug;
pub mod env;
pub mod storage;
mod callable;

pub use callable::*;
