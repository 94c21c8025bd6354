mod checkout;
mod get;
mod verify;
mod webhook;

pub use checkout::*;
pub use get::*;
pub use verify::*;
pub use webhook::*;
