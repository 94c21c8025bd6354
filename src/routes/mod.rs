pub mod bookmark;
pub mod certificate;
pub mod contact;
pub mod course;
mod guard;
pub mod health_checks;
pub mod progress;
pub mod purchase;
pub mod quiz;
pub mod user;

pub use health_checks::*;
