mod bookmark;
mod certificate;
mod contact;
mod course;
mod lecture;
mod progress;
mod purchase;
pub mod quiz;
pub mod user;

pub use bookmark::*;
pub use certificate::*;
pub use contact::*;
pub use course::*;
pub use lecture::*;
pub use progress::*;
pub use purchase::*;
pub use quiz::*;
pub use user::*;
