pub mod bookmark;
pub mod certificate;
pub mod contact;
pub mod course;
pub mod lecture;
pub mod progress;
pub mod purchase;
pub mod quiz;
pub mod user;
