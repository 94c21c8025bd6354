pub mod bookmark;
pub mod contact;
pub mod course;
pub mod lecture;
pub mod purchase;
pub mod quiz;
pub mod user;
