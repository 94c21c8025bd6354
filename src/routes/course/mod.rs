mod add;
mod delete;
mod get;
pub mod lecture;
mod update;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use update::*;
