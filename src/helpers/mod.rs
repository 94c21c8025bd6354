pub mod json;
pub mod password;
pub mod throttle;
pub mod token;

pub use json::*;
pub use throttle::RefreshThrottle;
pub use token::{extract_bearer_token, Claims, TokenKind, TokenService};
