mod getheader;
mod manager;
mod manager_middleware;
mod method;

pub use getheader::*;
pub use manager::*;
pub use manager_middleware::*;

/// Role name the access control list is evaluated for. Inserted into the
/// request extensions by whichever authentication method succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessSubject(pub String);

impl AccessSubject {
    pub const ANONYMOUS: &'static str = "anonym";

    pub fn anonym() -> Self {
        Self(Self::ANONYMOUS.to_string())
    }

    pub fn is_anonym(&self) -> bool {
        self.0 == Self::ANONYMOUS
    }
}
