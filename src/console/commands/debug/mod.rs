mod contact;
mod login;
mod ping;

pub use contact::*;
pub use login::*;
pub use ping::*;

/// `http://host:port/` and `http://host:port` point at the same server.
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        assert_eq!(
            endpoint("http://localhost:8000/", "/health_check"),
            "http://localhost:8000/health_check"
        );
        assert_eq!(
            endpoint("http://localhost:8000", "/api/v1/user/login"),
            "http://localhost:8000/api/v1/user/login"
        );
    }
}
