use crate::config::Credentials;
use crate::types::Session;

/// Session marker handed out on login. Not a real token.
pub const SESSION_TOKEN: &str = "mock-jwt-token-123";

/// Exact match against the configured pair; returns the session to persist.
pub fn check_credentials(expected: &Credentials, username: &str, password: &str) -> Option<Session> {
    if username == expected.username && password == expected.password {
        Some(Session { username: username.to_string(), token: SESSION_TOKEN.to_string() })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_the_configured_pair() {
        let creds = Credentials::default();
        let s = check_credentials(&creds, "admin", "admin123").unwrap();
        assert_eq!(s.username, "admin");
        assert_eq!(s.token, SESSION_TOKEN);
        assert!(check_credentials(&creds, "admin", "wrong").is_none());
        assert!(check_credentials(&creds, "Admin", "admin123").is_none());
        assert!(check_credentials(&creds, "", "").is_none());
    }
}
