/// Login state of one client process.
///
/// Holds the token handed out by the server after a successful login. The
/// console owns one `Session` and lends it to every command.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    pub fn start(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Forgets the token and returns it.
    pub fn end(&mut self) -> Option<String> {
        self.token.take()
    }
}
