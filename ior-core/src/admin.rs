/// Shared secret that unlocks admin mode.
///
/// This is a plain string compare against a configured value. It keeps
/// casual users out of the edit affordances and nothing more; it is not
/// authentication.
#[derive(Clone)]
pub struct AdminCredential {
    secret: String,
}

impl AdminCredential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn validate(&self, candidate: &str) -> bool {
        candidate == self.secret
    }
}

// Never print the secret.
impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential").finish_non_exhaustive()
    }
}
