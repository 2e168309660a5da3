use secrecy::SecretString;

/// Process-wide settings read once at startup.
#[derive(Clone)]
pub struct GlobalArgs {
    pub cognito_region: String,
    pub cognito_client_id: String,
    pub cognito_endpoint: Option<String>,
    pub jwt_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(cognito_region: String, cognito_client_id: String, jwt_secret: SecretString) -> Self {
        Self {
            cognito_region,
            cognito_client_id,
            cognito_endpoint: None,
            jwt_secret,
        }
    }

    pub fn set_cognito_endpoint(&mut self, endpoint: Option<String>) {
        self.cognito_endpoint = endpoint;
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("cognito_region", &self.cognito_region)
            .field("cognito_client_id", &self.cognito_client_id)
            .field("cognito_endpoint", &self.cognito_endpoint)
            .field("jwt_secret", &"***")
            .finish()
    }
}
