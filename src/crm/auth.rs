/// Bearer-token credentials for the CRM REST API.
#[derive(Clone, Default)]
pub struct CrmAuth {
    token: Option<String>,
}

impl std::fmt::Debug for CrmAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrmAuth")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CrmAuth {
    pub fn new(token: String) -> Self {
        let token = token.trim().to_string();
        Self {
            token: (!token.is_empty()).then_some(token),
        }
    }

    pub fn anonymous() -> Self {
        Self { token: None }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Headers to attach to every request.
    pub fn headers(&self) -> Vec<(String, String)> {
        match &self.token {
            Some(token) => vec![("Authorization".to_string(), format!("Bearer {}", token))],
            None => Vec::new(),
        }
    }
}
