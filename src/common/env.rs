/// Trait for accessing environment variables in a testable way
///
/// Configuration is resolved through this seam so tests can inject values
/// without touching the process environment.

#[cfg(test)]
use std::collections::HashMap;
pub trait EnvProvider {
    /// Get the value of an environment variable
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation that uses the system environment
pub struct SystemEnvProvider;

impl EnvProvider for SystemEnvProvider {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Test-only mock implementation for environment variables
#[cfg(test)]
#[derive(Default)]
pub struct MockEnvProvider {
    vars: HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable in the mock
    pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn remove_var(&mut self, key: &str) -> &mut Self {
        self.vars.remove(key);
        self
    }

    /// Create a mock pointing at a given service and project
    pub fn with_service(api_url: impl Into<String>, project_id: impl Into<String>) -> Self {
        let mut mock = Self::new();
        mock.set_var("COMMONT_API_URL", api_url);
        mock.set_var("COMMONT_PROJECT_ID", project_id);
        mock
    }
}

#[cfg(test)]
impl EnvProvider for MockEnvProvider {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
