use std::env;

#[derive(Clone, Debug, Default)]
pub struct CorsConfig {
    /// Explicit origins. Empty means any origin is accepted.
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(origins: &[&str]) -> CorsConfig {
        CorsConfig {
            allowed_origins: origins.iter().map(|o| o.to_string()).collect(),
        }
    }

    #[test]
    fn test_wildcard_or_empty_allows_any_origin() {
        assert!(config(&[]).allows_any_origin());
        assert!(config(&["*"]).allows_any_origin());
        assert!(config(&["http://shop.test", "*"]).allows_any_origin());
    }

    #[test]
    fn test_explicit_list_is_restrictive() {
        assert!(!config(&["http://shop.test"]).allows_any_origin());
    }
}
