//! Deliberately exploitable route handlers

use crate::error::Result;
use crate::models::Variant;
use serde_yaml::Value;

/// Demo app that ships the textbook version of each bug
pub struct VulnerableApp;

impl super::DemoApp for VulnerableApp {
    fn variant(&self) -> Variant {
        Variant::Vulnerable
    }

    fn home(&self) -> String {
        Variant::Vulnerable.banner().to_string()
    }

    fn search(&self, query: &str) -> Result<String> {
        // Whatever arrives in `q` lands in the markup as-is (CWE-79).
        Ok(format!("<h1>Search Results for: {query}</h1>"))
    }

    fn load_config(&self, body: &[u8]) -> Result<String> {
        // Accepts every construct the parser knows, tagged nodes included,
        // and echoes the document back.
        let value: Value = serde_yaml::from_slice(body)?;
        Ok(serde_yaml::to_string(&value)?)
    }

    fn verbose_errors(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::DemoApp;

    #[test]
    fn test_search_reflects_raw_input() {
        let app = VulnerableApp;
        let fragment = app.search("<script>alert(1)</script>").unwrap();
        assert!(fragment.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_load_config_accepts_tagged_nodes() {
        let app = VulnerableApp;
        let rendered = app.load_config(b"!Exec\ncmd: whoami\n").unwrap();
        assert!(rendered.contains("whoami"));
    }

    #[test]
    fn test_load_config_rejects_malformed_yaml() {
        let app = VulnerableApp;
        assert!(app.load_config(b"key: [1, 2").is_err());
    }
}
