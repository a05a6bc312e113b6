use std::fmt;
use std::path::{Path, PathBuf};

pub const TOKEN_ENV: &str = "DRAFTS_MCP_TOKEN";

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("Cannot determine home directory")]
    NoHome,
    #[error("Graph access token not found in $DRAFTS_MCP_TOKEN or at {paths:?}")]
    NotFound { paths: Vec<PathBuf> },
}

/// Bearer token for the Graph API. Handed to every call explicitly; never
/// stored globally and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

pub fn find_token() -> Result<Credential, AuthError> {
    if let Some(token) = non_empty(std::env::var(TOKEN_ENV).ok()) {
        return Ok(Credential::new(token));
    }
    let home = dirs::home_dir().ok_or(AuthError::NoHome)?;
    find_token_in(&home)
}

// Home dir is injected so tests can point at a temp dir
pub fn find_token_in(home: &Path) -> Result<Credential, AuthError> {
    let candidates = [
        home.join(".drafts-mcp-token"),
        home.join(".config/drafts-mcp/token"),
    ];
    for path in &candidates {
        let content = std::fs::read_to_string(path).ok();
        if let Some(token) = non_empty(content) {
            return Ok(Credential::new(token));
        }
    }
    Err(AuthError::NotFound { paths: candidates.to_vec() })
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_token(dir: &Path, rel: &str, token: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, token).unwrap();
    }

    #[test]
    fn finds_token_in_home_dotfile() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".drafts-mcp-token", "eyJ0eXAi.home");
        let cred = find_token_in(tmp.path()).unwrap();
        assert_eq!(cred.secret(), "eyJ0eXAi.home");
    }

    #[test]
    fn finds_token_in_config_dir() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".config/drafts-mcp/token", "eyJ0eXAi.config");
        let cred = find_token_in(tmp.path()).unwrap();
        assert_eq!(cred.secret(), "eyJ0eXAi.config");
    }

    #[test]
    fn dotfile_wins_over_config_dir() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".drafts-mcp-token", "first");
        write_token(tmp.path(), ".config/drafts-mcp/token", "second");
        assert_eq!(find_token_in(tmp.path()).unwrap().secret(), "first");
    }

    #[test]
    fn blank_dotfile_falls_through() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".drafts-mcp-token", "  \n");
        write_token(tmp.path(), ".config/drafts-mcp/token", "second");
        assert_eq!(find_token_in(tmp.path()).unwrap().secret(), "second");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let tmp = TempDir::new().unwrap();
        write_token(tmp.path(), ".drafts-mcp-token", "  tok-xyz\n");
        assert_eq!(find_token_in(tmp.path()).unwrap().secret(), "tok-xyz");
    }

    #[test]
    fn missing_token_lists_searched_paths() {
        let tmp = TempDir::new().unwrap();
        match find_token_in(tmp.path()) {
            Err(AuthError::NotFound { paths }) => assert_eq!(paths.len(), 2),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn debug_never_prints_secret() {
        let cred = Credential::new("eyJ0eXAiOiJKV1QiLCJub25jZSI6");
        let printed = format!("{cred:?}");
        assert!(!printed.contains("eyJ0eXAi"));
        assert_eq!(printed, "Credential(***)");
    }
}
