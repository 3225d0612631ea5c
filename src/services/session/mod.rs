pub mod webdriver;

pub use webdriver::WebDriverSession;

use async_trait::async_trait;

/// Portal login credentials, forwarded opaquely to the session driver.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub last_name: String,
    pub license_number: String,
    pub keyword: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("browser session error: {0}")]
    Session(String),
    #[error("login form error: {0}")]
    Form(String),
    #[error("login did not reach booking page: {0}")]
    Rejected(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("navigation error: {0}")]
    Navigation(String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Browser-level collaborator that logs into the portal and reads the
/// appointment list. One session per poll cycle; the caller is responsible
/// for releasing every session it opens, on every exit path.
#[async_trait]
pub trait SessionDriver: Send + Sync {
    type Session: Send;

    /// Open a fresh browser session. Nothing to release if this fails.
    async fn open(&self) -> Result<Self::Session, AuthError>;

    /// Log into the portal with the given credentials.
    async fn authenticate(
        &self,
        session: &mut Self::Session,
        credentials: &Credentials,
    ) -> Result<(), AuthError>;

    /// Read the currently listed appointment slots. An empty list is a valid
    /// result and means no appointments are offered.
    async fn fetch_slots(&self, session: &mut Self::Session) -> Result<Vec<String>, ScrapeError>;

    /// Tear the session down. Best-effort; failures are logged, not returned.
    async fn release(&self, session: Self::Session);
}
