use crate::services::detector::Snapshot;
use crate::services::session::{AuthError, Credentials, ScrapeError, SessionDriver};

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("authentication failed: {0}")]
    AuthFailed(#[source] AuthError),
    #[error("availability check failed: {0}")]
    ScrapeFailed(#[source] ScrapeError),
}

/// Runs one authenticate + fetch + release cycle against the session driver.
/// Holds no mutable state of its own; every call opens a fresh session.
pub struct Poller<D: SessionDriver> {
    driver: D,
    credentials: Credentials,
}

impl<D: SessionDriver> Poller<D> {
    pub fn new(driver: D, credentials: Credentials) -> Self {
        Self {
            driver,
            credentials,
        }
    }

    /// One poll cycle. The session opened here is released on every exit
    /// path, including both failure cases.
    pub async fn poll(&self) -> Result<Snapshot, PollError> {
        let mut session = self.driver.open().await.map_err(PollError::AuthFailed)?;

        if let Err(e) = self.driver.authenticate(&mut session, &self.credentials).await {
            self.driver.release(session).await;
            return Err(PollError::AuthFailed(e));
        }

        let fetched = self.driver.fetch_slots(&mut session).await;
        self.driver.release(session).await;

        let slots = fetched.map_err(PollError::ScrapeFailed)?;
        Ok(slots.into_iter().collect())
    }
}
