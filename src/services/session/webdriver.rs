use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::prelude::*;

use super::{AuthError, Credentials, ScrapeError, SessionDriver};

const LOGIN_URL: &str = "https://onlinebusiness.icbc.com/webdeas-ui/login;type=driver";
const LOCATION_NAME: &str = "Richmond driver licensing (Lansdowne Centre mall)";

// The portal is an Angular Material app; these paths track its current markup
// and are expected to break on any site redesign.
const OFFICE_TAB_XPATH: &str = "/html/body/div/div/div/mat-dialog-container/app-search-modal/div/div/form/div[1]/mat-tab-group/mat-tab-header/div[2]/div/div/div[2]";
const LOCATION_INPUT_XPATH: &str = "/html/body/div/div[1]/div/mat-dialog-container/app-search-modal/div/div/form/div[1]/mat-tab-group/div/mat-tab-body[2]/div/div/mat-form-field/div/div[1]/div[3]/input";
const LOCATION_OPTION_XPATH: &str = "/html/body/div/div[2]/div/div/mat-option/span";
const RESULTS_XPATH: &str =
    "/html/body/div/div[2]/div/mat-dialog-container/app-eligible-tests/div/div[2]";
const NO_APPOINTMENTS_XPATH: &str =
    ".//p[contains(text(), 'no appointment') or contains(text(), 'No appointment')]";

const IMPLICIT_WAIT: Duration = Duration::from_secs(20);
const LOGIN_REDIRECT_WAIT: Duration = Duration::from_secs(20);

/// Session driver backed by a WebDriver-compatible browser (chromedriver).
pub struct WebDriverSession {
    server_url: String,
}

impl WebDriverSession {
    pub fn new(server_url: String) -> Self {
        Self { server_url }
    }

    /// Wait for the post-login redirect onto the booking page.
    async fn wait_for_booking_page(&self, driver: &WebDriver) -> Result<(), AuthError> {
        let deadline = tokio::time::Instant::now() + LOGIN_REDIRECT_WAIT;

        loop {
            let url = driver
                .current_url()
                .await
                .map_err(|e| AuthError::Session(e.to_string()))?;
            if url.as_str().contains("/booking") {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(AuthError::Rejected(format!(
                    "still on {} after sign-in",
                    url
                )));
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }
    }
}

#[async_trait]
impl SessionDriver for WebDriverSession {
    type Session = WebDriver;

    async fn open(&self) -> Result<WebDriver, AuthError> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()
            .map_err(|e| AuthError::Session(e.to_string()))?;
        caps.set_no_sandbox()
            .map_err(|e| AuthError::Session(e.to_string()))?;
        caps.add_arg("--window-size=1920,1080")
            .map_err(|e| AuthError::Session(e.to_string()))?;

        let driver = WebDriver::new(&self.server_url, caps)
            .await
            .map_err(|e| AuthError::Session(e.to_string()))?;
        driver
            .set_implicit_wait_timeout(IMPLICIT_WAIT)
            .await
            .map_err(|e| AuthError::Session(e.to_string()))?;

        tracing::info!("opened browser session via {}", self.server_url);
        Ok(driver)
    }

    async fn authenticate(
        &self,
        session: &mut WebDriver,
        credentials: &Credentials,
    ) -> Result<(), AuthError> {
        session
            .goto(LOGIN_URL)
            .await
            .map_err(|e| AuthError::Session(e.to_string()))?;
        tracing::info!("navigated to login page");

        let fields = [
            ("mat-input-0", credentials.last_name.as_str()),
            ("mat-input-1", credentials.license_number.as_str()),
            ("mat-input-2", credentials.keyword.as_str()),
        ];
        for (id, value) in fields {
            let input = session
                .find(By::Id(id))
                .await
                .map_err(|e| AuthError::Form(e.to_string()))?;
            input
                .send_keys(value)
                .await
                .map_err(|e| AuthError::Form(e.to_string()))?;
        }

        session
            .find(By::ClassName("mat-checkbox-inner-container"))
            .await
            .map_err(|e| AuthError::Form(e.to_string()))?
            .click()
            .await
            .map_err(|e| AuthError::Form(e.to_string()))?;

        session
            .find(By::XPath("//button[contains(text(), 'Sign in')]"))
            .await
            .map_err(|e| AuthError::Form(e.to_string()))?
            .click()
            .await
            .map_err(|e| AuthError::Form(e.to_string()))?;

        self.wait_for_booking_page(session).await?;
        tracing::info!("logged into booking portal");
        Ok(())
    }

    async fn fetch_slots(&self, session: &mut WebDriver) -> Result<Vec<String>, ScrapeError> {
        session
            .find(By::XPath(OFFICE_TAB_XPATH))
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?
            .click()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

        let location_input = session
            .find(By::XPath(LOCATION_INPUT_XPATH))
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        location_input
            .click()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        location_input
            .send_keys(LOCATION_NAME)
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

        // Give the autocomplete dropdown a moment to populate.
        tokio::time::sleep(Duration::from_secs(1)).await;

        session
            .find(By::XPath(LOCATION_OPTION_XPATH))
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?
            .click()
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;
        tracing::info!("selected location: {LOCATION_NAME}");

        let results = session
            .find(By::XPath(RESULTS_XPATH))
            .await
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

        let no_appointments = results
            .find_all(By::XPath(NO_APPOINTMENTS_XPATH))
            .await
            .map_err(|e| ScrapeError::Parse(e.to_string()))?;
        if !no_appointments.is_empty() {
            tracing::info!("portal reports no appointments available");
            return Ok(Vec::new());
        }

        let time_elements = results
            .find_all(By::XPath(".//div[contains(@class, 'appointment-time')]"))
            .await
            .map_err(|e| ScrapeError::Parse(e.to_string()))?;

        let mut slots = Vec::new();
        for time_element in time_elements {
            // Each time cell sits under a date heading earlier in the document.
            let date_element = match time_element
                .find(By::XPath(
                    "./preceding::div[contains(@class, 'appointment-date')][1]",
                ))
                .await
            {
                Ok(element) => element,
                Err(e) => {
                    tracing::warn!("skipping slot without a date heading: {e}");
                    continue;
                }
            };

            let date = match date_element.text().await {
                Ok(date) => date,
                Err(e) => {
                    tracing::warn!("skipping slot with unreadable date: {e}");
                    continue;
                }
            };
            let time = match time_element.text().await {
                Ok(time) => time,
                Err(e) => {
                    tracing::warn!("skipping slot with unreadable time: {e}");
                    continue;
                }
            };

            let slot = format!("{date} at {time}");
            tracing::info!("found appointment: {slot}");
            slots.push(slot);
        }

        Ok(slots)
    }

    async fn release(&self, session: WebDriver) {
        if let Err(e) = session.quit().await {
            tracing::warn!("failed to close browser session: {e}");
        }
    }
}
