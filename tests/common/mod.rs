// =============================================================================
// SHARED TEST DOUBLES
// Scripted session driver and recording notifier for run-loop tests
// =============================================================================

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use slotwatch::services::notify::{Notifier, NotifyError};
use slotwatch::services::session::{AuthError, Credentials, ScrapeError, SessionDriver};

pub fn credentials() -> Credentials {
    Credentials {
        last_name: "Doe".to_string(),
        license_number: "1234567".to_string(),
        keyword: "hunter2".to_string(),
    }
}

/// What one scripted poll cycle should do.
pub enum CycleOutcome {
    Slots(Vec<&'static str>),
    AuthFailure,
    ScrapeFailure,
}

struct MockDriverInner {
    outcomes: Mutex<VecDeque<CycleOutcome>>,
    opened: AtomicUsize,
    released: AtomicUsize,
    fetches: AtomicUsize,
}

/// Session driver that replays a scripted sequence of cycle outcomes and
/// counts open/fetch/release calls. Clones share the same script and counters.
#[derive(Clone)]
pub struct MockDriver {
    inner: Arc<MockDriverInner>,
}

impl MockDriver {
    pub fn new(outcomes: Vec<CycleOutcome>) -> Self {
        Self {
            inner: Arc::new(MockDriverInner {
                outcomes: Mutex::new(outcomes.into()),
                opened: AtomicUsize::new(0),
                released: AtomicUsize::new(0),
                fetches: AtomicUsize::new(0),
            }),
        }
    }

    pub fn opened(&self) -> usize {
        self.inner.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.inner.released.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.inner.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionDriver for MockDriver {
    type Session = ();

    async fn open(&self) -> Result<(), AuthError> {
        self.inner.opened.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn authenticate(
        &self,
        _session: &mut (),
        _credentials: &Credentials,
    ) -> Result<(), AuthError> {
        let mut outcomes = self.inner.outcomes.lock().unwrap();
        match outcomes.front() {
            Some(CycleOutcome::AuthFailure) => {
                outcomes.pop_front();
                Err(AuthError::Rejected("scripted login failure".to_string()))
            }
            Some(_) => Ok(()),
            None => panic!("poll cycle ran past the scripted outcomes"),
        }
    }

    async fn fetch_slots(&self, _session: &mut ()) -> Result<Vec<String>, ScrapeError> {
        self.inner.fetches.fetch_add(1, Ordering::SeqCst);
        let outcome = self
            .inner
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("poll cycle ran past the scripted outcomes");
        match outcome {
            CycleOutcome::Slots(slots) => Ok(slots.into_iter().map(String::from).collect()),
            CycleOutcome::ScrapeFailure => {
                Err(ScrapeError::Navigation("scripted scrape failure".to_string()))
            }
            CycleOutcome::AuthFailure => unreachable!("auth failures are consumed during login"),
        }
    }

    async fn release(&self, _session: ()) {
        self.inner.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Notifier that records every message, optionally failing each send.
#[derive(Clone)]
pub struct MockNotifier {
    messages: Arc<Mutex<Vec<(u64, String)>>>,
    failing: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            failing: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            failing: true,
        }
    }

    pub fn messages(&self) -> Vec<(u64, String)> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, channel_id: u64, text: &str) -> Result<(), NotifyError> {
        self.messages
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        if self.failing {
            Err(NotifyError::Api(503))
        } else {
            Ok(())
        }
    }
}
