//! In-memory test doubles shared by the use case tests.

use crate::ports::cache_store::CacheStore;
use crate::ports::clock::Clock;
use crate::ports::llm_gateway::{GatewayError, LlmProvider};
use crate::ports::progress::ProgressNotifier;
use async_trait::async_trait;
use chorus_domain::{
    CacheEntry, CacheKey, GenerationParams, Message, PromptTemplate, Role, Stage,
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// What a mock provider sees for one call
pub struct Reply {
    pub system: String,
    pub user: String,
    pub temperature: f64,
}

impl Reply {
    pub fn is_synthesis(&self) -> bool {
        self.system == PromptTemplate::synthesis_system()
    }

    pub fn is_verification(&self) -> bool {
        self.system == PromptTemplate::verification_system()
    }
}

type Responder = Box<dyn Fn(Reply) -> Result<String, GatewayError> + Send + Sync>;

pub struct MockProvider {
    name: String,
    responder: Responder,
    calls: AtomicUsize,
    temperatures: Mutex<Vec<f64>>,
    delay: Option<(f64, Duration)>,
}

impl MockProvider {
    pub fn new(
        name: &str,
        responder: impl Fn(Reply) -> Result<String, GatewayError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            responder: Box::new(responder),
            calls: AtomicUsize::new(0),
            temperatures: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    /// Sleep for `delay` before answering calls made at `temperature`.
    pub fn with_delay_at(mut self, temperature: f64, delay: Duration) -> Self {
        self.delay = Some((temperature, delay));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn temperatures(&self) -> Vec<f64> {
        self.temperatures.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn complete(
        &self,
        messages: &[Message],
        params: &GenerationParams,
    ) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.temperatures.lock().unwrap().push(params.temperature);

        if let Some((temperature, delay)) = self.delay
            && temperature == params.temperature
        {
            tokio::time::sleep(delay).await;
        }

        let content_of = |role: Role| {
            messages
                .iter()
                .rev()
                .find(|m| m.role == role)
                .map(|m| m.content.clone())
                .unwrap_or_default()
        };

        (self.responder)(Reply {
            system: content_of(Role::System),
            user: content_of(Role::User),
            temperature: params.temperature,
        })
    }
}

#[derive(Default)]
pub struct MapStore(Mutex<HashMap<CacheKey, CacheEntry>>);

impl CacheStore for MapStore {
    fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn insert(&self, key: CacheKey, entry: CacheEntry) {
        self.0.lock().unwrap().insert(key, entry);
    }

    fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut map = self.0.lock().unwrap();
        let before = map.len();
        map.retain(|_, e| !e.is_evictable(now));
        before - map.len()
    }

    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Clock that only moves when told to
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl Default for ManualClock {
    fn default() -> Self {
        Self(Mutex::new(Utc::now()))
    }
}

impl ManualClock {
    pub fn advance(&self, by: ChronoDuration) {
        *self.0.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

#[derive(Default)]
pub struct RecordingProgress {
    stages: Mutex<Vec<Stage>>,
    succeeded: AtomicUsize,
    failed: AtomicUsize,
}

impl RecordingProgress {
    pub fn stages(&self) -> Vec<Stage> {
        self.stages.lock().unwrap().clone()
    }

    /// (successful, failed) candidate calls
    pub fn candidate_results(&self) -> (usize, usize) {
        (
            self.succeeded.load(Ordering::SeqCst),
            self.failed.load(Ordering::SeqCst),
        )
    }
}

impl ProgressNotifier for RecordingProgress {
    fn on_stage(&self, stage: Stage, _percent: u8) {
        self.stages.lock().unwrap().push(stage);
    }

    fn on_candidate_complete(&self, _provider: &str, _temperature: f64, success: bool) {
        if success {
            self.succeeded.fetch_add(1, Ordering::SeqCst);
        } else {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }
}
