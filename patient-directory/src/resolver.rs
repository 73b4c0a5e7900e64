use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use backend_client::LmsClient;
use error_common::{LmsError, LmsResult};

use crate::models::Patient;

/// Default cap on directory hits per search
pub const RESULT_LIMIT: usize = 10;

/// Resolver tuning knobs
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Queries at least this long count as "specific": a unique match is
    /// committed automatically instead of being offered as a one-entry
    /// list. The default (6) stands in for "looks like a full phone
    /// number"; treat it as a business rule to confirm, not a constant
    /// to preserve.
    pub auto_select_min_query_len: usize,
    /// Cap on directory results per search
    pub result_limit: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            auto_select_min_query_len: 6,
            result_limit: RESULT_LIMIT,
        }
    }
}

/// Mutually exclusive progress of a patient search
#[derive(Debug, Clone, PartialEq)]
pub enum ResolverState {
    /// No query, no selection
    Idle,
    /// A directory lookup is in flight
    Searching,
    /// The last search matched nothing; the caller should tell the user
    NoResults,
    /// The caller must present the list and wait for an explicit pick
    Multiple(Vec<Patient>),
    /// Exactly one patient committed
    Selected(Patient),
}

/// Seam over the remote patient directory
#[async_trait]
pub trait PatientDirectory: Send + Sync {
    /// Search the directory, capped at `limit` results
    async fn find_patients(&self, query: &str, limit: usize) -> LmsResult<Vec<Patient>>;
}

#[async_trait]
impl PatientDirectory for LmsClient {
    async fn find_patients(&self, query: &str, limit: usize) -> LmsResult<Vec<Patient>> {
        let records = self
            .search_patients(query, limit)
            .await
            .map_err(LmsError::from)?;
        Ok(records.into_iter().map(Patient::from).collect())
    }
}

struct Inner {
    state: ResolverState,
    query: String,
}

/// Search-to-selection state machine
///
/// Shared by reference from UI event handlers; the internal lock is never
/// held across an await, and the generation counter decides which
/// in-flight response is allowed to land.
pub struct PatientResolver {
    directory: Arc<dyn PatientDirectory>,
    config: ResolverConfig,
    inner: Mutex<Inner>,
    generation: AtomicU64,
}

impl PatientResolver {
    pub fn new(directory: Arc<dyn PatientDirectory>) -> Self {
        Self::with_config(directory, ResolverConfig::default())
    }

    pub fn with_config(directory: Arc<dyn PatientDirectory>, config: ResolverConfig) -> Self {
        Self {
            directory,
            config,
            inner: Mutex::new(Inner {
                state: ResolverState::Idle,
                query: String::new(),
            }),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ResolverState {
        self.lock().state.clone()
    }

    /// The query text that produced the current state
    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    /// The committed patient, if the machine is in Selected
    pub fn selected_patient(&self) -> Option<Patient> {
        match &self.lock().state {
            ResolverState::Selected(patient) => Some(patient.clone()),
            _ => None,
        }
    }

    /// Run one search command
    ///
    /// An empty or whitespace query resets to Idle without touching the
    /// network. Zero hits land in NoResults; a unique hit from a specific
    /// query commits directly to Selected; anything else lands in
    /// Multiple and waits for [`PatientResolver::pick`]. On failure the
    /// state falls back to NoResults (a stale selection is never kept)
    /// and the error is returned once for user notification.
    pub async fn search(&self, query: &str) -> LmsResult<ResolverState> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            self.clear();
            return Ok(ResolverState::Idle);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut inner = self.lock();
            inner.query = trimmed.to_string();
            inner.state = ResolverState::Searching;
        }

        let result = self
            .directory
            .find_patients(trimmed, self.config.result_limit)
            .await;

        let mut inner = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            // a newer search, pick, or clear won; this response is stale
            tracing::debug!(generation, "discarding stale search response");
            return Ok(inner.state.clone());
        }

        match result {
            Ok(mut patients) => {
                let specific = trimmed.chars().count() >= self.config.auto_select_min_query_len;
                inner.state = match patients.len() {
                    0 => {
                        tracing::debug!(query = trimmed, "no patient matched");
                        ResolverState::NoResults
                    }
                    1 if specific => ResolverState::Selected(patients.remove(0)),
                    _ => ResolverState::Multiple(patients),
                };
                Ok(inner.state.clone())
            }
            Err(err) => {
                inner.state = ResolverState::NoResults;
                tracing::warn!(error = %err, "patient search failed");
                Err(err)
            }
        }
    }

    /// Commit an explicit pick, clearing any pending result list
    pub fn pick(&self, patient: Patient) -> ResolverState {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.lock();
        inner.state = ResolverState::Selected(patient);
        inner.state.clone()
    }

    /// Reset to Idle, discarding query text, results, and any selection
    pub fn clear(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let mut inner = self.lock();
        inner.query.clear();
        inner.state = ResolverState::Idle;
    }

    /// User-facing message for an empty search result
    pub fn no_match_message(query: &str) -> String {
        format!("No patient found matching {query}")
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
