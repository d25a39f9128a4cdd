//! Async-loadable page state.
//!
//! A [`Resource`] holds the [`ResourceState`] of one page's data. A
//! [`ViewModel`] owns a resource plus the cancellation token of its in-flight
//! load: starting a newer load or dropping the view model cancels the older
//! fetch, so a stale result is never stored.

use std::future::Future;
use std::sync::{Arc, Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::Error as SourceError;

/// Error recorded when a resource fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ResourceError {
    /// Error message
    pub message: String,
}

impl ResourceError {
    /// Create a new resource error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<&SourceError> for ResourceError {
    fn from(err: &SourceError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<String> for ResourceError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for ResourceError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The state of an async-loadable resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResourceState<T> {
    /// Resource has not started loading
    #[default]
    Idle,
    /// Resource is loading
    Loading,
    /// Resource loaded successfully
    Ready(T),
    /// Resource failed to load
    Error(ResourceError),
}

impl<T> ResourceState<T> {
    /// Check if resource is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if resource is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if resource is ready
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Check if resource errored
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get reference to ready value
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Get the error if present
    pub fn as_error(&self) -> Option<&ResourceError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Map the ready value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResourceState<U> {
        match self {
            Self::Idle => ResourceState::Idle,
            Self::Loading => ResourceState::Loading,
            Self::Ready(v) => ResourceState::Ready(f(v)),
            Self::Error(e) => ResourceState::Error(e),
        }
    }
}

/// Shared, versioned resource state.
///
/// Cheap to clone; all clones observe the same state. Every transition bumps
/// [`version`](Resource::version), which [`Derived`] uses to decide when to
/// recompute.
#[derive(Debug)]
pub struct Resource<T> {
    inner: Arc<RwLock<ResourceState<T>>>,
    version: Arc<AtomicU64>,
}

impl<T> Resource<T> {
    /// Create a new resource in idle state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResourceState::Idle)),
            version: Arc::new(AtomicU64::new(0)),
        }
    }

    fn replace(&self, state: ResourceState<T>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = state;
            self.version.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Bumps `generations` and replaces the state under one write lock.
    fn advance(&self, generations: &AtomicU64, state: ResourceState<T>) -> u64 {
        let Ok(mut guard) = self.inner.write() else {
            return generations.fetch_add(1, Ordering::SeqCst) + 1;
        };
        let generation = generations.fetch_add(1, Ordering::SeqCst) + 1;
        *guard = state;
        self.version.fetch_add(1, Ordering::SeqCst);
        generation
    }

    /// Replaces the state only while `generations` still reads `generation`.
    /// The check and the write happen under the same lock as [`advance`](Self::advance).
    fn replace_if_current(
        &self,
        generations: &AtomicU64,
        generation: u64,
        state: ResourceState<T>,
    ) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        if generations.load(Ordering::SeqCst) != generation {
            return false;
        }
        *guard = state;
        self.version.fetch_add(1, Ordering::SeqCst);
        true
    }

    /// Get a clone of the current state
    pub fn get(&self) -> ResourceState<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(ResourceState::Idle)
    }

    /// Set to idle state
    pub fn set_idle(&self) {
        self.replace(ResourceState::Idle);
    }

    /// Set to loading state
    pub fn set_loading(&self) {
        self.replace(ResourceState::Loading);
    }

    /// Set to ready state with value
    pub fn set_ready(&self, value: T) {
        self.replace(ResourceState::Ready(value));
    }

    /// Set to error state
    pub fn set_error(&self, err: impl Into<ResourceError>) {
        self.replace(ResourceState::Error(err.into()));
    }

    /// Number of state transitions so far.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    /// Check if resource is loading
    pub fn is_loading(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_loading())
            .unwrap_or(false)
    }

    /// Check if resource is ready
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_ready())
            .unwrap_or(false)
    }

    /// Check if resource has an error
    pub fn is_error(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_error())
            .unwrap_or(false)
    }

    /// Returns the ready value, or `T::default()` in every other state.
    ///
    /// A failed load therefore reads as an empty, no-longer-loading result.
    pub fn ready_or_default(&self) -> T
    where
        T: Clone + Default,
    {
        self.inner
            .read()
            .ok()
            .and_then(|guard| guard.as_ready().cloned())
            .unwrap_or_default()
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            version: Arc::clone(&self.version),
        }
    }
}

/// Loader for one page's data.
///
/// Each load runs under a child of the view model's root token. Dropping the
/// view model cancels the root, and with it any fetch still in flight.
#[derive(Debug)]
pub struct ViewModel<T> {
    name: String,
    resource: Resource<T>,
    root: CancellationToken,
    current: Mutex<CancellationToken>,
    generation: Arc<AtomicU64>,
}

impl<T> ViewModel<T>
where
    T: Send + Sync + 'static,
{
    /// Creates an idle view model. `name` appears in log lines.
    pub fn new(name: impl Into<String>) -> Self {
        let root = CancellationToken::new();
        let current = root.child_token();
        Self {
            name: name.into(),
            resource: Resource::new(),
            root,
            current: Mutex::new(current),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Returns the view model's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a handle to the underlying resource.
    pub fn resource(&self) -> Resource<T> {
        self.resource.clone()
    }

    /// Returns the current state.
    pub fn state(&self) -> ResourceState<T>
    where
        T: Clone,
    {
        self.resource.get()
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.resource.is_loading()
    }

    /// Returns the loaded value, or empty when not ready.
    pub fn ready_or_default(&self) -> T
    where
        T: Clone + Default,
    {
        self.resource.ready_or_default()
    }

    /// Cancels any in-flight load and hands out a token for the next one.
    fn begin(&self) -> (CancellationToken, u64) {
        let token = self.root.child_token();
        if let Ok(mut current) = self.current.lock() {
            current.cancel();
            *current = token.clone();
        }
        let generation = self
            .resource
            .advance(&self.generation, ResourceState::Loading);
        (token, generation)
    }

    /// Runs `fetch` and stores its outcome.
    ///
    /// Returns `Err(Error::Cancelled)` when superseded or dropped before the
    /// fetch resolved; in that case nothing is stored. Fetch failures are
    /// logged, recorded as [`ResourceState::Error`] and returned.
    pub async fn load<F>(&self, fetch: F) -> Result<(), SourceError>
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        let (token, generation) = self.begin();
        run_load(
            &self.name,
            &self.resource,
            &self.generation,
            token,
            generation,
            fetch,
        )
        .await
    }

    /// Like [`load`](Self::load), but on a spawned task.
    pub fn spawn_load<F>(&self, fetch: F) -> JoinHandle<Result<(), SourceError>>
    where
        F: Future<Output = Result<T, SourceError>> + Send + 'static,
    {
        let (token, generation) = self.begin();
        let name = self.name.clone();
        let resource = self.resource.clone();
        let generations = Arc::clone(&self.generation);
        tokio::spawn(async move {
            run_load(&name, &resource, &generations, token, generation, fetch).await
        })
    }

    /// Cancels the in-flight load, if any, and returns to idle.
    pub fn cancel(&self) {
        if let Ok(current) = self.current.lock() {
            current.cancel();
        }
        self.resource.advance(&self.generation, ResourceState::Idle);
    }
}

impl<T> Drop for ViewModel<T> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

async fn run_load<T, F>(
    name: &str,
    resource: &Resource<T>,
    generations: &AtomicU64,
    token: CancellationToken,
    generation: u64,
    fetch: F,
) -> Result<(), SourceError>
where
    F: Future<Output = Result<T, SourceError>>,
{
    let resolved = tokio::select! {
        biased;
        _ = token.cancelled() => None,
        result = fetch => Some(result),
    };

    let Some(result) = resolved else {
        // Dropped or cancelled while still the latest load.
        resource.replace_if_current(generations, generation, ResourceState::Idle);
        log::debug!("Load of {} cancelled", name);
        return Err(SourceError::Cancelled);
    };

    let (state, outcome) = match result {
        Ok(value) => (ResourceState::Ready(value), Ok(())),
        Err(e) => (ResourceState::Error(ResourceError::from(&e)), Err(e)),
    };
    if !resource.replace_if_current(generations, generation, state) {
        log::debug!("Load of {} superseded", name);
        return Err(SourceError::Cancelled);
    }

    match &outcome {
        Ok(()) => log::debug!("Loaded {}", name),
        Err(e) => log::error!("Failed to load {}: {}", name, e),
    }
    outcome
}

/// A value computed from one or more resources, recomputed only when any of
/// their versions change.
#[derive(Debug)]
pub struct Derived<T> {
    cached: Mutex<Option<(Vec<u64>, T)>>,
}

impl<T: Clone> Derived<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            cached: Mutex::new(None),
        }
    }

    /// Returns the cached value when `versions` match the last computation,
    /// otherwise runs `compute` and caches its result.
    pub fn get_or_compute(&self, versions: &[u64], compute: impl FnOnce() -> T) -> T {
        let Ok(mut cached) = self.cached.lock() else {
            return compute();
        };
        if let Some((seen, value)) = cached.as_ref()
            && seen.as_slice() == versions
        {
            return value.clone();
        }
        let value = compute();
        *cached = Some((versions.to_vec(), value.clone()));
        value
    }
}

impl<T: Clone> Default for Derived<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::oneshot;

    fn unavailable() -> SourceError {
        SourceError::Unavailable {
            collection: "events".into(),
            message: "timeout".into(),
        }
    }

    #[tokio::test]
    async fn test_load_transitions_to_ready() {
        let vm: ViewModel<Vec<i32>> = ViewModel::new("events");
        assert!(vm.state().is_idle());

        vm.load(async { Ok(vec![1, 2, 3]) }).await.unwrap();

        assert_eq!(vm.state(), ResourceState::Ready(vec![1, 2, 3]));
        assert!(!vm.is_loading());
    }

    #[tokio::test]
    async fn test_failed_load_reads_as_empty() {
        let vm: ViewModel<Vec<i32>> = ViewModel::new("events");

        let err = vm.load(async { Err(unavailable()) }).await.unwrap_err();

        assert_eq!(err.to_string(), "events unavailable: timeout");
        assert!(vm.state().is_error());
        assert!(!vm.is_loading());
        assert!(vm.ready_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_newer_load_supersedes_older() {
        let vm: ViewModel<&'static str> = ViewModel::new("inquiries");
        let (release, wait) = oneshot::channel::<()>();

        let stale = vm.spawn_load(async move {
            let _ = wait.await;
            Ok("stale")
        });
        vm.load(async { Ok("fresh") }).await.unwrap();
        let _ = release.send(());

        assert!(matches!(stale.await.unwrap(), Err(SourceError::Cancelled)));
        assert_eq!(vm.state(), ResourceState::Ready("fresh"));
    }

    #[tokio::test]
    async fn test_drop_cancels_in_flight_load() {
        let vm: ViewModel<u32> = ViewModel::new("engagements");
        let resource = vm.resource();
        let (_keep, wait) = oneshot::channel::<()>();

        let handle = vm.spawn_load(async move {
            let _ = wait.await;
            Ok(7)
        });
        assert!(resource.is_loading());
        drop(vm);

        assert!(matches!(handle.await.unwrap(), Err(SourceError::Cancelled)));
        assert!(resource.get().is_idle());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_stale_result_never_overwrites_newer_load() {
        for round in 0..500 {
            let vm: ViewModel<u32> = ViewModel::new("events");
            let stale = vm.spawn_load(async move {
                tokio::task::yield_now().await;
                Ok(round)
            });
            let fresh = vm.load(async move { Ok(round + 1_000) }).await;

            let _ = stale.await.unwrap();
            fresh.unwrap();
            assert_eq!(vm.state(), ResourceState::Ready(round + 1_000), "round {}", round);
        }
    }

    #[tokio::test]
    async fn test_cancel_returns_to_idle() {
        let vm: ViewModel<u32> = ViewModel::new("events");
        let (_keep, wait) = oneshot::channel::<()>();
        let handle = vm.spawn_load(async move {
            let _ = wait.await;
            Ok(1)
        });

        vm.cancel();

        assert!(handle.await.unwrap().is_err());
        assert!(vm.state().is_idle());
    }

    #[test]
    fn test_version_bumps_on_every_transition() {
        let resource: Resource<u8> = Resource::new();
        assert_eq!(resource.version(), 0);
        resource.set_loading();
        resource.set_ready(1);
        assert_eq!(resource.version(), 2);
        assert_eq!(resource.clone().version(), 2);
    }

    #[test]
    fn test_derived_recomputes_on_version_change() {
        let derived = Derived::new();
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            42
        };

        assert_eq!(derived.get_or_compute(&[1, 1], compute), 42);
        assert_eq!(derived.get_or_compute(&[1, 1], compute), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        derived.get_or_compute(&[1, 2], compute);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
