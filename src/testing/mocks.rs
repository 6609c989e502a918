use crate::core::{AppIcon, Error, Result, Solution, SolutionCollection};
use crate::runtime::discovery::Discovery;
use crate::runtime::lifecycle::SearchRegistry;
use crate::runtime::locator::{AppDescriptor, AppLocator};
use crate::runtime::notify::Notifier;
use crate::runtime::provider::SearchProvider;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::oneshot;

/// Application that records launches instead of spawning anything
#[derive(Debug)]
pub struct StubApp {
    id: String,
    icon: Option<AppIcon>,
    fail_launch: bool,
    launches: Mutex<Vec<Vec<PathBuf>>>,
}

impl StubApp {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            icon: None,
            fail_launch: false,
            launches: Mutex::new(Vec::new()),
        }
    }

    pub fn with_icon(mut self, icon: AppIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn failing_launch(mut self) -> Self {
        self.fail_launch = true;
        self
    }

    /// File lists of all launch attempts, failed ones included
    pub fn launches(&self) -> Vec<Vec<PathBuf>> {
        self.launches.lock().clone()
    }
}

impl AppDescriptor for StubApp {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Rider"
    }

    fn icon(&self) -> Option<AppIcon> {
        self.icon.clone()
    }

    fn launch(&self, files: &[PathBuf]) -> Result<()> {
        self.launches.lock().push(files.to_vec());
        if self.fail_launch {
            Err(Error::launch("Rider", "stub launch failure"))
        } else {
            Ok(())
        }
    }
}

/// Locator that knows a fixed set of installed desktop ids
#[derive(Debug, Default)]
pub struct StubLocator {
    installed: Vec<String>,
    lookups: AtomicUsize,
}

impl StubLocator {
    pub fn with_installed(installed: &[&str]) -> Self {
        Self {
            installed: installed.iter().map(|id| id.to_string()).collect(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl AppLocator for StubLocator {
    fn find_app(&self, candidates: &[String]) -> Option<Arc<dyn AppDescriptor>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        candidates
            .iter()
            .find(|id| self.installed.contains(*id))
            .map(|id| Arc::new(StubApp::new(id)) as Arc<dyn AppDescriptor>)
    }
}

/// Discovery whose calls block until the test releases a result
///
/// Each call takes the next queued result slot; calls beyond the queue
/// resolve to an empty collection.
#[derive(Debug, Default)]
pub struct StubDiscovery {
    calls: AtomicUsize,
    pending: Mutex<VecDeque<oneshot::Receiver<Result<SolutionCollection>>>>,
}

impl StubDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a result slot and return the sender that releases it
    pub fn push_pending(&self) -> oneshot::Sender<Result<SolutionCollection>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().push_back(rx);
        tx
    }

    /// Queue a result that is available immediately
    pub fn push_ready(&self, result: Result<SolutionCollection>) {
        let _ = self.push_pending().send(result);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Discovery for StubDiscovery {
    async fn discover(&self) -> Result<SolutionCollection> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let slot = self.pending.lock().pop_front();
        match slot {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(Error::configuration("stub result dropped"))),
            None => Ok(SolutionCollection::new()),
        }
    }
}

/// Notifier that keeps every error it was given
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    errors: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    /// `(summary, body)` pairs in notification order
    pub fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, summary: &str, body: &str) {
        self.errors
            .lock()
            .push((summary.to_string(), body.to_string()));
    }
}

/// Registry call as seen by [`RecordingRegistry`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Register(String),
    Unregister(String),
}

/// Registry that logs calls and tracks the registered providers
#[derive(Default)]
pub struct RecordingRegistry {
    events: Mutex<Vec<RegistryEvent>>,
    registered: Mutex<Vec<Arc<dyn SearchProvider>>>,
}

impl RecordingRegistry {
    pub fn events(&self) -> Vec<RegistryEvent> {
        self.events.lock().clone()
    }

    pub fn registered_count(&self) -> usize {
        self.registered.lock().len()
    }

    pub fn registered(&self) -> Option<Arc<dyn SearchProvider>> {
        self.registered.lock().first().cloned()
    }
}

impl SearchRegistry for RecordingRegistry {
    fn register_provider(&self, provider: Arc<dyn SearchProvider>) {
        self.events
            .lock()
            .push(RegistryEvent::Register(provider.id().to_string()));
        self.registered.lock().push(provider);
    }

    fn unregister_provider(&self, provider: Arc<dyn SearchProvider>) {
        self.events
            .lock()
            .push(RegistryEvent::Unregister(provider.id().to_string()));
        self.registered
            .lock()
            .retain(|registered| registered.id() != provider.id());
    }
}

/// Build a collection from `(id, name)` pairs with `~/<name>.sln` paths
pub fn solutions(entries: &[(&str, &str)]) -> SolutionCollection {
    entries
        .iter()
        .map(|(id, name)| Solution {
            id: id.to_string(),
            name: name.to_string(),
            path: format!("~/{}.sln", name),
            abspath: PathBuf::from(format!("/home/user/{}.sln", name)),
        })
        .collect()
}

/// Wait up to five seconds for the process `pid` to be gone from `/proc`
///
/// An exited but unreaped child stays listed as a zombie, so this only
/// succeeds once someone waited for it.
#[cfg(target_os = "linux")]
pub fn wait_for_reap(pid: u32) -> bool {
    let proc_dir = std::path::PathBuf::from(format!("/proc/{}", pid));
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while std::time::Instant::now() < deadline {
        if !proc_dir.exists() {
            return true;
        }
        std::thread::sleep(std::time::Duration::from_millis(20));
    }
    false
}
