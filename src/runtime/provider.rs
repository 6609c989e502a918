use crate::core::{find_matching_ids, LazyIcon, ResultMeta, SolutionCollection, SolutionId};
use crate::runtime::locator::AppDescriptor;
use crate::runtime::notify::Notifier;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Callbacks the host's search surface invokes on a registered provider
///
/// Every method is infallible from the host's point of view: lookups of
/// unknown ids are silently skipped and launch failures end up with the
/// [`Notifier`].
pub trait SearchProvider: Send + Sync {
    /// Identifier the provider is registered under
    fn id(&self) -> &str;

    /// Whether results come from a remote service; always `false` here
    fn is_remote_provider(&self) -> bool {
        false
    }

    /// Whether the host may call [`launch_search`](Self::launch_search)
    fn can_launch_search(&self) -> bool {
        true
    }

    /// Application the results belong to
    fn app_info(&self) -> Arc<dyn AppDescriptor>;

    /// Ids of all solutions matching `terms`
    fn get_initial_result_set(&self, terms: &[String]) -> Vec<SolutionId>;

    /// Ids among `current_ids` still matching the refined `terms`
    fn get_subsearch_result_set(&self, current_ids: &[SolutionId], terms: &[String])
        -> Vec<SolutionId>;

    /// Display metadata for the known ids among `ids`
    fn get_result_metas(&self, ids: &[SolutionId]) -> Vec<ResultMeta>;

    /// Keep at most `max_count` results
    fn filter_results(&self, ids: Vec<SolutionId>, max_count: usize) -> Vec<SolutionId> {
        let mut ids = ids;
        ids.truncate(max_count);
        ids
    }

    /// Open the solution with the given id
    fn activate_result(&self, id: &str);

    /// Open the application itself
    fn launch_search(&self);
}

/// Search provider over one discovered set of solutions
pub struct Provider {
    id: String,
    app: Arc<dyn AppDescriptor>,
    solutions: SolutionCollection,
    notifier: Arc<dyn Notifier>,
}

impl Provider {
    pub fn new(
        id: impl Into<String>,
        app: Arc<dyn AppDescriptor>,
        solutions: SolutionCollection,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            id: id.into(),
            app,
            solutions,
            notifier,
        }
    }

    pub fn solutions(&self) -> &SolutionCollection {
        &self.solutions
    }

    fn launch(&self, files: &[std::path::PathBuf]) {
        if let Err(e) = self.app.launch(files) {
            self.notifier
                .notify_error(&format!("Failed to launch {}", self.app.name()), &e.user_message());
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.id)
            .field("app", &self.app.id())
            .field("solutions", &self.solutions.len())
            .finish()
    }
}

impl SearchProvider for Provider {
    fn id(&self) -> &str {
        &self.id
    }

    fn app_info(&self) -> Arc<dyn AppDescriptor> {
        Arc::clone(&self.app)
    }

    fn get_initial_result_set(&self, terms: &[String]) -> Vec<SolutionId> {
        find_matching_ids(&self.solutions, terms)
    }

    fn get_subsearch_result_set(
        &self,
        current_ids: &[SolutionId],
        terms: &[String],
    ) -> Vec<SolutionId> {
        let current = current_ids.iter().filter_map(|id| self.solutions.get(id));
        find_matching_ids(current, terms)
    }

    fn get_result_metas(&self, ids: &[SolutionId]) -> Vec<ResultMeta> {
        let icon = self.app.icon().map(LazyIcon::new);
        ids.iter()
            .filter_map(|id| self.solutions.get(id))
            .map(|solution| ResultMeta {
                id: solution.id.clone(),
                name: solution.name.clone(),
                description: solution.path.clone(),
                icon: icon.clone(),
            })
            .collect()
    }

    fn activate_result(&self, id: &str) {
        match self.solutions.get(id) {
            Some(solution) => self.launch(std::slice::from_ref(&solution.abspath)),
            None => debug!("Ignoring activation of unknown result {}", id),
        }
    }

    fn launch_search(&self) {
        // Rider has no way to open with its recent solutions pre-selected
        self.launch(&[]);
    }
}
