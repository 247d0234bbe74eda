use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Handle;
use tokio::task::AbortHandle;

/// Called once when an animation ends, with its final progress and whether
/// it was aborted
pub type FinishedCallback = Box<dyn FnOnce(f64, bool) + Send>;

/// Take-once slot for a finished callback shared by the animation's driver
/// and the context that may abort it
#[derive(Clone)]
pub(crate) struct FinishSlot(Arc<Mutex<Option<FinishedCallback>>>);

impl FinishSlot {
    pub(crate) fn new(callback: FinishedCallback) -> Self {
        Self(Arc::new(Mutex::new(Some(callback))))
    }

    pub(crate) fn fire(&self, progress: f64, aborted: bool) {
        let callback = self.0.lock().take();
        if let Some(callback) = callback {
            callback(progress, aborted);
        }
    }
}

struct RunningAnimation {
    id: u64,
    tasks: Vec<AbortHandle>,
    finished: FinishSlot,
}

impl RunningAnimation {
    fn abort(self) {
        for task in &self.tasks {
            task.abort();
        }
        self.finished.fire(0.0, true);
    }
}

/// Animation manager of an owner: where its animations are scheduled and
/// which of them are running, by handle name.
///
/// Starting an animation under a name that is already running aborts the
/// older one.
pub struct AnimationContext {
    handle: Handle,
    running: Mutex<HashMap<String, RunningAnimation>>,
    next_id: AtomicU64,
}

impl std::fmt::Debug for AnimationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationContext")
            .field("running", &self.running.lock().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl AnimationContext {
    pub fn new(handle: Handle) -> Arc<Self> {
        Arc::new(Self {
            handle,
            running: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        })
    }

    /// A context on the runtime the caller is running in, if any
    pub fn for_current_runtime() -> Option<Arc<Self>> {
        Handle::try_current().ok().map(Self::new)
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.running.lock().contains_key(name)
    }

    /// Abort the animation running under `name`. Its finished callback fires
    /// with `aborted = true`.
    pub fn abort(&self, name: &str) -> bool {
        let previous = self.running.lock().remove(name);
        match previous {
            Some(animation) => {
                tracing::debug!("Aborting animation '{}'", name);
                animation.abort();
                true
            }
            None => false,
        }
    }

    /// Register an animation under `name`. `start` spawns its tasks and runs
    /// with the registry locked, so a task that finishes immediately still
    /// finds its own entry to remove.
    pub(crate) fn register<F>(self: &Arc<Self>, name: &str, finished: FinishSlot, start: F)
    where
        F: FnOnce(u64) -> Vec<AbortHandle>,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let previous = {
            let mut running = self.running.lock();
            let tasks = start(id);
            running.insert(
                name.to_string(),
                RunningAnimation {
                    id,
                    tasks,
                    finished,
                },
            )
        };

        if let Some(previous) = previous {
            tracing::debug!("Animation '{}' superseded", name);
            previous.abort();
        }
    }

    /// Drop the registry entry of a finished animation unless a newer one
    /// has taken its name
    pub(crate) fn complete(&self, name: &str, id: u64) {
        let mut running = self.running.lock();
        if running.get(name).is_some_and(|animation| animation.id == id) {
            running.remove(name);
        }
    }
}
