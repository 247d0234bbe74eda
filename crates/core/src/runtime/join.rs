//! Spawn a group of futures and await them as one

use futures::future::join_all;
use std::future::Future;
use tokio::{
    runtime::Handle,
    task::{JoinError, JoinHandle},
};

/// Spawn every future on `handle` and return one handle that resolves, in
/// input order, with each task's outcome once all of them have finished.
///
/// Aborting the returned handle does not abort the member tasks.
pub fn spawn_joined<I, F>(handle: &Handle, futures: I) -> JoinHandle<Vec<Result<F::Output, JoinError>>>
where
    I: IntoIterator<Item = F>,
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let tasks: Vec<JoinHandle<F::Output>> = futures.into_iter().map(|f| handle.spawn(f)).collect();
    handle.spawn(join_all(tasks))
}
