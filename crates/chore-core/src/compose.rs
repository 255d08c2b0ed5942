//! Composition of registered tasks into higher-order actions
//!
//! Every composition returns an ordinary [`Action`], so it can be registered
//! under a new name and referenced by further compositions. Names are
//! resolved at invocation time against the runner's registry, which makes
//! recursive composition work; a composition that names itself will recurse
//! until the stack runs out. Cycle detection is the caller's responsibility.

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{BoxError, ParallelError, TaskError};
use crate::runner::Runner;
use crate::task::{action, Action};

impl Runner {
    /// An action running the named tasks strictly in order.
    ///
    /// The first failure aborts the series: the error is wrapped with the
    /// failing task's name and zero-based position, and later tasks do not
    /// run. Each step sees the side effects of the steps before it. If the
    /// shared cancellation token fires between steps, the next step is
    /// skipped with a cancellation error instead of being started. Zero names
    /// produce an action that always succeeds.
    pub fn series(&self, names: &[&str]) -> Action {
        let runner = self.clone();
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        action(move |cancel: CancellationToken| {
            let runner = runner.clone();
            let names = names.clone();
            async move {
                for (index, name) in names.iter().enumerate() {
                    if cancel.is_cancelled() {
                        debug!(task = %name, "series cancelled before step started");
                        return Err(Box::new(TaskError::cancelled(name.clone())) as BoxError);
                    }
                    if let Err(source) = runner.run(cancel.clone(), name).await {
                        return Err(Box::new(TaskError::SeriesStep {
                            name: name.clone(),
                            index,
                            source: Box::new(source),
                        }) as BoxError);
                    }
                }
                Ok(())
            }
        })
    }

    /// An action running the named tasks concurrently, one spawned execution
    /// per name, all sharing the caller's cancellation token.
    ///
    /// The action completes only when every member has finished; a member
    /// failing never cancels its siblings. Every failure is collected, in
    /// listing order, into a [`ParallelError`] aggregate that keeps each
    /// task's name and cause and never drops a failure. Members get no
    /// ordering guarantee and must not rely on each other's side effects.
    pub fn parallel(&self, names: &[&str]) -> Action {
        let runner = self.clone();
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        action(move |cancel: CancellationToken| {
            let runner = runner.clone();
            let names = names.clone();
            async move {
                let handles: Vec<_> = names
                    .iter()
                    .map(|name| {
                        let runner = runner.clone();
                        let cancel = cancel.clone();
                        let name = name.clone();
                        tokio::spawn(async move { runner.run(cancel, &name).await })
                    })
                    .collect();

                let mut failures = Vec::new();
                for (name, joined) in names.iter().zip(join_all(handles).await) {
                    match joined {
                        Ok(Ok(())) => {}
                        Ok(Err(err)) => failures.push((name.clone(), err)),
                        // A panicking action surfaces as a join error; keep
                        // it in the aggregate rather than losing the member.
                        Err(join_err) => failures.push((
                            name.clone(),
                            TaskError::failed(name.clone(), Box::new(join_err)),
                        )),
                    }
                }

                if failures.is_empty() {
                    Ok(())
                } else {
                    debug!(failed = failures.len(), total = names.len(), "parallel group finished with failures");
                    Err(Box::new(TaskError::Parallel(ParallelError::new(failures))) as BoxError)
                }
            }
        })
    }

    /// An action running the named task only when `cond` holds.
    ///
    /// The condition is evaluated on every invocation, not at construction,
    /// so it can react to runtime state. When it does not hold, the action
    /// succeeds without running anything.
    pub fn when<C>(&self, cond: C, name: &str) -> Action
    where
        C: Fn() -> bool + Send + Sync + 'static,
    {
        let runner = self.clone();
        let name = name.to_string();
        action(move |cancel: CancellationToken| {
            let runner = runner.clone();
            let name = name.clone();
            let selected = cond();
            async move {
                if selected {
                    runner
                        .run(cancel, &name)
                        .await
                        .map_err(|err| Box::new(err) as BoxError)
                } else {
                    debug!(task = %name, "condition not met, skipping");
                    Ok(())
                }
            }
        })
    }

    /// An action running the named task only when `cond` does not hold.
    /// The inverse of [`when`](Runner::when), with the same invocation-time
    /// evaluation.
    pub fn unless<C>(&self, cond: C, name: &str) -> Action
    where
        C: Fn() -> bool + Send + Sync + 'static,
    {
        self.when(move || !cond(), name)
    }
}
