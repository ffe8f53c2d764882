//! Coordinates groups of concurrently running tasks.
//!
//! Every primitive here cancels and then awaits each task it gives up on, so that no task is left
//! running and no error is lost once it returns. Errors from cancelled tasks that are not
//! themselves cancellations go to the process-wide exception reporter.

use crate::errors::*;
use futures::future;
use futures::prelude::*;
use futures::stream::FuturesUnordered;
use parking_lot::{Mutex, RwLock};
use std::borrow::Cow;
use std::error::Error as StdError;
use std::fmt::Write;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{AbortHandle, JoinError, JoinHandle};
use tokio::time;
use tracing_futures::*;

type ExceptionReporter = Arc<dyn Fn(&str, &Error) + Send + Sync>;

lazy_static! {
    static ref EXCEPTION_REPORTER: RwLock<ExceptionReporter> =
        RwLock::new(Arc::new(log_exception));
}

/// Formats an error along with its causes and backtrace.
pub fn format_error(err: &Error) -> String {
    let mut buf = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        let _ = write!(buf, "\nCaused by: {}", c);
        cause = c.source();
    }
    if let Some(bt) = err.backtrace() {
        let _ = write!(buf, "\nBacktrace:\n{:?}", bt);
    }
    buf
}

fn log_exception(source: &str, err: &Error) {
    error!("Unhandled error in {}: {}", source, format_error(err));
}

/// Sets the function that receives errors no caller is left to handle.
///
/// By default, these errors are logged with `tracing`.
pub fn set_exception_reporter(reporter: impl Fn(&str, &Error) + Send + Sync + 'static) {
    *EXCEPTION_REPORTER.write() = Arc::new(reporter);
}

/// Reports an error that no caller is left to handle.
pub fn report_exception(source: &str, err: &Error) {
    let reporter = EXCEPTION_REPORTER.read().clone();
    reporter(source, err);
}

fn join_error(err: JoinError) -> Error {
    if err.is_cancelled() {
        Error::new(ErrorKind::Cancelled("task was cancelled"))
    } else {
        Error::new_with_cause(ErrorKind::Panicked("task failed to complete".into()), err)
    }
}

/// A handle to a spawned task.
///
/// Awaiting the handle returns the task's result. Panics inside the task are returned as
/// [`ErrorKind::Panicked`], and cancelled tasks return [`ErrorKind::Cancelled`].
///
/// Dropping the handle detaches the task rather than cancelling it.
#[derive(Debug)]
pub struct TaskHandle<T> {
    name: Cow<'static, str>,
    handle: JoinHandle<Result<T>>,
}
impl <T: Send + 'static> TaskHandle<T> {
    /// Spawns a task onto the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a tokio runtime.
    pub fn spawn(
        name: impl Into<Cow<'static, str>>,
        fut: impl Future<Output = Result<T>> + Send + 'static,
    ) -> Self {
        TaskHandle::spawn_on(&Handle::current(), name, fut)
    }

    /// Spawns a task onto a given tokio runtime.
    pub fn spawn_on(
        runtime: &Handle,
        name: impl Into<Cow<'static, str>>,
        fut: impl Future<Output = Result<T>> + Send + 'static,
    ) -> Self {
        let name = name.into();
        let span = error_span!("task", name = %name);
        let handle = runtime.spawn(catch_panic_async(fut).instrument(span));
        TaskHandle { name, handle }
    }
}
impl <T> TaskHandle<T> {
    /// Returns the name this task was spawned with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Requests that the task be cancelled.
    ///
    /// The task stops at its next suspension point. Awaiting the handle afterwards returns
    /// [`ErrorKind::Cancelled`] unless the task already finished.
    pub fn cancel(&self) {
        self.handle.abort()
    }

    /// Returns whether the task has stopped running.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the task to finish and returns its result.
    pub async fn await_result(self) -> Result<T> {
        self.await
    }

    fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }
}
impl <T> Future for TaskHandle<T> {
    type Output = Result<T>;
    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Result<T>> {
        match Pin::new(&mut self.handle).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(err)) => Poll::Ready(Err(join_error(err))),
        }
    }
}

/// Cancels a set of tasks if the future coordinating them is dropped.
struct CancelOnDrop(Vec<AbortHandle>);
impl CancelOnDrop {
    fn new<T>(handles: &[TaskHandle<T>]) -> Self {
        CancelOnDrop(handles.iter().map(TaskHandle::abort_handle).collect())
    }
}
impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        for handle in &self.0 {
            handle.abort();
        }
    }
}

/// Cancels every task, then waits for each of them to stop.
async fn cancel_and_drain<T>(tasks: impl IntoIterator<Item = TaskHandle<T>>) {
    let tasks: Vec<_> = tasks.into_iter().collect();
    for task in &tasks {
        task.cancel();
    }
    for task in tasks {
        let name = task.name.clone();
        match task.await {
            Ok(_) => { }
            Err(e) if e.is_cancelled() => { }
            Err(e) => report_exception(&name, &e),
        }
    }
}

/// Waits for the first of a set of tasks to finish, then cancels the rest.
///
/// Returns the result of the first task to finish, whether it succeeded or not. If `timeout`
/// elapses first, every task is cancelled and [`ErrorKind::TimedOut`] is returned.
pub async fn first_of<T: Send + 'static>(
    mut tasks: Vec<TaskHandle<T>>, timeout: Option<Duration>,
) -> Result<T> {
    ensure!(!tasks.is_empty(), InvalidInput, "`first_of` requires at least one task");
    let _guard = CancelOnDrop::new(&tasks);

    let winner = {
        let race = future::select_all(tasks.iter_mut())
            .map(|(result, index, _)| (result, index));
        match timeout {
            Some(limit) => time::timeout(limit, race).await.ok(),
            None => Some(race.await),
        }
    };
    match winner {
        Some((result, index)) => {
            debug!("Task {} finished first, cancelling {} others.", index, tasks.len() - 1);
            let losers = tasks.into_iter().enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, task)| task);
            cancel_and_drain(losers).await;
            result
        }
        None => {
            cancel_and_drain(tasks).await;
            bail!(TimedOut, "`first_of` did not finish in time")
        }
    }
}

/// Waits for every task in a set to finish, returning their results in order.
///
/// If any task fails, or `timeout` elapses first, every remaining task is cancelled and the
/// failure or [`ErrorKind::TimedOut`] is returned.
pub async fn all_of<T: Send + 'static>(
    mut tasks: Vec<TaskHandle<T>>, timeout: Option<Duration>,
) -> Result<Vec<T>> {
    let _guard = CancelOnDrop::new(&tasks);
    let mut outputs: Vec<Option<T>> = tasks.iter().map(|_| None).collect();
    let mut consumed = vec![false; tasks.len()];

    let result = {
        let mut pending = tasks.iter_mut().enumerate()
            .map(|(i, task)| task.map(move |result| (i, result)))
            .collect::<FuturesUnordered<_>>();
        let gather = async {
            while let Some((i, result)) = pending.next().await {
                consumed[i] = true;
                outputs[i] = Some(result?);
            }
            Ok::<(), Error>(())
        };
        match timeout {
            Some(limit) => match time::timeout(limit, gather).await {
                Ok(result) => result,
                Err(_) => Err(Error::new_with_backtrace(
                    ErrorKind::TimedOut("`all_of` did not finish in time"),
                )),
            },
            None => gather.await,
        }
    };

    match result {
        Ok(()) => outputs.into_iter().collect::<Option<Vec<T>>>()
            .internal_err("`all_of` lost the result of a task"),
        Err(e) => {
            let remaining = tasks.into_iter().zip(consumed)
                .filter(|(_, consumed)| !consumed)
                .map(|(task, _)| task);
            cancel_and_drain(remaining).await;
            Err(e)
        }
    }
}

/// Owns a tokio runtime and every long-running task spawned onto it.
///
/// Dropping the scheduler without calling [`TaskScheduler::shutdown`] cancels its tasks without
/// waiting for them.
#[derive(Debug)]
pub struct TaskScheduler {
    runtime: Option<Runtime>,
    handle: Handle,
    tasks: Mutex<Vec<TaskHandle<()>>>,
}
impl TaskScheduler {
    /// Creates a scheduler with a new multi-threaded runtime.
    pub fn new() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .thread_name("corvid-worker")
            .enable_time()
            .build()
            .internal_err("Failed to start tokio runtime.")?;
        Ok(TaskScheduler::from_runtime(runtime))
    }

    /// Creates a scheduler that takes ownership of an existing runtime.
    pub fn from_runtime(runtime: Runtime) -> Self {
        TaskScheduler {
            handle: runtime.handle().clone(),
            runtime: Some(runtime),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Returns a handle to the scheduler's runtime.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Spawns a task owned by this scheduler.
    ///
    /// Errors returned by the task are passed to the exception reporter.
    pub fn spawn(
        &self,
        name: impl Into<Cow<'static, str>>,
        fut: impl Future<Output = Result<()>> + Send + 'static,
    ) {
        let name = name.into();
        let report_name = name.clone();
        let task = TaskHandle::spawn_on(&self.handle, name, async move {
            if let Err(e) = catch_panic_async(fut).await {
                report_exception(&report_name, &e);
            }
            Ok(())
        });
        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.push(task);
    }

    /// Runs a future to completion on this scheduler's runtime.
    ///
    /// # Panics
    ///
    /// Panics if called from inside an asynchronous context.
    pub fn block_on<F: Future>(&self, fut: F) -> F::Output {
        self.handle.block_on(fut)
    }

    /// Returns the number of spawned tasks that have not yet finished.
    pub fn outstanding(&self) -> usize {
        let mut tasks = self.tasks.lock();
        tasks.retain(|task| !task.is_finished());
        tasks.len()
    }

    /// Forcefully stops every outstanding task, then shuts down the runtime.
    ///
    /// This never fails. Errors surfacing from the stopped tasks are passed to the exception
    /// reporter.
    ///
    /// # Panics
    ///
    /// Panics if called from inside an asynchronous context.
    pub fn shutdown(mut self) {
        let tasks: Vec<_> = std::mem::take(&mut *self.tasks.lock()).into_iter()
            .filter(|task| !task.is_finished())
            .collect();
        if tasks.is_empty() {
            debug!("No outstanding tasks to terminate.");
        } else {
            warn!("Terminating {} remaining tasks forcefully.", tasks.len());
            for task in &tasks {
                debug!("Terminating task `{}`.", task.name());
            }
            self.handle.block_on(cancel_and_drain(tasks));
        }
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_timeout(Duration::from_secs(1));
        }
    }
}
impl Drop for TaskScheduler {
    fn drop(&mut self) {
        for task in self.tasks.get_mut().drain(..) {
            task.cancel();
        }
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct SetOnDrop(Arc<AtomicBool>);
    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    fn never_finishes(name: &'static str, dropped: &Arc<AtomicBool>) -> TaskHandle<u32> {
        let guard = SetOnDrop(dropped.clone());
        TaskHandle::spawn(name, async move {
            let _guard = guard;
            future::pending::<()>().await;
            Ok(0)
        })
    }

    fn explode() -> Result<u32> {
        panic!("boom")
    }

    #[tokio::test]
    async fn task_results() {
        assert_eq!(TaskHandle::spawn("ok", async { Ok(3) }).await.unwrap(), 3);

        let err = TaskHandle::spawn("panics", async { explode() }).await.unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::Panicked("boom".into()));

        let dropped = Arc::new(AtomicBool::new(false));
        let task = never_finishes("cancelled", &dropped);
        assert_eq!(task.name(), "cancelled");
        task.cancel();
        let err = task.await_result().await.unwrap_err();
        assert!(err.is_cancelled());
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn first_of_returns_winner() {
        let dropped = Arc::new(AtomicBool::new(false));
        let tasks = vec![
            never_finishes("slow", &dropped),
            TaskHandle::spawn("fast", async { Ok(7) }),
        ];
        assert_eq!(first_of(tasks, None).await.unwrap(), 7);
        assert!(dropped.load(Ordering::SeqCst));

        let err = first_of(Vec::<TaskHandle<u32>>::new(), None).await.unwrap_err();
        assert_eq!(
            err.error_kind(), &ErrorKind::InvalidInput("`first_of` requires at least one task"),
        );
    }

    #[tokio::test]
    async fn first_of_cancels_siblings_of_failure() {
        let first = Arc::new(AtomicBool::new(false));
        let third = Arc::new(AtomicBool::new(false));
        let tasks = vec![
            never_finishes("first", &first),
            TaskHandle::spawn("second", async {
                Err(Error::new(ErrorKind::InvalidInput("second task failed")))
            }),
            never_finishes("third", &third),
        ];
        let err = first_of(tasks, None).await.unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::InvalidInput("second task failed"));
        assert!(first.load(Ordering::SeqCst));
        assert!(third.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn first_of_timeout() {
        let dropped = Arc::new(AtomicBool::new(false));
        let tasks = vec![never_finishes("stuck", &dropped)];
        let err = first_of(tasks, Some(Duration::from_secs(5))).await.unwrap_err();
        assert!(err.is_timeout());
        assert!(!err.is_cancelled());
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn all_of_keeps_order() {
        let tasks = [30, 10, 20].iter().map(|&ms| {
            TaskHandle::spawn("sleeper", async move {
                time::sleep(Duration::from_millis(ms)).await;
                Ok(ms)
            })
        }).collect();
        assert_eq!(all_of(tasks, None).await.unwrap(), vec![30, 10, 20]);
        assert_eq!(all_of(Vec::<TaskHandle<u32>>::new(), None).await.unwrap(), Vec::<u32>::new());
    }

    #[tokio::test]
    async fn all_of_zero_timeout() {
        let dropped = Arc::new(AtomicBool::new(false));
        let tasks = vec![never_finishes("forever", &dropped)];
        let err = all_of(tasks, Some(Duration::from_secs(0))).await.unwrap_err();
        assert!(err.is_timeout());
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn all_of_failure_cancels_rest() {
        let dropped = Arc::new(AtomicBool::new(false));
        let tasks = vec![
            TaskHandle::spawn("ok", async { Ok(1) }),
            never_finishes("forever", &dropped),
            TaskHandle::spawn("fails", async { explode() }),
        ];
        let err = all_of(tasks, None).await.unwrap_err();
        assert_eq!(err.error_kind(), &ErrorKind::Panicked("boom".into()));
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn scheduler_shutdown() {
        lazy_static! {
            static ref REPORTED: Mutex<Vec<String>> = Mutex::new(Vec::new());
        }
        set_exception_reporter(|source, err| {
            REPORTED.lock().push(format!("{}: {}", source, err));
        });

        let scheduler = TaskScheduler::new().unwrap();
        let dropped = Arc::new(AtomicBool::new(false));
        let guard = SetOnDrop(dropped.clone());
        scheduler.spawn("forever", async move {
            let _guard = guard;
            future::pending::<()>().await;
            Ok(())
        });
        let ran = Arc::new(AtomicUsize::new(0));
        let ran_task = ran.clone();
        scheduler.spawn("failing", async move {
            ran_task.fetch_add(1, Ordering::SeqCst);
            Err(Error::new(ErrorKind::InternalError("scheduled task failed")))
        });

        scheduler.block_on(async {
            while ran.load(Ordering::SeqCst) == 0 || scheduler.outstanding() > 1 {
                time::sleep(Duration::from_millis(5)).await;
            }
        });
        assert_eq!(scheduler.outstanding(), 1);
        assert!(REPORTED.lock().iter().any(|r| r.contains("failing: Internal error")));

        scheduler.shutdown();
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[test]
    fn empty_scheduler_shutdown() {
        let scheduler = TaskScheduler::new().unwrap();
        assert_eq!(scheduler.block_on(async { 5 }), 5);
        assert_eq!(scheduler.outstanding(), 0);
        scheduler.shutdown();
    }
}
