//! Marshaling closures onto the thread that runs the pump.
//!
//! Worker threads never touch windows directly. They send boxed closures
//! down an mpsc channel that [`Application::pump`] drains once per pump, in
//! FIFO order, after the native events of that pump have been dispatched.
//! A synchronous call is "enqueue, then wait on a one-shot reply channel".
//!
//! [`Application::pump`]: crate::Application::pump

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, ThreadId};

pub(crate) type Job = Box<dyn FnOnce() + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvokeError {
    #[error("the main thread queue is closed; the application no longer exists")]
    Disconnected,
    #[error("the queued call was discarded before it ran")]
    Dropped,
}

/// Cheap to clone and safe to hand to any thread.
#[derive(Clone)]
pub struct MainThreadInvoker {
    main_thread: ThreadId,
    sender: Sender<Job>,
}

/// Bind a new queue to the calling thread.
pub(crate) fn channel() -> (MainThreadInvoker, Receiver<Job>) {
    let (sender, receiver) = mpsc::channel();
    let invoker = MainThreadInvoker {
        main_thread: thread::current().id(),
        sender,
    };
    (invoker, receiver)
}

/// Run every job queued so far. Jobs queued by these jobs wait for the next
/// drain.
pub(crate) fn drain(jobs: &Receiver<Job>) -> usize {
    let batch: Vec<Job> = jobs.try_iter().collect();
    let count = batch.len();
    for job in batch {
        job();
    }
    count
}

impl MainThreadInvoker {
    pub fn is_main_thread(&self) -> bool {
        thread::current().id() == self.main_thread
    }

    /// Queue `f` for the main thread and return immediately, even when called
    /// on the main thread itself.
    pub fn invoke_async(&self, f: impl FnOnce() + Send + 'static) -> Result<(), InvokeError> {
        self.sender.send(Box::new(f)).map_err(|_| {
            log::warn!("invocation dropped: main thread queue is closed");
            InvokeError::Disconnected
        })
    }

    /// Run `f` on the main thread and wait for it to finish.
    pub fn invoke(&self, f: impl FnOnce() + Send + 'static) -> Result<(), InvokeError> {
        self.invoke_with(f)
    }

    /// Run `f` on the main thread and hand its result back.
    ///
    /// On the main thread `f` runs inline, so this never waits on a pump that
    /// cannot run. Elsewhere the caller blocks until the next pump services
    /// the call; there is no timeout.
    pub fn invoke_with<R: Send + 'static>(
        &self,
        f: impl FnOnce() -> R + Send + 'static,
    ) -> Result<R, InvokeError> {
        if self.is_main_thread() {
            return Ok(f());
        }
        let (reply, done) = mpsc::sync_channel(1);
        self.invoke_async(move || {
            // The waiting side may have gone away; nothing to report to.
            let _ = reply.send(f());
        })?;
        done.recv().map_err(|_| {
            log::warn!("invocation was dropped before it ran");
            InvokeError::Dropped
        })
    }
}
