//! Single-shot conversion jobs running on a worker thread.
//!
//! A submitted job resolves exactly once: either the caller blocks on
//! the returned [`TaskHandle`], or a completion callback observes the
//! final result. Both styles run the same pipeline, so the dispatch
//! style never changes the output.

use std::sync::mpsc;
use std::thread;

use crate::ConvertError;

/// Handle to an in-flight conversion.
pub struct TaskHandle<T> {
    receiver: mpsc::Receiver<Result<T, ConvertError>>,
}

impl<T> TaskHandle<T> {
    /// Blocks until the conversion finishes and yields its result.
    pub fn wait(self) -> Result<T, ConvertError> {
        self.receiver.recv().expect("conversion worker dropped without resolving")
    }
}

/// Runs the job on a fresh worker thread and hands back its handle.
pub fn spawn<T, F>(job: F) -> TaskHandle<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ConvertError> + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        // A dropped handle is fine; the send result is irrelevant then.
        let _ = sender.send(job());
    });
    TaskHandle { receiver }
}

/// Fire-and-forget variant: the callback is invoked exactly once with
/// the final result.
pub fn spawn_with<T, F, C>(job: F, callback: C)
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ConvertError> + Send + 'static,
    C: FnOnce(Result<T, ConvertError>) + Send + 'static,
{
    thread::spawn(move || callback(job()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_resolves_to_the_job_result() {
        let handle = spawn(|| Ok(21 * 2));
        assert_eq!(handle.wait().unwrap(), 42);
    }

    #[test]
    fn failures_travel_through_the_handle() {
        let handle: TaskHandle<u32> = spawn(|| Err(ConvertError::EmptyImage));
        assert!(matches!(handle.wait(), Err(ConvertError::EmptyImage)));
    }

    #[test]
    fn callback_fires_exactly_once() {
        let (sender, receiver) = mpsc::channel();
        spawn_with(|| Ok(7), move |result| sender.send(result).unwrap());
        assert_eq!(receiver.recv().unwrap().unwrap(), 7);
        assert!(receiver.recv().is_err());
    }
}
