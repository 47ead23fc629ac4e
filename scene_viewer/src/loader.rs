//! Background asset loading.
//!
//! Loads run on the rayon pool and hand their result back over a channel.
//! The frame loop calls [`Loading::poll`] once per frame, so scene state is
//! only ever touched from the frame thread.

use crossbeam::channel::{self, Receiver, TryRecvError};
use tracing::{debug, error, info};

use crate::error::LoadError;

pub enum Loading<T> {
    Pending {
        label: String,
        receiver: Receiver<Result<T, LoadError>>,
    },
    Ready(T),
    Failed,
}

impl<T: Send + 'static> Loading<T> {
    pub fn spawn<F>(label: impl Into<String>, load: F) -> Self
    where
        F: FnOnce() -> Result<T, LoadError> + Send + 'static,
    {
        let label = label.into();
        let (sender, receiver) = channel::bounded(1);
        debug!("loading {}", label);
        rayon::spawn(move || {
            // the receiver is gone if the scene was dropped mid-load
            let _ = sender.send(load());
        });
        Loading::Pending { label, receiver }
    }
}

impl<T> Loading<T> {
    /// Picks up a finished load. Returns true on the frame the value becomes
    /// available.
    pub fn poll(&mut self) -> bool {
        let (label, result) = match self {
            Loading::Pending { label, receiver } => match receiver.try_recv() {
                Ok(result) => (label.clone(), result),
                Err(TryRecvError::Empty) => return false,
                Err(TryRecvError::Disconnected) => {
                    (label.clone(), Err(LoadError::Disconnected(label.clone())))
                }
            },
            _ => return false,
        };

        match result {
            Ok(value) => {
                info!("loaded {}", label);
                *self = Loading::Ready(value);
                true
            }
            Err(err) => {
                error!("{}", err);
                *self = Loading::Failed;
                false
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Loading::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        match self {
            Loading::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Loading::Pending { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Loading::Failed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    /// Polls until the load settles or a second passes.
    pub(crate) fn settle<T>(loading: &mut Loading<T>) {
        let deadline = Instant::now() + Duration::from_secs(1);
        while loading.is_pending() && Instant::now() < deadline {
            loading.poll();
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn pending_then_ready() {
        let (release, wait) = channel::bounded::<()>(0);
        let mut loading = Loading::spawn("number", move || {
            let _ = wait.recv();
            Ok(42)
        });

        assert!(!loading.poll());
        assert!(loading.is_pending());
        assert_eq!(loading.get(), None);

        release.send(()).unwrap();
        settle(&mut loading);
        assert_eq!(loading.get(), Some(&42));
        assert!(!loading.poll());
    }

    #[test]
    fn failure_is_sticky() {
        let mut loading: Loading<u32> = Loading::spawn("missing", || {
            Err(LoadError::Empty {
                path: PathBuf::from("missing.obj"),
            })
        });
        settle(&mut loading);
        assert!(loading.is_failed());
        assert_eq!(loading.get(), None);
        assert!(!loading.poll());
        assert!(loading.is_failed());
    }

    #[test]
    fn ready_values_can_be_mutated() {
        let mut loading = Loading::Ready(vec![1, 2]);
        loading.get_mut().unwrap().push(3);
        assert_eq!(loading.get().map(Vec::len), Some(3));
    }
}
