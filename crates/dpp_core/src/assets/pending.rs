//! Single-shot asynchronous asset loads
//!
//! A load has exactly two terminal outcomes, delivered once through a
//! `futures` oneshot channel. [`PendingLoad`] can be awaited as a future or
//! polled without blocking from a frame loop with [`PendingLoad::try_complete`].

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use super::{AssetLoader, AssetScene, LoadError};

type LoadResult = Result<AssetScene, LoadError>;

/// Start loading `path` on a worker thread
pub fn load_async(loader: Arc<dyn AssetLoader>, path: impl Into<PathBuf>) -> PendingLoad {
    let path = path.into();
    let (sender, pending) = PendingLoad::channel(path.clone());

    let spawned = std::thread::Builder::new()
        .name("asset-loader".into())
        .spawn(move || {
            log::info!("Loading asset {}", path.display());
            sender.complete(loader.load(&path));
        });

    match spawned {
        Ok(_) => pending,
        Err(e) => PendingLoad::ready(pending.path, Err(LoadError::Io(e))),
    }
}

/// Completion side of a [`PendingLoad`]
pub struct LoadSender {
    sender: oneshot::Sender<LoadResult>,
}

impl LoadSender {
    /// Deliver the load outcome
    pub fn complete(self, result: LoadResult) {
        if self.sender.send(result).is_err() {
            log::debug!("Asset load finished after its receiver was dropped");
        }
    }
}

/// An asset load that has been started but not yet observed to finish
pub struct PendingLoad {
    path: PathBuf,
    receiver: oneshot::Receiver<LoadResult>,
}

impl PendingLoad {
    /// Create a pending load completed through the returned sender
    pub fn channel(path: impl Into<PathBuf>) -> (LoadSender, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            LoadSender { sender },
            Self {
                path: path.into(),
                receiver,
            },
        )
    }

    /// Create a load that has already finished
    pub fn ready(path: impl Into<PathBuf>, result: LoadResult) -> Self {
        let (sender, pending) = Self::channel(path);
        sender.complete(result);
        pending
    }

    /// Path being loaded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Take the outcome if the load has finished, without blocking
    ///
    /// A sender dropped without a result yields [`LoadError::Interrupted`].
    pub fn try_complete(&mut self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(Some(result)) => Some(result),
            Ok(None) => None,
            Err(oneshot::Canceled) => Some(Err(LoadError::Interrupted)),
        }
    }
}

impl std::fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLoad").field("path", &self.path).finish_non_exhaustive()
    }
}

impl Future for PendingLoad {
    type Output = LoadResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(LoadError::Interrupted)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLoader;

    impl AssetLoader for FixedLoader {
        fn load(&self, path: &Path) -> Result<AssetScene, LoadError> {
            if path.ends_with("ok.glb") {
                Ok(AssetScene::default())
            } else {
                Err(LoadError::NotFound(path.display().to_string()))
            }
        }
    }

    #[test]
    fn test_load_async_delivers_success() {
        let pending = load_async(Arc::new(FixedLoader), "ok.glb");
        assert_eq!(pending.path(), Path::new("ok.glb"));
        assert!(pollster::block_on(pending).is_ok());
    }

    #[test]
    fn test_load_async_delivers_failure() {
        let pending = load_async(Arc::new(FixedLoader), "broken.glb");
        assert!(matches!(pollster::block_on(pending), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_try_complete_waits_for_sender() {
        let (sender, mut pending) = PendingLoad::channel("later.glb");
        assert!(pending.try_complete().is_none());

        sender.complete(Ok(AssetScene::default()));
        assert!(matches!(pending.try_complete(), Some(Ok(_))));
    }

    #[test]
    fn test_dropped_sender_is_interrupted() {
        let (sender, mut pending) = PendingLoad::channel("never.glb");
        drop(sender);
        assert!(matches!(pending.try_complete(), Some(Err(LoadError::Interrupted))));
    }
}
