//! Background reading of profile pictures.

use std::path::PathBuf;

use anyhow::{Context, Result};
use sd_utils::{UtilsError, UtilsResult};
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// A finished upload: the encoded picture or the reason it failed.
#[derive(Debug)]
pub(crate) struct Upload {
    pub(crate) path: PathBuf,
    pub(crate) outcome: UtilsResult<String>,
}

/// Reads image files on a tokio runtime and hands the results back through a
/// channel polled by the UI loop. Results arrive in completion order.
pub(crate) struct Uploader {
    runtime: Runtime,
    sender: UnboundedSender<Upload>,
    receiver: UnboundedReceiver<Upload>,
    in_flight: usize,
}

impl std::fmt::Debug for Uploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Uploader")
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl Uploader {
    pub(crate) fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("servicedesk-upload")
            .enable_all()
            .build()
            .context("failed to start upload runtime")?;
        let (sender, receiver) = mpsc::unbounded_channel();
        Ok(Self {
            runtime,
            sender,
            receiver,
            in_flight: 0,
        })
    }

    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Start reading `path` in the background.
    pub(crate) fn start(&mut self, path: PathBuf) {
        let sender = self.sender.clone();
        self.in_flight += 1;
        tracing::info!(path = %path.display(), "reading profile picture");
        self.runtime.spawn(async move {
            let outcome = read_picture(path.clone()).await;
            if sender.send(Upload { path, outcome }).is_err() {
                tracing::warn!("upload finished after the dashboard closed");
            }
        });
    }

    /// Collect every upload that has finished since the last poll.
    pub(crate) fn poll(&mut self) -> Vec<Upload> {
        let mut finished = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(upload) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    finished.push(upload);
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        finished
    }
}

async fn read_picture(path: PathBuf) -> UtilsResult<String> {
    tokio::task::spawn_blocking(move || sd_utils::read_image_data_uri(&path))
        .await
        .map_err(|err| UtilsError::Io(std::io::Error::new(std::io::ErrorKind::Other, err)))?
}
