use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use tracing::debug;

use crate::provider::{Provider, ProviderJob, ProviderReply};

/// Runs provider jobs off the UI thread, one short-lived thread per job,
/// and posts each reply back on the event channel.
pub struct ProviderWorker<T> {
    provider: Arc<Provider>,
    tx: Sender<T>,
}

impl<T> ProviderWorker<T>
where
    T: From<ProviderReply> + Send + 'static,
{
    pub fn new(provider: Arc<Provider>, tx: Sender<T>) -> Self {
        Self { provider, tx }
    }

    pub fn dispatch(&self, job: ProviderJob) {
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let reply = provider.run(job);
            if tx.send(reply.into()).is_err() {
                debug!("event channel closed, dropping provider reply");
            }
        });
    }

    pub fn dispatch_all(&self, jobs: impl IntoIterator<Item = ProviderJob>) {
        for job in jobs {
            self.dispatch(job);
        }
    }
}
