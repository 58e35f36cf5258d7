//! Batch dispatch in backend-sized chunks.

use contracts::{
    BatchPublishOptions, BatchPublishResult, FailedPublish, PublishOptions, Transport,
};
use futures::future::join_all;
use tracing::{debug, instrument, warn};

use crate::publisher::Publisher;

impl<M, T> Publisher<M, T>
where
    M: Clone + Send + Sync,
    T: Transport,
{
    /// Publish a batch of messages.
    ///
    /// The batch is split into chunks of the transport's maximum batch size.
    /// Chunks run strictly one after another; messages inside a chunk are
    /// dispatched concurrently and every one of them is awaited, even when
    /// siblings fail. Each message keeps its index from the submitted slice.
    ///
    /// Failures are data in the returned aggregate, not errors. With
    /// `continue_on_error` disabled, no chunk after the first failing one is
    /// dispatched; the aggregate then reports fewer outcomes than
    /// `total_count`.
    #[instrument(
        name = "publish_batch",
        skip(self, messages, options),
        fields(total = messages.len())
    )]
    pub async fn publish_batch(
        &self,
        messages: &[M],
        options: Option<BatchPublishOptions>,
    ) -> BatchPublishResult<M> {
        let options = options.unwrap_or_default();
        let chunk_size = self.chunk_size();
        self.metrics().inc_batch_count();

        let mut result = BatchPublishResult {
            successful: Vec::new(),
            failed: Vec::new(),
            total_count: messages.len(),
        };

        for (chunk_index, chunk) in messages.chunks(chunk_size).enumerate() {
            let base = chunk_index * chunk_size;

            let outcomes = join_all(chunk.iter().enumerate().map(|(offset, message)| {
                let index = base + offset;
                async move {
                    (
                        index,
                        self.dispatch_message(message, PublishOptions::default()).await,
                    )
                }
            }))
            .await;

            let mut chunk_failed = false;
            for (index, outcome) in outcomes {
                match outcome {
                    Ok(publish_result) => result.successful.push(publish_result),
                    Err(error) => {
                        chunk_failed = true;
                        result.failed.push(FailedPublish {
                            message: messages[index].clone(),
                            error,
                            index,
                        });
                    }
                }
            }

            if chunk_failed && !options.continue_on_error {
                warn!(
                    dispatched = base + chunk.len(),
                    total = messages.len(),
                    "stopping batch after a failed chunk"
                );
                break;
            }
        }

        debug!(
            total = result.total_count,
            succeeded = result.success_count(),
            failed = result.failure_count(),
            "batch publish finished"
        );

        result
    }
}
