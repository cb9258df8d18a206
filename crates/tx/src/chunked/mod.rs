// Path: crates/tx/src/chunked/mod.rs
//! Splitting oversized payloads into linked, strictly ordered transactions.
//!
//! A payload of `len` bytes becomes `max(1, ceil(len / chunk_size))` chunks.
//! Chunk 1 carries the initial transaction id; chunk `i` carries the same
//! payer and valid start with nonce `i - 1`. Each chunk goes through the
//! whole pipeline, receipt included, before the next one is frozen.

use crate::response::TransactionResponse;
use crate::transaction::Transaction;
use bytes::Bytes;
use hgsdk_api::crypto::SigningProvider;
use hgsdk_api::transaction::TransactionData;
use hgsdk_client::{Client, Deadline};
use hgsdk_telemetry::chunk_metrics;
use hgsdk_types::app::{ChunkInfo, Receipt, TransactionId};
use hgsdk_types::error::{Error, ValidationError};
use hgsdk_types::MAX_TRANSACTION_BYTES;
use std::ops::{Deref, DerefMut, Range};
use std::sync::Arc;

/// Chunk ceiling applied when none is configured.
pub const DEFAULT_MAX_CHUNKS: usize = 20;

/// How a payload of a given length is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkPlan {
    len: usize,
    chunk_size: usize,
    total: usize,
}

impl ChunkPlan {
    /// Fails before anything is built when the payload needs more than
    /// `max_chunks` chunks.
    pub fn new(len: usize, chunk_size: usize, max_chunks: usize) -> Result<Self, ValidationError> {
        if chunk_size == 0 || chunk_size > MAX_TRANSACTION_BYTES {
            return Err(ValidationError::InvalidChunkSize {
                chunk_size,
                max: MAX_TRANSACTION_BYTES,
            });
        }
        if max_chunks == 0 {
            return Err(ValidationError::InvalidMaxChunks);
        }
        let total = len.div_ceil(chunk_size).max(1);
        if total > max_chunks {
            return Err(ValidationError::PayloadTooLarge {
                chunks: total,
                max_chunks,
            });
        }
        Ok(Self {
            len,
            chunk_size,
            total,
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Byte range of the 0-based chunk `index`; empty past the end.
    pub fn range(&self, index: usize) -> Range<usize> {
        let start = index.saturating_mul(self.chunk_size).min(self.len);
        let end = start.saturating_add(self.chunk_size).min(self.len);
        start..end
    }

    /// The chunks of `payload`, in order. An empty payload yields one empty chunk.
    pub fn split(&self, payload: &Bytes) -> Vec<Bytes> {
        (0..self.total).map(|i| payload.slice(self.range(i))).collect()
    }
}

/// An operation whose payload may be spread over several transactions.
pub trait ChunkedData: TransactionData {
    const DEFAULT_CHUNK_SIZE: usize;
    const DEFAULT_MAX_CHUNKS: usize = DEFAULT_MAX_CHUNKS;

    /// The full payload to split.
    fn payload(&self) -> &Bytes;

    /// This operation carrying one chunk of the payload.
    fn with_chunk(&self, chunk: Bytes, info: Option<ChunkInfo>) -> Self;

    /// Whether multi-chunk payloads attach [`ChunkInfo`] to every chunk.
    fn links_chunks(&self) -> bool {
        false
    }

    /// Whether an empty payload is refused.
    fn requires_payload(&self) -> bool {
        false
    }
}

/// One accepted chunk.
#[derive(Debug, Clone)]
pub struct ChunkOutcome {
    /// 1-based position.
    pub number: u32,
    pub response: TransactionResponse,
    pub receipt: Receipt,
}

/// A transaction whose payload is executed as a sequence of chunks.
///
/// Dereferences to the template [`Transaction`]; its fields are shared by
/// every chunk. The template itself is never frozen.
pub struct ChunkedTransaction<D: ChunkedData> {
    template: Transaction<D>,
    chunk_size: usize,
    max_chunks: usize,
    signers: Vec<Arc<dyn SigningProvider>>,
}

impl<D: ChunkedData> std::fmt::Debug for ChunkedTransaction<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkedTransaction")
            .field("template", &self.template)
            .field("chunk_size", &self.chunk_size)
            .field("max_chunks", &self.max_chunks)
            .field("signers", &self.signers.len())
            .finish()
    }
}

impl<D: ChunkedData> From<Transaction<D>> for ChunkedTransaction<D> {
    fn from(template: Transaction<D>) -> Self {
        Self {
            template,
            chunk_size: D::DEFAULT_CHUNK_SIZE,
            max_chunks: D::DEFAULT_MAX_CHUNKS,
            signers: Vec::new(),
        }
    }
}

impl<D: ChunkedData + Default> Default for ChunkedTransaction<D> {
    fn default() -> Self {
        Transaction::<D>::default().into()
    }
}

impl<D: ChunkedData> Deref for ChunkedTransaction<D> {
    type Target = Transaction<D>;

    fn deref(&self) -> &Self::Target {
        &self.template
    }
}

impl<D: ChunkedData> DerefMut for ChunkedTransaction<D> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.template
    }
}

impl<D: ChunkedData> Transaction<D> {
    /// Wraps this draft for chunked execution with the operation's defaults.
    pub fn chunked(self) -> ChunkedTransaction<D> {
        self.into()
    }
}

impl<D: ChunkedData> ChunkedTransaction<D> {
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn max_chunks(&self) -> usize {
        self.max_chunks
    }

    /// Checked when chunks are built.
    pub fn set_chunk_size(&mut self, chunk_size: usize) -> &mut Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn set_max_chunks(&mut self, max_chunks: usize) -> &mut Self {
        self.max_chunks = max_chunks;
        self
    }

    /// A provider that signs every chunk, in addition to the operator.
    pub fn add_signer(&mut self, signer: Arc<dyn SigningProvider>) -> &mut Self {
        self.signers.push(signer);
        self
    }

    /// The chunk plan for the current payload.
    pub fn plan(&self) -> Result<ChunkPlan, Error> {
        let data = self.template.data();
        if data.requires_payload() && data.payload().is_empty() {
            return Err(ValidationError::EmptyPayload.into());
        }
        Ok(ChunkPlan::new(
            data.payload().len(),
            self.chunk_size,
            self.max_chunks,
        )?)
    }

    /// Builds every chunk draft up front, in order.
    ///
    /// The initial transaction id is the template's, else the operator's at
    /// the client clock's next valid start.
    pub fn build_chunks(&self, client: &Client) -> Result<Vec<Transaction<D>>, Error> {
        let plan = self.plan()?;
        let initial = match self.template.transaction_id() {
            Some(id) => id,
            None => {
                let operator = client.operator().ok_or(ValidationError::MissingPayer)?;
                TransactionId::new(operator.account_id(), client.clock().valid_start())
            }
        };
        let data = self.template.data();
        let total = u32::try_from(plan.total()).unwrap_or(u32::MAX);
        let link = data.links_chunks() && plan.total() > 1;

        let mut chunks = Vec::with_capacity(plan.total());
        for (number, chunk) in (1..=total).zip(plan.split(data.payload())) {
            let transaction_id = match number {
                1 => initial,
                n => initial.with_nonce(i32::try_from(n - 1).unwrap_or(i32::MAX)),
            };
            let info = link.then_some(ChunkInfo {
                initial_transaction_id: initial,
                total,
                number,
            });
            chunks.push(
                self.template
                    .derive_draft(data.with_chunk(chunk, info), transaction_id)?,
            );
        }
        Ok(chunks)
    }

    /// Runs every chunk with a deadline of the client's operation timeout
    /// per chunk.
    pub async fn execute_all(&self, client: &Client) -> Result<Vec<ChunkOutcome>, Error> {
        let total = u32::try_from(self.plan()?.total()).unwrap_or(u32::MAX);
        let deadline = Deadline::after(client.config().operation_timeout().saturating_mul(total));
        self.execute_all_within(client, &deadline).await
    }

    /// Runs every chunk through freeze, sign, submit and receipt, one at a
    /// time. Chunk `i + 1` is not frozen until chunk `i` resolved `SUCCESS`.
    ///
    /// When a later chunk fails the earlier ones are already on the ledger;
    /// the failure is reported as [`Error::PartialChunkFailure`] and nothing
    /// is retried from the start. A single-chunk payload returns its error
    /// unchanged.
    pub async fn execute_all_within(
        &self,
        client: &Client,
        deadline: &Deadline,
    ) -> Result<Vec<ChunkOutcome>, Error> {
        let chunks = self.build_chunks(client)?;
        let total = u32::try_from(chunks.len()).unwrap_or(u32::MAX);
        let mut outcomes = Vec::with_capacity(chunks.len());

        for (number, mut chunk) in (1..=total).zip(chunks) {
            tracing::debug!(target: "chunked", number, total, "executing chunk");
            match self.run_chunk(&mut chunk, client, deadline).await {
                Ok((response, receipt)) => {
                    chunk_metrics().inc_chunks_accepted();
                    outcomes.push(ChunkOutcome {
                        number,
                        response,
                        receipt,
                    });
                }
                Err(source) if total == 1 => return Err(source),
                Err(source) => {
                    chunk_metrics().inc_partial_chunk_failures();
                    let succeeded: Vec<u32> = outcomes.iter().map(|o| o.number).collect();
                    tracing::warn!(
                        target: "chunked",
                        failed_chunk = number,
                        total,
                        accepted = succeeded.len(),
                        error = %source,
                        "chunk failed"
                    );
                    return Err(Error::PartialChunkFailure {
                        succeeded,
                        failed_chunk: number,
                        total,
                        source: Box::new(source),
                    });
                }
            }
        }
        Ok(outcomes)
    }

    async fn run_chunk(
        &self,
        chunk: &mut Transaction<D>,
        client: &Client,
        deadline: &Deadline,
    ) -> Result<(TransactionResponse, Receipt), Error> {
        chunk.freeze_with(client)?;
        for signer in &self.signers {
            chunk.sign(signer.as_ref())?;
        }
        let response = chunk.execute_within(client, deadline).await?;
        let receipt = chunk.resolve(client, deadline).await?;
        Ok((response, receipt))
    }
}
