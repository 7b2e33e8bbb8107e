//! Bounded-retry confirmation polling.
//!
//! Converts chain eventual-consistency into a single terminal outcome: a
//! submitted transaction either produces a receipt within the deadline, the
//! deadline elapses, or the lookup itself fails. The poller only observes;
//! it never resubmits or mutates the transaction.

use crate::{truncate_hash, DeliveryError, ReceiptSource};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};
use txops_types::{TransactionHash, TransactionReceipt};

/// Default overall deadline for a poll invocation.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(180);
/// Default delay between consecutive receipt lookups.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Terminal outcome of a confirmation poll.
///
/// Exactly one outcome is produced per invocation. `TimedOut` means the
/// transaction's fate is still unknown; the caller may legitimately re-poll
/// with a fresh deadline. `Failed` carries a lookup error that will not
/// self-resolve.
#[derive(Debug)]
pub enum PollOutcome {
	Confirmed(TransactionReceipt),
	TimedOut,
	Failed(DeliveryError),
}

/// Polls a `ReceiptSource` until a receipt appears or a deadline elapses.
///
/// The interval is constant (no backoff) and the deadline is the only bound
/// on the number of attempts. Each call owns its own deadline, so concurrent
/// polls for different transactions are fully independent.
pub struct ConfirmationPoller {
	timeout: Duration,
	interval: Duration,
}

impl Default for ConfirmationPoller {
	fn default() -> Self {
		Self::new(DEFAULT_POLL_TIMEOUT, DEFAULT_POLL_INTERVAL)
	}
}

impl ConfirmationPoller {
	pub fn new(timeout: Duration, interval: Duration) -> Self {
		Self { timeout, interval }
	}

	/// Waits for the transaction to be confirmed.
	///
	/// The first lookup happens immediately; a receipt on the first attempt
	/// returns without any suspension. A `NotFound` lookup suspends until the
	/// poll interval or the overall deadline elapses, whichever fires first.
	pub async fn wait(&self, source: &dyn ReceiptSource, hash: &TransactionHash) -> PollOutcome {
		let deadline = Instant::now() + self.timeout;
		let mut attempts: u32 = 0;

		info!(
			tx_hash = %truncate_hash(hash),
			"Waiting for confirmation (timeout: {}s, interval: {}s)",
			self.timeout.as_secs(),
			self.interval.as_secs()
		);

		loop {
			attempts += 1;

			match source.receipt(hash).await {
				Ok(Some(receipt)) => {
					info!(
						tx_hash = %truncate_hash(hash),
						block_number = receipt.block_number,
						attempts,
						"Transaction confirmed"
					);
					return PollOutcome::Confirmed(receipt);
				}
				Ok(None) => {
					debug!(
						tx_hash = %truncate_hash(hash),
						attempts,
						"Transaction not yet mined"
					);
				}
				// Lookup errors are not expected to self-resolve
				Err(err) => return PollOutcome::Failed(err),
			}

			tokio::select! {
				_ = tokio::time::sleep(self.interval) => {}
				_ = tokio::time::sleep_until(deadline) => return PollOutcome::TimedOut,
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use async_trait::async_trait;
	use std::collections::VecDeque;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Mutex;

	type ScriptedResponse = Result<Option<TransactionReceipt>, DeliveryError>;

	/// Receipt source that replays a scripted response sequence; any call
	/// past the end of the script reports "not yet mined".
	struct ScriptedSource {
		responses: Mutex<VecDeque<ScriptedResponse>>,
		calls: AtomicUsize,
	}

	impl ScriptedSource {
		fn new(responses: Vec<ScriptedResponse>) -> Self {
			Self {
				responses: Mutex::new(responses.into()),
				calls: AtomicUsize::new(0),
			}
		}

		fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}

	#[async_trait]
	impl ReceiptSource for ScriptedSource {
		async fn receipt(
			&self,
			_hash: &TransactionHash,
		) -> Result<Option<TransactionReceipt>, DeliveryError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			self.responses
				.lock()
				.unwrap()
				.pop_front()
				.unwrap_or(Ok(None))
		}
	}

	fn test_hash() -> TransactionHash {
		TransactionHash(vec![0x42; 32])
	}

	fn test_receipt(block_number: u64) -> TransactionReceipt {
		TransactionReceipt {
			hash: test_hash(),
			block_number,
			gas_used: 21_000,
			success: true,
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_first_lookup_success_returns_without_suspension() {
		let source = ScriptedSource::new(vec![Ok(Some(test_receipt(100)))]);
		let poller = ConfirmationPoller::new(Duration::from_secs(3), Duration::from_secs(1));

		let start = Instant::now();
		let outcome = poller.wait(&source, &test_hash()).await;

		assert_eq!(start.elapsed(), Duration::ZERO);
		assert_eq!(source.calls(), 1);
		match outcome {
			PollOutcome::Confirmed(receipt) => assert_eq!(receipt, test_receipt(100)),
			other => panic!("expected Confirmed, got {:?}", other),
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_receipt_after_retries() {
		// NotFound, NotFound, then a receipt: confirmed after three lookups
		// and two suspensions.
		let source = ScriptedSource::new(vec![Ok(None), Ok(None), Ok(Some(test_receipt(100)))]);
		let poller = ConfirmationPoller::new(Duration::from_secs(10), Duration::from_secs(1));

		let start = Instant::now();
		let outcome = poller.wait(&source, &test_hash()).await;

		assert_eq!(start.elapsed(), Duration::from_secs(2));
		assert_eq!(source.calls(), 3);
		match outcome {
			PollOutcome::Confirmed(receipt) => {
				assert_eq!(receipt.block_number, 100);
				assert!(receipt.success);
			}
			other => panic!("expected Confirmed, got {:?}", other),
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_times_out_when_never_mined() {
		let source = ScriptedSource::new(vec![]);
		// Deadline lands between interval ticks so the race is unambiguous.
		let poller =
			ConfirmationPoller::new(Duration::from_millis(2500), Duration::from_secs(1));

		let start = Instant::now();
		let outcome = poller.wait(&source, &test_hash()).await;

		assert!(matches!(outcome, PollOutcome::TimedOut));
		assert_eq!(start.elapsed(), Duration::from_millis(2500));
		// Lookups at t=0s, 1s, 2s; the deadline fires mid-suspension.
		assert_eq!(source.calls(), 3);
	}

	#[tokio::test(start_paused = true)]
	async fn test_lookup_error_is_not_retried() {
		let source = ScriptedSource::new(vec![Err(DeliveryError::Network(
			"rate limited".to_string(),
		))]);
		let poller = ConfirmationPoller::default();

		let start = Instant::now();
		let outcome = poller.wait(&source, &test_hash()).await;

		assert_eq!(start.elapsed(), Duration::ZERO);
		assert_eq!(source.calls(), 1);
		match outcome {
			PollOutcome::Failed(DeliveryError::Network(msg)) => {
				assert_eq!(msg, "rate limited");
			}
			other => panic!("expected Failed, got {:?}", other),
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_lookup_error_after_retries_stops_immediately() {
		let source = ScriptedSource::new(vec![
			Ok(None),
			Err(DeliveryError::Network("connection reset".to_string())),
		]);
		let poller = ConfirmationPoller::new(Duration::from_secs(30), Duration::from_secs(1));

		let start = Instant::now();
		let outcome = poller.wait(&source, &test_hash()).await;

		assert!(matches!(outcome, PollOutcome::Failed(_)));
		assert_eq!(source.calls(), 2);
		assert_eq!(start.elapsed(), Duration::from_secs(1));
	}

	#[tokio::test(start_paused = true)]
	async fn test_repolling_is_idempotent() {
		/// Source modeling an already-mined transaction: every lookup
		/// observes the same receipt.
		struct MinedSource;

		#[async_trait]
		impl ReceiptSource for MinedSource {
			async fn receipt(
				&self,
				_hash: &TransactionHash,
			) -> Result<Option<TransactionReceipt>, DeliveryError> {
				Ok(Some(test_receipt(77)))
			}
		}

		let poller = ConfirmationPoller::default();

		let first = poller.wait(&MinedSource, &test_hash()).await;
		let second = poller.wait(&MinedSource, &test_hash()).await;

		match (first, second) {
			(PollOutcome::Confirmed(a), PollOutcome::Confirmed(b)) => assert_eq!(a, b),
			other => panic!("expected two Confirmed outcomes, got {:?}", other),
		}
	}

	#[tokio::test(start_paused = true)]
	async fn test_timed_out_poll_can_be_retried_with_fresh_deadline() {
		let source = ScriptedSource::new(vec![Ok(None), Ok(None)]);
		let poller =
			ConfirmationPoller::new(Duration::from_millis(1500), Duration::from_secs(1));

		let first = poller.wait(&source, &test_hash()).await;
		assert!(matches!(first, PollOutcome::TimedOut));
		assert_eq!(source.calls(), 2);

		// The transaction mines while nobody is polling; a second invocation
		// with a fresh deadline observes it.
		source
			.responses
			.lock()
			.unwrap()
			.push_back(Ok(Some(test_receipt(200))));
		let second = poller.wait(&source, &test_hash()).await;
		match second {
			PollOutcome::Confirmed(receipt) => assert_eq!(receipt.block_number, 200),
			other => panic!("expected Confirmed, got {:?}", other),
		}
	}
}
