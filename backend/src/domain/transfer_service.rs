//! Coin transfer use-case.
//!
//! Validates the request, applies the self-transfer policy, then delegates
//! the locked read-check-write to the ledger store. Transient store failures
//! re-run the whole store transaction under the configured [`RetryPolicy`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{CoinTransferCommand, LedgerError, LedgerRepository};
use crate::domain::{CoinAmount, Error, RetryPolicy, Username};

/// Policy knobs for transfers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransferPolicy {
    /// Whether a user may send coins to themselves. Such transfers are
    /// logged but leave the balance unchanged.
    pub allow_self_transfer: bool,
    /// Retry budget for transient store failures.
    pub retry: RetryPolicy,
}

/// Transfer service implementing [`CoinTransferCommand`].
#[derive(Clone)]
pub struct TransferService<L> {
    ledger: Arc<L>,
    policy: TransferPolicy,
}

impl<L> TransferService<L> {
    /// Create a service over a ledger store.
    pub const fn new(ledger: Arc<L>, policy: TransferPolicy) -> Self {
        Self { ledger, policy }
    }
}

impl<L> TransferService<L>
where
    L: LedgerRepository,
{
    /// Move `amount` coins from `sender` to `receiver` atomically.
    pub async fn transfer_coins(
        &self,
        sender: &Username,
        receiver: &Username,
        amount: i64,
    ) -> Result<(), LedgerError> {
        let amount = CoinAmount::new(amount)?;
        if sender == receiver && !self.policy.allow_self_transfer {
            return Err(LedgerError::self_transfer(sender.as_str()));
        }

        self.policy
            .retry
            .run("transfer_coins", || {
                self.ledger.transfer_coins(sender, receiver, amount)
            })
            .await?;

        info!(
            sender = %sender,
            receiver = %receiver,
            amount = amount.get(),
            "coins transferred"
        );
        Ok(())
    }
}

#[async_trait]
impl<L> CoinTransferCommand for TransferService<L>
where
    L: LedgerRepository,
{
    async fn send_coins(
        &self,
        sender: &Username,
        receiver: &Username,
        amount: i64,
    ) -> Result<(), Error> {
        self.transfer_coins(sender, receiver, amount)
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockLedgerRepository;
    use rstest::{fixture, rstest};
    use std::time::Duration;

    fn name(raw: &str) -> Username {
        Username::new(raw).expect("valid username")
    }

    #[fixture]
    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(1), Duration::from_millis(1), 0)
    }

    fn service(ledger: MockLedgerRepository, policy: TransferPolicy) -> TransferService<MockLedgerRepository> {
        TransferService::new(Arc::new(ledger), policy)
    }

    #[rstest]
    #[tokio::test]
    async fn forwards_valid_transfers_to_the_store() {
        let mut ledger = MockLedgerRepository::new();
        ledger
            .expect_transfer_coins()
            .times(1)
            .withf(|sender, receiver, amount| {
                sender.as_str() == "alice" && receiver.as_str() == "bob" && amount.get() == 200
            })
            .returning(|_, _, _| Ok(()));

        let result = service(ledger, TransferPolicy::default())
            .transfer_coins(&name("alice"), &name("bob"), 200)
            .await;

        assert_eq!(result, Ok(()));
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    #[tokio::test]
    async fn rejects_non_positive_amounts_before_touching_the_store(#[case] amount: i64) {
        let mut ledger = MockLedgerRepository::new();
        ledger.expect_transfer_coins().never();

        let result = service(ledger, TransferPolicy::default())
            .transfer_coins(&name("alice"), &name("bob"), amount)
            .await;

        assert_eq!(result, Err(LedgerError::invalid_amount(amount)));
    }

    #[rstest]
    #[tokio::test]
    async fn self_transfer_is_rejected_by_default() {
        let mut ledger = MockLedgerRepository::new();
        ledger.expect_transfer_coins().never();

        let error = service(ledger, TransferPolicy::default())
            .send_coins(&name("alice"), &name("alice"), 10)
            .await
            .expect_err("self transfer rejected");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn self_transfer_reaches_the_store_when_allowed() {
        let mut ledger = MockLedgerRepository::new();
        ledger
            .expect_transfer_coins()
            .times(1)
            .withf(|sender, receiver, _| sender == receiver)
            .returning(|_, _, _| Ok(()));
        let policy = TransferPolicy {
            allow_self_transfer: true,
            ..TransferPolicy::default()
        };

        let result = service(ledger, policy)
            .transfer_coins(&name("alice"), &name("alice"), 10)
            .await;

        assert_eq!(result, Ok(()));
    }

    #[rstest]
    #[tokio::test]
    async fn transient_failures_rerun_the_transfer(fast_retry: RetryPolicy) {
        let mut ledger = MockLedgerRepository::new();
        let mut seq = mockall::Sequence::new();
        ledger
            .expect_transfer_coins()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Err(LedgerError::transient("deadlock detected")));
        ledger
            .expect_transfer_coins()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(()));
        let policy = TransferPolicy {
            allow_self_transfer: false,
            retry: fast_retry,
        };

        let result = service(ledger, policy)
            .transfer_coins(&name("alice"), &name("bob"), 60)
            .await;

        assert_eq!(result, Ok(()));
    }

    #[rstest]
    #[tokio::test]
    async fn fatal_failures_are_never_rerun(fast_retry: RetryPolicy) {
        let mut ledger = MockLedgerRepository::new();
        ledger
            .expect_transfer_coins()
            .times(1)
            .returning(|_, _, _| Err(LedgerError::fatal("database connection closed; outcome unknown")));
        let policy = TransferPolicy {
            allow_self_transfer: false,
            retry: fast_retry,
        };

        let error = service(ledger, policy)
            .send_coins(&name("alice"), &name("bob"), 60)
            .await
            .expect_err("lost connection");

        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn insufficient_coins_is_reported_once(fast_retry: RetryPolicy) {
        let mut ledger = MockLedgerRepository::new();
        ledger
            .expect_transfer_coins()
            .times(1)
            .returning(|_, _, _| Err(LedgerError::insufficient_coins(40, 60)));
        let policy = TransferPolicy {
            allow_self_transfer: false,
            retry: fast_retry,
        };

        let error = service(ledger, policy)
            .send_coins(&name("alice"), &name("bob"), 60)
            .await
            .expect_err("short balance");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }
}
