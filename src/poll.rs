use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::{Result, RobotiqError};

/// Read until `done` accepts the value, sleeping `interval` between reads.
///
/// The first read happens immediately and the accepted value is returned. A read
/// error ends the wait. With a `deadline` the wait fails with
/// [`RobotiqError::Timeout`] once it has been exceeded, otherwise it lasts for as
/// long as the device keeps answering with values `done` rejects.
///
/// The sleep is `tokio::time::sleep`: async callers yield to their executor, the
/// blocking client parks its thread inside `block_on`.
pub(crate) async fn poll_until<V, R, Fut, P>(
    mut read: R,
    done: P,
    interval: Duration,
    deadline: Option<Duration>,
    waiting_for: &'static str,
) -> Result<V>
where
    V: Debug,
    R: FnMut() -> Fut,
    Fut: Future<Output = Result<V>>,
    P: Fn(&V) -> bool,
{
    let start = Instant::now();
    let mut polls: u64 = 0;
    loop {
        polls += 1;
        let value = read().await?;
        if done(&value) {
            log::trace!("{}: settled on {:?} after {} polls", waiting_for, value, polls);
            return Ok(value);
        }
        log::trace!("{}: read {:?}", waiting_for, value);
        let waited = start.elapsed();
        if let Some(deadline) = deadline {
            if waited >= deadline {
                log::warn!("gave up waiting for {} after {:?}", waiting_for, waited);
                return Err(RobotiqError::Timeout {
                    waiting_for,
                    waited,
                });
            }
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn returns_the_accepted_value() {
        let reads = Cell::new(0);
        let value = poll_until(
            || {
                reads.set(reads.get() + 1);
                let v = reads.get() * 10;
                async move { Ok(v) }
            },
            |v| *v >= 40,
            Duration::from_millis(1),
            None,
            "test",
        )
        .await
        .unwrap();
        assert_eq!(value, 40);
        assert_eq!(reads.get(), 4);
    }

    #[tokio::test]
    async fn read_error_ends_the_wait() {
        let reads = Cell::new(0);
        let err = poll_until(
            || {
                reads.set(reads.get() + 1);
                async { Err::<i32, _>(RobotiqError::InvalidOperation("boom")) }
            },
            |_| true,
            Duration::from_millis(1),
            None,
            "test",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RobotiqError::InvalidOperation("boom")));
        assert_eq!(reads.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_turns_into_timeout() {
        let err = poll_until(
            || async { Ok(0) },
            |v| *v == 1,
            Duration::from_millis(10),
            Some(Duration::from_millis(100)),
            "never",
        )
        .await
        .unwrap_err();
        match err {
            RobotiqError::Timeout {
                waiting_for,
                waited,
            } => {
                assert_eq!(waiting_for, "never");
                assert!(waited >= Duration::from_millis(100));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn no_deadline_keeps_polling() {
        let reads = Cell::new(0u32);
        let value = poll_until(
            || {
                reads.set(reads.get() + 1);
                let v = reads.get();
                async move { Ok(v) }
            },
            |v| *v == 1000,
            Duration::from_secs(1),
            None,
            "slow device",
        )
        .await
        .unwrap();
        assert_eq!(value, 1000);
    }
}
