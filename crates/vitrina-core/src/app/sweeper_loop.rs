//! SweeperLoop - 期限切れプランの定期回収
//!
//! # フロー
//! 1. 起動直後に 1 回 sweep
//! 2. 以後 interval ごとに sweep
//! 3. shutdown future が完了したら終了
//!
//! sweep 自体は冪等なので、呼び出し間隔は正しさに影響しません。

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::lifecycle::PlanLifecycle;
use crate::ports::{Clock, ListingStore};

pub struct SweeperLoop<S, C> {
    lifecycle: PlanLifecycle<S, C>,
    interval: Duration,
}

impl<S: ListingStore, C: Clock> SweeperLoop<S, C> {
    pub fn new(lifecycle: PlanLifecycle<S, C>, interval: Duration) -> Self {
        Self {
            lifecycle,
            interval,
        }
    }

    /// Sweep until `shutdown` resolves. Returns the total number of
    /// listings whose plan was cleared.
    pub async fn run(self, shutdown: impl Future<Output = ()>) -> usize {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        let mut total = 0;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    match self.lifecycle.sweep_expired_plans_now().await {
                        Ok(changed) => total += changed,
                        Err(e) => warn!(error = %e, "plan sweep failed"),
                    }
                }
            }
        }
        info!(total, "sweeper stopped");
        total
    }
}
