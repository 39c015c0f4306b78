//! Subscription plans and trial periods.

use std::{fmt::Display, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::Error;

/// The number of days a trial lasts.
pub const TRIAL_LENGTH_DAYS: i64 = 14;

const NANOSECONDS_PER_DAY: i128 = 86_400 * 1_000_000_000;

/// The plans a business can subscribe to, from cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Plan {
    /// No charge, limited number of transactions, no trial.
    Free,
    /// For sole traders.
    Starter,
    /// For small teams.
    Professional,
    /// For larger businesses.
    Enterprise,
}

impl Plan {
    /// The price per month.
    pub fn monthly_price(self) -> Decimal {
        match self {
            Self::Free => Decimal::ZERO,
            Self::Starter => Decimal::from(19),
            Self::Professional => Decimal::from(49),
            Self::Enterprise => Decimal::from(199),
        }
    }

    /// The maximum number of transactions, `None` if unlimited.
    pub fn transaction_limit(self) -> Option<usize> {
        match self {
            Self::Free => Some(50),
            Self::Starter => Some(500),
            Self::Professional | Self::Enterprise => None,
        }
    }

    /// Whether `count` transactions fit within the plan's limit.
    pub fn allows_transaction_count(self, count: usize) -> bool {
        self.transaction_limit().is_none_or(|limit| count <= limit)
    }

    /// The value used for this plan on the command line and in JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Starter => 1,
            Self::Professional => 2,
            Self::Enterprise => 3,
        }
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Plan {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "free" => Ok(Self::Free),
            "starter" => Ok(Self::Starter),
            "professional" => Ok(Self::Professional),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(Error::InvalidPlan(value.to_owned())),
        }
    }
}

/// Where a subscription is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubscriptionStatus {
    /// In the free trial period.
    Trialing,
    /// Paid for.
    Active,
    /// Cancelled by the customer.
    Cancelled,
    /// The trial ended without the subscription being activated.
    Expired,
}

/// A business's subscription to a [Plan].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// The subscribed plan.
    pub plan: Plan,
    /// The status as last recorded. See [Subscription::effective_status] for
    /// the status at a given instant.
    pub status: SubscriptionStatus,
    /// When the subscription or trial started.
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    /// When the trial ends, `None` if there is no trial.
    #[serde(with = "time::serde::rfc3339::option")]
    pub trial_ends_at: Option<OffsetDateTime>,
}

impl Subscription {
    /// Start a [TRIAL_LENGTH_DAYS] day trial of `plan`.
    ///
    /// # Errors
    /// Returns [Error::TrialNotAvailable] for the free plan.
    pub fn start_trial(plan: Plan, now: OffsetDateTime) -> Result<Self, Error> {
        if plan == Plan::Free {
            return Err(Error::TrialNotAvailable(plan));
        }

        let trial_ends_at = now + Duration::days(TRIAL_LENGTH_DAYS);
        tracing::info!("starting {plan} trial, ends at {trial_ends_at}");

        Ok(Self {
            plan,
            status: SubscriptionStatus::Trialing,
            started_at: now,
            trial_ends_at: Some(trial_ends_at),
        })
    }

    /// Start a paid subscription to `plan` with no trial.
    pub fn activate(plan: Plan, now: OffsetDateTime) -> Self {
        Self {
            plan,
            status: SubscriptionStatus::Active,
            started_at: now,
            trial_ends_at: None,
        }
    }

    /// The whole days left in the trial, rounded up.
    ///
    /// Half a day left counts as one day. Returns zero once the trial has
    /// ended, or if there is no trial.
    pub fn trial_days_remaining(&self, now: OffsetDateTime) -> i64 {
        let Some(trial_ends_at) = self.trial_ends_at else {
            return 0;
        };

        if now >= trial_ends_at {
            return 0;
        }

        let remaining = (trial_ends_at - now).whole_nanoseconds();
        let days = (remaining + NANOSECONDS_PER_DAY - 1) / NANOSECONDS_PER_DAY;

        days as i64
    }

    /// Whether the subscription had a trial that has ended.
    pub fn is_trial_expired(&self, now: OffsetDateTime) -> bool {
        self.trial_ends_at
            .is_some_and(|trial_ends_at| now >= trial_ends_at)
    }

    /// The status at `now`, treating a trial past its end as expired.
    pub fn effective_status(&self, now: OffsetDateTime) -> SubscriptionStatus {
        match self.status {
            SubscriptionStatus::Trialing if self.is_trial_expired(now) => {
                SubscriptionStatus::Expired
            }
            status => status,
        }
    }

    /// Move to a more expensive plan and make the subscription active.
    ///
    /// Any trial ends immediately.
    ///
    /// # Errors
    /// Returns [Error::InvalidPlanChange] if `plan` is not more expensive than
    /// the current plan.
    pub fn upgrade(&mut self, plan: Plan, now: OffsetDateTime) -> Result<(), Error> {
        if plan.rank() <= self.plan.rank() {
            return Err(Error::InvalidPlanChange {
                from: self.plan,
                to: plan,
            });
        }

        tracing::info!("upgrading subscription from {} to {plan} at {now}", self.plan);
        self.plan = plan;
        self.status = SubscriptionStatus::Active;
        self.trial_ends_at = None;

        Ok(())
    }

    /// Cancel the subscription. Cancelling twice has no further effect.
    pub fn cancel(&mut self) {
        if self.status != SubscriptionStatus::Cancelled {
            tracing::info!("cancelling {} subscription", self.plan);
            self.status = SubscriptionStatus::Cancelled;
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::Error;

    use super::{Plan, Subscription, SubscriptionStatus, TRIAL_LENGTH_DAYS};

    const NOW: OffsetDateTime = datetime!(2025-06-01 09:00 UTC);

    #[test]
    fn trial_lasts_fourteen_days() {
        let subscription = Subscription::start_trial(Plan::Starter, NOW).unwrap();

        assert_eq!(subscription.status, SubscriptionStatus::Trialing);
        assert_eq!(subscription.trial_ends_at, Some(datetime!(2025-06-15 09:00 UTC)));
        assert_eq!(subscription.trial_days_remaining(NOW), TRIAL_LENGTH_DAYS);
    }

    #[test]
    fn free_plan_has_no_trial() {
        let got = Subscription::start_trial(Plan::Free, NOW);

        assert_eq!(got, Err(Error::TrialNotAvailable(Plan::Free)));
    }

    #[test]
    fn trial_days_round_up() {
        let subscription = Subscription::start_trial(Plan::Starter, NOW).unwrap();

        let half_day_in = NOW + Duration::hours(12);
        let last_minute = datetime!(2025-06-15 08:59 UTC);

        assert_eq!(subscription.trial_days_remaining(half_day_in), 14);
        assert_eq!(subscription.trial_days_remaining(NOW + Duration::days(1)), 13);
        assert_eq!(subscription.trial_days_remaining(last_minute), 1);
    }

    #[test]
    fn trial_expires_at_its_end() {
        let subscription = Subscription::start_trial(Plan::Professional, NOW).unwrap();
        let trial_end = NOW + Duration::days(TRIAL_LENGTH_DAYS);

        assert!(!subscription.is_trial_expired(trial_end - Duration::seconds(1)));
        assert!(subscription.is_trial_expired(trial_end));
        assert_eq!(subscription.trial_days_remaining(trial_end), 0);
        assert_eq!(
            subscription.effective_status(trial_end),
            SubscriptionStatus::Expired
        );
        assert_eq!(subscription.status, SubscriptionStatus::Trialing);
    }

    #[test]
    fn active_subscription_has_no_trial() {
        let subscription = Subscription::activate(Plan::Enterprise, NOW);

        assert_eq!(subscription.trial_days_remaining(NOW), 0);
        assert!(!subscription.is_trial_expired(NOW + Duration::days(365)));
        assert_eq!(
            subscription.effective_status(NOW + Duration::days(365)),
            SubscriptionStatus::Active
        );
    }

    #[test]
    fn upgrade_ends_trial() {
        let mut subscription = Subscription::start_trial(Plan::Starter, NOW).unwrap();

        subscription
            .upgrade(Plan::Professional, NOW + Duration::days(3))
            .unwrap();

        assert_eq!(subscription.plan, Plan::Professional);
        assert_eq!(subscription.status, SubscriptionStatus::Active);
        assert_eq!(subscription.trial_ends_at, None);
    }

    #[test]
    fn upgrade_rejects_cheaper_or_same_plan() {
        let mut subscription = Subscription::activate(Plan::Professional, NOW);

        assert_eq!(
            subscription.upgrade(Plan::Starter, NOW),
            Err(Error::InvalidPlanChange {
                from: Plan::Professional,
                to: Plan::Starter
            })
        );
        assert!(subscription.upgrade(Plan::Professional, NOW).is_err());
        assert_eq!(subscription.plan, Plan::Professional);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut subscription = Subscription::activate(Plan::Starter, NOW);

        subscription.cancel();
        subscription.cancel();

        assert_eq!(subscription.status, SubscriptionStatus::Cancelled);
        assert_eq!(
            subscription.effective_status(NOW),
            SubscriptionStatus::Cancelled
        );
    }

    #[test]
    fn plan_limits_and_prices() {
        assert_eq!(Plan::Free.monthly_price(), Decimal::ZERO);
        assert_eq!(Plan::Professional.monthly_price(), Decimal::from(49));
        assert!(Plan::Free.allows_transaction_count(50));
        assert!(!Plan::Free.allows_transaction_count(51));
        assert!(Plan::Enterprise.allows_transaction_count(1_000_000));
    }

    #[test]
    fn parses_plan_names() {
        assert_eq!("starter".parse::<Plan>(), Ok(Plan::Starter));
        assert_eq!(
            "gold".parse::<Plan>(),
            Err(Error::InvalidPlan("gold".to_owned()))
        );
    }
}
