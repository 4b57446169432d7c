//! Budget tracker - Period indexing and per-period consumption accounting.
//!
//! A budget period is derived, not stored: a policy's interval and start date
//! map any timestamp to an integer period index. Consumption is kept in one
//! bucket row per `(policy_id, period_index)` and incremented with a guarded
//! atomic SQL update, so two racing evaluations can never push a bucket past
//! the policy's budget ceiling.

use crate::{
    entities::{Consumption, consumption, policy, policy::BudgetInterval},
    errors::{Error, Result},
};
use chrono::{Datelike, Months, NaiveDate};
use sea_orm::{Set, prelude::*, sea_query::OnConflict};

/// Number of calendar periods of `months_per_period` months completed between
/// `start` and `date`.
///
/// The raw month difference can overshoot when the start day-of-month has not
/// been reached yet (and month-end starts clamp: Jan 31 + 1 month = Feb 28),
/// so the boundary is walked back until it no longer lies past `date`.
fn calendar_periods(start: NaiveDate, date: NaiveDate, months_per_period: i64) -> i64 {
    let raw = i64::from(date.year() - start.year()) * 12 + i64::from(date.month())
        - i64::from(start.month());
    let mut periods = raw / months_per_period;
    while periods > 0 {
        let Ok(months) = u32::try_from(periods * months_per_period) else {
            break;
        };
        match start.checked_add_months(Months::new(months)) {
            Some(boundary) if boundary > date => periods -= 1,
            _ => break,
        }
    }
    periods
}

/// Maps a transaction timestamp to the policy's budget period index.
///
/// Returns `None` when the timestamp falls outside the policy's temporal
/// window: before `budget_start_date` or after `budget_end_date` (inclusive
/// end). Daily and weekly intervals are fixed-duration; monthly, quarterly,
/// and annual intervals advance by calendar units; one-time has a single
/// period spanning the whole window.
pub fn period_index(policy: &policy::Model, at: DateTimeUtc) -> Option<i64> {
    let date = at.date_naive();
    let start = policy.budget_start_date;

    if date < start {
        return None;
    }
    if let Some(end) = policy.budget_end_date {
        if date > end {
            return None;
        }
    }

    let index = match policy.budget_interval {
        BudgetInterval::Daily => (date - start).num_days(),
        BudgetInterval::Weekly => (date - start).num_days() / 7,
        BudgetInterval::Monthly => calendar_periods(start, date, 1),
        BudgetInterval::Quarterly => calendar_periods(start, date, 3),
        BudgetInterval::Annually => calendar_periods(start, date, 12),
        BudgetInterval::OneTime => 0,
    };
    Some(index)
}

/// Budget headroom left in one period: the policy's ceiling minus what has
/// already been consumed, floored at zero.
pub async fn remaining_budget<C: ConnectionTrait>(
    db: &C,
    policy: &policy::Model,
    period_index: i64,
) -> Result<f64> {
    let consumed = Consumption::find_by_id((policy.id, period_index))
        .one(db)
        .await?
        .map_or(0.0, |bucket| bucket.consumed);
    Ok((policy.budget_amount - consumed).max(0.0))
}

/// Records consumption against one `(policy, period)` bucket.
///
/// The bucket row is seeded with an `ON CONFLICT DO NOTHING` insert, then
/// incremented with a single guarded UPDATE:
/// `SET consumed = consumed + ? WHERE ... AND consumed <= budget - ?`.
/// Zero affected rows means the period lacked headroom, and nothing was
/// written; over-consumption can never commit, even when many evaluations
/// race on the same bucket.
pub async fn record_consumption<C: ConnectionTrait>(
    db: &C,
    policy: &policy::Model,
    period_index: i64,
    amount: f64,
) -> Result<()> {
    if !(amount.is_finite() && amount > 0.0) {
        return Err(Error::InvalidAmount { amount });
    }

    let now = chrono::Utc::now();
    Consumption::insert(consumption::ActiveModel {
        policy_id: Set(policy.id),
        period_index: Set(period_index),
        consumed: Set(0.0),
        updated_at: Set(now),
    })
    .on_conflict(
        OnConflict::columns([
            consumption::Column::PolicyId,
            consumption::Column::PeriodIndex,
        ])
        .do_nothing()
        .to_owned(),
    )
    .exec_without_returning(db)
    .await?;

    use sea_orm::sea_query::Expr;

    let result = Consumption::update_many()
        .col_expr(
            consumption::Column::Consumed,
            Expr::col(consumption::Column::Consumed).add(amount),
        )
        .col_expr(consumption::Column::UpdatedAt, Expr::value(now))
        .filter(consumption::Column::PolicyId.eq(policy.id))
        .filter(consumption::Column::PeriodIndex.eq(period_index))
        .filter(consumption::Column::Consumed.lte(policy.budget_amount - amount))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::BudgetExceeded {
            policy_id: policy.id,
            period_index,
            requested: amount,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::policy::create_policy;
    use crate::test_utils::{setup_world, test_policy_spec};
    use chrono::{TimeZone, Utc};

    fn policy_model(interval: BudgetInterval, start: (i32, u32, u32)) -> policy::Model {
        let now = Utc::now();
        policy::Model {
            id: 1,
            description: None,
            status: crate::entities::policy::PolicyStatus::Active,
            action: crate::entities::policy::PolicyAction::Allow,
            budget_amount: 1000.0,
            budget_interval: interval,
            budget_start_date: NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            budget_end_date: None,
            require_approval: false,
            approval_threshold: None,
            allowed_payment_types: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn at(y: i32, m: u32, d: u32) -> DateTimeUtc {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_period_index_daily_and_weekly() {
        let daily = policy_model(BudgetInterval::Daily, (2026, 3, 1));
        assert_eq!(period_index(&daily, at(2026, 3, 1)), Some(0));
        assert_eq!(period_index(&daily, at(2026, 3, 2)), Some(1));
        assert_eq!(period_index(&daily, at(2026, 3, 31)), Some(30));

        let weekly = policy_model(BudgetInterval::Weekly, (2026, 3, 2));
        assert_eq!(period_index(&weekly, at(2026, 3, 8)), Some(0));
        assert_eq!(period_index(&weekly, at(2026, 3, 9)), Some(1));
        assert_eq!(period_index(&weekly, at(2026, 3, 23)), Some(3));
    }

    #[test]
    fn test_period_index_monthly_is_calendar_aware() {
        let monthly = policy_model(BudgetInterval::Monthly, (2026, 1, 15));
        assert_eq!(period_index(&monthly, at(2026, 1, 31)), Some(0));
        assert_eq!(period_index(&monthly, at(2026, 2, 14)), Some(0));
        assert_eq!(period_index(&monthly, at(2026, 2, 15)), Some(1));
        assert_eq!(period_index(&monthly, at(2026, 12, 20)), Some(11));
        assert_eq!(period_index(&monthly, at(2027, 1, 15)), Some(12));
    }

    #[test]
    fn test_period_index_monthly_clamps_month_end() {
        // Jan 31 + 1 month clamps to Feb 28 in a non-leap year
        let monthly = policy_model(BudgetInterval::Monthly, (2026, 1, 31));
        assert_eq!(period_index(&monthly, at(2026, 2, 27)), Some(0));
        assert_eq!(period_index(&monthly, at(2026, 2, 28)), Some(1));
        assert_eq!(period_index(&monthly, at(2026, 3, 30)), Some(1));
        assert_eq!(period_index(&monthly, at(2026, 3, 31)), Some(2));
    }

    #[test]
    fn test_period_index_quarterly_and_annually() {
        let quarterly = policy_model(BudgetInterval::Quarterly, (2026, 1, 1));
        assert_eq!(period_index(&quarterly, at(2026, 3, 31)), Some(0));
        assert_eq!(period_index(&quarterly, at(2026, 4, 1)), Some(1));
        assert_eq!(period_index(&quarterly, at(2026, 12, 31)), Some(3));

        let annually = policy_model(BudgetInterval::Annually, (2026, 7, 1));
        assert_eq!(period_index(&annually, at(2027, 6, 30)), Some(0));
        assert_eq!(period_index(&annually, at(2027, 7, 1)), Some(1));
    }

    #[test]
    fn test_period_index_respects_temporal_window() {
        let mut one_time = policy_model(BudgetInterval::OneTime, (2026, 3, 1));
        one_time.budget_end_date = NaiveDate::from_ymd_opt(2026, 3, 31);

        assert_eq!(period_index(&one_time, at(2026, 2, 28)), None);
        assert_eq!(period_index(&one_time, at(2026, 3, 1)), Some(0));
        // End date is inclusive
        assert_eq!(period_index(&one_time, at(2026, 3, 31)), Some(0));
        assert_eq!(period_index(&one_time, at(2026, 4, 1)), None);
    }

    #[test]
    fn test_period_index_one_time_unbounded_without_end() {
        let one_time = policy_model(BudgetInterval::OneTime, (2026, 3, 1));
        assert_eq!(period_index(&one_time, at(2030, 1, 1)), Some(0));
    }

    #[tokio::test]
    async fn test_record_consumption_accumulates_within_ceiling() -> Result<()> {
        let world = setup_world().await?;
        let created = create_policy(&world.db, &test_policy_spec(&world)).await?;
        let p = &created.policy;

        assert_eq!(remaining_budget(&world.db, p, 0).await?, 1000.0);

        record_consumption(&world.db, p, 0, 400.0).await?;
        assert_eq!(remaining_budget(&world.db, p, 0).await?, 600.0);

        record_consumption(&world.db, p, 0, 600.0).await?;
        assert_eq!(remaining_budget(&world.db, p, 0).await?, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_consumption_guard_rejects_overrun() -> Result<()> {
        let world = setup_world().await?;
        let created = create_policy(&world.db, &test_policy_spec(&world)).await?;
        let p = &created.policy;

        record_consumption(&world.db, p, 0, 900.0).await?;

        let result = record_consumption(&world.db, p, 0, 200.0).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::BudgetExceeded {
                period_index: 0,
                ..
            }
        ));
        // The rejected increment wrote nothing
        assert_eq!(remaining_budget(&world.db, p, 0).await?, 100.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_consumption_periods_are_independent() -> Result<()> {
        let world = setup_world().await?;
        let created = create_policy(&world.db, &test_policy_spec(&world)).await?;
        let p = &created.policy;

        record_consumption(&world.db, p, 0, 1000.0).await?;
        // Next period has a fresh bucket
        record_consumption(&world.db, p, 1, 1000.0).await?;
        assert_eq!(remaining_budget(&world.db, p, 0).await?, 0.0);
        assert_eq!(remaining_budget(&world.db, p, 1).await?, 0.0);
        Ok(())
    }

    #[tokio::test]
    async fn test_record_consumption_rejects_invalid_amounts() -> Result<()> {
        let world = setup_world().await?;
        let created = create_policy(&world.db, &test_policy_spec(&world)).await?;
        let p = &created.policy;

        assert!(matches!(
            record_consumption(&world.db, p, 0, 0.0).await.unwrap_err(),
            Error::InvalidAmount { .. }
        ));
        assert!(matches!(
            record_consumption(&world.db, p, 0, -10.0).await.unwrap_err(),
            Error::InvalidAmount { .. }
        ));
        assert!(matches!(
            record_consumption(&world.db, p, 0, f64::NAN)
                .await
                .unwrap_err(),
            Error::InvalidAmount { .. }
        ));
        Ok(())
    }
}
