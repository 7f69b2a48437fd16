use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::AppResult,
    application::use_cases::billing_webhook::SubscriptionRepo,
    domain::entities::subscription::SubscriptionRecord,
};

#[async_trait]
impl SubscriptionRepo for PostgresPersistence {
    async fn create_or_update_subscription(&self, record: &SubscriptionRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions
                (user_id, stripe_subscription_id, plan, current_period_start, current_period_end)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                stripe_subscription_id = EXCLUDED.stripe_subscription_id,
                plan = EXCLUDED.plan,
                current_period_start = EXCLUDED.current_period_start,
                current_period_end = EXCLUDED.current_period_end,
                updated_at = NOW()
            "#,
        )
        .bind(&record.user_id)
        .bind(&record.stripe_subscription_id)
        .bind(&record.plan)
        .bind(record.current_period_start)
        .bind(record.current_period_end)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_user_points(&self, user_id: &str, points: i64) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_points (user_id, points)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                points = EXCLUDED.points,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(points)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
