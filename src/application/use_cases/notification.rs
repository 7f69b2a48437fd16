use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::email_templates,
    domain::entities::plan::Plan,
};

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html: &str) -> AppResult<()>;
}

#[derive(Clone)]
pub struct NotificationUseCases {
    email: Arc<dyn EmailSender>,
    app_name: String,
    app_origin: String,
}

impl NotificationUseCases {
    pub fn new(email: Arc<dyn EmailSender>, app_name: String, app_origin: String) -> Self {
        Self {
            email,
            app_name,
            app_origin,
        }
    }

    /// Send the "plan activated" email for `plan_name` to `to`.
    #[instrument(skip(self))]
    pub async fn send_plan_activated(&self, to: &str, plan_name: &str) -> AppResult<()> {
        if !to.contains('@') {
            return Err(AppError::Validation(format!("Invalid recipient: {to}")));
        }
        let plan = Plan::from_name(plan_name)
            .ok_or_else(|| AppError::UnknownPlan(plan_name.to_string()))?;

        let (subject, html) =
            email_templates::plan_activated_email(&self.app_origin, &self.app_name, &plan);
        self.email.send(to, &subject, &html).await?;

        info!(plan = plan.name, "Plan activated email sent");
        Ok(())
    }
}
