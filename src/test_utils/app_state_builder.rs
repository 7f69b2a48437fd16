//! Test app state builder for HTTP-level testing.
//!
//! `TestAppStateBuilder` creates an `AppState` whose ports are in-memory
//! mocks, with a fixed webhook secret and plan catalog.

use std::net::SocketAddr;
use std::sync::Arc;

use secrecy::SecretString;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        ports::subscription_source::ProviderSubscription,
        use_cases::billing_webhook::BillingWebhookUseCases,
    },
    domain::entities::plan::PlanCatalog,
    infra::{config::AppConfig, stripe_client::DEFAULT_WEBHOOK_TOLERANCE_SECS},
    test_utils::{InMemorySubscriptionRepo, InMemorySubscriptionSource},
};

pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_0123456789abcdef";
pub const TEST_BASIC_PRICE: &str = "price_test_basic";
pub const TEST_PRO_PRICE: &str = "price_test_pro";

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: "postgres://localhost/plan_points_test".to_string(),
        stripe_secret_key: SecretString::new("sk_test_unused".into()),
        stripe_webhook_secret: SecretString::new(TEST_WEBHOOK_SECRET.into()),
        stripe_price_basic: TEST_BASIC_PRICE.to_string(),
        stripe_price_pro: TEST_PRO_PRICE.to_string(),
        webhook_tolerance_secs: DEFAULT_WEBHOOK_TOLERANCE_SECS,
    }
}

/// Builder for creating `AppState` with in-memory mocks for testing.
///
/// # Example
///
/// ```ignore
/// let (app_state, repo) = TestAppStateBuilder::new()
///     .with_subscription(create_test_subscription("sub_1", TEST_PRO_PRICE, |_| {}))
///     .build_with_mocks();
/// ```
#[derive(Default)]
pub struct TestAppStateBuilder {
    subscriptions: Vec<ProviderSubscription>,
    fail_subscription_writes: bool,
    fail_points_writes: bool,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a subscription retrievable from the mocked provider.
    pub fn with_subscription(mut self, subscription: ProviderSubscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }

    pub fn with_failing_subscription_writes(mut self) -> Self {
        self.fail_subscription_writes = true;
        self
    }

    pub fn with_failing_points_writes(mut self) -> Self {
        self.fail_points_writes = true;
        self
    }

    /// Build the AppState and return the repo so tests can inspect persistence calls.
    pub fn build_with_mocks(self) -> (AppState, Arc<InMemorySubscriptionRepo>) {
        let repo = Arc::new(if self.fail_subscription_writes {
            InMemorySubscriptionRepo::failing_subscription()
        } else if self.fail_points_writes {
            InMemorySubscriptionRepo::failing_points()
        } else {
            InMemorySubscriptionRepo::new()
        });
        let source = Arc::new(InMemorySubscriptionSource::with_subscriptions(
            self.subscriptions,
        ));

        let config = test_config();
        let catalog = PlanCatalog::new(
            config.stripe_price_basic.clone(),
            config.stripe_price_pro.clone(),
        );

        let billing_webhook_use_cases =
            BillingWebhookUseCases::new(repo.clone(), source, catalog);

        let app_state = AppState {
            config: Arc::new(config),
            billing_webhook_use_cases: Arc::new(billing_webhook_use_cases),
        };

        (app_state, repo)
    }

    pub fn build(self) -> AppState {
        self.build_with_mocks().0
    }
}
