/// A purchasable plan and the point allowance it grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Plan {
    pub name: &'static str,
    pub points: i64,
}

impl Plan {
    pub const BASIC: Plan = Plan {
        name: "basic",
        points: 1_000,
    };

    pub const PRO: Plan = Plan {
        name: "pro",
        points: 5_000,
    };

    pub const ALL: [Plan; 2] = [Plan::BASIC, Plan::PRO];

    /// Look up a plan by its name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Plan> {
        Plan::ALL
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}

/// Static mapping from Stripe price identifier to plan.
///
/// The price identifiers differ between Stripe accounts and modes, so they come
/// from configuration; the plans themselves are fixed.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    entries: Vec<(String, Plan)>,
}

impl PlanCatalog {
    pub fn new(basic_price_id: impl Into<String>, pro_price_id: impl Into<String>) -> Self {
        Self {
            entries: vec![
                (basic_price_id.into(), Plan::BASIC),
                (pro_price_id.into(), Plan::PRO),
            ],
        }
    }

    pub fn lookup(&self, price_id: &str) -> Option<&Plan> {
        if price_id.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|(id, _)| id == price_id)
            .map(|(_, plan)| plan)
    }
}
