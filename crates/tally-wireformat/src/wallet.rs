//! Wallet and budget wire entities and request descriptors.
//!
//! A wallet holds a spending limit and derived totals; each budget ties a
//! slice of a wallet to exactly one model. Budgets carry a per-service
//! consumption map which the report surface breaks down row by row.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::request::{ApiRequest, Method};

/// Consumption recorded against a single service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAllocation {
    /// Amount consumed, as formatted by the server.
    #[serde(default)]
    pub consumed: String,
}

/// A budget attached to one model, with its per-service consumption.
///
/// Older servers report the consumption map under `applications`; newer ones
/// under `services`. Both decode into [`Budget::services`], with `services`
/// preferred when both are present and non-empty. Serialization always emits
/// `services`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Budget {
    /// Owner of the budget.
    pub owner: String,
    /// Budget limit.
    pub limit: String,
    /// Total consumed across services.
    pub consumed: String,
    /// Consumed as a percentage of the limit, server formatted ("42%").
    pub usage: String,
    /// The model this budget is attached to.
    pub model: String,
    /// Per-service consumption, keyed by service name.
    pub services: BTreeMap<String, ServiceAllocation>,
}

impl<'de> Deserialize<'de> for Budget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wire {
            #[serde(default)]
            owner: String,
            #[serde(default)]
            limit: String,
            #[serde(default)]
            consumed: String,
            #[serde(default)]
            usage: String,
            #[serde(default)]
            model: String,
            #[serde(default)]
            services: BTreeMap<String, ServiceAllocation>,
            #[serde(default)]
            applications: BTreeMap<String, ServiceAllocation>,
        }

        let wire = Wire::deserialize(deserializer)?;
        let services = if wire.services.is_empty() {
            wire.applications
        } else {
            wire.services
        };
        Ok(Budget {
            owner: wire.owner,
            limit: wire.limit,
            consumed: wire.consumed,
            usage: wire.usage,
            model: wire.model,
            services,
        })
    }
}

impl Budget {
    /// Deterministic presentation order: model, then owner, then the sorted
    /// service-name set. Budgets on distinct models order by model alone.
    #[must_use]
    pub fn presentation_cmp(&self, other: &Self) -> Ordering {
        self.model
            .cmp(&other.model)
            .then_with(|| self.owner.cmp(&other.owner))
            .then_with(|| self.service_names().cmp(&other.service_names()))
    }

    fn service_names(&self) -> String {
        let names: Vec<&str> = self.services.keys().map(String::as_str).collect();
        names.join(",")
    }
}

/// Sort budgets into presentation order.
///
/// The order is total and independent of the input permutation; sorting an
/// already sorted slice is a no-op.
pub fn sort_budgets(budgets: &mut [Budget]) {
    budgets.sort_by(Budget::presentation_cmp);
}

/// Totals aggregated over a wallet or a listing of wallets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletTotals {
    /// Combined wallet limit.
    pub limit: String,
    /// Amount assigned to budgets.
    pub budgeted: String,
    /// Amount still spendable.
    pub available: String,
    /// Limit not assigned to any budget.
    pub unallocated: String,
    /// Consumed as a percentage of the limit.
    pub usage: String,
    /// Amount consumed.
    pub consumed: String,
}

/// One wallet row in a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletSummary {
    /// Owner of the wallet.
    pub owner: String,
    /// Wallet name, unique per owner.
    pub wallet: String,
    /// Wallet limit.
    pub limit: String,
    /// Amount assigned to budgets.
    pub budgeted: String,
    /// Limit not assigned to any budget.
    pub unallocated: String,
    /// Amount still spendable.
    pub available: String,
    /// Amount consumed.
    pub consumed: String,
    /// Whether this is the owner's default wallet.
    pub default: bool,
}

/// Response to a wallet listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListWalletsResponse {
    /// The caller's wallets.
    pub wallets: Vec<WalletSummary>,
    /// Totals across all wallets.
    pub total: WalletTotals,
    /// Remaining credit.
    pub credit: String,
}

/// A wallet together with the budgets drawn from it. Input to the usage
/// report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletWithBudgets {
    /// The wallet limit.
    pub limit: String,
    /// Totals across the wallet's budgets.
    pub total: WalletTotals,
    /// Budgets drawn from this wallet.
    pub budgets: Vec<Budget>,
}

/// Creates a wallet with the given limit.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWalletRequest {
    /// Name of the wallet to create.
    pub wallet: String,
    /// Spending limit.
    pub limit: String,
}

impl ApiRequest for CreateWalletRequest {
    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/wallet")
    }

    fn body(&self) -> Option<Value> {
        Some(json!(self))
    }
}

/// Lists the caller's wallets.
#[derive(Debug, Clone, Copy)]
pub struct ListWalletsRequest;

impl ApiRequest for ListWalletsRequest {
    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/wallet")
    }
}

/// Updates the limit of an existing wallet.
#[derive(Debug, Clone, Serialize)]
pub struct SetWalletRequest {
    /// Wallet to update; part of the path, not the body.
    #[serde(skip)]
    pub wallet: String,
    /// New spending limit.
    pub limit: String,
}

impl ApiRequest for SetWalletRequest {
    fn method(&self) -> Method {
        Method::Patch
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/wallet/{}", self.wallet)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "update": self }))
    }
}

/// Retrieves a single wallet with its budgets.
#[derive(Debug, Clone)]
pub struct GetWalletRequest {
    /// Wallet to retrieve.
    pub wallet: String,
}

impl ApiRequest for GetWalletRequest {
    fn method(&self) -> Method {
        Method::Get
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/wallet/{}", self.wallet)
    }
}

/// Creates a budget in the given wallet for one model.
#[derive(Debug, Clone, Serialize)]
pub struct CreateBudgetRequest {
    /// Model the budget is attached to.
    pub model: String,
    /// Budget limit.
    pub limit: String,
    /// Wallet the budget draws from; part of the path, not the body.
    #[serde(skip)]
    pub wallet: String,
}

impl ApiRequest for CreateBudgetRequest {
    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/wallet/{}/budget", self.wallet)
    }

    fn body(&self) -> Option<Value> {
        Some(json!(self))
    }
}

/// Updates the budget associated with a model.
///
/// An empty wallet name is omitted from the update envelope entirely; the
/// server treats an absent field as "leave unchanged".
#[derive(Debug, Clone, Serialize)]
pub struct UpdateBudgetRequest {
    /// Model whose budget is updated; part of the path, not the body.
    #[serde(skip)]
    pub model: String,
    /// Wallet to move the budget to, when non-empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub wallet: String,
    /// New budget limit.
    pub limit: String,
}

impl ApiRequest for UpdateBudgetRequest {
    fn method(&self) -> Method {
        Method::Patch
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/model/{}/budget", self.model)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "update": self }))
    }
}

/// Removes the budget associated with a model.
#[derive(Debug, Clone)]
pub struct DeleteBudgetRequest {
    /// Model whose budget is removed.
    pub model: String,
}

impl ApiRequest for DeleteBudgetRequest {
    fn method(&self) -> Method {
        Method::Delete
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/model/{}/budget", self.model)
    }
}

/// Allocates part of a wallet's budget to a set of services, replacing any
/// prior allocation for those services.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAllocationRequest {
    /// Wallet the allocation draws from; part of the path, not the body.
    #[serde(skip)]
    pub wallet: String,
    /// Model the services run in.
    pub model: String,
    /// Services covered by the allocation.
    pub services: Vec<String>,
    /// Allocation limit.
    pub limit: String,
}

impl ApiRequest for CreateAllocationRequest {
    fn method(&self) -> Method {
        Method::Post
    }

    fn url(&self, base_url: &str) -> String {
        format!("{base_url}/wallet/{}/allocation", self.wallet)
    }

    fn body(&self) -> Option<Value> {
        Some(json!(self))
    }
}

/// Updates the allocation limit of one service in a model.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAllocationRequest {
    /// Model the service runs in; part of the path, not the body.
    #[serde(skip)]
    pub model: String,
    /// Service whose allocation is updated; part of the path, not the body.
    #[serde(skip)]
    pub service: String,
    /// New allocation limit.
    pub limit: String,
}

impl ApiRequest for UpdateAllocationRequest {
    fn method(&self) -> Method {
        Method::Patch
    }

    fn url(&self, base_url: &str) -> String {
        format!(
            "{base_url}/model/{}/service/{}/allocation",
            self.model, self.service
        )
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "update": self }))
    }
}
