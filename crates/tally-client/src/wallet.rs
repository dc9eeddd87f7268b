//! Client for the wallet and budget service area.

use tally_wireformat::wallet::{
    CreateAllocationRequest, CreateBudgetRequest, CreateWalletRequest, DeleteBudgetRequest,
    GetWalletRequest, ListWalletsRequest, ListWalletsResponse, SetWalletRequest,
    UpdateAllocationRequest, UpdateBudgetRequest, WalletWithBudgets,
};

use crate::config::ClientConfig;
use crate::connection::Connection;
use crate::error::Error;
use crate::DEFAULT_URL;

/// Client for wallet, budget, and allocation operations.
#[derive(Debug, Clone)]
pub struct WalletClient {
    connection: Connection,
}

impl WalletClient {
    /// Creates a wallet client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the default transport cannot be
    /// built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Ok(Self {
            connection: Connection::new(config, DEFAULT_URL, "wallet")?,
        })
    }

    /// The base URL requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.connection.base_url()
    }

    /// Creates a wallet with the given spending limit.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn create_wallet(&self, name: &str, limit: &str) -> Result<String, Error> {
        let request = CreateWalletRequest {
            wallet: name.to_string(),
            limit: limit.to_string(),
        };
        self.connection.send(&request).await
    }

    /// Lists the caller's wallets with their totals.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn list_wallets(&self) -> Result<ListWalletsResponse, Error> {
        self.connection.send(&ListWalletsRequest).await
    }

    /// Updates the spending limit of a wallet.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn set_wallet(&self, name: &str, limit: &str) -> Result<String, Error> {
        let request = SetWalletRequest {
            wallet: name.to_string(),
            limit: limit.to_string(),
        };
        self.connection.send(&request).await
    }

    /// Retrieves a wallet with the budgets drawn from it.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn get_wallet(&self, name: &str) -> Result<WalletWithBudgets, Error> {
        let request = GetWalletRequest {
            wallet: name.to_string(),
        };
        self.connection.send(&request).await
    }

    /// Creates a budget for a model in the given wallet.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn create_budget(
        &self,
        wallet: &str,
        limit: &str,
        model: &str,
    ) -> Result<String, Error> {
        let request = CreateBudgetRequest {
            model: model.to_string(),
            limit: limit.to_string(),
            wallet: wallet.to_string(),
        };
        self.connection.send(&request).await
    }

    /// Updates the budget associated with a model. An empty `wallet` leaves
    /// the budget in its current wallet.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn update_budget(
        &self,
        model: &str,
        wallet: &str,
        limit: &str,
    ) -> Result<String, Error> {
        let request = UpdateBudgetRequest {
            model: model.to_string(),
            wallet: wallet.to_string(),
            limit: limit.to_string(),
        };
        self.connection.send(&request).await
    }

    /// Removes the budget associated with a model.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn delete_budget(&self, model: &str) -> Result<String, Error> {
        let request = DeleteBudgetRequest {
            model: model.to_string(),
        };
        self.connection.send(&request).await
    }

    /// Allocates part of a wallet's budget to services in a model, replacing
    /// any prior allocation for those services.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn create_allocation(
        &self,
        wallet: &str,
        limit: &str,
        model: &str,
        services: &[String],
    ) -> Result<String, Error> {
        let request = CreateAllocationRequest {
            wallet: wallet.to_string(),
            model: model.to_string(),
            services: services.to_vec(),
            limit: limit.to_string(),
        };
        self.connection.send(&request).await
    }

    /// Updates the allocation limit of one service in a model.
    ///
    /// # Errors
    ///
    /// Returns a classified [`Error`] on any transport or server failure.
    pub async fn update_allocation(
        &self,
        model: &str,
        service: &str,
        limit: &str,
    ) -> Result<String, Error> {
        let request = UpdateAllocationRequest {
            model: model.to_string(),
            service: service.to_string(),
            limit: limit.to_string(),
        };
        self.connection.send(&request).await
    }
}
