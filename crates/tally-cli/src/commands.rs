//! Command definitions and thin orchestration: parse arguments, build one
//! client, invoke one operation, print the result.

use std::sync::OnceLock;

use clap::{Args, Parser, Subcommand};
use regex::Regex;

use tally_client::{ClientConfig, Error, PlanClient, SlaClient, TermsClient, WalletClient};
use tally_wireformat::plan::ValidationError;
use tally_wireformat::terms::{CheckAgreementsRequest, SaveAgreement, SaveAgreements};

use crate::report;

/// Manage wallets, budgets, allocations, plans, terms, and SLAs.
#[derive(Parser, Debug)]
#[command(name = "tally", version)]
pub struct Cli {
    /// Base URL override for the billing API.
    #[arg(long, global = true)]
    pub url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage wallets.
    Wallet(WalletArgs),
    /// Manage per-model budgets.
    Budget(BudgetArgs),
    /// Allocate budget to services, replacing any prior allocation.
    Allocate(AllocateArgs),
    /// Update existing allocations.
    Allocation(AllocationArgs),
    /// Query and authorize rating plans.
    Plan(PlanArgs),
    /// List the terms agreements you have signed.
    Agreements,
    /// Check and sign terms documents.
    Terms(TermsArgs),
    /// Request an SLA authorization for a model.
    Sla(SlaArgs),
}

#[derive(Args, Debug)]
pub struct WalletArgs {
    #[command(subcommand)]
    pub command: WalletCommand,
}

#[derive(Subcommand, Debug)]
pub enum WalletCommand {
    /// Create a wallet with a spending limit.
    Create {
        /// Wallet name.
        name: String,
        /// Spending limit.
        limit: String,
    },
    /// List your wallets.
    List,
    /// Update the spending limit of a wallet.
    Set {
        /// Wallet name.
        name: String,
        /// New spending limit.
        limit: String,
    },
    /// Show a wallet's budgets as a usage report.
    Show {
        /// Wallet name.
        name: String,
    },
}

#[derive(Args, Debug)]
pub struct BudgetArgs {
    #[command(subcommand)]
    pub command: BudgetCommand,
}

#[derive(Subcommand, Debug)]
pub enum BudgetCommand {
    /// Create a budget for a model in a wallet.
    Create {
        /// Wallet the budget draws from.
        wallet: String,
        /// Model the budget is attached to.
        model: String,
        /// Budget limit.
        limit: String,
    },
    /// Update the budget associated with a model.
    Update {
        /// Model whose budget is updated.
        model: String,
        /// New budget limit.
        limit: String,
        /// Move the budget to this wallet.
        #[arg(long, default_value = "")]
        wallet: String,
    },
    /// Remove the budget associated with a model.
    Delete {
        /// Model whose budget is removed.
        model: String,
    },
}

#[derive(Args, Debug)]
pub struct AllocateArgs {
    /// Budget and limit, as <budget>:<limit>.
    pub budget_with_limit: String,
    /// Services to allocate to.
    #[arg(required = true)]
    pub services: Vec<String>,
    /// Model the services run in.
    #[arg(long)]
    pub model: String,
}

#[derive(Args, Debug)]
pub struct AllocationArgs {
    #[command(subcommand)]
    pub command: AllocationCommand,
}

#[derive(Subcommand, Debug)]
pub enum AllocationCommand {
    /// Update the allocation limit of a service.
    Update {
        /// Service whose allocation is updated.
        service: String,
        /// New allocation limit, a whole number.
        value: String,
        /// Model the service runs in.
        #[arg(long)]
        model: String,
    },
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommand,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// List the plans offered for a charm.
    List {
        /// Charm URL to look up.
        charm_url: String,
    },
    /// Authorize attaching a plan to a deployed service.
    Authorize {
        /// UUID of the model the service runs in.
        model_uuid: String,
        /// Charm URL of the service.
        charm_url: String,
        /// Name of the deployed service.
        service_name: String,
        /// Plan to attach.
        plan_url: String,
    },
}

#[derive(Args, Debug)]
pub struct TermsArgs {
    #[command(subcommand)]
    pub command: TermsCommand,
}

#[derive(Subcommand, Debug)]
pub enum TermsCommand {
    /// Show which of the named terms revisions you have not signed.
    Unsigned {
        /// Terms revisions to check, as <name>/<revision>.
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Record agreement to a terms revision.
    Agree {
        /// Name of the terms document.
        term: String,
        /// Revision to agree to.
        revision: i64,
    },
}

#[derive(Args, Debug)]
pub struct SlaArgs {
    /// UUID of the model the SLA applies to.
    pub model_uuid: String,
    /// Requested support level.
    pub level: String,
    /// Budget to charge the support fee against.
    #[arg(long, default_value = "")]
    pub budget: String,
}

/// Splits a `<budget>:<limit>` argument into its parts.
///
/// # Errors
///
/// Rejects anything that is not a budget name followed by a positive whole
/// number.
pub fn parse_budget_with_limit(input: &str) -> Result<(String, String), ValidationError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re =
        RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9\-]+:[1-9][0-9]*$").expect("valid regex"));
    match input.split_once(':') {
        Some((budget, limit)) if re.is_match(input) => {
            Ok((budget.to_string(), limit.to_string()))
        }
        _ => Err(ValidationError::new(
            "invalid budget specification, expecting <budget>:<limit>",
        )),
    }
}

/// Checks that an allocation value is a whole number.
///
/// # Errors
///
/// Rejects empty input and anything containing a non-digit.
pub fn require_whole_number(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("value needs to be a whole number"))
    }
}

/// Dispatches a parsed command line.
///
/// # Errors
///
/// Returns the client's classified [`Error`] for the single operation the
/// command performs, or a validation error before anything is sent.
pub async fn run(cli: Cli) -> Result<(), Error> {
    let config = ClientConfig {
        http: None,
        base_url: cli.url,
    };
    tracing::debug!(base_url = ?config.base_url, "dispatching command");

    match cli.command {
        Command::Wallet(args) => {
            let client = WalletClient::new(config)?;
            match args.command {
                WalletCommand::Create { name, limit } => {
                    println!("{}", client.create_wallet(&name, &limit).await?);
                }
                WalletCommand::List => {
                    let response = client.list_wallets().await?;
                    print!("{}", report::render_wallet_list(&response));
                }
                WalletCommand::Set { name, limit } => {
                    println!("{}", client.set_wallet(&name, &limit).await?);
                }
                WalletCommand::Show { name } => {
                    let wallet = client.get_wallet(&name).await?;
                    print!("{}", report::render_wallet_report(&wallet));
                }
            }
        }
        Command::Budget(args) => {
            let client = WalletClient::new(config)?;
            match args.command {
                BudgetCommand::Create {
                    wallet,
                    model,
                    limit,
                } => {
                    println!("{}", client.create_budget(&wallet, &limit, &model).await?);
                }
                BudgetCommand::Update {
                    model,
                    limit,
                    wallet,
                } => {
                    println!("{}", client.update_budget(&model, &wallet, &limit).await?);
                }
                BudgetCommand::Delete { model } => {
                    println!("{}", client.delete_budget(&model).await?);
                }
            }
        }
        Command::Allocate(args) => {
            let (budget, limit) = parse_budget_with_limit(&args.budget_with_limit)?;
            let client = WalletClient::new(config)?;
            let response = client
                .create_allocation(&budget, &limit, &args.model, &args.services)
                .await?;
            println!("{response}");
        }
        Command::Allocation(args) => match args.command {
            AllocationCommand::Update {
                service,
                value,
                model,
            } => {
                require_whole_number(&value)?;
                let client = WalletClient::new(config)?;
                println!("{}", client.update_allocation(&model, &service, &value).await?);
            }
        },
        Command::Plan(args) => {
            let client = PlanClient::new(config)?;
            match args.command {
                PlanCommand::List { charm_url } => {
                    for plan in client.get_associated_plans(&charm_url).await? {
                        println!("{}", plan.url);
                        if !plan.definition.is_empty() {
                            println!("{}", plan.definition);
                        }
                    }
                }
                PlanCommand::Authorize {
                    model_uuid,
                    charm_url,
                    service_name,
                    plan_url,
                } => {
                    let credential = client
                        .authorize(&model_uuid, &charm_url, &service_name, &plan_url)
                        .await?;
                    println!("{credential}");
                }
            }
        }
        Command::Agreements => {
            let client = TermsClient::new(config)?;
            for agreement in client.get_users_agreements().await? {
                match agreement.created_on {
                    Some(signed) => {
                        println!("{}/{}\t{signed}", agreement.term, agreement.revision);
                    }
                    None => println!("{}/{}", agreement.term, agreement.revision),
                }
            }
        }
        Command::Terms(args) => {
            let client = TermsClient::new(config)?;
            match args.command {
                TermsCommand::Unsigned { terms } => {
                    let request = CheckAgreementsRequest { terms };
                    for document in client.get_unsigned_terms(&request).await? {
                        println!("{}/{}", document.name, document.revision);
                        println!("{}", document.content);
                    }
                }
                TermsCommand::Agree { term, revision } => {
                    let request = SaveAgreements {
                        agreements: vec![SaveAgreement { term, revision }],
                    };
                    let response = client.save_agreement(&request).await?;
                    for agreement in response.agreements {
                        println!("agreed to {}/{}", agreement.term, agreement.revision);
                    }
                }
            }
        }
        Command::Sla(args) => {
            let client = SlaClient::new(config)?;
            let response = client
                .authorize(&args.model_uuid, &args.level, &args.budget)
                .await?;
            println!("{}", response.credentials);
            if !response.message.is_empty() {
                eprintln!("{}", response.message);
            }
        }
    }
    Ok(())
}
