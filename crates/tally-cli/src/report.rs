//! Rendering of wallet usage reports.
//!
//! The report shows one row per (model, service) pair, with the model's
//! allocated/owner/usage columns filled only on the first row of each model
//! group, followed by TOTAL, BUDGET, and UNALLOCATED summary rows. Values
//! arrive formatted by the server; nothing is computed here beyond column
//! widths.

use tally_wireformat::wallet::{sort_budgets, ListWalletsResponse, WalletWithBudgets};

/// Renders the usage report for a wallet and its budgets.
#[must_use]
pub fn render_wallet_report(wallet: &WalletWithBudgets) -> String {
    let mut budgets = wallet.budgets.clone();
    sort_budgets(&mut budgets);

    let mut rows: Vec<Vec<String>> = Vec::new();
    rows.push(row(&["MODEL", "SERVICES", "SPENT", "ALLOCATED", "BY", "USAGE"]));
    for budget in &budgets {
        let mut first = true;
        for (service, allocation) in &budget.services {
            if first {
                rows.push(vec![
                    budget.model.clone(),
                    service.clone(),
                    allocation.consumed.clone(),
                    budget.limit.clone(),
                    budget.owner.clone(),
                    budget.usage.clone(),
                ]);
                first = false;
            } else {
                rows.push(vec![
                    String::new(),
                    service.clone(),
                    allocation.consumed.clone(),
                    String::new(),
                    String::new(),
                ]);
            }
        }
    }
    rows.push(vec![String::new(); 5]);
    rows.push(vec![
        "TOTAL".to_string(),
        String::new(),
        wallet.total.consumed.clone(),
        wallet.total.budgeted.clone(),
        String::new(),
        wallet.total.usage.clone(),
    ]);
    rows.push(vec![
        "BUDGET".to_string(),
        String::new(),
        String::new(),
        wallet.limit.clone(),
        String::new(),
    ]);
    rows.push(vec![
        "UNALLOCATED".to_string(),
        String::new(),
        String::new(),
        wallet.total.unallocated.clone(),
        String::new(),
    ]);

    align(&rows)
}

/// Renders the wallet listing, one row per wallet plus a TOTAL row and the
/// remaining credit. The default wallet is marked with an asterisk.
#[must_use]
pub fn render_wallet_list(response: &ListWalletsResponse) -> String {
    let mut rows: Vec<Vec<String>> = Vec::new();
    rows.push(row(&[
        "WALLET",
        "OWNER",
        "LIMIT",
        "BUDGETED",
        "UNALLOCATED",
        "AVAILABLE",
        "SPENT",
    ]));
    for wallet in &response.wallets {
        let name = if wallet.default {
            format!("{}*", wallet.wallet)
        } else {
            wallet.wallet.clone()
        };
        rows.push(vec![
            name,
            wallet.owner.clone(),
            wallet.limit.clone(),
            wallet.budgeted.clone(),
            wallet.unallocated.clone(),
            wallet.available.clone(),
            wallet.consumed.clone(),
        ]);
    }
    rows.push(vec![
        "TOTAL".to_string(),
        String::new(),
        response.total.limit.clone(),
        response.total.budgeted.clone(),
        response.total.unallocated.clone(),
        response.total.available.clone(),
        response.total.consumed.clone(),
    ]);

    let mut out = align(&rows);
    out.push('\n');
    out.push_str(&format!("Credit limit: {}\n", response.credit));
    out
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|cell| (*cell).to_string()).collect()
}

/// Pads every cell to its column's widest entry and joins cells with tabs.
fn align(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut widths = vec![0_usize; columns];
    for r in rows {
        for (i, cell) in r.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    for r in rows {
        let cells: Vec<String> = r
            .iter()
            .enumerate()
            .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
            .collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_wireformat::wallet::{Budget, ServiceAllocation, WalletTotals};

    fn service(consumed: &str) -> ServiceAllocation {
        ServiceAllocation {
            consumed: consumed.to_string(),
        }
    }

    #[test]
    fn report_matches_expected_layout() {
        let wallet = WalletWithBudgets {
            limit: "4000".to_string(),
            total: WalletTotals {
                budgeted: "2200".to_string(),
                unallocated: "1800".to_string(),
                available: "1100".to_string(),
                consumed: "1100".to_string(),
                usage: "50%".to_string(),
                ..WalletTotals::default()
            },
            budgets: vec![
                Budget {
                    owner: "user.joe".to_string(),
                    limit: "1200".to_string(),
                    consumed: "500".to_string(),
                    usage: "42%".to_string(),
                    model: "model.joe".to_string(),
                    services: [
                        ("wordpress".to_string(), service("300")),
                        ("mysql".to_string(), service("200")),
                    ]
                    .into_iter()
                    .collect(),
                },
                Budget {
                    owner: "user.jess".to_string(),
                    limit: "1000".to_string(),
                    consumed: "600".to_string(),
                    usage: "60%".to_string(),
                    model: "model.jess".to_string(),
                    services: [("landscape".to_string(), service("600"))]
                        .into_iter()
                        .collect(),
                },
            ],
        };

        let expected = "\
MODEL      \tSERVICES \tSPENT\tALLOCATED\tBY       \tUSAGE\n\
model.joe  \tmysql    \t200  \t1200     \tuser.joe \t42%  \n\
           \twordpress\t300  \t         \t         \n\
model.jess \tlandscape\t600  \t1000     \tuser.jess\t60%  \n\
           \t         \t     \t         \t         \n\
TOTAL      \t         \t1100 \t2200     \t         \t50%  \n\
BUDGET     \t         \t     \t4000     \t         \n\
UNALLOCATED\t         \t     \t1800     \t         \n";

        assert_eq!(render_wallet_report(&wallet), expected);
    }

    #[test]
    fn report_orders_models_lexically_regardless_of_input_order() {
        let make = |model: &str| Budget {
            owner: "user".to_string(),
            limit: "10".to_string(),
            consumed: "1".to_string(),
            usage: "10%".to_string(),
            model: model.to_string(),
            services: [("svc".to_string(), service("1"))].into_iter().collect(),
        };
        let mut wallet = WalletWithBudgets {
            limit: "100".to_string(),
            total: WalletTotals::default(),
            budgets: vec![make("model-b"), make("model-a")],
        };

        let rendered = render_wallet_report(&wallet);
        let a = rendered.find("model-a").unwrap();
        let b = rendered.find("model-b").unwrap();
        assert!(a < b);

        wallet.budgets.reverse();
        assert_eq!(render_wallet_report(&wallet), rendered);
    }

    #[test]
    fn wallet_list_marks_default_and_appends_credit() {
        let response: ListWalletsResponse = serde_json::from_value(serde_json::json!({
            "wallets": [
                {
                    "owner": "bob",
                    "wallet": "personal",
                    "limit": "50",
                    "budgeted": "30",
                    "unallocated": "20",
                    "available": "45",
                    "consumed": "5",
                    "default": true
                }
            ],
            "total": {
                "limit": "300",
                "budgeted": "140",
                "available": "235",
                "unallocated": "160",
                "consumed": "65"
            },
            "credit": "400"
        }))
        .unwrap();

        let rendered = render_wallet_list(&response);
        assert!(rendered.contains("personal*"));
        assert!(rendered.lines().any(|line| line.starts_with("TOTAL")));
        assert!(rendered.ends_with("Credit limit: 400\n"));
    }
}
