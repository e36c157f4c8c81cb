//! Read-only commands

use crate::error::CliResult;
use crate::output::{
    print_output, print_single, print_success, print_warning, OutputFormat, UserRow,
};
use crate::state::StateFile;
use clap::Subcommand;
use colored::*;
use hierarchy_runtime::Hierarchy;
use hierarchy_types::UserId;
use serde::Serialize;
use tabled::Tabled;

/// Query subcommands
#[derive(Subcommand)]
pub enum QueryCommands {
    /// Show `(parent, can_add, can_remove, is_member)` for an identity
    Show {
        /// Identity to look up
        user: String,
    },

    /// List the direct children of a member in insertion order
    Children {
        /// Parent identity
        user: String,
    },

    /// Print the whole hierarchy as a tree
    Tree,

    /// Show the price of the next admission
    Price,

    /// Show occupancy and capacity
    Size,

    /// Check the structural invariants of the state file
    Verify,

    /// List collected admission payments
    Payments,
}

#[derive(Serialize)]
struct PriceReport {
    price: u64,
    policy: String,
    emission_rate: u64,
}

#[derive(Serialize)]
struct SizeReport {
    size: usize,
    total_size: usize,
}

#[derive(Serialize, Tabled)]
struct PaymentRow {
    #[tabled(rename = "Receipt")]
    receipt_id: String,
    #[tabled(rename = "Payer")]
    payer: String,
    #[tabled(rename = "Price")]
    price: u64,
    #[tabled(rename = "Offered")]
    offered: u64,
    #[tabled(rename = "Surplus")]
    surplus: u64,
    #[tabled(rename = "Received")]
    received_at: String,
}

/// Execute a query command
pub fn execute(command: QueryCommands, state: &StateFile, format: OutputFormat) -> CliResult<()> {
    let snapshot = state.load()?;
    let hierarchy = &snapshot.hierarchy;

    match command {
        QueryCommands::Show { user } => {
            let user = UserId::new(user);
            let view = hierarchy.users(&user);
            match format {
                OutputFormat::Table => print_output(vec![UserRow::new(&user, &view)], format),
                _ => print_single(&view, format),
            }
        }

        QueryCommands::Children { user } => {
            let children = hierarchy.get_user_children(&UserId::new(user));
            match format {
                OutputFormat::Table => {
                    let rows = children
                        .iter()
                        .map(|child| UserRow::new(child, &hierarchy.users(child)))
                        .collect();
                    print_output(rows, format)
                }
                _ => print_single(&children, format),
            }
        }

        QueryCommands::Tree => {
            match format {
                OutputFormat::Table => {
                    for line in render_tree(hierarchy) {
                        println!("{}", line);
                    }
                }
                _ => print_single(hierarchy, format)?,
            }
            Ok(())
        }

        QueryCommands::Price => {
            let pricing = hierarchy.pricing();
            let report = PriceReport {
                price: hierarchy.calculate_price().value(),
                policy: pricing.policy.to_string(),
                emission_rate: pricing.emission_rate,
            };
            match format {
                OutputFormat::Table => {
                    println!("{}", report.price);
                    if hierarchy.size() >= hierarchy.total_size() {
                        print_warning("Hierarchy is full");
                    }
                    Ok(())
                }
                _ => print_single(&report, format),
            }
        }

        QueryCommands::Size => {
            let report = SizeReport {
                size: hierarchy.size(),
                total_size: hierarchy.total_size(),
            };
            match format {
                OutputFormat::Table => {
                    println!("{}/{}", report.size, report.total_size);
                    Ok(())
                }
                _ => print_single(&report, format),
            }
        }

        QueryCommands::Payments => {
            let rows = snapshot
                .ledger
                .receipts()
                .iter()
                .map(|r| PaymentRow {
                    receipt_id: r.receipt_id.clone(),
                    payer: r.payer.to_string(),
                    price: r.price.value(),
                    offered: r.offered.value(),
                    surplus: r.surplus.value(),
                    received_at: r.received_at.to_rfc3339(),
                })
                .collect();
            print_output(rows, format)
        }

        // Loading already re-checks every invariant
        QueryCommands::Verify => {
            print_success(&format!(
                "Hierarchy is consistent ({}/{})",
                hierarchy.size(),
                hierarchy.total_size()
            ));
            Ok(())
        }
    }
}

/// Render the hierarchy depth-first, children in insertion order
fn render_tree(hierarchy: &Hierarchy) -> Vec<String> {
    let mut lines = Vec::new();
    let admin = hierarchy.admin();
    lines.push(format!("{} {}", admin.to_string().bold(), flags(hierarchy, admin)));

    // (member, prefix for its children)
    let mut stack: Vec<(UserId, String, bool)> = hierarchy
        .get_user_children(admin)
        .into_iter()
        .rev()
        .enumerate()
        .map(|(i, child)| (child, String::new(), i == 0))
        .collect();

    while let Some((id, prefix, last)) = stack.pop() {
        let branch = if last { "└── " } else { "├── " };
        lines.push(format!("{}{}{} {}", prefix, branch, id, flags(hierarchy, &id)));

        let child_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        let children = hierarchy.get_user_children(&id);
        for (i, child) in children.into_iter().rev().enumerate() {
            stack.push((child, child_prefix.clone(), i == 0));
        }
    }

    lines
}

fn flags(hierarchy: &Hierarchy, id: &UserId) -> String {
    let view = hierarchy.users(id);
    let add = if view.can_add { "A" } else { "-" };
    let remove = if view.can_remove { "R" } else { "-" };
    format!("[{}{}]", add, remove).dimmed().to_string()
}
