//! Commands that change the hierarchy

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{print_single, print_success, OutputFormat};
use crate::state::{Snapshot, StateError, StateFile};
use clap::{Args, Subcommand};
use hierarchy_runtime::Hierarchy;
use hierarchy_types::{Amount, PricingConfig, PricingPolicy, UserId};

/// Membership subcommands
#[derive(Subcommand)]
pub enum MembershipCommands {
    /// Create a new hierarchy with the given admin
    Init(InitArgs),

    /// Recruit a new member under the caller
    Add {
        /// Member performing the admission
        #[arg(long)]
        caller: String,
        /// Identity of the new member
        #[arg(long)]
        user: String,
        /// Grant the add capability
        #[arg(long)]
        can_add: bool,
        /// Grant the remove capability
        #[arg(long)]
        can_remove: bool,
        /// Payment offered; defaults to the current price
        #[arg(long)]
        payment: Option<u64>,
    },

    /// Evict a member, repromoting its children
    Remove {
        /// Member performing the removal
        #[arg(long)]
        caller: String,
        /// Member to remove
        #[arg(long)]
        user: String,
    },
}

/// Arguments for `init`
#[derive(Args)]
pub struct InitArgs {
    /// Identity of the root member
    #[arg(long)]
    admin: String,
    /// Maximum number of members, admin included
    #[arg(long)]
    capacity: usize,
    /// Pricing policy (flat, proportional); defaults to the config value
    #[arg(long)]
    policy: Option<PricingPolicy>,
    /// Payment units per capacity slot; defaults to the config value
    #[arg(long)]
    emission_rate: Option<u64>,
    /// Replace an existing state file
    #[arg(long)]
    force: bool,
}

/// Execute a membership command
pub fn execute(
    command: MembershipCommands,
    config: &CliConfig,
    state: &StateFile,
    format: OutputFormat,
) -> CliResult<()> {
    match command {
        MembershipCommands::Init(args) => {
            if state.exists() && !args.force {
                return Err(StateError::AlreadyExists(state.path().to_path_buf()).into());
            }

            let pricing = PricingConfig::new(
                args.policy.unwrap_or(config.pricing.policy),
                args.emission_rate.unwrap_or(config.pricing.emission_rate),
            );
            let hierarchy = Hierarchy::with_pricing(UserId::new(args.admin), args.capacity, pricing)?;
            let price = hierarchy.calculate_price();
            state.save(&mut Snapshot::new(hierarchy))?;

            print_success(&format!(
                "Hierarchy created at {} (capacity {}, next price {})",
                state.path().display(),
                args.capacity,
                price
            ));
            Ok(())
        }

        MembershipCommands::Add {
            caller,
            user,
            can_add,
            can_remove,
            payment,
        } => {
            let mut snapshot = state.load()?;
            let caller = UserId::new(caller);
            let user = UserId::new(user);
            let payment = payment
                .map(Amount::new)
                .unwrap_or_else(|| snapshot.hierarchy.calculate_price());

            let occupancy = snapshot.hierarchy.add_user_with(
                &caller,
                user.clone(),
                can_add,
                can_remove,
                payment,
                &mut snapshot.ledger,
            )?;
            state.save(&mut snapshot)?;

            match format {
                OutputFormat::Table => print_success(&format!(
                    "Added {} under {} ({}/{})",
                    user,
                    caller,
                    occupancy,
                    snapshot.hierarchy.total_size()
                )),
                _ => print_single(&snapshot.hierarchy.users(&user), format)?,
            }
            Ok(())
        }

        MembershipCommands::Remove { caller, user } => {
            let mut snapshot = state.load()?;
            let removal = snapshot
                .hierarchy
                .remove(&UserId::new(caller), &UserId::new(user))?;
            state.save(&mut snapshot)?;

            match format {
                OutputFormat::Table => {
                    print_success(&format!(
                        "Removed {} ({}/{})",
                        removal.removed,
                        removal.occupancy,
                        snapshot.hierarchy.total_size()
                    ));
                    if let Some(promoted) = &removal.promoted {
                        println!("  {} promoted under {}", promoted, removal.parent);
                        for child in &removal.reparented {
                            println!("  {} re-parented under {}", child, promoted);
                        }
                    }
                }
                _ => print_single(&removal, format)?,
            }
            Ok(())
        }
    }
}
