//! CLI command and subcommand definitions

use ans_core::ParameterList;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// ANS hosting CLI
#[derive(Parser, Debug)]
#[command(name = "ansctl")]
#[command(version, about = "ANS Cloudflare and DRaaS CLI", long_about = None)]
pub struct Cli {
    /// API URL (overrides config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (overrides config file)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Only show these properties (comma separated, repeatable)
    #[arg(long = "property", value_delimiter = ',', global = true)]
    pub properties: Vec<String>,

    /// Show every property
    #[arg(long, global = true, conflicts_with = "properties")]
    pub all_properties: bool,

    /// Fail when a --property name does not exist
    #[arg(long, global = true)]
    pub strict_properties: bool,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't load config file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Config file path (default: ~/.config/ans/cli.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty table output
    Table,
    /// One "property : value" line per property
    List,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Bare values, tab separated
    Value,
}

impl From<&OutputFormat> for crate::format::OutputFormat {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Table => crate::format::OutputFormat::Table,
            OutputFormat::List => crate::format::OutputFormat::List,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Yaml => crate::format::OutputFormat::Yaml,
            OutputFormat::Value => crate::format::OutputFormat::Value,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cloudflare-as-a-service commands
    Cloudflare {
        #[command(subcommand)]
        command: CloudflareCommands,
    },

    /// Disaster-recovery-as-a-service commands
    Draas {
        #[command(subcommand)]
        command: DraasCommands,
    },

    /// Show or manage CLI configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completion for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Filtering and sorting flags shared by list commands
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Filter as property[:operator]=value[,value...]; operators: eq, neq, lk, nlk, gt, lt, in, nin
    #[arg(long)]
    pub filter: Vec<String>,

    /// Sort as property[:asc|desc]
    #[arg(long)]
    pub sort: Option<String>,
}

impl ListArgs {
    /// Parse the raw flag values.
    pub fn parameters(&self) -> ans_core::Result<ParameterList> {
        ParameterList::from_flags(&self.filter, self.sort.as_deref())
    }
}

// ─── cloudflare ────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum CloudflareCommands {
    /// Account commands
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Orchestration commands
    Orchestration {
        #[command(subcommand)]
        command: OrchestrationCommands,
    },

    /// Spend plan commands
    #[command(name = "spendplan")]
    SpendPlan {
        #[command(subcommand)]
        command: SpendPlanCommands,
    },

    /// Subscription commands
    Subscription {
        #[command(subcommand)]
        command: SubscriptionCommands,
    },

    /// Total spend commands
    #[command(name = "totalspend")]
    TotalSpend {
        #[command(subcommand)]
        command: TotalSpendCommands,
    },

    /// Zone commands
    Zone {
        #[command(subcommand)]
        command: ZoneCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountCommands {
    /// List accounts
    List(ListArgs),

    /// Show one or more accounts
    Show {
        /// Account IDs
        #[arg(required = true)]
        account_ids: Vec<String>,
    },

    /// Create an account
    Create {
        /// Account name
        #[arg(long)]
        name: String,
    },

    /// Update one or more accounts
    Update {
        /// Account IDs
        #[arg(required = true)]
        account_ids: Vec<String>,

        /// New account name
        #[arg(long)]
        name: Option<String>,
    },

    /// Account member commands
    Member {
        #[command(subcommand)]
        command: AccountMemberCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum AccountMemberCommands {
    /// Add a member to an account
    Create {
        /// Account ID
        account_id: String,

        /// Member email address
        #[arg(long)]
        email_address: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrchestrationCommands {
    /// Provision an account, administrator and zone in one step
    Create {
        /// Zone name
        #[arg(long)]
        zone_name: String,

        /// Subscription ID for the zone
        #[arg(long)]
        zone_subscription_id: String,

        /// Account name
        #[arg(long)]
        account_name: String,

        /// Administrator email address
        #[arg(long)]
        administrator_email_address: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SpendPlanCommands {
    /// List spend plans
    List(ListArgs),
}

#[derive(Subcommand, Debug)]
pub enum SubscriptionCommands {
    /// List subscriptions
    List(ListArgs),
}

#[derive(Subcommand, Debug)]
pub enum TotalSpendCommands {
    /// Show month-to-date spend
    Show,
}

#[derive(Subcommand, Debug)]
pub enum ZoneCommands {
    /// List zones
    List(ListArgs),

    /// Show one or more zones
    Show {
        /// Zone IDs
        #[arg(required = true)]
        zone_ids: Vec<String>,
    },

    /// Create a zone
    Create {
        /// Account ID
        #[arg(long)]
        account_id: String,

        /// Zone name
        #[arg(long)]
        name: String,

        /// Subscription ID
        #[arg(long)]
        subscription_id: String,
    },

    /// Update one or more zones
    Update {
        /// Zone IDs
        #[arg(required = true)]
        zone_ids: Vec<String>,

        /// New plan subscription ID
        #[arg(long)]
        plan_subscription_id: Option<String>,
    },

    /// Delete one or more zones
    Delete {
        /// Zone IDs
        #[arg(required = true)]
        zone_ids: Vec<String>,
    },
}

// ─── draas ─────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum DraasCommands {
    /// Solution commands
    Solution {
        #[command(subcommand)]
        command: SolutionCommands,
    },

    /// Billing type commands
    #[command(name = "billingtype")]
    BillingType {
        #[command(subcommand)]
        command: BillingTypeCommands,
    },

    /// IOPS tier commands
    #[command(name = "iopstier")]
    IopsTier {
        #[command(subcommand)]
        command: IopsTierCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SolutionCommands {
    /// List solutions
    List(ListArgs),

    /// Show one or more solutions
    Show {
        /// Solution IDs
        #[arg(required = true)]
        solution_ids: Vec<String>,
    },

    /// Update one or more solutions
    Update {
        /// Solution IDs
        #[arg(required = true)]
        solution_ids: Vec<String>,

        /// New solution name
        #[arg(long)]
        name: Option<String>,

        /// New IOPS tier ID
        #[arg(long)]
        iops_tier_id: Option<String>,
    },

    /// Backup resource commands
    #[command(name = "backupresource")]
    BackupResource {
        #[command(subcommand)]
        command: BackupResourceCommands,
    },

    /// Backup service commands
    #[command(name = "backupservice")]
    BackupService {
        #[command(subcommand)]
        command: BackupServiceCommands,
    },

    /// Failover plan commands
    #[command(name = "failoverplan")]
    FailoverPlan {
        #[command(subcommand)]
        command: FailoverPlanCommands,
    },

    /// Compute resource commands
    #[command(name = "computeresource")]
    ComputeResource {
        #[command(subcommand)]
        command: ComputeResourceCommands,
    },

    /// Hardware plan commands
    #[command(name = "hardwareplan")]
    HardwarePlan {
        #[command(subcommand)]
        command: HardwarePlanCommands,
    },

    /// Replica commands
    Replica {
        #[command(subcommand)]
        command: ReplicaCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupResourceCommands {
    /// List backup resources of a solution
    List {
        /// Solution ID
        solution_id: String,

        #[command(flatten)]
        list: ListArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum BackupServiceCommands {
    /// Show the backup service of a solution
    Show {
        /// Solution ID
        solution_id: String,
    },

    /// Reset the backup service credentials of a solution
    #[command(name = "resetcredentials")]
    ResetCredentials {
        /// Solution ID
        solution_id: String,

        /// New password
        #[arg(long)]
        password: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum FailoverPlanCommands {
    /// List failover plans of a solution
    List {
        /// Solution ID
        solution_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more failover plans
    Show {
        /// Solution ID
        solution_id: String,

        /// Failover plan IDs
        #[arg(required = true)]
        plan_ids: Vec<String>,
    },

    /// Start one or more failover plans
    Start {
        /// Solution ID
        solution_id: String,

        /// Failover plan IDs
        #[arg(required = true)]
        plan_ids: Vec<String>,

        /// Scheduled start as an RFC 3339 timestamp (default: now)
        #[arg(long)]
        start_date: Option<String>,
    },

    /// Stop one or more failover plans
    Stop {
        /// Solution ID
        solution_id: String,

        /// Failover plan IDs
        #[arg(required = true)]
        plan_ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ComputeResourceCommands {
    /// List compute resources of a solution
    List {
        /// Solution ID
        solution_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more compute resources
    Show {
        /// Solution ID
        solution_id: String,

        /// Compute resource IDs
        #[arg(required = true)]
        resource_ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HardwarePlanCommands {
    /// List hardware plans of a solution
    List {
        /// Solution ID
        solution_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show one or more hardware plans
    Show {
        /// Solution ID
        solution_id: String,

        /// Hardware plan IDs
        #[arg(required = true)]
        plan_ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReplicaCommands {
    /// List replicas of a hardware plan
    List {
        /// Solution ID
        solution_id: String,

        /// Hardware plan ID
        hardware_plan_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Reset the IOPS of one or more replicas
    #[command(name = "resetiops")]
    ResetIops {
        /// Solution ID
        solution_id: String,

        /// Replica IDs
        #[arg(required = true)]
        replica_ids: Vec<String>,

        /// IOPS tier to apply
        #[arg(long)]
        iops_tier_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum BillingTypeCommands {
    /// List billing types
    List(ListArgs),

    /// Show one or more billing types
    Show {
        /// Billing type IDs
        #[arg(required = true)]
        billing_type_ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum IopsTierCommands {
    /// List IOPS tiers
    List(ListArgs),

    /// Show one or more IOPS tiers
    Show {
        /// IOPS tier IDs
        #[arg(required = true)]
        tier_ids: Vec<String>,
    },
}

// ─── config ────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Reset configuration to defaults
    Reset,
}

// ─── list flags ────────────────────────────────────────────

impl Commands {
    /// Filter and sort flags of a list command, if this is one.
    pub fn list_args(&self) -> Option<&ListArgs> {
        match self {
            Commands::Cloudflare { command } => command.list_args(),
            Commands::Draas { command } => command.list_args(),
            Commands::Config { .. } | Commands::Completion { .. } => None,
        }
    }
}

impl CloudflareCommands {
    pub fn list_args(&self) -> Option<&ListArgs> {
        match self {
            CloudflareCommands::Account {
                command: AccountCommands::List(list),
            }
            | CloudflareCommands::SpendPlan {
                command: SpendPlanCommands::List(list),
            }
            | CloudflareCommands::Subscription {
                command: SubscriptionCommands::List(list),
            }
            | CloudflareCommands::Zone {
                command: ZoneCommands::List(list),
            } => Some(list),
            _ => None,
        }
    }
}

impl DraasCommands {
    pub fn list_args(&self) -> Option<&ListArgs> {
        match self {
            DraasCommands::Solution { command } => match command {
                SolutionCommands::List(list)
                | SolutionCommands::BackupResource {
                    command: BackupResourceCommands::List { list, .. },
                }
                | SolutionCommands::FailoverPlan {
                    command: FailoverPlanCommands::List { list, .. },
                }
                | SolutionCommands::ComputeResource {
                    command: ComputeResourceCommands::List { list, .. },
                }
                | SolutionCommands::HardwarePlan {
                    command: HardwarePlanCommands::List { list, .. },
                }
                | SolutionCommands::Replica {
                    command: ReplicaCommands::List { list, .. },
                } => Some(list),
                _ => None,
            },
            DraasCommands::BillingType {
                command: BillingTypeCommands::List(list),
            }
            | DraasCommands::IopsTier {
                command: IopsTierCommands::List(list),
            } => Some(list),
            _ => None,
        }
    }
}
