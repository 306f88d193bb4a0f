//! Command-line interface definition

use clap::{Parser, Subcommand};
use lunchsplit_core::ExportFormat;
use lunchsplit_types::TipKind;
use std::path::PathBuf;

/// Split a shared lunch bill between colleagues
#[derive(Parser, Debug)]
#[command(name = "lunchsplit")]
#[command(about = "Split a shared lunch bill between colleagues")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to $LUNCHSPLIT_CONFIG_PATH or lunchsplit.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Manage the people sharing the bill
    #[command(subcommand)]
    Participant(ParticipantCommand),

    /// Manage dishes and who shares them
    #[command(subcommand)]
    Item(ItemCommand),

    /// Tax, service charge and tip
    #[command(subcommand)]
    Extras(ExtrasCommand),

    /// Show totals and the per-person breakdown
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the bill to a file
    Export {
        /// csv, markdown or json (defaults to the configured format)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// Output file or directory (defaults to the configured export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start over with an empty bill
    Clear,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ParticipantCommand {
    /// Add a colleague
    Add { name: String },

    /// Rename a colleague
    Rename {
        /// Current name or id
        participant: String,
        new_name: String,
    },

    /// Remove a colleague and drop them from every dish
    Remove {
        /// Name or id
        participant: String,
    },

    /// List colleagues
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ItemCommand {
    /// Add a dish
    Add {
        #[arg(long)]
        name: String,

        /// Unit price; `,` is accepted as the decimal separator
        #[arg(long)]
        price: String,

        #[arg(long)]
        quantity: Option<String>,

        /// Colleagues sharing the dish
        #[arg(long = "shared-by", num_args = 1.., value_delimiter = ',')]
        shared_by: Vec<String>,
    },

    /// Change a dish
    Edit {
        /// Dish name or id
        item: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long, conflicts_with = "adjust")]
        quantity: Option<String>,

        /// Add to (or, when negative, take from) the quantity; never drops below 1
        #[arg(long, allow_negative_numbers = true)]
        adjust: Option<i64>,

        /// Replace the sharers; pass the flag with no names to unassign everyone
        #[arg(long = "shared-by", num_args = 0.., value_delimiter = ',')]
        shared_by: Option<Vec<String>>,
    },

    /// Remove a dish
    Remove {
        /// Dish name or id
        item: String,
    },

    /// Add a colleague to a dish
    Assign { item: String, participant: String },

    /// Remove a colleague from a dish
    Unassign { item: String, participant: String },

    /// List dishes
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ExtrasCommand {
    /// Set extra costs. Omitted values are left unchanged.
    Set {
        /// Tax percentage
        #[arg(long)]
        tax: Option<String>,

        /// Service charge percentage
        #[arg(long)]
        service: Option<String>,

        /// fixed or percent
        #[arg(long = "tip-kind")]
        tip_kind: Option<TipKind>,

        /// Tip amount, or percentage when the tip kind is percent
        #[arg(long)]
        tip: Option<String>,
    },

    /// Show the current extra costs
    Show,
}
