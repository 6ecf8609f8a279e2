use crate::domain::model::DestinationChannel;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "booking-summary")]
#[command(about = "Price list, booking summary and messaging handoff for a service business")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "booking.toml")]
    pub config: String,

    /// Override the catalog source (file path or http(s) URL)
    #[arg(long)]
    pub catalog: Option<String>,

    /// Override the discount rate (0.0 - 1.0)
    #[arg(long)]
    pub discount_rate: Option<f64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the discounted price list
    Catalog {
        /// Only show one category ("all" for every category)
        #[arg(long)]
        category: Option<String>,

        /// Only show services whose name contains this text
        #[arg(long)]
        search: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the booking summary for the selected services
    Summary(BookingArgs),

    /// Build the messaging link carrying the booking message
    Send {
        #[command(flatten)]
        booking: BookingArgs,

        #[arg(long, value_enum, default_value_t = DestinationChannel::Mobile)]
        channel: DestinationChannel,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BookingArgs {
    /// Customer name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Appointment time, e.g. 2026-10-17T15:30
    #[arg(long)]
    pub time: Option<String>,

    /// Service to toggle; repeat for several services
    #[arg(short, long = "select")]
    pub services: Vec<String>,
}
