use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use crate::domain::model::WeekdayMask;

#[derive(Debug, Clone, Parser)]
#[command(name = "tour-slots")]
#[command(about = "Tour slot calendar generation and early-bird pricing")]
pub struct CliConfig {
    /// Path to a TOML settings file; built-in defaults are used when omitted
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Pin "today" instead of reading the local clock
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log line format on stderr
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    /// One JSON object per line, for log collectors
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the dates of a month that fall on the given weekdays
    Match(MonthArgs),
    /// Pick evenly spread dates from a month without consulting existing slots
    Select {
        #[command(flatten)]
        month: MonthArgs,
        #[arg(long)]
        count: usize,
    },
    /// Build a generation plan for one template and month
    Plan {
        #[command(flatten)]
        slots: SlotArgs,
        #[command(flatten)]
        month: MonthArgs,
        #[arg(long)]
        count: u32,
        #[arg(long)]
        skip_existing: bool,
        /// Persist the planned dates into the --existing file
        #[arg(long)]
        apply: bool,
    },
    /// Find the next free dates for a template across months
    Next {
        #[command(flatten)]
        slots: SlotArgs,
        #[arg(long, default_value = "sat,sun")]
        weekdays: WeekdayMask,
        /// First date to consider; defaults to today
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        count: u32,
    },
    /// Compute the early-bird price of a booking
    Price {
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        published: NaiveDate,
        #[arg(long)]
        booking: NaiveDate,
        #[arg(long)]
        tour_start: NaiveDate,
    },
}

#[derive(Debug, Clone, Args)]
pub struct MonthArgs {
    #[arg(long)]
    pub year: i32,
    #[arg(long)]
    pub month: u32,
    #[arg(long, default_value = "sat,sun")]
    pub weekdays: WeekdayMask,
    #[arg(long)]
    pub exclude_past: bool,
}

#[derive(Debug, Clone, Args)]
pub struct SlotArgs {
    #[arg(long)]
    pub template: String,
    /// JSON file of existing slots (`[{"template_id": ..., "date": "YYYY-MM-DD"}]`)
    #[arg(long, default_value = "./slots.json")]
    pub existing: String,
}
