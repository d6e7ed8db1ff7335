use clap::Parser;
use serde::Serialize;
use tour_slots::config::cli::{Command, LogFormat, MonthArgs};
use tour_slots::core::calendar::match_dates;
use tour_slots::core::distribution::select_evenly_distributed;
use tour_slots::domain::model::{AvailabilityQuery, PricingInput, SlotGenerationRequest};
use tour_slots::domain::ports::Clock;
use tour_slots::utils::error::ErrorSeverity;
use tour_slots::utils::logger;
use tour_slots::utils::validation::Validate;
use tour_slots::{
    CliConfig, EngineSettings, FixedClock, JsonFileSlotStore, SlotScheduler, SystemClock,
};

/// Clock chosen at startup: pinned by `--today` or the local system clock.
enum HostClock {
    Fixed(FixedClock),
    System(SystemClock),
}

impl Clock for HostClock {
    fn today(&self) -> chrono::NaiveDate {
        match self {
            HostClock::Fixed(clock) => clock.today(),
            HostClock::System(clock) => clock.today(),
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn load_settings(config: &CliConfig) -> tour_slots::Result<EngineSettings> {
    match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            EngineSettings::from_file(path)
        }
        None => {
            let settings = EngineSettings::default();
            settings.validate()?;
            Ok(settings)
        }
    }
}

async fn run(config: CliConfig, settings: EngineSettings) -> anyhow::Result<()> {
    let clock = match config.today {
        Some(today) => HostClock::Fixed(FixedClock::new(today)),
        None => HostClock::System(SystemClock),
    };
    let today = clock.today();
    tracing::debug!("Today is {}", today);

    match config.command {
        Command::Match(MonthArgs {
            year,
            month,
            weekdays,
            exclude_past,
        }) => {
            let dates = match_dates(&settings.calendar, year, month, weekdays, exclude_past, today)?;
            print_json(&dates)?;
        }
        Command::Select { month, count } => {
            let dates = match_dates(
                &settings.calendar,
                month.year,
                month.month,
                month.weekdays,
                month.exclude_past,
                today,
            )?;
            print_json(&select_evenly_distributed(&dates, count))?;
        }
        Command::Plan {
            slots,
            month,
            count,
            skip_existing,
            apply,
        } => {
            let store = JsonFileSlotStore::open(&slots.existing).await?;
            let scheduler = SlotScheduler::new(settings, store, clock);
            let request = SlotGenerationRequest {
                template_id: slots.template,
                month: month.month,
                year: month.year,
                weekday_mask: month.weekdays,
                desired_count: count,
                skip_existing,
                exclude_past: month.exclude_past,
            };

            if apply {
                let outcome = scheduler.generate(&request, scheduler.provider()).await?;
                tracing::info!("💾 Slots saved to: {}", slots.existing);
                print_json(&outcome)?;
            } else {
                print_json(&scheduler.preview(&request).await?)?;
            }
        }
        Command::Next {
            slots,
            weekdays,
            from,
            count,
        } => {
            let store = JsonFileSlotStore::open(&slots.existing).await?;
            let scheduler = SlotScheduler::new(settings, store, clock);
            let query = AvailabilityQuery {
                template_id: slots.template,
                weekday_mask: weekdays,
                from: from.unwrap_or(today),
                desired_count: count,
            };
            print_json(&scheduler.next_available(&query).await?)?;
        }
        Command::Price {
            price,
            published,
            booking,
            tour_start,
        } => {
            let calculator = tour_slots::PricingCalculator::new(settings.pricing);
            let result = calculator.compute(&PricingInput {
                original_price: price,
                published_at: published,
                booking_at: booking,
                tour_starts_at: tour_start,
            })?;
            print_json(&result)?;
        }
    }

    Ok(())
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }
    tracing::info!("🚀 Starting tour-slots");
    tracing::debug!("CLI config: {:?}", config);

    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config, settings).await {
        match e.downcast_ref::<tour_slots::TourError>() {
            Some(err) => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
                eprintln!("❌ {}", err.user_friendly_message());
                eprintln!("💡 {}", err.recovery_suggestion());

                let code = exit_code(err.severity());
                if code > 0 {
                    std::process::exit(code);
                }
            }
            None => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    }
}
