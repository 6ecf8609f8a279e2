use booking_summary::config::cli::BookingArgs;
use booking_summary::config::Command;
use booking_summary::core::booking::parse_appointment_time;
use booking_summary::core::message::offer_banner;
use booking_summary::core::ConfigProvider;
use booking_summary::utils::error::ErrorSeverity;
use booking_summary::utils::{logger, validation::Validate};
use booking_summary::{
    AnyCatalogSource, BookingContext, BookingError, Catalog, CatalogLoader, CliConfig, TomlConfig,
};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(&e);
        }
    };

    if config.json_logging() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::info!("Starting booking-summary");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(cli.command, &config).await {
        match e.downcast_ref::<BookingError>() {
            Some(err) => exit_with(err),
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn load_config(cli: &CliConfig) -> booking_summary::Result<TomlConfig> {
    let mut config = TomlConfig::from_file(&cli.config)?;
    config.apply_overrides(cli.catalog.clone(), cli.discount_rate);
    config.validate()?;
    Ok(config)
}

fn exit_with(e: &BookingError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

async fn load_catalog(config: &TomlConfig) -> booking_summary::Result<Catalog> {
    let source =
        AnyCatalogSource::from_location(config.catalog_location(), config.request_timeout_seconds())?;
    let loader = CatalogLoader::new(source, config.resolved_catalog_format()?);
    loader.load(config.discount_rate()).await
}

fn build_context(catalog: &Catalog, args: &BookingArgs) -> booking_summary::Result<BookingContext> {
    let mut ctx = BookingContext::new();
    ctx.set_customer(&args.name);
    if let Some(time) = &args.time {
        ctx.set_appointment_time(Some(parse_appointment_time(time)?));
    }
    for name in &args.services {
        let service = catalog
            .find(name)
            .ok_or_else(|| BookingError::UnknownServiceError { name: name.clone() })?;
        ctx.toggle_service(service);
    }
    tracing::info!(
        "{} services selected, total {}",
        ctx.selections().len(),
        ctx.compute_total()
    );
    Ok(ctx)
}

async fn run(command: Command, config: &TomlConfig) -> anyhow::Result<()> {
    let catalog = load_catalog(config).await?;
    let profile = config.business_profile();

    match command {
        Command::Catalog {
            category,
            search,
            json,
        } => {
            let groups = catalog.filter(category.as_deref(), search.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&groups)?);
                return Ok(());
            }

            let today = chrono::Local::now().date_naive();
            println!(
                "{}",
                offer_banner(&config.offer.name, catalog.discount_rate(), today)
            );
            for group in &groups {
                println!();
                println!("{}", group.label);
                for service in &group.services {
                    println!(
                        "  {:<32} {:>6} {} -> {:>6} {}",
                        service.service_name,
                        service.base_price,
                        profile.currency_code,
                        service.discounted_price,
                        profile.currency_code
                    );
                }
            }
        }
        Command::Summary(args) => {
            let ctx = build_context(&catalog, &args)?;
            let summary = ctx.build_summary()?;
            println!("{}", summary.render(&profile.currency_code));
        }
        Command::Send { booking, channel } => {
            let ctx = build_context(&catalog, &booking)?;
            let url = ctx.build_message_payload(&profile, channel)?;
            tracing::info!("✅ Booking message ready ({} characters)", url.len());
            println!("{}", url);
        }
    }

    Ok(())
}
