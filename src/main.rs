use clap::Parser;
use securitel::utils::error::SecuritelError;
use securitel::utils::{logger, validation::Validate};
use securitel::{
    sanitize, CliConfig, Command, HttpVerifier, Imei, ImeiField, VerificationEngine,
    VerificationOutcome, VerificationReport,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let file = config.load_file().unwrap_or_else(|e| fail(e));
    if let Some(file) = &file {
        if let Err(e) = file.validate() {
            fail(e);
        }
    }

    // 初始化日誌
    let verbose = config.verbose || file.as_ref().is_some_and(|f| f.verbose_logging());
    if config.json_logs || file.as_ref().is_some_and(|f| f.json_logging()) {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    match &config.command {
        Command::Sanitize { input } => {
            println!("{}", sanitize(input));
        }
        Command::Check { input } => match Imei::from_input(input) {
            Ok(imei) => println!("{} valid", imei),
            Err(e) => {
                tracing::debug!("{}", e);
                println!("{} invalid", sanitize(input));
                std::process::exit(1);
            }
        },
        Command::Keys { keys } => replay_keys(keys),
        Command::Verify { input, json } => {
            let settings = config.api_settings(file.as_ref()).unwrap_or_else(|e| fail(e));

            // 驗證配置
            if let Err(e) = settings.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                fail(e);
            }

            let verifier = HttpVerifier::new(&settings).unwrap_or_else(|e| fail(e));
            let engine = VerificationEngine::new(verifier);

            match engine.verify_input(input).await {
                Ok(report) if *json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                Ok(report) => print_report(&report),
                Err(e) => {
                    tracing::error!(
                        "❌ Verification failed: {} (Category: {:?}, Severity: {:?})",
                        e,
                        e.category(),
                        e.severity()
                    );
                    fail(e);
                }
            }
        }
    }

    Ok(())
}

fn replay_keys(keys: &[String]) {
    let mut field = ImeiField::new();
    for step in field.replay(keys) {
        println!("{:<12} {:<10} {}", step.key, step.outcome.label(), step.value);
    }
    println!(
        "final: {:?} ({:?}, {})",
        field.value(),
        field.state(),
        if field.is_valid() { "valid" } else { "invalid" }
    );
}

fn print_report(report: &VerificationReport) {
    match &report.outcome {
        VerificationOutcome::NotFound => {
            println!("❔ {} is not registered with SecuriTel", report.imei);
        }
        VerificationOutcome::Found(phone) => {
            let icon = if phone.status.is_flagged() { "🚨" } else { "✅" };
            println!("{} {} is {}", icon, report.imei, phone.status);
            if let (Some(brand), Some(model)) = (&phone.brand, &phone.model) {
                println!("📱 {} {}", brand, model);
            }
            if let Some(registered_at) = &phone.registered_at {
                println!("📅 Registered {}", registered_at);
            }
        }
    }
}

fn fail(e: SecuritelError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
