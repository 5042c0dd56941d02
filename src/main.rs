use clap::Parser;
use jdigest::application::SummarizeService;
use jdigest::cli::{confirm, format_plan, format_report, Cli};
use jdigest::error::DigestError;
use jdigest::infrastructure::{logging, Config, DigestFile, OllamaClient};
use std::io;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref()) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(DigestError::Declined) => {
            println!("Exiting without processing.");
            std::process::exit(DigestError::Declined.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<(), DigestError> {
    // Validate everything before touching the network
    let source = cli.input_source()?;
    let settings = Config::load_optional(cli.config.as_deref())?.resolve(cli.overrides())?;

    println!("Starting journal summarization...");
    println!("Output file: {}", cli.output_md.display());
    println!("Model: {}", settings.model);
    println!("Backend URL: {}", settings.url);

    let backend = OllamaClient::new(&settings.url, &settings.model, settings.timeout);
    let service = SummarizeService::new(backend, DigestFile::new(cli.output_md), settings.prompt);

    let assume_yes = cli.yes;
    let report = service.execute(&source, |plan| {
        println!("\n{}", format_plan(plan));
        if assume_yes {
            return Ok(true);
        }
        let stdin = io::stdin();
        Ok(confirm(
            "Do you want to proceed with summarization?",
            &mut stdin.lock(),
            &mut io::stdout(),
        )?)
    })?;

    println!("\n{}", format_report(&report).trim_end());
    Ok(())
}
