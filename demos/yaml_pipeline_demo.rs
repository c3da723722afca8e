use std::env;

use record_pipeline::config::load_and_validate_config;
use record_pipeline::engine::StreamRunner;
use record_pipeline::generator::RecordGenerator;

/// Demo: run generated records through a pipeline described by a YAML or TOML file
/// Usage: cargo run --example yaml_pipeline_demo <config_file> [record_count]
async fn run_yaml_pipeline_demo(
    config_file: String,
    record_count: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Config-Driven Pipeline Demo ===\n");

    println!("Loading configuration from {}...", config_file);
    let config = load_and_validate_config(&config_file)
        .map_err(|e| format!("Failed to load configuration: {}", e))?;

    println!("Configuration loaded successfully!");
    println!("- Kind: {}", config.kind);
    println!("- Failure Strategy: {:?}", config.failure_strategy);
    println!("- Batch Size: {}", config.executor_options.batch_size());
    println!("- Window: {:?}", config.window);
    println!("- Processors: {}", config.processors.len());

    println!("\nDependency graph:");
    for processor_config in &config.processors {
        if processor_config.depends_on.is_empty() {
            println!("- {} ({}, entry point)", processor_config.id, processor_config.processor);
        } else {
            println!(
                "- {} ({}) depends on: {:?}",
                processor_config.id, processor_config.processor, processor_config.depends_on
            );
        }
    }

    // Build the JSON-lines input the runner expects
    let mut generator = RecordGenerator::seeded(42);
    let mut input = String::new();
    for _ in 0..record_count {
        input.push_str(&serde_json::to_string(&generator.next(config.kind))?);
        input.push('\n');
    }

    println!("\nRunning {} generated records...", record_count);
    let mut runner = StreamRunner::from_config(&config)?;
    let mut output = Vec::new();
    let stats = runner.run(input.as_bytes(), &mut output).await?;

    println!("\nOutput:");
    for line in String::from_utf8(output)?.lines() {
        println!("{}", line);
    }

    println!("\nStats: {}", serde_json::to_string_pretty(&stats)?);
    println!("\nPipeline Demo completed successfully!");
    Ok(())
}

fn print_usage() {
    println!("Usage: cargo run --example yaml_pipeline_demo <config_file> [record_count]");
    println!();
    println!("Arguments:");
    println!("  <config_file>   Path to the YAML or TOML configuration file");
    println!("  [record_count]  Number of generated records (default 250)");
    println!();
    println!("Examples:");
    println!("  cargo run --example yaml_pipeline_demo configs/user-events.yaml");
    println!("  cargo run --example yaml_pipeline_demo configs/transactions.toml 1000");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Error: Invalid number of arguments.");
        println!();
        print_usage();
        std::process::exit(1);
    }

    let config_file = args[1].clone();
    let record_count = match args.get(2) {
        Some(count) => count.parse()?,
        None => 250,
    };

    if !std::path::Path::new(&config_file).exists() {
        eprintln!("Error: Configuration file '{}' does not exist.", config_file);
        std::process::exit(1);
    }

    run_yaml_pipeline_demo(config_file, record_count).await
}
