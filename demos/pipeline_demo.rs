use std::collections::HashMap;
use std::sync::Arc;

use record_pipeline::backends::local::LocalProcessorFactory;
use record_pipeline::config::{DependencyGraph, ProcessorConfig, ProcessorMap};
use record_pipeline::engine::PipelineExecutor;
use record_pipeline::enrichment::Enricher;
use record_pipeline::errors::FailureStrategy;
use record_pipeline::generator::RecordGenerator;
use record_pipeline::records::{Record, RecordKind};
use record_pipeline::traits::{Outcome, ProcessorRequest};

/// Demo showing the local processors one at a time, then wired into an executor
async fn run_pipeline_demo() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Record Pipeline Demo ===\n");

    let create_config = |id: &str, impl_name: &str, depends_on: &[&str]| ProcessorConfig {
        id: id.to_string(),
        processor: impl_name.to_string(),
        depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
        options: HashMap::new(),
    };

    let enricher = Enricher::default();
    let mut generator = RecordGenerator::seeded(7);

    // A few generated sensor readings plus one that fails validation
    let mut readings: Vec<Record> = (0..4).map(|_| generator.sensor_reading()).collect();
    readings.push(Record::new().with("sensor_id", "sensor_bad").with("temperature", 120.0));
    println!("Input: {} sensor readings", readings.len());

    // Step 1: validate on its own
    let validate = LocalProcessorFactory::create_processor(
        &create_config("validate", "validate", &[]),
        &enricher,
    )?;
    let response = validate
        .process(ProcessorRequest::new(RecordKind::SensorReading, readings.clone()))
        .await;
    let valid = match response.outcome {
        Outcome::NextBatch(batch) => batch,
        Outcome::Error(err) => return Err(format!("validate failed: {}", err.message).into()),
    };
    println!("After validate: {} records", valid.len());
    if let Some(meta) = &response.metadata {
        println!("Validate metadata: {}", serde_json::to_string(meta)?);
    }

    // Step 2: the same processors run by the executor
    println!("\n=== Executor ===");
    let configs = vec![
        create_config("validate", "validate", &[]),
        create_config("enrich", "enrich", &["validate"]),
        create_config("summary", "aggregate", &["enrich"]),
    ];

    let mut processors = ProcessorMap::new();
    let mut graph = DependencyGraph::new();
    for config in &configs {
        processors.insert(
            config.id.clone(),
            LocalProcessorFactory::create_processor(config, &enricher)?,
        );
        graph.add_processor(config.id.clone(), config.depends_on.clone());
    }

    let executor = PipelineExecutor::new(processors, graph, FailureStrategy::FailFast);
    let result = executor.execute(RecordKind::SensorReading, readings).await?;

    println!("Output records: {}", result.records.len());
    for record in &result.records {
        println!("  {}", serde_json::to_string(record)?);
    }
    println!(
        "Summary: {}",
        serde_json::to_string_pretty(&result.metadata.get_processor_metadata("summary"))?
    );

    // Clock and data source are injectable
    let tagged = Enricher::new(Arc::new(record_pipeline::enrichment::SystemClock), "demo");
    let enriched = tagged.enrich(&generator.transaction(), RecordKind::Transaction);
    println!("\nEnriched transaction: {}", serde_json::to_string(&enriched)?);

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(e) = run_pipeline_demo().await {
        eprintln!("Demo failed: {}", e);
        std::process::exit(1);
    }
}
