//! Texture generation command

use anyhow::{Context, Result};
use texgen_asset::ContentLibrary;
use texgen_pipeline::{
    create_transport, GenerateInputs, PipelineEvent, PipelineStage, RunOutcome, TexGenConfig,
    TextureGenerator,
};

pub struct GenerateArgs {
    pub prompt: String,
    pub size: Option<String>,
    pub path: Option<String>,
    pub name: Option<String>,
    pub transport: String,
    pub content_root: Option<String>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let config = TexGenConfig::load().context("Failed to load config")?;
    let defaults = &config.generation;

    let content_root = args
        .content_root
        .unwrap_or_else(|| defaults.content_root.clone());
    let inputs = GenerateInputs {
        prompt: args.prompt,
        size: args.size.unwrap_or_else(|| defaults.size.clone()),
        destination_path: args.path.unwrap_or_else(|| defaults.path.clone()),
        texture_name: args.name.unwrap_or_else(|| defaults.name.clone()),
    };

    let transport = create_transport(&args.transport, &config)?;
    let library = ContentLibrary::open(&content_root)
        .with_context(|| format!("Failed to open content root '{}'", content_root))?;
    let generator = TextureGenerator::new(transport, library);

    println!(
        "Generating texture '{}/{}' ({}) via {}",
        inputs.destination_path.trim_end_matches('/'),
        inputs.texture_name,
        inputs.size,
        args.transport
    );
    println!("  Prompt: {}", inputs.prompt);

    let handle = generator.submit(inputs);
    for event in handle.events() {
        if let PipelineEvent::Stage(stage) = event {
            if stage != PipelineStage::Idle {
                println!("  [{}]", stage);
            }
        }
    }

    let outcome = handle.wait();
    for line in report_lines(&outcome) {
        println!("{}", line);
    }
    if !outcome.notification.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// What the user sees once a run ends. Failure detail stays in the log.
fn report_lines(outcome: &RunOutcome) -> Vec<String> {
    let mut lines = vec![outcome.notification.to_string()];
    if let Ok(meta) = &outcome.result {
        lines.push(format!("  Hash: {}", meta.hash));
        lines.push(format!("  Dimensions: {}x{}", meta.width, meta.height));
    }
    lines
}
