mod config;
mod view;

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::Parser;
use script_core::{
    checkout::mock_reference, template::resolve_platform, topic_from_example_tag,
    GenerationMode, MockScriptBackend, Outcome, WizardController,
};
use shared::domain::PaymentMethod;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::{load_settings, DEFAULT_CONFIG_FILE},
    view::{delivery_card, TerminalCheckout, TerminalView},
};

#[derive(Parser, Debug)]
#[command(name = "viral-scripts", about = "Generate, pay for and export short-form video scripts")]
struct Args {
    /// Video topic; falls back to the configured default.
    #[arg(long)]
    topic: Option<String>,
    /// Example chip label, e.g. "🏋️ Fitness Tips". Ignored when --topic is given.
    #[arg(long)]
    example_tag: Option<String>,
    #[arg(long)]
    platform: Option<String>,
    #[arg(long, default_value = "card")]
    payment_method: String,
    /// Switches to seeded random generation.
    #[arg(long)]
    seed: Option<u64>,
    /// Reference delivered by the simulated checkout callback.
    #[arg(long)]
    payment_ref: Option<String>,
    /// Directory to write the exported text file into.
    #[arg(long)]
    export: Option<PathBuf>,
    /// Print the final session snapshot as JSON instead of delivery cards.
    #[arg(long)]
    json: bool,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();
    let settings = load_settings(&args.config)?;

    let topic = match (&args.topic, &args.example_tag) {
        (Some(topic), _) => topic.clone(),
        (None, Some(label)) => topic_from_example_tag(label),
        (None, None) => settings.default_topic.clone(),
    };
    let platform = args
        .platform
        .as_deref()
        .map(resolve_platform)
        .unwrap_or(settings.default_platform);
    let method = PaymentMethod::from_name(&args.payment_method)
        .ok_or_else(|| anyhow!("unknown payment method '{}'", args.payment_method))?;
    let mode = args.seed.map(GenerationMode::seeded).unwrap_or_default();

    let checkout_config = settings.checkout_config()?;
    info!(
        topic = %topic,
        %platform,
        %method,
        endpoint = %checkout_config.endpoint(),
        "console: starting wizard"
    );

    let controller = WizardController::new(
        Arc::new(MockScriptBackend::new(settings.generation_delay()).with_mode(mode)),
        Arc::new(TerminalCheckout::new(args.json)),
        checkout_config,
    )
    .with_platform(platform)
    .with_view(Box::new(TerminalView::new(args.json)));

    if let Outcome::Superseded = controller.submit_topic(&topic, platform).await? {
        return Err(anyhow!("generation was superseded"));
    }
    controller.select_payment_method(method).await;
    if let Outcome::Superseded = controller.request_checkout().await? {
        return Err(anyhow!("checkout hand-off was superseded"));
    }

    tokio::time::sleep(settings.checkout_delay()).await;
    let reference = args
        .payment_ref
        .unwrap_or_else(|| mock_reference(Utc::now()).as_str().to_string());
    let delivered = controller.complete_checkout(&reference).await?;

    let now = Utc::now();
    if let Some(dir) = &args.export {
        let text = controller.export(now).await?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create export dir '{}'", dir.display()))?;
        let path = dir.join(controller.export_file_name(now).await);
        fs::write(&path, text)
            .with_context(|| format!("failed to write export '{}'", path.display()))?;
        info!(path = %path.display(), "console: export written");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&delivered)?);
        return Ok(());
    }

    for card in controller.render().await {
        println!("{}", delivery_card(&card));
    }
    println!(
        "Share: {}",
        controller.share_link(&settings.share_page_url).await?
    );
    Ok(())
}
