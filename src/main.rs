use clap::Parser;

use feedwatch::cli::{Cli, Commands};
use feedwatch::config::Config;
use feedwatch::domain::FeedItem;
use feedwatch::services::{
    GoogleTranslateBackend, MyMemoryBackend, NotificationService, PipelineService,
    TranslationService, Translator,
};
use feedwatch::sources::HttpFeedSource;
use feedwatch::storage::{SqliteCursorRepository, SqliteStorage};

type DefaultPipeline = PipelineService<
    HttpFeedSource,
    TranslationService<MyMemoryBackend, GoogleTranslateBackend>,
    NotificationService,
    SqliteCursorRepository,
>;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Run { dry_run } => cmd_run(&config, dry_run),
        Commands::Items { limit } => cmd_items(&config, limit),
        Commands::Translate { text } => cmd_translate(&config, &text),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("feedwatch=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_pipeline(config: &Config) -> anyhow::Result<DefaultPipeline> {
    let storage = SqliteStorage::new(&config.db_path)?;
    let cursor_repo = SqliteCursorRepository::new(storage);

    Ok(PipelineService::new(
        HttpFeedSource::new(),
        build_translator(config),
        NotificationService::new(config),
        cursor_repo,
        config.feed_urls.clone(),
        config.pipeline.clone(),
    ))
}

fn build_translator(
    config: &Config,
) -> TranslationService<MyMemoryBackend, GoogleTranslateBackend> {
    TranslationService::new(
        MyMemoryBackend::new(config.mymemory_api_url.clone(), config.target_lang.clone()),
        GoogleTranslateBackend::new(config.google_api_url.clone(), config.target_lang.clone()),
    )
}

fn cmd_run(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;

    if dry_run {
        let candidates = pipeline.candidates();
        if candidates.is_empty() {
            println!("Nothing to push.");
            return Ok(());
        }

        println!("Would push {} item(s):\n", candidates.len());
        for item in &candidates {
            print_item(item);
        }
        return Ok(());
    }

    println!("Checking feeds...");
    let result = pipeline.run();

    if result.success {
        println!("Run complete: {}", result.message);
    } else {
        println!("Run failed: {}", result.message);
    }

    Ok(())
}

fn cmd_items(config: &Config, limit: usize) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config)?;
    let items = pipeline.fetch_merged();

    if items.is_empty() {
        println!("No items fetched.");
        return Ok(());
    }

    println!("{} item(s), newest first:\n", items.len().min(limit));
    for item in items.iter().take(limit) {
        print_item(item);
    }

    Ok(())
}

fn cmd_translate(config: &Config, text: &str) -> anyhow::Result<()> {
    let translator = build_translator(config);

    println!("Original:   {text}");
    println!("Translated: {}", translator.translate(text));

    Ok(())
}

fn print_item(item: &FeedItem) {
    println!("  {}", item.title);
    println!("    id: {}", item.identifier);
    if let Some(published) = &item.published {
        println!("    published: {published}");
    }
    if let Some(link) = &item.link {
        println!("    link: {link}");
    }
    println!();
}
