use seloger_scout::config::Config;
use seloger_scout::{SearchMode, SearchParams, SelogerScraper, Transport};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 SeLoger Scout");
    info!("================");

    let config = Config::from_env()?;
    let scraper = SelogerScraper::with_transport(Transport::new(config.trace)?);

    // Ctrl-C aborts any in-flight request.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let credentials = scraper.connect(&config.email, &config.password, &cancel).await?;

    let params = SearchParams {
        enterprise: Some(false),
        projects: vec![2, 5],
        types: vec![1, 2, 9, 13],
        natures: vec![1, 2],
        insee_codes: vec![890024],
        min_price: Some(0),
        max_price: Some(800_000),
        min_surface: Some(100),
        max_surface: Some(500),
        min_ground_surface: Some(50),
        max_ground_surface: Some(100),
        proximities: vec![0, 10],
        rooms: Some(4),
        bedrooms: Some(2),
        mandatory_commodities: Some(true),
        qs_version: Some("1".to_string()),
        mode: Some(SearchMode::Refined),
        page: None,
    };

    let listings = scraper.get_listings(&credentials, &params, &cancel).await?;

    info!("✅ Retrieved {} listings", listings.len());

    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {}", i + 1, listing.id);
        println!("   {}", listing.url);
    }

    // Save to JSON file
    let json = serde_json::to_string_pretty(&listings)?;
    tokio::fs::write("scraped_listings.json", json).await?;
    info!("💾 Saved all listings to scraped_listings.json");

    Ok(())
}
