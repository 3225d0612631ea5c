use slotwatch::config::environment::Config;
use slotwatch::services::notify::DiscordNotifier;
use slotwatch::services::poller::Poller;
use slotwatch::services::scheduler::Scheduler;
use slotwatch::services::session::WebDriverSession;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slotwatch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; anything missing or malformed is fatal here,
    // before the run loop starts.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        "starting appointment checker, interval {} minutes",
        config.check_interval_minutes()
    );

    let driver = WebDriverSession::new(config.webdriver_url.clone());
    let poller = Poller::new(driver, config.credentials.clone());
    let notifier = DiscordNotifier::new(config.bot_token.clone());

    Scheduler::new(poller, notifier, config.channel_id, config.check_interval)
        .run()
        .await;
}
