//! The `run` command: full pipeline orchestration.
//!
//! Per-platform collection failures are logged and skipped so a single bad
//! platform does not abort the run. A schema violation after normalization
//! is fatal to the run's analytics stage and propagates.

use std::path::PathBuf;

use chrono::Utc;
use smap_analytics::{
    compute_daily_metrics, compute_moving_average, identify_top_posts, normalize, validate,
};
use smap_collect::{
    collect_all, FacebookAdapter, MockDataGenerator, PlatformAdapter, TwitterAdapter,
    YouTubeAdapter,
};
use smap_core::{AppConfig, PlatformSettings};

pub(crate) struct RunArgs {
    pub mock: bool,
    pub mock_records: usize,
    pub platform: Option<String>,
    pub window: Option<usize>,
    pub overall_n: Option<usize>,
    pub platform_n: Option<usize>,
    pub out_dir: Option<PathBuf>,
}

pub(crate) async fn run_pipeline(config: &AppConfig, args: RunArgs) -> anyhow::Result<()> {
    let out_dir = args.out_dir.unwrap_or_else(|| config.out_dir.clone());
    let window = args.window.unwrap_or(config.ma_window);
    let overall_n = args.overall_n.unwrap_or(config.top_overall_n);
    let platform_n = args.platform_n.unwrap_or(config.top_platform_n);

    tracing::info!(mock = args.mock, "starting social media analytics pipeline");

    let raw = if args.mock {
        MockDataGenerator::new().generate(args.mock_records)
    } else {
        let adapters = build_adapters(config, args.platform.as_deref())?;
        collect_all(&adapters).await
    };

    if raw.is_empty() {
        tracing::warn!("no data collected from any platform; nothing to analyze");
        return Ok(());
    }

    let processed = normalize(raw.clone());
    if let Err(violation) = validate(&processed) {
        tracing::error!(error = %violation, "schema validation failed, aborting run");
        return Err(violation.into());
    }
    tracing::info!(count = processed.len(), "processed records");

    let daily = compute_daily_metrics(&processed);
    let daily = compute_moving_average(daily, window);
    let top = identify_top_posts(&processed, overall_n, platform_n);
    tracing::info!(
        daily_rows = daily.len(),
        top_overall = top.top_overall.len(),
        "analytics completed"
    );

    let stamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
    smap_store::save_table(
        raw.rows(),
        &out_dir.join("raw").join(format!("raw_data_{stamp}.json")),
    )?;
    smap_store::save_table(
        processed.records(),
        &out_dir
            .join("processed")
            .join(format!("processed_data_{stamp}.csv")),
    )?;
    let analytics_dir = out_dir.join("analytics");
    smap_store::save_table(
        &daily,
        &analytics_dir.join(format!("daily_metrics_{stamp}.csv")),
    )?;
    smap_store::save_table(
        &top.top_overall,
        &analytics_dir.join(format!("top_posts_overall_{stamp}.csv")),
    )?;
    smap_store::save_table(
        &top.top_per_platform,
        &analytics_dir.join(format!("top_posts_platform_{stamp}.csv")),
    )?;

    tracing::info!(
        records = processed.len(),
        out_dir = %out_dir.display(),
        "pipeline completed successfully"
    );
    Ok(())
}

/// Build the adapter set from configured credentials.
///
/// Twitter and YouTube are skipped with a warning when their credentials
/// are absent; Facebook always participates because it degrades to mock
/// data on its own. Errors only if the resulting set is empty.
fn build_adapters(
    config: &AppConfig,
    platform_filter: Option<&str>,
) -> anyhow::Result<Vec<Box<dyn PlatformAdapter>>> {
    let settings = load_settings(config);
    let wanted = |name: &str| platform_filter.is_none_or(|f| f == name);
    let mut adapters: Vec<Box<dyn PlatformAdapter>> = Vec::new();

    if wanted("twitter") {
        if let Some(token) = &config.twitter_bearer_token {
            adapters.push(Box::new(TwitterAdapter::new(
                token.clone(),
                settings.twitter.clone(),
                config.request_timeout_secs,
                &config.user_agent,
            )?));
        } else {
            tracing::warn!("twitter credentials not configured, skipping platform");
        }
    }

    if wanted("youtube") {
        if let Some(key) = &config.youtube_api_key {
            adapters.push(Box::new(YouTubeAdapter::new(
                key.clone(),
                settings.youtube.clone(),
                config.request_timeout_secs,
                &config.user_agent,
            )?));
        } else {
            tracing::warn!("youtube credentials not configured, skipping platform");
        }
    }

    if wanted("facebook") {
        adapters.push(Box::new(FacebookAdapter::new(
            config.facebook_access_token.clone(),
            settings.facebook.clone(),
            config.request_timeout_secs,
            &config.user_agent,
        )?));
    }

    if adapters.is_empty() {
        anyhow::bail!("no platform adapters available (check credentials and --platform)");
    }
    Ok(adapters)
}

fn load_settings(config: &AppConfig) -> PlatformSettings {
    if config.platforms_path.exists() {
        match smap_core::load_platform_settings(&config.platforms_path) {
            Ok(settings) => return settings,
            Err(e) => {
                tracing::warn!(
                    path = %config.platforms_path.display(),
                    error = %e,
                    "failed to load platform settings, using defaults"
                );
            }
        }
    } else {
        tracing::debug!(
            path = %config.platforms_path.display(),
            "platform settings file not found, using defaults"
        );
    }
    PlatformSettings::default()
}
