//! The `report` command: print the latest persisted analytics artifacts.

use std::path::Path;

use smap_analytics::{DailyMetric, TopPost};
use smap_store::{latest_file, load_daily_metrics_csv, load_top_posts_csv};

const PREVIEW_ROWS: usize = 10;

pub(crate) fn display_results(out_dir: &Path) -> anyhow::Result<()> {
    let analytics_dir = out_dir.join("analytics");

    let Some(daily_path) = latest_file(&analytics_dir, "daily_metrics_", "csv")? else {
        println!("No analytics files found. Run the pipeline first.");
        return Ok(());
    };

    let metrics = load_daily_metrics_csv(&daily_path)?;
    print_daily_metrics(&daily_path, &metrics);

    if let Some(path) = latest_file(&analytics_dir, "top_posts_overall_", "csv")? {
        let posts = load_top_posts_csv(&path)?;
        print_top_posts("Top posts (overall)", &posts);
    }
    if let Some(path) = latest_file(&analytics_dir, "top_posts_platform_", "csv")? {
        let posts = load_top_posts_csv(&path)?;
        print_top_posts("Top posts (per platform)", &posts);
    }

    Ok(())
}

fn print_daily_metrics(path: &Path, metrics: &[DailyMetric]) {
    println!("Daily metrics ({})", path.display());
    println!(
        "{:<12} {:<12} {:>10} {:>10} {:>7} {:>10}",
        "platform", "date", "sum", "mean", "count", "ma"
    );
    for metric in metrics.iter().take(PREVIEW_ROWS) {
        let ma = metric
            .engagement_ma
            .map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
        println!(
            "{:<12} {:<12} {:>10} {:>10.2} {:>7} {:>10}",
            metric.platform,
            metric.date,
            metric.engagement_score_sum,
            metric.engagement_score_mean,
            metric.engagement_score_count,
            ma
        );
    }
    if metrics.len() > PREVIEW_ROWS {
        println!("... and {} more rows", metrics.len() - PREVIEW_ROWS);
    }

    let mut dates: Vec<_> = metrics.iter().map(|m| m.date).collect();
    dates.sort_unstable();
    dates.dedup();
    let mut platforms: Vec<_> = metrics.iter().map(|m| m.platform.as_str()).collect();
    platforms.sort_unstable();
    platforms.dedup();
    println!(
        "\n{} rows across {} days and {} platforms ({})\n",
        metrics.len(),
        dates.len(),
        platforms.len(),
        platforms.join(", ")
    );
}

fn print_top_posts(title: &str, posts: &[TopPost]) {
    println!("{title}");
    for post in posts {
        let mut content = post.content.replace('\n', " ");
        if content.chars().count() > 60 {
            content = content.chars().take(57).collect::<String>() + "...";
        }
        println!(
            "  [{:<9}] {:>7}  {}",
            post.platform, post.engagement_score, content
        );
    }
    println!();
}
