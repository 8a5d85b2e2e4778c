//! The `mock-data` command: generate a raw dataset without touching any API.

use std::path::PathBuf;

use chrono::Utc;
use smap_collect::MockDataGenerator;
use smap_core::AppConfig;

pub(crate) fn generate_and_save(
    config: &AppConfig,
    records: usize,
    out: Option<PathBuf>,
    seed: Option<u64>,
) -> anyhow::Result<()> {
    let mut generator = match seed {
        Some(seed) => MockDataGenerator::seeded(seed),
        None => MockDataGenerator::new(),
    };
    let raw = generator.generate(records);

    let path = out.unwrap_or_else(|| {
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        config
            .out_dir
            .join("raw")
            .join(format!("mock_social_media_data_{stamp}.json"))
    });
    smap_store::save_table(raw.rows(), &path)?;

    println!("Wrote {} mock records to {}", raw.len(), path.display());
    Ok(())
}
