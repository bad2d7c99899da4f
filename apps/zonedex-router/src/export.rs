//! Static asset export of the zone index
//!
//! Besides the whole asset at `path`, every section is written on its own to
//! `<stem>/<section>.json` beside it, e.g. `out/zones/byId.json` for
//! `out/zones.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use zonedex_domain::zones::IndexSection;
use zonedex_domain::ZoneIndex;

/// Directory holding the per-section files of the asset at `path`
pub fn sections_dir(path: &Path) -> PathBuf {
    let dir = path.with_extension("");
    if dir == path {
        path.with_extension("sections")
    } else {
        dir
    }
}

/// Write the serialized index and its sections, creating parent directories
pub async fn write_asset(index: &ZoneIndex, path: &Path) -> Result<()> {
    let json = index
        .to_json_pretty()
        .context("Failed to serialize zone index")?;
    write_file(path, &json).await?;

    let dir = sections_dir(path);
    for section in IndexSection::ALL {
        let value = index
            .section(section)
            .with_context(|| format!("Failed to serialize section {}", section.name()))?;
        let json = serde_json::to_string_pretty(&value)
            .with_context(|| format!("Failed to serialize section {}", section.name()))?;
        write_file(&dir.join(format!("{}.json", section.name())), &json).await?;
    }

    info!(
        path = %path.display(),
        sections = %dir.display(),
        bytes = json.len(),
        "Zone index asset written"
    );
    Ok(())
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    tokio::fs::write(path, contents.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonedex_domain::zones::RawZoneRecord;

    async fn read_json(path: &Path) -> serde_json::Value {
        serde_json::from_str(&tokio::fs::read_to_string(path).await.unwrap()).unwrap()
    }

    #[test]
    fn test_sections_dir() {
        assert_eq!(sections_dir(Path::new("out/zones.json")), Path::new("out/zones"));
        assert_eq!(sections_dir(Path::new("out/zones")), Path::new("out/zones.sections"));
    }

    #[tokio::test]
    async fn test_write_asset_creates_parent_directories() {
        let dir = std::env::temp_dir().join(format!("zonedex-export-{}", std::process::id()));
        let path = dir.join("nested").join("zones.json");
        let index = ZoneIndex::from_records(vec![RawZoneRecord::new("A1", "Coastal", Some("CA"))]);

        write_asset(&index, &path).await.unwrap();

        let written = read_json(&path).await;
        assert_eq!(written["categories"], serde_json::json!(["ca"]));
        assert_eq!(written["byCategory"]["ca"]["coastal"]["ids"], serde_json::json!(["A1"]));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_write_asset_writes_each_section() {
        let dir = std::env::temp_dir().join(format!("zonedex-sections-{}", std::process::id()));
        let path = dir.join("zones.json");
        let index = ZoneIndex::from_records(vec![
            RawZoneRecord::new("A1", "Coastal", Some("CA")),
            RawZoneRecord::new("A2", "Coastal", Some("CA")),
            RawZoneRecord::new("M1", "Open Waters", None),
        ]);

        write_asset(&index, &path).await.unwrap();

        let whole = read_json(&path).await;
        for section in IndexSection::ALL {
            let written = read_json(&dir.join("zones").join(format!("{}.json", section.name()))).await;
            assert_eq!(written, whole[section.name()], "{}", section.name());
        }

        let by_id = read_json(&dir.join("zones").join("byId.json")).await;
        assert_eq!(by_id["A2"]["ids"], serde_json::json!(["A1", "A2"]));

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
