//! `pitchside export`: fetch once and write an HTML snapshot of the cards.

use std::path::Path;

use anyhow::Context;
use pitchside_proto::markup::page_html;
use pitchside_proto::{CanonicalCard, Gateway, Normalized};
use tracing::info;

pub const SNAPSHOT_TITLE: &str = "pitchside";

pub fn snapshot_html(normalized: &Normalized) -> String {
    let live: Vec<CanonicalCard> = normalized.live.iter().map(CanonicalCard::from_raw).collect();
    let upcoming: Vec<CanonicalCard> = normalized
        .upcoming
        .iter()
        .map(CanonicalCard::from_raw)
        .collect();
    page_html(
        SNAPSHOT_TITLE,
        &[("Live", live.as_slice()), ("Upcoming", upcoming.as_slice())],
    )
}

pub async fn export_snapshot(gateway: &Gateway, out: &Path) -> anyhow::Result<(usize, usize)> {
    let normalized = gateway
        .scrape()
        .await
        .with_context(|| format!("fetching {}", gateway.endpoint("scrape")))?;
    let html = snapshot_html(&normalized);
    std::fs::write(out, html).with_context(|| format!("writing {}", out.display()))?;
    info!(
        "export: wrote {} live / {} upcoming to {}",
        normalized.live.len(),
        normalized.upcoming.len(),
        out.display()
    );
    Ok((normalized.live.len(), normalized.upcoming.len()))
}
