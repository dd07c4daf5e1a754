//! Channel view rendering.
//!
//! Builds a [`ChannelView`] from a finished batch and renders it as a
//! Markdown page or as JSON.

use crate::analysis::{filter, AggregatedBatch};
use crate::models::{
    AggregatedEntity, ChannelView, FailedChannel, FilterMode, Liveness, RosterSummary,
    ViewMetadata,
};
use anyhow::Result;
use chrono::Utc;

/// Assemble the view for `mode` from a batch.
///
/// The summary always counts the whole roster; only the channel list is
/// filtered.
pub fn build_view(
    batch: &AggregatedBatch,
    mode: FilterMode,
    source: &str,
    duration_seconds: f64,
) -> ChannelView {
    let entities = batch.entities();

    ChannelView {
        metadata: ViewMetadata {
            generated_at: Utc::now(),
            source: source.to_string(),
            filter: mode,
            duration_seconds,
        },
        summary: batch.summary(),
        channels: filter(&entities, mode),
        failures: batch.failed_channels(),
    }
}

/// Generate a complete Markdown page.
pub fn generate_markdown_view(view: &ChannelView) -> String {
    let mut output = String::new();

    output.push_str("# Twitch Streamers\n\n");
    output.push_str(&generate_metadata_section(&view.metadata));
    output.push_str(&generate_summary_section(&view.summary));
    output.push_str(&generate_failure_banner(&view.failures));
    output.push_str(&generate_channel_table(&view.channels, view.metadata.filter));
    output.push_str(&generate_footer());

    output
}

fn generate_metadata_section(metadata: &ViewMetadata) -> String {
    let mut section = String::new();

    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!("- **Filter:** {}\n", metadata.filter));
    section.push_str(&format!(
        "- **Refresh Duration:** {:.1}s\n\n",
        metadata.duration_seconds
    ));

    section
}

fn generate_summary_section(summary: &RosterSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("| 🟢 Online | ⚫ Offline | ❌ Failed | **Total** |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | **{}** |\n\n",
        summary.online, summary.offline, summary.failed, summary.total
    ));

    section
}

/// Banner listing channels that could not be loaded.
fn generate_failure_banner(failures: &[FailedChannel]) -> String {
    if failures.is_empty() {
        return String::new();
    }

    let mut banner = String::new();

    banner.push_str(&format!(
        "> ⚠️ **{} channel(s) could not be loaded:**\n",
        failures.len()
    ));
    for failure in failures {
        banner.push_str(&format!("> - `{}`: {}\n", failure.id, failure.reason));
    }
    banner.push('\n');

    banner
}

fn generate_channel_table(channels: &[AggregatedEntity], mode: FilterMode) -> String {
    let mut section = String::new();

    section.push_str("## Channels\n\n");

    if channels.is_empty() {
        section.push_str(&format!("No channels match the `{}` filter.\n\n", mode));
        return section;
    }

    section.push_str("| | Channel | Status | Streaming |\n");
    section.push_str("|:---:|:---|:---:|:---|\n");

    for channel in channels {
        section.push_str(&generate_channel_row(channel));
    }
    section.push('\n');

    section
}

fn generate_channel_row(channel: &AggregatedEntity) -> String {
    let badge = match channel.liveness {
        Liveness::Online => "🟢 online",
        Liveness::Offline => "⚫ offline",
    };

    let name = if channel.profile_url.is_empty() {
        escape_cell(&channel.display_name)
    } else {
        format!(
            "[{}]({})",
            escape_cell(&channel.display_name),
            channel.profile_url
        )
    };

    format!(
        "| ![{} logo]({}) | {} | {} | {} |\n",
        escape_cell(&channel.display_name),
        channel.logo_url,
        name,
        badge,
        escape_cell(&channel.headline())
    )
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

fn generate_footer() -> String {
    "---\n\n*Generated by channelwatch*\n".to_string()
}

/// Generate a JSON view.
pub fn generate_json_view(view: &ChannelView) -> Result<String> {
    serde_json::to_string_pretty(view).map_err(Into::into)
}
