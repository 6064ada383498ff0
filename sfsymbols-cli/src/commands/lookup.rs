use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use sfsymbols_catalog::types::PlatformVersions;

use crate::CliError;

use super::open_existing;

/// Entry point for `lookup`.
pub(crate) fn run_lookup(name: &str, db_path: &Path) -> Result<(), CliError> {
    let Some(repo) = open_existing(db_path)? else {
        return Ok(());
    };

    let detail = repo
        .detail(name)
        .map_err(|e| CliError::database(format!("Failed to look up '{}': {}", name, e)))?
        .ok_or_else(|| CliError::not_found(format!("No symbol named '{}'", name)))?;
    let search = repo
        .search_record(name)
        .map_err(|e| CliError::database(format!("Failed to read search record: {}", e)))?;

    log::info!(
        "{}",
        detail.symbol.name.if_supports_color(Stderr, |t| t.bold()),
    );
    log::info!(
        "  {} {} ({})",
        "Introduced:".if_supports_color(Stderr, |t| t.cyan()),
        detail.release.year,
        format_platforms(&detail.release.platforms),
    );

    if !detail.categories.is_empty() {
        let labels: Vec<&str> = detail.categories.iter().map(|c| c.label.as_str()).collect();
        log::info!(
            "  {} {}",
            "Categories:".if_supports_color(Stderr, |t| t.cyan()),
            labels.join(", "),
        );
    }

    if !detail.layerset_availability.is_empty() {
        log::info!("  {}", "Layersets:".if_supports_color(Stderr, |t| t.cyan()));
        for entry in &detail.layerset_availability {
            log::info!(
                "    {:<16} {} {}",
                entry.layerset.name,
                entry.release.year,
                format!("({})", format_platforms(&entry.release.platforms))
                    .if_supports_color(Stderr, |t| t.dimmed()),
            );
        }
    }

    if let Some(record) = search {
        if !record.aliases.is_empty() {
            log::info!(
                "  {} {}",
                "Aliases:".if_supports_color(Stderr, |t| t.cyan()),
                record.aliases.join(", "),
            );
        }
        if !record.keywords.is_empty() {
            log::info!(
                "  {} {}",
                "Keywords:".if_supports_color(Stderr, |t| t.cyan()),
                record.keywords.join(", "),
            );
        }
    }

    Ok(())
}

fn format_platforms(p: &PlatformVersions) -> String {
    format!(
        "iOS {}, macOS {}, visionOS {}, watchOS {}",
        p.ios, p.macos, p.visionos, p.watchos
    )
}
