use tracing::{info, instrument};

use refdoc_base::{FilePath, PalHandle, RefdocError, RefdocResult, ResultExt};

use crate::config::Config;
use crate::html::export_html;
use crate::registry::load_registry;
use crate::render::{PageOptions, ReferencePage, render_page};

/// Summary of a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub services: usize,
    pub endpoints: usize,
    /// Placeholder gaps found in the registry, formatted for display.
    pub warnings: Vec<String>,
    /// Files written, in write order.
    pub written: Vec<FilePath>,
}

/// Load the configured registry, render it and write every configured output.
///
/// Nothing is written if the registry fails to load or an output fails to render.
#[instrument(skip_all, fields(title = %config.title))]
pub fn build_site(pal: &PalHandle, config: &Config) -> RefdocResult<BuildReport> {
    let registry = load_registry(pal, &config.registry_path())?;
    let page = render_page(&registry, &PageOptions::from(config));
    let outputs = render_outputs(&page, config)?;

    let mut written = Vec::with_capacity(outputs.len());
    for (path, contents) in outputs {
        pal.write_file(&path, contents.as_bytes())
            .with_context(|| format!("Failed to write output {}", path))?;
        written.push(path);
    }

    info!(files = written.len(), "site written");
    Ok(BuildReport {
        services: registry.len(),
        endpoints: registry.endpoint_count(),
        warnings: registry
            .placeholder_gaps()
            .iter()
            .map(|gap| gap.to_string())
            .collect(),
        written,
    })
}

/// Every configured output of `page`, rendered in memory, in write order.
pub fn render_outputs(
    page: &ReferencePage,
    config: &Config,
) -> RefdocResult<Vec<(FilePath, String)>> {
    let mut outputs = vec![(
        FilePath::from(config.output.html.as_str()),
        export_html(page)?,
    )];
    if let Some(json) = &config.output.json {
        let text = serde_json::to_string_pretty(page)
            .map_err(|e| Box::new(RefdocError::message(e.to_string())))
            .with_context(|| format!("Failed to serialize page for {}", json))?;
        outputs.push((FilePath::from(json.as_str()), text));
    }
    Ok(outputs)
}
