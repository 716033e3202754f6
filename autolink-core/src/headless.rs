// autolink-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot linking of a single string, without
//! keeping a service around.

use anyhow::{Context, Result};

use crate::config::AutolinkConfig;
use crate::service::AutoLinkService;

/// Builds a service from `config` and links `text` with it.
///
/// # Arguments
///
/// * `config` - The detectors to apply, in order.
/// * `text` - The HTML fragment to link. Blank text is returned as it is.
/// * `base_url` - An optional base URL the fragment is resolved against.
pub fn headless_add_links(config: &AutolinkConfig, text: &str, base_url: Option<&str>) -> Result<String> {
    let service = AutoLinkService::from_config(config).context("Failed to build detectors")?;
    Ok(service.add_links(Some(text), base_url).unwrap_or_default())
}
