//! Configuration management for `autolink-core`.
//!
//! This module defines which detectors a service runs, in which order, and
//! with which options. Configurations are read from YAML; a default set is
//! embedded in the library.
//!
//! License: MIT OR APACHE 2.0

use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::detector::Detector;
use crate::detectors::mention::DEFAULT_PROFILE_URL_TEMPLATE;
use crate::detectors::url::DEFAULT_MAX_LABEL_LENGTH;
use crate::detectors::{EmailDetector, MentionDetector, UrlDetector};
use crate::errors::AutolinkError;

const USERNAME_PLACEHOLDER: &str = "{username}";

fn default_max_label_length() -> usize {
    DEFAULT_MAX_LABEL_LENGTH
}

fn default_true() -> bool {
    true
}

fn default_profile_url_template() -> String {
    DEFAULT_PROFILE_URL_TEMPLATE.to_string()
}

/// Options of a single detector, tagged by its `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorConfig {
    Url {
        /// Labels longer than this (in codepoints) are truncated with an ellipsis.
        #[serde(default = "default_max_label_length")]
        max_label_length: usize,
    },
    Email {
        #[serde(default = "default_true")]
        hex_encode: bool,
        #[serde(default = "default_true")]
        obfuscate: bool,
    },
    Mention {
        #[serde(default = "default_profile_url_template")]
        profile_url_template: String,
    },
}

impl DetectorConfig {
    /// The name of the detector this entry builds.
    pub fn kind(&self) -> &'static str {
        match self {
            DetectorConfig::Url { .. } => "url",
            DetectorConfig::Email { .. } => "email",
            DetectorConfig::Mention { .. } => "mention",
        }
    }

    /// Builds the configured detector.
    pub fn build(&self) -> Result<Box<dyn Detector>, AutolinkError> {
        let detector: Box<dyn Detector> = match self {
            DetectorConfig::Url { max_label_length } => Box::new(UrlDetector::new(*max_label_length)?),
            DetectorConfig::Email { hex_encode, obfuscate } => {
                Box::new(EmailDetector::new(*hex_encode, *obfuscate))
            }
            DetectorConfig::Mention { profile_url_template } => {
                Box::new(MentionDetector::new(profile_url_template.as_str())?)
            }
        };
        Ok(detector)
    }
}

/// The ordered list of detectors a service applies.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AutolinkConfig {
    pub detectors: Vec<DetectorConfig>,
}

impl AutolinkConfig {
    /// Loads a configuration from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading autolink configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AutolinkConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!("Loaded {} detectors from file {}.", config.detectors.len(), path.display());
        Ok(config)
    }

    /// Parses and validates a configuration from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AutolinkConfig =
            serde_yml::from_str(yaml).context("Failed to parse autolink configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the embedded default configuration: email, mention and url, in that order.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default detectors from embedded string...");
        let default_yaml = include_str!("../config/default_detectors.yaml");
        let config: AutolinkConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default detectors")?;

        debug!("Loaded {} default detectors.", config.detectors.len());
        Ok(config)
    }

    /// Checks that every detector entry can be built.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();
        if self.detectors.is_empty() {
            errors.push("No detectors configured.".to_string());
        }

        for (index, detector) in self.detectors.iter().enumerate() {
            match detector {
                DetectorConfig::Url { max_label_length } if *max_label_length < 1 => {
                    errors.push(format!(
                        "Detector #{} (url): `max_label_length` must be at least 1.",
                        index + 1
                    ));
                }
                DetectorConfig::Mention { profile_url_template }
                    if !profile_url_template.contains(USERNAME_PLACEHOLDER) =>
                {
                    errors.push(format!(
                        "Detector #{} (mention): `profile_url_template` must contain {}.",
                        index + 1,
                        USERNAME_PLACEHOLDER
                    ));
                }
                _ => {
                    if let Err(e) = detector.build() {
                        errors.push(format!("Detector #{} ({}): {}", index + 1, detector.kind(), e));
                    }
                }
            }
        }

        if !errors.is_empty() {
            let full_error_message = format!("Detector validation failed:\n{}", errors.join("\n"));
            Err(AutolinkError::Config(full_error_message).into())
        } else {
            Ok(())
        }
    }

    /// Builds all detectors in configuration order.
    pub fn build_detectors(&self) -> Result<Vec<Box<dyn Detector>>, AutolinkError> {
        self.detectors.iter().map(DetectorConfig::build).collect()
    }
}

impl Default for AutolinkConfig {
    fn default() -> Self {
        Self {
            detectors: vec![
                DetectorConfig::Email {
                    hex_encode: true,
                    obfuscate: true,
                },
                DetectorConfig::Mention {
                    profile_url_template: default_profile_url_template(),
                },
                DetectorConfig::Url {
                    max_label_length: DEFAULT_MAX_LABEL_LENGTH,
                },
            ],
        }
    }
}
