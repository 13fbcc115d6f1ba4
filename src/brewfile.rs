//! Brewfile generation.
//!
//! The Brewfile is assembled from sections in a fixed order. Each section is a
//! `# Heading` comment followed by one line per entry and a blank line:
//!
//! ```ruby
//! # Taps
//! tap "homebrew/cask-fonts"
//!
//! # Brews
//! brew "jq"
//! brew "mas"
//!
//! # Mac App Store apps
//! mas "Xcode", id: 497799835
//! ```
//!
//! Sections without any rendered line are left out entirely.

use crate::config::HomebrewConfig;
use crate::entry::{Brew, Entry};
use crate::error::Result;
use anyhow::Context;
use std::fs;
use std::path::Path;

/// Comment written at the top of every generated Brewfile.
pub const HEADER: &str = "# Generated by brewbundle. Do not edit by hand.\n\n";

/// Sections of the Brewfile, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Taps,
    CaskArgs,
    Brews,
    Casks,
    MasApps,
    Whalebrews,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Taps,
        Section::CaskArgs,
        Section::Brews,
        Section::Casks,
        Section::MasApps,
        Section::Whalebrews,
    ];

    /// Heading comment text for this section.
    pub fn heading(&self) -> &'static str {
        match self {
            Section::Taps => "Taps",
            Section::CaskArgs => "Arguments for all casks",
            Section::Brews => "Brews",
            Section::Casks => "Casks",
            Section::MasApps => "Mac App Store apps",
            Section::Whalebrews => "Docker containers",
        }
    }
}

/// Render one section. Entries that render to nothing are dropped, and a
/// section left with no lines renders as the empty string.
pub fn render_section<E: Entry>(heading: &str, entries: &[E]) -> Result<String> {
    let mut lines = Vec::with_capacity(entries.len());
    for entry in entries {
        if let Some(line) = entry.to_line()? {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        return Ok(String::new());
    }
    Ok(format!("# {heading}\n{}\n\n", lines.join("\n")))
}

/// Formulae to install: the declared ones plus the tools that install
/// Mac App Store apps and whalebrew images, each added once at the end.
pub fn effective_brews(config: &HomebrewConfig) -> Vec<Brew> {
    let mut brews = config.brews.clone();
    let implicit = [
        ("mas", !config.mas_apps.is_empty()),
        ("whalebrew", !config.whalebrews.is_empty()),
    ];
    for (name, needed) in implicit {
        if needed && !brews.iter().any(|b| b.name == name) {
            brews.push(Brew::from(name));
        }
    }
    brews
}

/// Compile a config into Brewfile text.
pub fn compile(config: &HomebrewConfig) -> Result<String> {
    let mut out = String::from(HEADER);

    for section in Section::ALL {
        let heading = section.heading();
        let rendered = match section {
            Section::Taps => render_section(heading, &config.taps)?,
            Section::CaskArgs => render_section(heading, std::slice::from_ref(&config.cask_args))?,
            Section::Brews => render_section(heading, &effective_brews(config))?,
            Section::Casks => render_section(heading, &config.casks)?,
            Section::MasApps => render_section(heading, &config.mas_entries())?,
            Section::Whalebrews => render_section(heading, &config.whalebrew_entries())?,
        };
        out.push_str(&rendered);
    }

    if !config.extra_config.is_empty() {
        out.push_str("# Extra config\n");
        out.push_str(&config.extra_config);
    }

    tracing::debug!(bytes = out.len(), "Compiled Brewfile");
    Ok(out)
}

/// Compile a config and write the Brewfile to `path`.
///
/// Returns the written text.
pub fn write_brewfile(config: &HomebrewConfig, path: &Path) -> anyhow::Result<String> {
    let content = compile(config).context("Failed to compile Brewfile")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, &content)
        .with_context(|| format!("Failed to write Brewfile to {}", path.display()))?;
    tracing::info!(path = %path.display(), "Wrote Brewfile");
    Ok(content)
}
