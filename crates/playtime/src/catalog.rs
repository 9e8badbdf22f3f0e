// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Static lookup tables: platforms, shaders, ratios, core options and languages.
//!
//! A [`Catalog`] is loaded once at startup (normally from the bundled
//! `catalog.json`) and shared read-only behind an `Arc` by the reconciliation
//! engine, the handlers and the templates.

use crate::assets::asset_text;
use crate::error::{PlaytimeError, Result};
use crate::settings::{
    EmulatorButtons, EmulatorSettings, DEFAULT_CACHE_LIMIT, DEFAULT_VIDEO_ROTATION,
    DEFAULT_VOLUME,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An emulated platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    /// Short identifier used in URLs and storage keys.
    pub id: String,
    /// Display name.
    pub name: String,
    /// BIOS files the platform can use, if any.
    #[serde(default)]
    pub bios: Vec<String>,
    /// Emulator cores able to run the platform; the first is the default.
    pub cores: Vec<String>,
}

/// A selectable entry with a stored value and a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Stored value.
    pub value: String,
    /// Display name.
    pub name: String,
}

/// A tunable option of an emulator core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreOption {
    /// Option key as submitted in forms.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Core the option belongs to.
    pub core: String,
    /// Input kind, `select` or `text`.
    pub kind: String,
    /// Allowed values of a `select` option.
    #[serde(default)]
    pub values: Vec<String>,
    /// Value used when nothing is stored.
    #[serde(default)]
    pub default: String,
}

/// An interface language offered on the general settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    /// Language code such as `en`.
    pub code: String,
    /// Name of the language in itself.
    pub name: String,
}

#[derive(Deserialize)]
struct CatalogFile {
    platforms: Vec<Platform>,
    shaders: Vec<Choice>,
    #[serde(default)]
    fast_forward_ratios: Vec<Choice>,
    #[serde(default)]
    slow_motion_ratios: Vec<Choice>,
    #[serde(default)]
    rewind_granularities: Vec<Choice>,
    #[serde(default)]
    core_options: Vec<CoreOption>,
    #[serde(default)]
    languages: Vec<Language>,
}

/// Immutable lookup tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    platforms: BTreeMap<String, Platform>,
    shaders: Vec<Choice>,
    fast_forward_ratios: Vec<Choice>,
    slow_motion_ratios: Vec<Choice>,
    rewind_granularities: Vec<Choice>,
    core_options: Vec<CoreOption>,
    languages: Vec<Language>,
}

impl Catalog {
    /// Loads the catalog bundled with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(asset_text("catalog.json")?)
    }

    /// Parses a catalog document.
    ///
    /// The shader list must not be empty because its first entry is the
    /// fallback for unknown submissions.
    pub fn from_json(source: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(source)
            .map_err(|e| PlaytimeError::Asset(format!("invalid catalog: {}", e)))?;

        if file.shaders.is_empty() {
            return Err(PlaytimeError::Asset(
                "invalid catalog: shader list is empty".to_string(),
            ));
        }

        let platforms = file
            .platforms
            .into_iter()
            .map(|platform| (platform.id.clone(), platform))
            .collect();

        Ok(Self {
            platforms,
            shaders: file.shaders,
            fast_forward_ratios: file.fast_forward_ratios,
            slow_motion_ratios: file.slow_motion_ratios,
            rewind_granularities: file.rewind_granularities,
            core_options: file.core_options,
            languages: file.languages,
        })
    }

    /// Looks up a platform by id.
    pub fn platform(&self, id: &str) -> Option<&Platform> {
        self.platforms.get(id)
    }

    /// Like [`Catalog::platform`] but fails with `PlatformNotFound`.
    pub fn require_platform(&self, id: &str) -> Result<&Platform> {
        self.platform(id)
            .ok_or_else(|| PlaytimeError::PlatformNotFound(id.to_string()))
    }

    /// All platforms ordered by display name.
    pub fn sorted_platforms(&self) -> Vec<&Platform> {
        let mut platforms: Vec<&Platform> = self.platforms.values().collect();
        platforms.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        platforms
    }

    /// Options defined for a core, in catalog order.
    pub fn core_options_by_core(&self, core: &str) -> Vec<&CoreOption> {
        self.core_options.iter().filter(|o| o.core == core).collect()
    }

    /// Options of every core available on a platform.
    pub fn core_options_by_platform(&self, platform: &str) -> Vec<&CoreOption> {
        match self.platform(platform) {
            Some(p) => self
                .core_options
                .iter()
                .filter(|o| p.cores.iter().any(|core| *core == o.core))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns true if `value` is a shader of the catalog.
    pub fn is_known_shader(&self, value: &str) -> bool {
        self.shaders.iter().any(|s| s.value == value)
    }

    /// The fallback shader: the first catalog entry.
    pub fn default_shader(&self) -> &str {
        self.shaders.first().map(|s| s.value.as_str()).unwrap_or_default()
    }

    /// Shader list in catalog order.
    pub fn shaders(&self) -> &[Choice] {
        &self.shaders
    }

    /// Fast-forward ratios in catalog order.
    pub fn fast_forward_ratios(&self) -> &[Choice] {
        &self.fast_forward_ratios
    }

    /// Slow-motion ratios in catalog order.
    pub fn slow_motion_ratios(&self) -> &[Choice] {
        &self.slow_motion_ratios
    }

    /// Rewind granularities in catalog order.
    pub fn rewind_granularities(&self) -> &[Choice] {
        &self.rewind_granularities
    }

    /// Interface languages.
    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    /// Settings a platform starts with before the user edits anything.
    pub fn default_emulator_settings(&self, platform: &str) -> Result<EmulatorSettings> {
        let platform = self.require_platform(platform)?;

        Ok(EmulatorSettings {
            core: first_or_empty(&platform.cores),
            bios: first_or_empty(&platform.bios),
            color_scheme: String::new(),
            color_background: String::new(),
            cache_limit: DEFAULT_CACHE_LIMIT,
            volume: DEFAULT_VOLUME,
            fast_forward_ratio: first_choice(&self.fast_forward_ratios),
            slow_motion_ratio: first_choice(&self.slow_motion_ratios),
            rewind_granularity: first_choice(&self.rewind_granularities),
            shader: self.default_shader().to_string(),
            fps: false,
            virtual_gamepad_left_hand: false,
            start_full_screen: false,
            fast_forward_mode: false,
            slow_motion_mode: false,
            rewind: false,
            threads: false,
            disable_browser_db: false,
            disable_vsync: false,
            video_rotation: DEFAULT_VIDEO_ROTATION,
            buttons: EmulatorButtons::default(),
            controls: Default::default(),
            core_options: BTreeMap::new(),
        })
    }
}

fn first_or_empty(values: &[String]) -> String {
    values.first().cloned().unwrap_or_default()
}

fn first_choice(choices: &[Choice]) -> String {
    choices.first().map(|c| c.value.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.platform("snes").is_some());
        assert!(catalog.platform("dreamcast").is_none());
        assert_eq!(catalog.default_shader(), "disabled");
        assert!(catalog.is_known_shader("crt-easymode.glslp"));
        assert!(!catalog.is_known_shader("bogus"));
    }

    #[test]
    fn test_sorted_platforms_by_name() {
        let catalog = Catalog::builtin().unwrap();
        let names: Vec<&str> = catalog.sorted_platforms().iter().map(|p| p.name.as_str()).collect();
        let mut expected = names.clone();
        expected.sort();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_core_options_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let snes9x: Vec<&str> = catalog
            .core_options_by_core("snes9x")
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(snes9x, vec!["snes9x_region", "snes9x_overclock_superfx"]);

        let nes = catalog.core_options_by_platform("nes");
        assert!(nes.iter().any(|o| o.core == "fceumm"));
        assert!(nes.iter().any(|o| o.core == "nestopia"));
        assert!(catalog.core_options_by_platform("unknown").is_empty());
        assert!(catalog.core_options_by_core("unknown").is_empty());
    }

    #[test]
    fn test_default_emulator_settings() {
        let catalog = Catalog::builtin().unwrap();
        let psx = catalog.default_emulator_settings("psx").unwrap();
        assert_eq!(psx.core, "pcsx_rearmed");
        assert_eq!(psx.bios, "scph5500.bin");
        assert_eq!(psx.shader, "disabled");
        assert_eq!(psx.cache_limit, DEFAULT_CACHE_LIMIT);
        assert_eq!(psx.volume, DEFAULT_VOLUME);
        assert_eq!(psx.video_rotation, 0);
        assert!(psx.buttons.play_pause);
        assert!(psx.core_options.is_empty());
        assert_eq!(psx.controls[0].keyboard.start, "");

        let snes = catalog.default_emulator_settings("snes").unwrap();
        assert_eq!(snes.bios, "");

        let err = catalog.default_emulator_settings("dreamcast").unwrap_err();
        assert!(matches!(err, PlaytimeError::PlatformNotFound(_)));
    }

    #[test]
    fn test_empty_shader_list_rejected() {
        let err = Catalog::from_json(r#"{"platforms": [], "shaders": []}"#).unwrap_err();
        assert!(matches!(err, PlaytimeError::Asset(_)));
    }
}
