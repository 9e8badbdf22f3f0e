// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Reconciliation of submitted form fields into settings.
//!
//! Two entry points with deliberately different failure policies:
//!
//! - [`Reconciler::reconcile_general`] hard-fails: any malformed number
//!   aborts the submission with [`PlaytimeError::Parse`] and leaves the
//!   settings untouched.
//! - [`Reconciler::reconcile_platform`] soft-falls-back: malformed or
//!   out-of-range values are replaced by system defaults and reported as
//!   [`ReconcileWarning`]s. Only an unknown platform is fatal.
//!
//! Boolean toggles follow one rule everywhere: the exact string `"1"` is
//! true, anything else (including absence) is false.
//!
//! Nothing here persists; callers save the result themselves.

use crate::catalog::Catalog;
use crate::error::{PlaytimeError, Result};
use crate::settings::{
    ControlsMapping, EmulatorButtons, EmulatorControls, EmulatorSettings, InputDevice, Settings,
    DEFAULT_CACHE_LIMIT, DEFAULT_VIDEO_ROTATION, DEFAULT_VOLUME, PLAYER_SLOTS,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Read access to submitted form fields.
///
/// Lookups are exact and case-sensitive.
pub trait FieldSource {
    /// Returns the submitted value of `name`, if any.
    fn get_field(&self, name: &str) -> Option<&str>;

    /// Returns the submitted value or the empty string.
    fn field_or_empty(&self, name: &str) -> &str {
        self.get_field(name).unwrap_or("")
    }

    /// Returns true only if the field was submitted as exactly `"1"`.
    fn flag(&self, name: &str) -> bool {
        self.get_field(name) == Some("1")
    }
}

impl FieldSource for HashMap<String, String> {
    fn get_field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn get_field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for [(&str, &str)] {
    fn get_field(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

/// A recoverable problem found while reconciling platform settings.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileWarning {
    /// A numeric field could not be parsed; the default was used.
    InvalidNumber {
        /// Form key.
        field: &'static str,
        /// Submitted value.
        value: String,
        /// Parser message.
        reason: String,
    },
    /// A number parsed but is outside its allowed range; the default was used.
    OutOfRange {
        /// Form key.
        field: &'static str,
        /// Parsed value.
        value: i64,
    },
    /// The shader is not in the catalog; the catalog's first entry was used.
    UnknownShader {
        /// Submitted value.
        value: String,
    },
}

impl fmt::Display for ReconcileWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber { field, value, reason } => {
                write!(f, "unable to read {}: {:?} ({})", field, value, reason)
            }
            Self::OutOfRange { field, value } => write!(f, "wrong {} value: {}", field, value),
            Self::UnknownShader { value } => write!(f, "wrong shader value: {:?}", value),
        }
    }
}

/// A reconciled value plus the warnings produced on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled<T> {
    /// The complete, consistent result.
    pub value: T,
    /// Fallbacks that were applied.
    pub warnings: Vec<ReconcileWarning>,
}

/// Turns raw form fields into settings, using the catalog for validation.
#[derive(Debug, Clone, Copy)]
pub struct Reconciler<'a> {
    catalog: &'a Catalog,
}

impl<'a> Reconciler<'a> {
    /// Creates a reconciler over a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Applies a general settings submission to `settings`.
    ///
    /// `auto-save-interval` is submitted in minutes and stored in seconds.
    /// Either both numbers are valid and every field is updated, or an error
    /// is returned and `settings` is left as it was.
    pub fn reconcile_general<F>(&self, settings: &mut Settings, fields: &F) -> Result<()>
    where
        F: FieldSource + ?Sized,
    {
        let interval_raw = fields.field_or_empty("auto-save-interval");
        let minutes = parse_non_negative("auto-save-interval", interval_raw)?;
        let auto_save_interval = minutes.checked_mul(60).ok_or_else(|| {
            PlaytimeError::parse("auto-save-interval", interval_raw, "interval is too large")
        })?;

        let capacity_raw = fields.field_or_empty("auto-save-capacity");
        let capacity = parse_non_negative("auto-save-capacity", capacity_raw)?;
        let auto_save_capacity = u32::try_from(capacity).map_err(|_| {
            PlaytimeError::parse("auto-save-capacity", capacity_raw, "capacity is too large")
        })?;

        settings.language = fields.field_or_empty("language").to_string();

        let defaults = &mut settings.default_game_settings;
        defaults.netplay_enabled = fields.flag("netplay-enabled");
        defaults.netplay_require_login = fields.flag("netplay-require-login");
        defaults.netplay_open = fields.flag("netplay-open");
        defaults.auto_save_enabled = fields.flag("auto-save-enabled");
        defaults.auto_save_interval = auto_save_interval;
        defaults.auto_save_capacity = auto_save_capacity;
        defaults.cue_enabled = fields.flag("cue-enabled");

        Ok(())
    }

    /// Builds the settings of `platform` from a submission.
    ///
    /// # Errors
    ///
    /// Only [`PlaytimeError::PlatformNotFound`], raised before any field is read.
    pub fn reconcile_platform<F>(
        &self,
        platform: &str,
        fields: &F,
    ) -> Result<Reconciled<EmulatorSettings>>
    where
        F: FieldSource + ?Sized,
    {
        self.catalog.require_platform(platform)?;

        let mut warnings = Vec::new();

        let cache_limit = match fields.field_or_empty("cache-limit").parse::<i64>() {
            Ok(value) => value,
            Err(e) => {
                warnings.push(invalid_number("cache-limit", fields, e));
                DEFAULT_CACHE_LIMIT
            }
        };

        let volume_raw = fields.field_or_empty("volume");
        let volume = match volume_raw.parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            Ok(_) => {
                warnings.push(ReconcileWarning::InvalidNumber {
                    field: "volume",
                    value: volume_raw.to_string(),
                    reason: "value is not finite".to_string(),
                });
                DEFAULT_VOLUME
            }
            Err(e) => {
                warnings.push(invalid_number("volume", fields, e));
                DEFAULT_VOLUME
            }
        };

        let video_rotation = match fields.field_or_empty("video-rotation").parse::<i64>() {
            Ok(value) if (0..=3).contains(&value) => value,
            Ok(value) => {
                warnings.push(ReconcileWarning::OutOfRange {
                    field: "video-rotation",
                    value,
                });
                DEFAULT_VIDEO_ROTATION
            }
            Err(e) => {
                warnings.push(invalid_number("video-rotation", fields, e));
                DEFAULT_VIDEO_ROTATION
            }
        };

        let shader_raw = fields.field_or_empty("shader");
        let shader = if self.catalog.is_known_shader(shader_raw) {
            shader_raw.to_string()
        } else {
            warnings.push(ReconcileWarning::UnknownShader {
                value: shader_raw.to_string(),
            });
            self.catalog.default_shader().to_string()
        };

        let core = fields.field_or_empty("core").to_string();
        let core_options = self
            .catalog
            .core_options_by_core(&core)
            .into_iter()
            .filter_map(|option| {
                let value = fields.field_or_empty(&option.id);
                (!value.is_empty()).then(|| (option.id.clone(), value.to_string()))
            })
            .collect();

        for warning in &warnings {
            tracing::warn!(platform, "{}", warning);
        }

        let settings = EmulatorSettings {
            core,
            bios: fields.field_or_empty("bios").to_string(),
            color_scheme: fields.field_or_empty("color-scheme").to_string(),
            color_background: fields.field_or_empty("color-background").to_string(),
            cache_limit,
            volume,
            fast_forward_ratio: fields.field_or_empty("ff-ratio").to_string(),
            slow_motion_ratio: fields.field_or_empty("sm-ratio").to_string(),
            rewind_granularity: fields.field_or_empty("rewind-granularity").to_string(),
            shader,
            fps: fields.flag("fps"),
            virtual_gamepad_left_hand: fields.flag("virtual-gamepad-left-hand"),
            start_full_screen: fields.flag("start-full-screen"),
            fast_forward_mode: fields.flag("fast-forward-mode"),
            slow_motion_mode: fields.flag("slow-motion-mode"),
            rewind: fields.flag("rewind-enabled"),
            threads: fields.flag("threads"),
            disable_browser_db: fields.flag("disable-browser-db"),
            disable_vsync: fields.flag("disable-vsync"),
            video_rotation,
            buttons: EmulatorButtons::collect(|name| fields.flag(&format!("button-{}", name))),
            controls: collect_controls(fields),
            core_options,
        };

        Ok(Reconciled {
            value: settings,
            warnings,
        })
    }
}

/// Reads all player slots and device classes.
///
/// Keys look like `control-keyboard-0-start`; missing keys are unbound.
fn collect_controls<F>(fields: &F) -> [EmulatorControls; PLAYER_SLOTS]
where
    F: FieldSource + ?Sized,
{
    let mut controls: [EmulatorControls; PLAYER_SLOTS] = Default::default();

    for (player, slot) in controls.iter_mut().enumerate() {
        for device in InputDevice::ALL {
            *slot.mapping_mut(device) = ControlsMapping::collect(|button| {
                let key = format!("control-{}-{}-{}", device.as_str(), player, button);
                fields.field_or_empty(&key).to_string()
            });
        }
    }

    controls
}

fn parse_non_negative(field: &str, raw: &str) -> Result<i64> {
    let value = raw
        .parse::<i64>()
        .map_err(|e| PlaytimeError::parse(field, raw, e))?;
    if value < 0 {
        return Err(PlaytimeError::parse(field, raw, "value must not be negative"));
    }
    Ok(value)
}

fn invalid_number<F>(field: &'static str, fields: &F, err: impl ToString) -> ReconcileWarning
where
    F: FieldSource + ?Sized,
{
    ReconcileWarning::InvalidNumber {
        field,
        value: fields.field_or_empty(field).to_string(),
        reason: err.to_string(),
    }
}
