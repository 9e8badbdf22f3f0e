// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Settings data model.
//!
//! A user's [`Settings`] aggregate holds the general preferences
//! ([`GameDefaults`]) plus a sparse map of per-platform
//! [`EmulatorSettings`]. Platforms without an entry are synthesized from the
//! catalog defaults on read (see [`Catalog::default_emulator_settings`]).
//!
//! [`Catalog::default_emulator_settings`]: crate::catalog::Catalog::default_emulator_settings

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Cache limit used when none (or garbage) is submitted: 1 GiB.
pub const DEFAULT_CACHE_LIMIT: i64 = 1024 * 1024 * 1024;
/// Emulator volume used when none (or garbage) is submitted.
pub const DEFAULT_VOLUME: f64 = 0.5;
/// Video rotation used when none (or an out-of-range value) is submitted.
pub const DEFAULT_VIDEO_ROTATION: i64 = 0;
/// Auto-save interval in seconds for new users.
pub const DEFAULT_AUTO_SAVE_INTERVAL: i64 = 300;
/// Number of auto-save slots for new users.
pub const DEFAULT_AUTO_SAVE_CAPACITY: u32 = 5;
/// Interface language for new users.
pub const DEFAULT_LANGUAGE: &str = "en";
/// Number of player slots that carry a control mapping.
pub const PLAYER_SLOTS: usize = 4;

/// All settings owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Owner of these settings.
    pub user_id: String,
    /// Interface language code.
    pub language: String,
    /// Defaults applied to every game.
    pub default_game_settings: GameDefaults,
    /// Per-platform emulator configuration, keyed by platform id.
    #[serde(default)]
    pub emulator_settings: BTreeMap<String, EmulatorSettings>,
}

impl Settings {
    /// Creates the system default settings for a user.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            language: DEFAULT_LANGUAGE.to_string(),
            default_game_settings: GameDefaults::default(),
            emulator_settings: BTreeMap::new(),
        }
    }
}

/// Game defaults edited on the general settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDefaults {
    /// Offer netplay for new games.
    pub netplay_enabled: bool,
    /// Only signed-in users may join a netplay session.
    pub netplay_require_login: bool,
    /// List netplay sessions publicly.
    pub netplay_open: bool,
    /// Save state periodically while playing.
    pub auto_save_enabled: bool,
    /// Seconds between auto-saves; always a non-negative multiple of 60.
    pub auto_save_interval: i64,
    /// Number of auto-save slots kept.
    pub auto_save_capacity: u32,
    /// Enable cues for new games.
    pub cue_enabled: bool,
}

impl Default for GameDefaults {
    fn default() -> Self {
        Self {
            netplay_enabled: false,
            netplay_require_login: true,
            netplay_open: false,
            auto_save_enabled: false,
            auto_save_interval: DEFAULT_AUTO_SAVE_INTERVAL,
            auto_save_capacity: DEFAULT_AUTO_SAVE_CAPACITY,
            cue_enabled: true,
        }
    }
}

/// Emulator configuration for a single platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmulatorSettings {
    /// Selected emulator core.
    pub core: String,
    /// Selected BIOS file, empty for none.
    pub bios: String,
    /// Emulator UI color scheme.
    pub color_scheme: String,
    /// Background color behind the game screen.
    pub color_background: String,
    /// Browser cache limit in bytes.
    pub cache_limit: i64,
    /// Initial volume in `0.0..=1.0`.
    pub volume: f64,
    /// Speed multiplier while fast-forwarding.
    pub fast_forward_ratio: String,
    /// Speed divisor while in slow motion.
    pub slow_motion_ratio: String,
    /// Frames between rewind snapshots.
    pub rewind_granularity: String,
    /// Shader preset, `disabled` for none.
    pub shader: String,
    /// Show the frame rate counter.
    pub fps: bool,
    /// Mirror the on-screen gamepad for left-handed play.
    pub virtual_gamepad_left_hand: bool,
    /// Enter full screen when a game starts.
    pub start_full_screen: bool,
    /// Start with fast-forward on.
    pub fast_forward_mode: bool,
    /// Start with slow motion on.
    pub slow_motion_mode: bool,
    /// Record rewind snapshots.
    pub rewind: bool,
    /// Let the core use worker threads.
    pub threads: bool,
    /// Do not cache game data in the browser database.
    pub disable_browser_db: bool,
    /// Render without waiting for vertical sync.
    pub disable_vsync: bool,
    /// Quarter turns clockwise, in `0..=3`.
    pub video_rotation: i64,
    /// Toolbar buttons shown in the emulator.
    pub buttons: EmulatorButtons,
    /// Input mappings per player slot.
    pub controls: [EmulatorControls; PLAYER_SLOTS],
    /// Values for the options of the selected core, empty values omitted.
    #[serde(default)]
    pub core_options: BTreeMap<String, String>,
}

/// Toggles for the buttons shown in the emulator toolbar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmulatorButtons {
    /// Play/pause.
    pub play_pause: bool,
    /// Restart.
    pub restart: bool,
    /// Mute.
    pub mute: bool,
    /// Emulator settings menu.
    pub settings: bool,
    /// Full screen.
    pub full_screen: bool,
    /// Save state.
    pub save_state: bool,
    /// Load state.
    pub load_state: bool,
    /// Screen recording.
    pub screen_record: bool,
    /// Gamepad configuration.
    pub gamepad: bool,
    /// Cheats.
    pub cheat: bool,
    /// Volume slider.
    pub volume: bool,
    /// Export of save files.
    pub save_sav_files: bool,
    /// Import of save files.
    pub load_sav_files: bool,
    /// Quick save.
    pub quick_save: bool,
    /// Quick load.
    pub quick_load: bool,
    /// Screenshot.
    pub screenshot: bool,
    /// Cache manager.
    pub cache_manager: bool,
    /// Context menu.
    pub context_menu: bool,
    /// Right-click menu.
    pub right_click: bool,
    /// Exit button.
    pub exit_emulation: bool,
}

impl EmulatorButtons {
    /// Form names of the toolbar buttons, in display order.
    pub const NAMES: [&'static str; 20] = [
        "play-pause",
        "restart",
        "mute",
        "settings",
        "full-screen",
        "save-state",
        "load-state",
        "screen-record",
        "gamepad",
        "cheat",
        "volume",
        "save-sav-files",
        "load-sav-files",
        "quick-save",
        "quick-load",
        "screenshot",
        "cache-manager",
        "context-menu",
        "right-click",
        "exit-emulation",
    ];

    /// Builds the toggles by asking `enabled` about every button name.
    pub fn collect(mut enabled: impl FnMut(&str) -> bool) -> Self {
        Self {
            play_pause: enabled("play-pause"),
            restart: enabled("restart"),
            mute: enabled("mute"),
            settings: enabled("settings"),
            full_screen: enabled("full-screen"),
            save_state: enabled("save-state"),
            load_state: enabled("load-state"),
            screen_record: enabled("screen-record"),
            gamepad: enabled("gamepad"),
            cheat: enabled("cheat"),
            volume: enabled("volume"),
            save_sav_files: enabled("save-sav-files"),
            load_sav_files: enabled("load-sav-files"),
            quick_save: enabled("quick-save"),
            quick_load: enabled("quick-load"),
            screenshot: enabled("screenshot"),
            cache_manager: enabled("cache-manager"),
            context_menu: enabled("context-menu"),
            right_click: enabled("right-click"),
            exit_emulation: enabled("exit-emulation"),
        }
    }
}

impl Default for EmulatorButtons {
    fn default() -> Self {
        Self::collect(|_| true)
    }
}

/// Input device class a mapping belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputDevice {
    /// Keyboard keys.
    Keyboard,
    /// Gamepad buttons and axes.
    Gamepad,
}

impl InputDevice {
    /// Both device classes, keyboard first.
    pub const ALL: [InputDevice; 2] = [InputDevice::Keyboard, InputDevice::Gamepad];

    /// Name used in form keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyboard => "keyboard",
            Self::Gamepad => "gamepad",
        }
    }
}

/// Keyboard and gamepad mappings of one player slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmulatorControls {
    /// Keyboard bindings.
    pub keyboard: ControlsMapping,
    /// Gamepad bindings.
    pub gamepad: ControlsMapping,
}

impl EmulatorControls {
    /// Mutable access to the mapping of a device class.
    pub fn mapping_mut(&mut self, device: InputDevice) -> &mut ControlsMapping {
        match device {
            InputDevice::Keyboard => &mut self.keyboard,
            InputDevice::Gamepad => &mut self.gamepad,
        }
    }
}

/// Key binding per logical button; an empty string means unbound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlsMapping {
    /// B button.
    pub b: String,
    /// Y button.
    pub y: String,
    /// Select.
    pub select: String,
    /// Start.
    pub start: String,
    /// D-pad up.
    pub up: String,
    /// D-pad down.
    pub down: String,
    /// D-pad left.
    pub left: String,
    /// D-pad right.
    pub right: String,
    /// A button.
    pub a: String,
    /// X button.
    pub x: String,
    /// Left shoulder.
    pub l: String,
    /// Right shoulder.
    pub r: String,
    /// Left trigger.
    pub l2: String,
    /// Right trigger.
    pub r2: String,
    /// Left stick press.
    pub l3: String,
    /// Right stick press.
    pub r3: String,
    /// Left stick up.
    pub l_stick_up: String,
    /// Left stick down.
    pub l_stick_down: String,
    /// Left stick left.
    pub l_stick_left: String,
    /// Left stick right.
    pub l_stick_right: String,
    /// Right stick up.
    pub r_stick_up: String,
    /// Right stick down.
    pub r_stick_down: String,
    /// Right stick left.
    pub r_stick_left: String,
    /// Right stick right.
    pub r_stick_right: String,
    /// Quick save hotkey.
    pub quick_save_state: String,
    /// Quick load hotkey.
    pub quick_load_state: String,
    /// Next state slot hotkey.
    pub change_state_slot: String,
    /// Fast-forward hotkey.
    pub fast_forward: String,
    /// Slow motion hotkey.
    pub slow_motion: String,
    /// Rewind hotkey.
    pub rewind: String,
}

impl ControlsMapping {
    /// Form names of the logical buttons.
    pub const BUTTONS: [&'static str; 30] = [
        "b",
        "y",
        "select",
        "start",
        "up",
        "down",
        "left",
        "right",
        "a",
        "x",
        "l",
        "r",
        "l2",
        "r2",
        "l3",
        "r3",
        "l-stick-up",
        "l-stick-down",
        "l-stick-left",
        "l-stick-right",
        "r-stick-up",
        "r-stick-down",
        "r-stick-left",
        "r-stick-right",
        "quick-save-state",
        "quick-load-state",
        "change-state-slot",
        "fast-forward",
        "slow-motion",
        "rewind",
    ];

    /// Builds a mapping by asking `binding` for every logical button.
    pub fn collect(mut binding: impl FnMut(&str) -> String) -> Self {
        Self {
            b: binding("b"),
            y: binding("y"),
            select: binding("select"),
            start: binding("start"),
            up: binding("up"),
            down: binding("down"),
            left: binding("left"),
            right: binding("right"),
            a: binding("a"),
            x: binding("x"),
            l: binding("l"),
            r: binding("r"),
            l2: binding("l2"),
            r2: binding("r2"),
            l3: binding("l3"),
            r3: binding("r3"),
            l_stick_up: binding("l-stick-up"),
            l_stick_down: binding("l-stick-down"),
            l_stick_left: binding("l-stick-left"),
            l_stick_right: binding("l-stick-right"),
            r_stick_up: binding("r-stick-up"),
            r_stick_down: binding("r-stick-down"),
            r_stick_left: binding("r-stick-left"),
            r_stick_right: binding("r-stick-right"),
            quick_save_state: binding("quick-save-state"),
            quick_load_state: binding("quick-load-state"),
            change_state_slot: binding("change-state-slot"),
            fast_forward: binding("fast-forward"),
            slow_motion: binding("slow-motion"),
            rewind: binding("rewind"),
        }
    }

    /// Looks up the binding of a logical button by its form name.
    pub fn get(&self, button: &str) -> Option<&str> {
        let value = match button {
            "b" => &self.b,
            "y" => &self.y,
            "select" => &self.select,
            "start" => &self.start,
            "up" => &self.up,
            "down" => &self.down,
            "left" => &self.left,
            "right" => &self.right,
            "a" => &self.a,
            "x" => &self.x,
            "l" => &self.l,
            "r" => &self.r,
            "l2" => &self.l2,
            "r2" => &self.r2,
            "l3" => &self.l3,
            "r3" => &self.r3,
            "l-stick-up" => &self.l_stick_up,
            "l-stick-down" => &self.l_stick_down,
            "l-stick-left" => &self.l_stick_left,
            "l-stick-right" => &self.l_stick_right,
            "r-stick-up" => &self.r_stick_up,
            "r-stick-down" => &self.r_stick_down,
            "r-stick-left" => &self.r_stick_left,
            "r-stick-right" => &self.r_stick_right,
            "quick-save-state" => &self.quick_save_state,
            "quick-load-state" => &self.quick_load_state,
            "change-state-slot" => &self.change_state_slot,
            "fast-forward" => &self.fast_forward,
            "slow-motion" => &self.slow_motion,
            "rewind" => &self.rewind,
            _ => return None,
        };
        Some(value.as_str())
    }
}
