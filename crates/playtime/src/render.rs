// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Named template rendering with the standard page context.
//!
//! Every render gets these variables unless the caller supplied a key of
//! the same name:
//!
//! | name                 | value                                          |
//! |----------------------|------------------------------------------------|
//! | `split_description`  | function splitting a string on `\n`            |
//! | `netplay_enabled`    | process-wide netplay switch                    |
//! | `localization_lang`  | language negotiated for this request           |
//! | `localization_list`  | all supported language codes                   |
//! | `loc`                | `loc(key, ...args)` bound to that language     |

use crate::engine::TemplateEngine;
use crate::error::{PlaytimeError, Result};
use crate::localization::{LanguageHints, Localization};
use crate::resolver::ResourceResolver;
use minijinja::value::{Rest, Value, ValueKind};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Rendering options fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    /// Directory of the templates inside the virtual tree.
    pub root: String,
    /// File extension appended to logical names.
    pub extension: String,
    /// Value of `netplay_enabled` when the caller does not set it.
    pub netplay_enabled: bool,
    /// Compile on every render instead of caching.
    pub debug: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            root: "templates".to_string(),
            extension: "html".to_string(),
            netplay_enabled: false,
            debug: false,
        }
    }
}

/// Renders logical template names into HTML.
pub struct Renderer {
    engine: TemplateEngine,
    config: RendererConfig,
    localization: Arc<Localization>,
}

impl Renderer {
    /// Creates a renderer. `config.debug` picks the cache strategy.
    pub fn new<R: ResourceResolver>(
        resolver: R,
        config: RendererConfig,
        localization: Arc<Localization>,
    ) -> Self {
        if config.debug {
            tracing::info!("Template debug mode: templates are compiled on every render");
        }

        Self {
            engine: TemplateEngine::for_mode(resolver, config.debug),
            config,
            localization,
        }
    }

    /// Rendering options.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// The localization tables used by `loc`.
    pub fn localization(&self) -> &Localization {
        &self.localization
    }

    /// The underlying engine.
    pub fn engine(&self) -> &TemplateEngine {
        &self.engine
    }

    /// Maps a logical name to its path: `{root}{sep}{name}.{extension}`.
    pub fn resolve_template_name(&self, name: &str) -> String {
        format!(
            "{}{}{}.{}",
            self.config.root,
            std::path::MAIN_SEPARATOR,
            name,
            self.config.extension
        )
    }

    /// Renders `name` in the language negotiated from `hints`.
    ///
    /// `variables` must be a map; `none` and undefined count as empty.
    pub fn render(&self, name: &str, variables: Value, hints: &LanguageHints) -> Result<String> {
        let lang = self.localization.negotiate(hints);
        self.render_in(name, variables, &lang)
    }

    /// Renders `name` in an explicit language.
    pub fn render_in(&self, name: &str, variables: Value, lang: &str) -> Result<String> {
        let mut context = self.standard_context(lang);

        match variables.kind() {
            ValueKind::Undefined | ValueKind::None => {}
            ValueKind::Map => {
                for key in variables.try_iter()? {
                    let value = variables.get_item(&key)?;
                    let key = match key.as_str() {
                        Some(s) => s.to_string(),
                        None => key.to_string(),
                    };
                    context.insert(key, value);
                }
            }
            other => {
                return Err(PlaytimeError::InvalidInput(format!(
                    "template variables must be a map, got {}",
                    other
                )))
            }
        }

        let path = self.resolve_template_name(name);
        tracing::debug!(template = %path, lang, "Rendering template");

        let template = self.engine.compile_entry(&path)?;
        template.render(Value::from(context))
    }

    fn standard_context(&self, lang: &str) -> BTreeMap<String, Value> {
        let mut context = BTreeMap::new();

        context.insert(
            "split_description".to_string(),
            Value::from_function(|text: Option<String>| -> Vec<String> {
                text.map(|t| t.split('\n').map(str::to_string).collect())
                    .unwrap_or_default()
            }),
        );
        context.insert(
            "netplay_enabled".to_string(),
            Value::from(self.config.netplay_enabled),
        );
        context.insert("localization_lang".to_string(), Value::from(lang));
        context.insert(
            "localization_list".to_string(),
            Value::from(self.localization.list()),
        );

        let localization = Arc::clone(&self.localization);
        let bound_lang = lang.to_string();
        context.insert(
            "loc".to_string(),
            Value::from_function(move |key: String, args: Rest<Value>| -> String {
                let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                localization.localize(&bound_lang, &key, &args)
            }),
        );

        context
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
