use crate::data::i18n::Language;
use crate::data::mood_level::MoodLevel;
use crate::data::palette::{
    ColorTemplate, DEFAULT_TEMPLATE, TemplateConfig, TemplateFile, builtin_templates,
};
use crate::data::persistence::{KeyValueStore, Persistable, keys};
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("unknown color template '{0}'")]
    UnknownTemplate(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Outcome of looking a stored colour up in the template set.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    FoundIn { template: String, level: MoodLevel },
    NotFound,
}

impl Resolution {
    pub fn level(&self) -> Option<MoodLevel> {
        match self {
            Resolution::FoundIn { level, .. } => Some(*level),
            Resolution::NotFound => None,
        }
    }
}

/// Presentation layer notified when a template is applied.
pub trait PaletteSink {
    fn apply_palette(&mut self, template: &ColorTemplate);
}

/// Templates defined in `templates.yaml` under `dir`. A missing file means
/// none; an unreadable one is reported and ignored.
pub fn load_template_configs(dir: &Path) -> Vec<TemplateConfig> {
    match TemplateFile::load_from(dir) {
        Ok(file) => file.templates,
        Err(err) => {
            warn!("ignoring template config: {err:#}");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorTemplateRegistry {
    // never empty; `default` is always first
    templates: Vec<ColorTemplate>,
    active: usize,
}

impl Default for ColorTemplateRegistry {
    fn default() -> Self {
        ColorTemplateRegistry {
            templates: builtin_templates(),
            active: 0,
        }
    }
}

impl ColorTemplateRegistry {
    /// Built-in templates followed by every valid configured one. Configured
    /// templates that are incomplete or reuse an existing key are skipped.
    pub fn with_configured(configs: Vec<TemplateConfig>) -> Self {
        let mut registry = ColorTemplateRegistry::default();
        for config in configs {
            let key = config.key.clone();
            match config.into_template() {
                Ok(template) if registry.get(&template.key).is_some() => {
                    warn!("skipping template '{key}': key already defined");
                }
                Ok(template) => registry.templates.push(template),
                Err(err) => warn!("skipping template '{key}': {err:#}"),
            }
        }
        registry
    }

    /// Selects the persisted active template. Unknown ids fall back to the
    /// default template.
    pub fn load_active<S: KeyValueStore + ?Sized>(&mut self, kv: &S) {
        self.active = 0;
        if let Some(id) = kv.get_string(keys::COLOR_TEMPLATE) {
            match self.position(&id) {
                Some(index) => self.active = index,
                None => warn!("persisted template '{id}' is unknown, using '{DEFAULT_TEMPLATE}'"),
            }
        }
    }

    pub fn templates(&self) -> &[ColorTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&ColorTemplate> {
        self.templates.iter().find(|t| t.key == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.templates.iter().position(|t| t.key == id)
    }

    pub fn active_template(&self) -> &str {
        &self.active().key
    }

    pub fn active(&self) -> &ColorTemplate {
        &self.templates[self.active]
    }

    /// Id of the template after the active one, wrapping around.
    pub fn next_template_id(&self) -> &str {
        &self.templates[(self.active + 1) % self.templates.len()].key
    }

    pub fn set_active_template<S: KeyValueStore + ?Sized>(
        &mut self,
        id: &str,
        kv: &mut S,
    ) -> Result<(), ThemeError> {
        let index = self
            .position(id)
            .ok_or_else(|| ThemeError::UnknownTemplate(id.to_string()))?;
        kv.set(keys::COLOR_TEMPLATE, Value::from(id))?;
        self.active = index;
        Ok(())
    }

    pub fn resolve_in_active(&self, color: &str) -> Resolution {
        let active = self.active();
        match active.find_level(color) {
            Some(level) => Resolution::FoundIn {
                template: active.key.clone(),
                level,
            },
            None => Resolution::NotFound,
        }
    }

    pub fn resolve_in_any(&self, color: &str) -> Resolution {
        self.templates
            .iter()
            .find_map(|t| {
                t.find_level(color).map(|level| Resolution::FoundIn {
                    template: t.key.clone(),
                    level,
                })
            })
            .unwrap_or(Resolution::NotFound)
    }

    /// Active template first, then every template in registry order.
    pub fn resolve(&self, color: &str) -> Resolution {
        match self.resolve_in_active(color) {
            Resolution::NotFound => self.resolve_in_any(color),
            found => found,
        }
    }

    pub fn resolve_level(&self, color: &str) -> MoodLevel {
        self.resolve(color).level().unwrap_or(MoodLevel::NEUTRAL)
    }

    /// Localized label of the level `color` resolves to, or "" when the
    /// colour belongs to no template.
    pub fn resolve_label(&self, color: &str, language: Language) -> String {
        match self.resolve(color) {
            Resolution::FoundIn { template, level } => self
                .get(&template)
                .map(|t| t.style(level).labels.get(language).to_string())
                .unwrap_or_default(),
            Resolution::NotFound => String::new(),
        }
    }

    pub fn color_for_level(&self, level: MoodLevel) -> &str {
        let active = self.active();
        let color = active.color_for(level);
        if color.is_empty() {
            active.color_for(MoodLevel::NEUTRAL)
        } else {
            color
        }
    }

    /// Makes `id` active, persists it and pushes its palette to `sink`.
    /// Unknown ids are reported and leave everything unchanged; returns
    /// whether the template was applied.
    pub fn apply_template<S: KeyValueStore + ?Sized>(
        &mut self,
        id: &str,
        sink: &mut dyn PaletteSink,
        kv: &mut S,
    ) -> anyhow::Result<bool> {
        match self.set_active_template(id, kv) {
            Ok(()) => {
                sink.apply_palette(self.active());
                info!("applied color template: {}", self.active().name);
                Ok(true)
            }
            Err(ThemeError::UnknownTemplate(id)) => {
                error!("template \"{id}\" not found");
                Ok(false)
            }
            Err(ThemeError::Storage(err)) => Err(err),
        }
    }
}
