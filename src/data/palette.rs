//! Static colour data: the built-in templates, the legacy colour migration
//! table, and the YAML shape for templates defined in `templates.yaml`.

use crate::data::i18n::Language;
use crate::data::mood_level::MoodLevel;
use crate::data::persistence::Persistable;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

pub const DEFAULT_TEMPLATE: &str = "default";

/// Colour written by the synthetic streak filler (the default template's
/// level-1 colour).
pub const SYNTHETIC_MOOD_COLOR: &str = "rgba(144, 238, 144, 0.9)";

/// Hex colours written by early releases, mapped to their RGBA successors.
pub const COLOR_MIGRATIONS: [(&str, &str); 5] = [
    ("#90ee90", "rgba(144, 238, 144, 0.9)"),
    ("#6eb86e", "rgba(120, 220, 180, 0.75)"),
    ("#528f62", "rgba(100, 200, 210, 0.6)"),
    ("#3d5d55", "rgba(140, 180, 220, 0.45)"),
    ("#252525", "rgba(160, 180, 200, 0.3)"),
];

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Labels {
    pub en: String,
    #[serde(default)]
    pub fr: String,
    #[serde(default)]
    pub pt: String,
}

impl Labels {
    /// Label in `language`, or the English label when that one is blank.
    pub fn get(&self, language: Language) -> &str {
        let label = match language {
            Language::En => &self.en,
            Language::Fr => &self.fr,
            Language::Pt => &self.pt,
        };
        if label.is_empty() { &self.en } else { label }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LevelStyle {
    #[serde(rename = "rgba")]
    pub color: String,
    #[serde(default)]
    pub gradient: String,
    pub labels: Labels,
}

/// A named palette mapping each of the five mood levels to a colour.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTemplate {
    pub key: String,
    pub name: String,
    pub text_primary: String,
    pub text_secondary: String,
    /// Indexed by `MoodLevel::index()`.
    pub levels: [LevelStyle; 5],
}

impl ColorTemplate {
    pub fn style(&self, level: MoodLevel) -> &LevelStyle {
        &self.levels[level.index()]
    }

    pub fn color_for(&self, level: MoodLevel) -> &str {
        &self.style(level).color
    }

    /// Level whose colour equals `color` exactly, if any.
    pub fn find_level(&self, color: &str) -> Option<MoodLevel> {
        MoodLevel::ALL
            .into_iter()
            .find(|level| self.levels[level.index()].color == color)
    }
}

struct BuiltinTemplate {
    key: &'static str,
    name: &'static str,
    text_primary: &'static str,
    text_secondary: &'static str,
    // (rgba, gradient) per level, fantastic first
    colors: [(&'static str, &'static str); 5],
}

// [en, fr, pt] per level, shared by every built-in template
const BUILTIN_LABELS: [[&str; 3]; 5] = [
    ["Fantastic", "Fantastique", "Fantastico"],
    ["Fine", "Bien", "Bem"],
    ["Okay", "Okay", "Ok"],
    ["Low", "Bas", "Baixo"],
    ["Down", "Mal", "Mal"],
];

const BUILTIN_TEMPLATES: [BuiltinTemplate; 5] = [
    BuiltinTemplate {
        key: "default",
        name: "Default",
        text_primary: "#2d4a3e",
        text_secondary: "#666",
        colors: [
            (
                "rgba(144, 238, 144, 0.9)",
                "radial-gradient(ellipse at 30% 30%, rgba(200, 245, 200, 0.95), rgba(144, 238, 144, 0.85))",
            ),
            (
                "rgba(120, 220, 180, 0.75)",
                "radial-gradient(ellipse at 30% 30%, rgba(180, 235, 210, 0.85), rgba(120, 220, 180, 0.7))",
            ),
            (
                "rgba(100, 200, 210, 0.6)",
                "radial-gradient(ellipse at 30% 30%, rgba(160, 220, 230, 0.7), rgba(100, 200, 210, 0.55))",
            ),
            (
                "rgba(140, 180, 220, 0.45)",
                "radial-gradient(ellipse at 30% 30%, rgba(180, 210, 240, 0.55), rgba(140, 180, 220, 0.4))",
            ),
            (
                "rgba(160, 180, 200, 0.3)",
                "radial-gradient(ellipse at 30% 30%, rgba(190, 205, 220, 0.4), rgba(160, 180, 200, 0.25))",
            ),
        ],
    },
    BuiltinTemplate {
        key: "ocean",
        name: "Ocean",
        text_primary: "#1e3a5f",
        text_secondary: "#4a6b8a",
        colors: [
            (
                "rgba(100, 200, 255, 0.9)",
                "radial-gradient(ellipse at 30% 30%, rgba(150, 220, 255, 0.95), rgba(100, 200, 255, 0.85))",
            ),
            (
                "rgba(80, 180, 230, 0.75)",
                "radial-gradient(ellipse at 30% 30%, rgba(130, 200, 240, 0.85), rgba(80, 180, 230, 0.7))",
            ),
            (
                "rgba(70, 160, 200, 0.6)",
                "radial-gradient(ellipse at 30% 30%, rgba(110, 180, 220, 0.7), rgba(70, 160, 200, 0.55))",
            ),
            (
                "rgba(60, 140, 180, 0.45)",
                "radial-gradient(ellipse at 30% 30%, rgba(90, 160, 200, 0.55), rgba(60, 140, 180, 0.4))",
            ),
            (
                "rgba(50, 120, 160, 0.3)",
                "radial-gradient(ellipse at 30% 30%, rgba(80, 140, 180, 0.4), rgba(50, 120, 160, 0.25))",
            ),
        ],
    },
    BuiltinTemplate {
        key: "sunset",
        name: "Sunset",
        text_primary: "#5a3a2d",
        text_secondary: "#8a6a5a",
        colors: [
            (
                "rgba(255, 180, 100, 0.9)",
                "radial-gradient(ellipse at 30% 30%, rgba(255, 200, 130, 0.95), rgba(255, 180, 100, 0.85))",
            ),
            (
                "rgba(255, 160, 90, 0.75)",
                "radial-gradient(ellipse at 30% 30%, rgba(255, 185, 115, 0.85), rgba(255, 160, 90, 0.7))",
            ),
            (
                "rgba(240, 140, 100, 0.6)",
                "radial-gradient(ellipse at 30% 30%, rgba(250, 165, 125, 0.7), rgba(240, 140, 100, 0.55))",
            ),
            (
                "rgba(220, 130, 110, 0.45)",
                "radial-gradient(ellipse at 30% 30%, rgba(235, 150, 130, 0.55), rgba(220, 130, 110, 0.4))",
            ),
            (
                "rgba(200, 120, 100, 0.3)",
                "radial-gradient(ellipse at 30% 30%, rgba(215, 135, 115, 0.4), rgba(200, 120, 100, 0.25))",
            ),
        ],
    },
    BuiltinTemplate {
        key: "forest",
        name: "Forest",
        text_primary: "#2d4a2d",
        text_secondary: "#5a6a4a",
        colors: [
            (
                "rgba(120, 200, 100, 0.9)",
                "radial-gradient(ellipse at 30% 30%, rgba(150, 220, 130, 0.95), rgba(120, 200, 100, 0.85))",
            ),
            (
                "rgba(100, 180, 90, 0.75)",
                "radial-gradient(ellipse at 30% 30%, rgba(130, 200, 115, 0.85), rgba(100, 180, 90, 0.7))",
            ),
            (
                "rgba(90, 160, 80, 0.6)",
                "radial-gradient(ellipse at 30% 30%, rgba(115, 180, 105, 0.7), rgba(90, 160, 80, 0.55))",
            ),
            (
                "rgba(80, 140, 70, 0.45)",
                "radial-gradient(ellipse at 30% 30%, rgba(105, 165, 95, 0.55), rgba(80, 140, 70, 0.4))",
            ),
            (
                "rgba(70, 120, 60, 0.3)",
                "radial-gradient(ellipse at 30% 30%, rgba(95, 145, 85, 0.4), rgba(70, 120, 60, 0.25))",
            ),
        ],
    },
    BuiltinTemplate {
        key: "lavender",
        name: "Lavender",
        text_primary: "#4a3a5a",
        text_secondary: "#6a5a7a",
        colors: [
            (
                "rgba(200, 150, 230, 0.9)",
                "radial-gradient(ellipse at 30% 30%, rgba(220, 180, 245, 0.95), rgba(200, 150, 230, 0.85))",
            ),
            (
                "rgba(180, 140, 210, 0.75)",
                "radial-gradient(ellipse at 30% 30%, rgba(200, 165, 225, 0.85), rgba(180, 140, 210, 0.7))",
            ),
            (
                "rgba(160, 130, 190, 0.6)",
                "radial-gradient(ellipse at 30% 30%, rgba(180, 155, 205, 0.7), rgba(160, 130, 190, 0.55))",
            ),
            (
                "rgba(140, 120, 170, 0.45)",
                "radial-gradient(ellipse at 30% 30%, rgba(160, 140, 185, 0.55), rgba(140, 120, 170, 0.4))",
            ),
            (
                "rgba(120, 110, 150, 0.3)",
                "radial-gradient(ellipse at 30% 30%, rgba(140, 125, 165, 0.4), rgba(120, 110, 150, 0.25))",
            ),
        ],
    },
];

/// The built-in templates, `default` first.
pub fn builtin_templates() -> Vec<ColorTemplate> {
    BUILTIN_TEMPLATES
        .iter()
        .map(|builtin| ColorTemplate {
            key: builtin.key.to_string(),
            name: builtin.name.to_string(),
            text_primary: builtin.text_primary.to_string(),
            text_secondary: builtin.text_secondary.to_string(),
            levels: std::array::from_fn(|i| {
                let (color, gradient) = builtin.colors[i];
                let [en, fr, pt] = BUILTIN_LABELS[i];
                LevelStyle {
                    color: color.to_string(),
                    gradient: gradient.to_string(),
                    labels: Labels {
                        en: en.to_string(),
                        fr: fr.to_string(),
                        pt: pt.to_string(),
                    },
                }
            }),
        })
        .collect()
}

/// One template as written in `templates.yaml`. Colours are keyed by mood
/// name (`fantastic`, `fine`, `okay`, `low`, `down`).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TemplateConfig {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub text_primary: String,
    #[serde(default)]
    pub text_secondary: String,
    pub colors: BTreeMap<String, LevelStyle>,
}

impl TemplateConfig {
    pub fn into_template(mut self) -> Result<ColorTemplate> {
        if self.key.trim().is_empty() {
            bail!("template key must not be empty");
        }
        let key = &self.key;
        let colors = &mut self.colors;
        let mut take = |level: MoodLevel| -> Result<LevelStyle> {
            let Some(style) = colors.remove(level.key()) else {
                bail!("template '{}' has no '{}' colour", key, level.key());
            };
            if style.color.trim().is_empty() {
                bail!("template '{}' has a blank '{}' colour", key, level.key());
            }
            Ok(style)
        };
        let levels = [
            take(MoodLevel::Fantastic)?,
            take(MoodLevel::Fine)?,
            take(MoodLevel::Okay)?,
            take(MoodLevel::Low)?,
            take(MoodLevel::Down)?,
        ];
        for unknown in self.colors.keys() {
            warn!(template = %self.key, mood = %unknown, "ignoring unknown mood colour");
        }
        Ok(ColorTemplate {
            name: if self.name.is_empty() { self.key.clone() } else { self.name },
            key: self.key,
            text_primary: self.text_primary,
            text_secondary: self.text_secondary,
            levels,
        })
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct TemplateFile {
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,
}

impl Persistable for TemplateFile {
    fn filename() -> &'static str {
        "templates.yaml"
    }
    fn is_json() -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(color: &str) -> LevelStyle {
        LevelStyle {
            color: color.to_string(),
            gradient: String::new(),
            labels: Labels {
                en: "Label".to_string(),
                ..Labels::default()
            },
        }
    }

    fn full_config(key: &str) -> TemplateConfig {
        let colors = MoodLevel::ALL
            .iter()
            .map(|l| (l.key().to_string(), style(&format!("#00000{}", l.value()))))
            .collect();
        TemplateConfig {
            key: key.to_string(),
            name: "Mono".to_string(),
            text_primary: "#111111".to_string(),
            text_secondary: "#222222".to_string(),
            colors,
        }
    }

    #[test]
    fn test_builtin_templates_order_and_keys() {
        let keys: Vec<String> = builtin_templates().into_iter().map(|t| t.key).collect();
        assert_eq!(keys, vec!["default", "ocean", "sunset", "forest", "lavender"]);
    }

    #[test]
    fn test_builtin_colors_are_unique_across_templates() {
        let mut colors: Vec<String> = builtin_templates()
            .into_iter()
            .flat_map(|t| t.levels.into_iter().map(|s| s.color))
            .collect();
        let total = colors.len();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), total);
    }

    #[test]
    fn test_migration_targets_are_default_template_colors() {
        let default = &builtin_templates()[0];
        for (level, (_, new)) in MoodLevel::ALL.iter().zip(COLOR_MIGRATIONS) {
            assert_eq!(default.color_for(*level), new);
        }
    }

    #[test]
    fn test_synthetic_color_is_default_fantastic() {
        let default = &builtin_templates()[0];
        assert_eq!(default.find_level(SYNTHETIC_MOOD_COLOR), Some(MoodLevel::Fantastic));
    }

    #[test]
    fn test_find_level_unknown_color() {
        let default = &builtin_templates()[0];
        assert_eq!(default.find_level("#ffffff"), None);
    }

    #[test]
    fn test_labels_fall_back_to_english_when_blank() {
        let labels = Labels {
            en: "Fine".to_string(),
            fr: String::new(),
            pt: "Bem".to_string(),
        };
        assert_eq!(labels.get(Language::Fr), "Fine");
        assert_eq!(labels.get(Language::Pt), "Bem");
    }

    #[test]
    fn test_template_config_into_template_orders_levels() {
        let template = full_config("mono").into_template().unwrap();
        assert_eq!(template.key, "mono");
        assert_eq!(template.color_for(MoodLevel::Fantastic), "#000001");
        assert_eq!(template.color_for(MoodLevel::Down), "#000005");
    }

    #[test]
    fn test_template_config_unknown_mood_is_skipped() {
        let mut config = full_config("mono");
        config.colors.insert("great".to_string(), style("#abcdef"));
        let template = config.into_template().unwrap();
        assert_eq!(template.find_level("#abcdef"), None);
        assert_eq!(template.color_for(MoodLevel::Okay), "#000003");
    }

    #[test]
    fn test_template_config_missing_level_is_rejected() {
        let mut config = full_config("mono");
        config.colors.remove("low");
        let err = config.into_template().unwrap_err();
        assert!(format!("{err}").contains("low"));
    }

    #[test]
    fn test_template_file_yaml_parse() {
        let yaml = r##"
templates:
  - key: mono
    name: Mono
    colors:
      fantastic: { rgba: "#000001", labels: { en: Great } }
      fine: { rgba: "#000002", labels: { en: Good } }
      okay: { rgba: "#000003", labels: { en: Meh } }
      low: { rgba: "#000004", labels: { en: Low } }
      down: { rgba: "#000005", labels: { en: Bad } }
"##;
        let file: TemplateFile = serde_norway::from_str(yaml).unwrap();
        assert_eq!(file.templates.len(), 1);
        let template = file.templates[0].clone().into_template().unwrap();
        assert_eq!(template.style(MoodLevel::Okay).labels.get(Language::Fr), "Meh");
    }
}
