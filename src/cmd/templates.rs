use crate::data::i18n::Language;
use crate::data::{ColorTemplate, ColorTemplateRegistry, KeyValueStore, MoodLevel, PaletteSink};
use crate::tracker::Tracker;
use anyhow::{Result, bail};
use std::path::Path;

pub fn run_list(data_dir: &Path) -> Result<()> {
    let tracker = super::open_tracker(data_dir);
    write_templates(
        tracker.registry(),
        tracker.preferences().language,
        &mut std::io::stdout(),
    )
}

pub fn run_use(data_dir: &Path, id: &str) -> Result<()> {
    let mut tracker = super::open_tracker(data_dir);
    use_template(&mut tracker, id, &mut std::io::stdout())
}

/// Collects the applied palette as printable `level  colour` lines.
#[derive(Default)]
struct Swatches(Vec<String>);

impl PaletteSink for Swatches {
    fn apply_palette(&mut self, template: &ColorTemplate) {
        self.0 = MoodLevel::ALL
            .iter()
            .map(|level| format!("  {:<10} {}", level.key(), template.color_for(*level)))
            .collect();
    }
}

pub(crate) fn use_template<S: KeyValueStore, W: std::io::Write>(
    tracker: &mut Tracker<S>,
    id: &str,
    out: &mut W,
) -> Result<()> {
    let mut swatches = Swatches::default();
    if !tracker.apply_template(id, &mut swatches)? {
        let known: Vec<&str> = tracker
            .registry()
            .templates()
            .iter()
            .map(|t| t.key.as_str())
            .collect();
        bail!("unknown color template '{}' (available: {})", id, known.join(", "));
    }
    writeln!(out, "Active template: {}", tracker.registry().active().name)?;
    for line in swatches.0 {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub(crate) fn write_templates<W: std::io::Write>(
    registry: &ColorTemplateRegistry,
    language: Language,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Color templates")?;
    writeln!(out, "---")?;
    for template in registry.templates() {
        let marker = if template.key == registry.active_template() { "*" } else { " " };
        let labels: Vec<&str> = template
            .levels
            .iter()
            .map(|style| style.labels.get(language))
            .collect();
        writeln!(
            out,
            "{} {:<12} {:<12} {}",
            marker,
            template.key,
            template.name,
            labels.join(" / ")
        )?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} template(s)", registry.templates().len())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::persistence::MemoryStore;
    use chrono::NaiveDate;

    fn tracker() -> Tracker<MemoryStore> {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        Tracker::open(MemoryStore::default(), Vec::new(), today)
    }

    #[test]
    fn test_write_templates_marks_active() {
        let mut buf = Vec::new();
        write_templates(&ColorTemplateRegistry::default(), Language::En, &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("* default"));
        assert!(out.contains("  lavender"));
        assert!(out.contains("Fantastic / Fine / Okay / Low / Down"));
        assert!(out.contains("Total: 5 template(s)"));
    }

    #[test]
    fn test_use_template_prints_palette() {
        let mut t = tracker();
        let mut buf = Vec::new();
        use_template(&mut t, "forest", &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Active template: Forest"));
        assert!(out.contains("fantastic  rgba(120, 200, 100, 0.9)"));
        assert_eq!(t.registry().active_template(), "forest");
    }

    #[test]
    fn test_use_unknown_template_fails() {
        let mut t = tracker();
        let mut buf = Vec::new();
        let err = use_template(&mut t, "neon", &mut buf).unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("neon"));
        assert!(msg.contains("ocean"));
        assert_eq!(t.registry().active_template(), "default");
    }
}
