pub mod i18n;
pub mod mood_entry;
pub mod mood_level;
pub mod mood_store;
pub mod palette;
pub mod persistence;
pub mod preferences;
pub mod template_registry;

pub use i18n::Language;
pub use mood_level::MoodLevel;
pub use palette::ColorTemplate;
pub use persistence::KeyValueStore;
pub use preferences::{CalendarView, CounterMode};
pub use template_registry::{ColorTemplateRegistry, PaletteSink};
