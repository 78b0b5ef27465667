pub mod debug;
pub mod log;
pub mod root;
pub mod settings;
pub mod show;
pub mod templates;

use crate::calc::calendar;
use crate::data::persistence::FileStore;
use crate::data::template_registry::load_template_configs;
use crate::tracker::Tracker;
use std::path::Path;

/// Opens the store and templates in `data_dir` for today's session.
pub fn open_tracker(data_dir: &Path) -> Tracker<FileStore> {
    Tracker::open(
        FileStore::open(data_dir),
        load_template_configs(data_dir),
        calendar::today(),
    )
}
