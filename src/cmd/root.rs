use crate::ui::calendar_view::{App, run_app};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use std::path::Path;
use tracing::info;

pub fn run(data_dir: &Path) -> Result<()> {
    let tracker = super::open_tracker(data_dir);

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    info!(dir = %data_dir.display(), "starting interactive calendar");

    let mut app = App::new(tracker);
    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    result
}
