use chrono::NaiveDate;

/// Length of the run of consecutive logged days ending today, or ending
/// yesterday when today has not been logged yet. Dates after `today` are
/// never consulted.
pub fn streak_ending_at(today: NaiveDate, is_logged: impl Fn(NaiveDate) -> bool) -> u32 {
    let mut cursor = today;
    if !is_logged(cursor) {
        match cursor.pred_opt() {
            Some(yesterday) => cursor = yesterday,
            None => return 0,
        }
    }

    let mut streak = 0;
    while is_logged(cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

/// Bands a streak length into a 0..=4 intensity level.
pub fn streak_heat_level(streak: u32) -> u8 {
    match streak {
        0..=2 => 0,
        3..=6 => 1,
        7..=13 => 2,
        14..=29 => 3,
        _ => 4,
    }
}
