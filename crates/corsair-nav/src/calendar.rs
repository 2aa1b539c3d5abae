//! Game calendar arithmetic. Years are 365 days; February always has 28.

use corsair_core::enums::Season;
use corsair_core::types::{GameDate, DAYS_IN_MONTH};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Date the campaign opens on.
pub const START_DATE: GameDate = GameDate {
    year: 1692,
    month: 3,
    day: 15,
};

fn days_in(month: u32) -> u32 {
    DAYS_IN_MONTH[(month.clamp(1, 12) - 1) as usize]
}

/// Advance `date` by `days`, rolling months and years forward.
pub fn advance_date(date: GameDate, days: u32) -> GameDate {
    let mut next = date;
    next.day += days;
    while next.day > days_in(next.month) {
        next.day -= days_in(next.month);
        next.month += 1;
        if next.month > 12 {
            next.month = 1;
            next.year += 1;
        }
    }
    next
}

/// Long-form date for HUD text, e.g. "March 15, 1692".
pub fn format_date(date: &GameDate) -> String {
    let name = MONTH_NAMES[(date.month.clamp(1, 12) - 1) as usize];
    format!("{} {}, {}", name, date.day, date.year)
}

/// December through May is the dry season.
pub fn season_for(date: &GameDate) -> Season {
    if date.month >= 12 || date.month <= 5 {
        Season::Dry
    } else {
        Season::Wet
    }
}
