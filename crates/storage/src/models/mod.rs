mod score_entry;
mod week_window;

pub use score_entry::ScoreEntry;
pub use week_window::WeekWindow;
