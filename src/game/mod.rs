//! Game sessions, history views and save files

pub mod history;
pub mod save;
mod session;

pub use history::GuessRecord;
pub use save::{PersistenceError, SaveFormatError, load_from_file, save_to_file};
pub use session::{
    GameSession, Phase, SessionError, TotalTurns, TurnOutcome, TurnStatus, TurnsSetting,
};
