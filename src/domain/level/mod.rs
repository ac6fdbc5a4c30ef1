//! Course levels and level sessions.

mod course_level;
mod session;

pub use course_level::{language, Level, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
pub use session::{LevelSession, SessionStatus, MAX_SCORE};
