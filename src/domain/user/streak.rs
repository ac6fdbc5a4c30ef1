//! Daily learning streak.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive UTC days on which the user completed learning activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    pub last_activity_on: Option<NaiveDate>,
}

impl Streak {
    /// Records activity on `today`.
    ///
    /// Same day leaves the streak unchanged, the following day extends it,
    /// and any longer gap restarts it at one.
    pub fn record(&mut self, today: NaiveDate) {
        match self.last_activity_on {
            Some(last) if last == today => return,
            Some(last) if last.succ_opt() == Some(today) => {
                self.current = self.current.saturating_add(1);
            }
            Some(last) if last > today => return,
            _ => self.current = 1,
        }
        self.last_activity_on = Some(today);
        self.longest = self.longest.max(self.current);
    }

    /// The streak as it stands on `today`: zero if a day was missed.
    pub fn current_on(&self, today: NaiveDate) -> u32 {
        match self.last_activity_on {
            Some(last) if last == today || last.succ_opt() == Some(today) => self.current,
            _ => 0,
        }
    }
}
