//! User accounts, credentials and learning streaks.

mod aggregate;
mod streak;
mod values;

pub use aggregate::{hash_token, ResetToken, User};
pub use streak::Streak;
pub use values::{
    check_password, person_name, Email, MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN,
};
