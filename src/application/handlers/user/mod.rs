//! Profile management and admin user administration.

mod change_password;
mod manage_users;
mod profile;
mod upload_profile_image;

pub use change_password::{ChangePasswordCommand, ChangePasswordHandler};
pub use manage_users::{DeleteUserCommand, DeleteUserHandler, ListUsersHandler, ListUsersQuery};
pub use profile::{GetProfileHandler, UpdateProfileCommand, UpdateProfileHandler};
pub use upload_profile_image::{
    inspect_image, ImageFile, UploadProfileImageCommand, UploadProfileImageHandler,
    MAX_IMAGE_BYTES,
};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

pub(crate) async fn load_user(
    users: &dyn UserRepository,
    id: &UserId,
) -> Result<User, DomainError> {
    users
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found(ErrorCode::UserNotFound, "User not found"))
}
