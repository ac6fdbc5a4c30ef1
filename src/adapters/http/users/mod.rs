//! HTTP adapter for profiles, profile images and admin user management.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangePasswordRequest, ProfileImageResponse, UpdateProfileRequest, UserListResponse,
    UserResponse,
};
pub use routes::user_routes;
