//! HTTP handlers for user endpoints.

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use crate::adapters::http::extract::{ApiJson, ApiPath, ApiQuery, PageParams};
use crate::adapters::http::middleware::{RequireAdmin, RequireAuth};
use crate::adapters::http::response::{ApiError, ApiResponse, ApiResult};
use crate::adapters::http::state::AppState;
use crate::application::handlers::user::{
    ChangePasswordCommand, DeleteUserCommand, ImageFile, ListUsersQuery, UpdateProfileCommand,
    UploadProfileImageCommand, MAX_IMAGE_BYTES,
};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};

use super::dto::{
    ChangePasswordRequest, ProfileImageResponse, UpdateProfileRequest, UserListResponse,
    UserResponse,
};

/// Multipart field carrying the image.
const FILE_FIELD: &str = "file";

/// GET /api/users/me
pub async fn get_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> ApiResult<UserResponse> {
    let profile = state.get_profile_handler().handle(user.id).await?;
    Ok(ApiResponse::ok("Profile retrieved", profile.into()))
}

/// PATCH /api/users/me
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<UpdateProfileRequest>,
) -> ApiResult<UserResponse> {
    let updated = state
        .update_profile_handler()
        .handle(UpdateProfileCommand {
            user_id: user.id,
            first_name: req.first_name,
            last_name: req.last_name,
            native_language: req.native_language,
            learning_language: req.learning_language,
        })
        .await?;
    Ok(ApiResponse::ok("Profile updated", updated.into()))
}

/// POST /api/users/me/password
pub async fn change_password(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ApiJson(req): ApiJson<ChangePasswordRequest>,
) -> ApiResult<()> {
    state
        .change_password_handler()
        .handle(ChangePasswordCommand {
            user_id: user.id,
            current_password: req.current_password,
            new_password: req.new_password,
        })
        .await?;
    Ok(ApiResponse::message("Password changed"))
}

/// POST /api/users/me/profile-image (multipart, field `file`)
pub async fn upload_profile_image(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<ProfileImageResponse> {
    let mut multipart = multipart.map_err(|rejection| {
        invalid_file(format!("Expected a multipart upload: {}", rejection.body_text()))
    })?;
    let file = read_image_field(&mut multipart).await?;

    let url = state
        .upload_profile_image_handler()
        .handle(UploadProfileImageCommand {
            user_id: user.id,
            file,
        })
        .await?;
    Ok(ApiResponse::ok(
        "Profile image updated",
        ProfileImageResponse {
            profile_image_url: url,
        },
    ))
}

async fn read_image_field(multipart: &mut Multipart) -> Result<ImageFile, ApiError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let declared_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(ImageFile {
            declared_type,
            bytes: bytes.to_vec(),
        });
    }
    Err(invalid_file(format!("Missing multipart field '{}'", FILE_FIELD)))
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        invalid_file(format!(
            "File must be at most {} MB",
            MAX_IMAGE_BYTES / (1024 * 1024)
        ))
    } else {
        invalid_file(format!("Malformed multipart body: {}", err.body_text()))
    }
}

fn invalid_file(message: String) -> ApiError {
    ApiError(DomainError::new(ErrorCode::InvalidFile, message))
}

/// GET /api/users (admin)
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ApiQuery(params): ApiQuery<PageParams>,
) -> ApiResult<UserListResponse> {
    let page = state
        .list_users_handler()
        .handle(ListUsersQuery {
            page: params.into_request()?,
        })
        .await?;
    Ok(ApiResponse::ok("Users retrieved", page.into()))
}

/// DELETE /api/users/:id (admin)
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<()> {
    state
        .delete_user_handler()
        .handle(DeleteUserCommand {
            actor: admin,
            user_id: UserId::from_uuid(id),
        })
        .await?;
    Ok(ApiResponse::message("User deleted"))
}
