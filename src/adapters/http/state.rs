//! Shared application state.

use std::sync::Arc;

use crate::application::handlers::auth::{
    ForgotPasswordHandler, LoginHandler, RefreshTokenHandler, ResetLinkSettings,
    ResetPasswordHandler, SignupHandler,
};
use crate::application::handlers::feedback::{
    ListFeedbackHandler, ResolveFeedbackHandler, SubmitFeedbackHandler,
};
use crate::application::handlers::forum::{
    CreateThreadHandler, DeleteReplyHandler, DeleteThreadHandler, GetThreadHandler,
    ListThreadsHandler, ReplyHandler,
};
use crate::application::handlers::level::{
    CompleteSessionHandler, CreateLevelHandler, DeleteLevelHandler, GetLevelHandler,
    ListLevelsHandler, ListSessionsHandler, StartSessionHandler,
};
use crate::application::handlers::question::{
    AnswerDailyChallengeHandler, AnswerQuestionHandler, CreateQuestionHandler,
    DailyChallengeHandler, DeleteQuestionHandler, GetQuestionHandler, ListLevelQuestionsHandler,
};
use crate::application::handlers::subscription::{
    CancelSubscriptionHandler, GetSubscriptionHandler, SubscribeHandler,
};
use crate::application::handlers::user::{
    ChangePasswordHandler, DeleteUserHandler, GetProfileHandler, ListUsersHandler,
    UpdateProfileHandler, UploadProfileImageHandler,
};
use crate::application::handlers::voice_ai::{
    ListVoiceAttemptsHandler, SubmitVoiceAttemptHandler,
};
use crate::ports::{
    EmailSender, FeedbackRepository, ForumRepository, ImageStorage, LevelRepository,
    LevelSessionRepository, PasswordHasher, PayloadCipher, QuestionRepository, SessionValidator,
    SubscriptionRepository, TokenIssuer, UserRepository, VoiceAttemptRepository,
};

/// Dependencies shared by every request.
///
/// Cloned per request; every field is an `Arc` so cloning is cheap.
/// Application handlers are built on demand from these ports.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub levels: Arc<dyn LevelRepository>,
    pub level_sessions: Arc<dyn LevelSessionRepository>,
    pub questions: Arc<dyn QuestionRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub forum: Arc<dyn ForumRepository>,
    pub feedback: Arc<dyn FeedbackRepository>,
    pub voice_attempts: Arc<dyn VoiceAttemptRepository>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub payload_cipher: Arc<dyn PayloadCipher>,
    pub email_sender: Arc<dyn EmailSender>,
    pub image_storage: Arc<dyn ImageStorage>,
    pub reset_link: ResetLinkSettings,
}

impl AppState {
    // Auth

    pub fn signup_handler(&self) -> SignupHandler {
        SignupHandler::new(
            self.users.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.users.clone(),
            self.password_hasher.clone(),
            self.token_issuer.clone(),
        )
    }

    pub fn forgot_password_handler(&self) -> ForgotPasswordHandler {
        ForgotPasswordHandler::new(
            self.users.clone(),
            self.payload_cipher.clone(),
            self.email_sender.clone(),
            self.reset_link.clone(),
        )
    }

    pub fn reset_password_handler(&self) -> ResetPasswordHandler {
        ResetPasswordHandler::new(
            self.users.clone(),
            self.payload_cipher.clone(),
            self.password_hasher.clone(),
        )
    }

    pub fn refresh_token_handler(&self) -> RefreshTokenHandler {
        RefreshTokenHandler::new(self.users.clone(), self.token_issuer.clone())
    }

    // Users

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.users.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.users.clone(), self.password_hasher.clone())
    }

    pub fn upload_profile_image_handler(&self) -> UploadProfileImageHandler {
        UploadProfileImageHandler::new(self.users.clone(), self.image_storage.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.users.clone())
    }

    // Levels and sessions

    pub fn create_level_handler(&self) -> CreateLevelHandler {
        CreateLevelHandler::new(self.levels.clone())
    }

    pub fn list_levels_handler(&self) -> ListLevelsHandler {
        ListLevelsHandler::new(self.levels.clone())
    }

    pub fn get_level_handler(&self) -> GetLevelHandler {
        GetLevelHandler::new(self.levels.clone())
    }

    pub fn delete_level_handler(&self) -> DeleteLevelHandler {
        DeleteLevelHandler::new(self.levels.clone())
    }

    pub fn start_session_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.levels.clone(), self.level_sessions.clone())
    }

    pub fn complete_session_handler(&self) -> CompleteSessionHandler {
        CompleteSessionHandler::new(self.level_sessions.clone(), self.users.clone())
    }

    pub fn list_sessions_handler(&self) -> ListSessionsHandler {
        ListSessionsHandler::new(self.level_sessions.clone())
    }

    // Questions

    pub fn create_question_handler(&self) -> CreateQuestionHandler {
        CreateQuestionHandler::new(self.levels.clone(), self.questions.clone())
    }

    pub fn list_level_questions_handler(&self) -> ListLevelQuestionsHandler {
        ListLevelQuestionsHandler::new(self.levels.clone(), self.questions.clone())
    }

    pub fn get_question_handler(&self) -> GetQuestionHandler {
        GetQuestionHandler::new(self.questions.clone())
    }

    pub fn delete_question_handler(&self) -> DeleteQuestionHandler {
        DeleteQuestionHandler::new(self.questions.clone())
    }

    pub fn answer_question_handler(&self) -> AnswerQuestionHandler {
        AnswerQuestionHandler::new(self.questions.clone())
    }

    pub fn daily_challenge_handler(&self) -> DailyChallengeHandler {
        DailyChallengeHandler::new(self.questions.clone())
    }

    pub fn answer_daily_challenge_handler(&self) -> AnswerDailyChallengeHandler {
        AnswerDailyChallengeHandler::new(self.questions.clone(), self.users.clone())
    }

    // Subscriptions

    pub fn get_subscription_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.subscriptions.clone())
    }

    pub fn subscribe_handler(&self) -> SubscribeHandler {
        SubscribeHandler::new(self.subscriptions.clone())
    }

    pub fn cancel_subscription_handler(&self) -> CancelSubscriptionHandler {
        CancelSubscriptionHandler::new(self.subscriptions.clone())
    }

    // Forum

    pub fn create_thread_handler(&self) -> CreateThreadHandler {
        CreateThreadHandler::new(self.forum.clone())
    }

    pub fn list_threads_handler(&self) -> ListThreadsHandler {
        ListThreadsHandler::new(self.forum.clone())
    }

    pub fn get_thread_handler(&self) -> GetThreadHandler {
        GetThreadHandler::new(self.forum.clone())
    }

    pub fn delete_thread_handler(&self) -> DeleteThreadHandler {
        DeleteThreadHandler::new(self.forum.clone())
    }

    pub fn reply_handler(&self) -> ReplyHandler {
        ReplyHandler::new(self.forum.clone())
    }

    pub fn delete_reply_handler(&self) -> DeleteReplyHandler {
        DeleteReplyHandler::new(self.forum.clone())
    }

    // Feedback

    pub fn submit_feedback_handler(&self) -> SubmitFeedbackHandler {
        SubmitFeedbackHandler::new(self.feedback.clone())
    }

    pub fn list_feedback_handler(&self) -> ListFeedbackHandler {
        ListFeedbackHandler::new(self.feedback.clone())
    }

    pub fn resolve_feedback_handler(&self) -> ResolveFeedbackHandler {
        ResolveFeedbackHandler::new(self.feedback.clone())
    }

    // Voice AI

    pub fn submit_voice_attempt_handler(&self) -> SubmitVoiceAttemptHandler {
        SubmitVoiceAttemptHandler::new(self.voice_attempts.clone())
    }

    pub fn list_voice_attempts_handler(&self) -> ListVoiceAttemptsHandler {
        ListVoiceAttemptsHandler::new(self.voice_attempts.clone())
    }
}
