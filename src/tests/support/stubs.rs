use async_trait::async_trait;
use uuid::Uuid;

use crate::analytics::application::domain::entities::{
    AnalyticsFilter, AnalyticsResource, AnalyticsSummary,
};
use crate::analytics::application::ports::incoming::use_cases::{
    GetSummaryError, GetSummaryUseCase,
};
use crate::auth::application::domain::entities::{
    ClientInfo, LoginHistoryEntry, PublicUser, User, UserIdentifier,
};
use crate::auth::application::use_cases::{
    create_user::{CreateUserError, ICreateUserUseCase, SignupRequest},
    login_user::{ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse},
    logout_user::{ILogoutUseCase, LogoutError},
    refresh_token::{
        IRefreshTokenUseCase, RefreshTokenError, RefreshTokenRequest, RefreshTokenResponse,
    },
    set_user_status::{ISetUserStatusUseCase, SetUserStatusError},
    signin_history::{ISigninHistoryUseCase, Requester, SigninHistoryError},
    verify_user_email::{
        IVerifyUserEmailUseCase, VerifyEmailOutcome, VerifyEmailRequest, VerifyUserEmailError,
    },
};
use crate::email::application::ports::outgoing::{
    UserEmailNotificationError, UserEmailNotifier, VerificationEmail,
};
use crate::notification::application::domain::entities::{NewNotification, Notification};
use crate::notification::application::ports::incoming::use_cases::{
    DispatchNotificationError, ListNotificationsError, ListNotificationsUseCase,
    NotificationDispatcher,
};
use crate::order::application::domain::entities::Order;
use crate::order::application::domain::payment_update::PaymentUpdate;
use crate::order::application::ports::incoming::use_cases::{
    CreateOrderError, CreateOrderRequest, CreateOrderUseCase, GetOrderError, GetOrderUseCase,
    UpdatePaymentError, UpdatePaymentUseCase,
};
use crate::permission::application::domain::entities::{Permission, PermissionUpdate};
use crate::permission::application::ports::incoming::use_cases::{
    GetPermissionsError, GetPermissionsUseCase, SetPermissionsError, SetPermissionsUseCase,
};
use crate::shared::api::{PageRequest, PageResult};
use crate::tracking::application::domain::entities::{
    AppendTrackStep, Track, TrackListFilter, TrackSort,
};
use crate::tracking::application::ports::incoming::use_cases::{
    AppendTrackStepError, AppendTrackStepUseCase, CreateTrack, CreateTrackError,
    CreateTrackUseCase, DeleteTrackError, DeleteTrackUseCase, GetTrackError, GetTrackUseCase,
    ListTracksError, ListTracksUseCase,
};

// ============================================================================
// Auth
// ============================================================================

#[derive(Clone)]
pub struct StubCreateUserUseCase {
    result: Result<User, CreateUserError>,
}

impl StubCreateUserUseCase {
    pub fn ok(user: User) -> Self {
        Self { result: Ok(user) }
    }

    pub fn err(error: CreateUserError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl ICreateUserUseCase for StubCreateUserUseCase {
    async fn execute(&self, _request: SignupRequest) -> Result<User, CreateUserError> {
        self.result.clone()
    }
}

#[derive(Default, Clone)]
pub struct StubVerifyUserEmailUseCase;

#[async_trait]
impl IVerifyUserEmailUseCase for StubVerifyUserEmailUseCase {
    async fn execute(
        &self,
        _request: VerifyEmailRequest,
    ) -> Result<VerifyEmailOutcome, VerifyUserEmailError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(
        &self,
        _request: LoginRequest,
        _client: ClientInfo,
    ) -> Result<LoginUserResponse, LoginError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubRefreshTokenUseCase;

#[async_trait]
impl IRefreshTokenUseCase for StubRefreshTokenUseCase {
    async fn execute(
        &self,
        _request: RefreshTokenRequest,
    ) -> Result<RefreshTokenResponse, RefreshTokenError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubLogoutUserUseCase;

#[async_trait]
impl ILogoutUseCase for StubLogoutUserUseCase {
    async fn execute(&self, _user_id: Uuid, _client: ClientInfo) -> Result<(), LogoutError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubSigninHistoryUseCase;

#[async_trait]
impl ISigninHistoryUseCase for StubSigninHistoryUseCase {
    async fn execute(
        &self,
        _requester: Requester,
        _account: UserIdentifier,
        _page: PageRequest,
    ) -> Result<PageResult<LoginHistoryEntry>, SigninHistoryError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubSetUserStatusUseCase;

#[async_trait]
impl ISetUserStatusUseCase for StubSetUserStatusUseCase {
    async fn execute(
        &self,
        _user_id: Uuid,
        _is_active: bool,
    ) -> Result<PublicUser, SetUserStatusError> {
        unimplemented!("Not used in this test")
    }
}

/// Accepts every verification email.
#[derive(Default, Clone)]
pub struct StubUserEmailNotifier;

#[async_trait]
impl UserEmailNotifier for StubUserEmailNotifier {
    async fn send_verification_email(
        &self,
        _email: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError> {
        Ok(())
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Stores nothing, echoes the notification back.
#[derive(Default, Clone)]
pub struct StubNotificationDispatcher;

#[async_trait]
impl NotificationDispatcher for StubNotificationDispatcher {
    async fn dispatch(
        &self,
        notification: NewNotification,
    ) -> Result<Notification, DispatchNotificationError> {
        Ok(Notification {
            id: Uuid::new_v4(),
            user_id: notification.user_id,
            kind: notification.kind,
            title: notification.title,
            message: notification.message,
            is_read: false,
            created_at: chrono::Utc::now(),
        })
    }
}

#[derive(Default, Clone)]
pub struct StubListNotificationsUseCase;

#[async_trait]
impl ListNotificationsUseCase for StubListNotificationsUseCase {
    async fn execute(
        &self,
        _user_id: Uuid,
        page: PageRequest,
    ) -> Result<PageResult<Notification>, ListNotificationsError> {
        Ok(PageResult::new(vec![], page, 0))
    }
}

// ============================================================================
// Orders
// ============================================================================

#[derive(Default, Clone)]
pub struct StubCreateOrderUseCase;

#[async_trait]
impl CreateOrderUseCase for StubCreateOrderUseCase {
    async fn execute(
        &self,
        _created_by: Uuid,
        _request: CreateOrderRequest,
    ) -> Result<Order, CreateOrderError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubGetOrderUseCase;

#[async_trait]
impl GetOrderUseCase for StubGetOrderUseCase {
    async fn execute(&self, _requester: Requester, _order_id: Uuid) -> Result<Order, GetOrderError> {
        Err(GetOrderError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct StubUpdatePaymentUseCase;

#[async_trait]
impl UpdatePaymentUseCase for StubUpdatePaymentUseCase {
    async fn execute(
        &self,
        _order_id: Uuid,
        _update: PaymentUpdate,
    ) -> Result<Order, UpdatePaymentError> {
        Err(UpdatePaymentError::NotFound)
    }
}

// ============================================================================
// Tracking
// ============================================================================

#[derive(Default, Clone)]
pub struct StubCreateTrackUseCase;

#[async_trait]
impl CreateTrackUseCase for StubCreateTrackUseCase {
    async fn execute(
        &self,
        _created_by: Uuid,
        _request: CreateTrack,
    ) -> Result<Track, CreateTrackError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubAppendTrackStepUseCase;

#[async_trait]
impl AppendTrackStepUseCase for StubAppendTrackStepUseCase {
    async fn execute(
        &self,
        _caller: Uuid,
        _track_id: &str,
        _request: AppendTrackStep,
    ) -> Result<Track, AppendTrackStepError> {
        Err(AppendTrackStepError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct StubGetTrackUseCase;

#[async_trait]
impl GetTrackUseCase for StubGetTrackUseCase {
    async fn execute(&self, _track_id: &str) -> Result<Track, GetTrackError> {
        Err(GetTrackError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct StubListTracksUseCase;

#[async_trait]
impl ListTracksUseCase for StubListTracksUseCase {
    async fn execute(
        &self,
        _filter: TrackListFilter,
        _sort: TrackSort,
        page: PageRequest,
    ) -> Result<PageResult<Track>, ListTracksError> {
        Ok(PageResult::new(vec![], page, 0))
    }
}

#[derive(Default, Clone)]
pub struct StubDeleteTrackUseCase;

#[async_trait]
impl DeleteTrackUseCase for StubDeleteTrackUseCase {
    async fn execute(&self, _track_id: &str) -> Result<(), DeleteTrackError> {
        Err(DeleteTrackError::NotFound)
    }
}

// ============================================================================
// Permissions and analytics
// ============================================================================

#[derive(Default, Clone)]
pub struct StubGetPermissionsUseCase;

#[async_trait]
impl GetPermissionsUseCase for StubGetPermissionsUseCase {
    async fn execute(
        &self,
        _requester: Requester,
        _user_id: Uuid,
    ) -> Result<Permission, GetPermissionsError> {
        Err(GetPermissionsError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct StubSetPermissionsUseCase;

#[async_trait]
impl SetPermissionsUseCase for StubSetPermissionsUseCase {
    async fn execute(
        &self,
        _granted_by: Uuid,
        _user_id: Uuid,
        _update: PermissionUpdate,
    ) -> Result<Permission, SetPermissionsError> {
        Err(SetPermissionsError::UserNotFound)
    }
}

#[derive(Default, Clone)]
pub struct StubGetSummaryUseCase;

#[async_trait]
impl GetSummaryUseCase for StubGetSummaryUseCase {
    async fn execute(
        &self,
        _resource: AnalyticsResource,
        _filter: AnalyticsFilter,
    ) -> Result<AnalyticsSummary, GetSummaryError> {
        unimplemented!("Not used in this test")
    }
}
