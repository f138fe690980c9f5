use actix_web::web;
use std::sync::Arc;

use crate::analytics::application::analytics_use_cases::AnalyticsUseCases;
use crate::analytics::application::ports::incoming::use_cases::GetSummaryUseCase;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::use_cases::{
    login_user::ILoginUserUseCase, logout_user::ILogoutUseCase,
    refresh_token::IRefreshTokenUseCase, set_user_status::ISetUserStatusUseCase,
    signin_history::ISigninHistoryUseCase, verify_user_email::IVerifyUserEmailUseCase,
};
use crate::notification::application::notification_use_cases::NotificationUseCases;
use crate::notification::application::ports::incoming::use_cases::ListNotificationsUseCase;
use crate::order::application::order_use_cases::OrderUseCases;
use crate::order::application::ports::incoming::use_cases::{
    CreateOrderUseCase, GetOrderUseCase, UpdatePaymentUseCase,
};
use crate::permission::application::permission_use_cases::PermissionUseCases;
use crate::permission::application::ports::incoming::use_cases::{
    GetPermissionsUseCase, SetPermissionsUseCase,
};
use crate::shared::infrastructure::Database;
use crate::tests::support::auth_helper::jwt_service;
use crate::tests::support::stubs::*;
use crate::tracking::application::ports::incoming::use_cases::{
    AppendTrackStepUseCase, CreateTrackUseCase, DeleteTrackUseCase, GetTrackUseCase,
    ListTracksUseCase,
};
use crate::tracking::application::tracking_use_cases::TrackingUseCases;
use crate::AppState;
use sea_orm::{DatabaseBackend, MockDatabase};

/// `AppState` wired with stubs; each test swaps in the use case it exercises.
pub struct TestAppStateBuilder {
    register_user: Arc<UserRegistrationOrchestrator>,
    verify_user_email: Arc<dyn IVerifyUserEmailUseCase + Send + Sync>,
    login_user: Arc<dyn ILoginUserUseCase + Send + Sync>,
    refresh_token: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    logout_user: Arc<dyn ILogoutUseCase + Send + Sync>,
    signin_history: Arc<dyn ISigninHistoryUseCase + Send + Sync>,
    set_user_status: Arc<dyn ISetUserStatusUseCase + Send + Sync>,
    tracking: TrackingUseCases,
    order: OrderUseCases,
    permission: PermissionUseCases,
    notification: NotificationUseCases,
    analytics: AnalyticsUseCases,
    database: Database,
}

/// Orchestrator around `create` with a real token service and silent side effects.
pub fn registration_orchestrator(create: StubCreateUserUseCase) -> Arc<UserRegistrationOrchestrator> {
    Arc::new(UserRegistrationOrchestrator::new(
        Arc::new(create),
        Arc::new(jwt_service()),
        Arc::new(StubUserEmailNotifier),
        Arc::new(StubNotificationDispatcher),
    ))
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            register_user: registration_orchestrator(StubCreateUserUseCase::ok(
                crate::tests::support::fakes::sample_user("stub@example.com", "+8801700000000"),
            )),
            verify_user_email: Arc::new(StubVerifyUserEmailUseCase),
            login_user: Arc::new(StubLoginUserUseCase),
            refresh_token: Arc::new(StubRefreshTokenUseCase),
            logout_user: Arc::new(StubLogoutUserUseCase),
            signin_history: Arc::new(StubSigninHistoryUseCase),
            set_user_status: Arc::new(StubSetUserStatusUseCase),
            tracking: TrackingUseCases {
                create: Arc::new(StubCreateTrackUseCase),
                append_step: Arc::new(StubAppendTrackStepUseCase),
                get_single: Arc::new(StubGetTrackUseCase),
                get_list: Arc::new(StubListTracksUseCase),
                delete: Arc::new(StubDeleteTrackUseCase),
            },
            order: OrderUseCases {
                create: Arc::new(StubCreateOrderUseCase),
                get_single: Arc::new(StubGetOrderUseCase),
                update_payment: Arc::new(StubUpdatePaymentUseCase),
            },
            permission: PermissionUseCases {
                get: Arc::new(StubGetPermissionsUseCase),
                set: Arc::new(StubSetPermissionsUseCase),
            },
            notification: NotificationUseCases {
                dispatcher: Arc::new(StubNotificationDispatcher),
                list_mine: Arc::new(StubListNotificationsUseCase),
            },
            analytics: AnalyticsUseCases {
                summary: Arc::new(StubGetSummaryUseCase),
            },
            database: Database::from_connection(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            ),
        }
    }
}

impl TestAppStateBuilder {
    // ---- auth ----

    pub fn with_register_user_orchestrator(
        mut self,
        orchestrator: Arc<UserRegistrationOrchestrator>,
    ) -> Self {
        self.register_user = orchestrator;
        self
    }

    pub fn with_verify_user_email(
        mut self,
        uc: impl IVerifyUserEmailUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verify_user_email = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.login_user = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(
        mut self,
        uc: impl IRefreshTokenUseCase + Send + Sync + 'static,
    ) -> Self {
        self.refresh_token = Arc::new(uc);
        self
    }

    pub fn with_logout_user(mut self, uc: impl ILogoutUseCase + Send + Sync + 'static) -> Self {
        self.logout_user = Arc::new(uc);
        self
    }

    pub fn with_signin_history(
        mut self,
        uc: impl ISigninHistoryUseCase + Send + Sync + 'static,
    ) -> Self {
        self.signin_history = Arc::new(uc);
        self
    }

    pub fn with_set_user_status(
        mut self,
        uc: impl ISetUserStatusUseCase + Send + Sync + 'static,
    ) -> Self {
        self.set_user_status = Arc::new(uc);
        self
    }

    // ---- tracking ----

    pub fn with_create_track(mut self, uc: impl CreateTrackUseCase + Send + Sync + 'static) -> Self {
        self.tracking.create = Arc::new(uc);
        self
    }

    pub fn with_append_track_step(
        mut self,
        uc: impl AppendTrackStepUseCase + Send + Sync + 'static,
    ) -> Self {
        self.tracking.append_step = Arc::new(uc);
        self
    }

    pub fn with_get_track(mut self, uc: impl GetTrackUseCase + Send + Sync + 'static) -> Self {
        self.tracking.get_single = Arc::new(uc);
        self
    }

    pub fn with_list_tracks(mut self, uc: impl ListTracksUseCase + Send + Sync + 'static) -> Self {
        self.tracking.get_list = Arc::new(uc);
        self
    }

    pub fn with_delete_track(mut self, uc: impl DeleteTrackUseCase + Send + Sync + 'static) -> Self {
        self.tracking.delete = Arc::new(uc);
        self
    }

    // ---- orders ----

    pub fn with_create_order(mut self, uc: impl CreateOrderUseCase + Send + Sync + 'static) -> Self {
        self.order.create = Arc::new(uc);
        self
    }

    pub fn with_get_order(mut self, uc: impl GetOrderUseCase + Send + Sync + 'static) -> Self {
        self.order.get_single = Arc::new(uc);
        self
    }

    pub fn with_update_payment(
        mut self,
        uc: impl UpdatePaymentUseCase + Send + Sync + 'static,
    ) -> Self {
        self.order.update_payment = Arc::new(uc);
        self
    }

    // ---- permissions, notifications, analytics ----

    pub fn with_get_permissions(
        mut self,
        uc: impl GetPermissionsUseCase + Send + Sync + 'static,
    ) -> Self {
        self.permission.get = Arc::new(uc);
        self
    }

    pub fn with_set_permissions(
        mut self,
        uc: impl SetPermissionsUseCase + Send + Sync + 'static,
    ) -> Self {
        self.permission.set = Arc::new(uc);
        self
    }

    pub fn with_list_notifications(
        mut self,
        uc: impl ListNotificationsUseCase + Send + Sync + 'static,
    ) -> Self {
        self.notification.list_mine = Arc::new(uc);
        self
    }

    pub fn with_analytics(mut self, uc: impl GetSummaryUseCase + Send + Sync + 'static) -> Self {
        self.analytics.summary = Arc::new(uc);
        self
    }

    pub fn with_database(mut self, database: Database) -> Self {
        self.database = database;
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_user_orchestrator: self.register_user,
            verify_user_email_use_case: self.verify_user_email,
            login_user_use_case: self.login_user,
            refresh_token_use_case: self.refresh_token,
            logout_user_use_case: self.logout_user,
            signin_history_use_case: self.signin_history,
            set_user_status_use_case: self.set_user_status,
            tracking: self.tracking,
            order: self.order,
            permission: self.permission,
            notification: self.notification,
            analytics: self.analytics,
            database: self.database,
        })
    }
}
