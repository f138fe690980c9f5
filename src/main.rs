pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::{analytics, auth, email, notification, order, permission, tracking};

use crate::analytics::adapter::outgoing::AnalyticsQueryPostgres;
use crate::analytics::application::analytics_use_cases::AnalyticsUseCases;
use crate::analytics::application::service::GetSummaryService;
use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::adapter::outgoing::login_history_postgres::LoginHistoryPostgres;
use crate::auth::adapter::outgoing::security::BcryptHasher;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::helpers::UserIdentityResolver;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider, UserQuery};
use crate::auth::application::use_cases::{
    create_user::{CreateUserUseCase, ICreateUserUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
    refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase},
    set_user_status::{ISetUserStatusUseCase, SetUserStatusUseCase},
    signin_history::{ISigninHistoryUseCase, SigninHistoryUseCase},
    verify_user_email::{IVerifyUserEmailUseCase, VerifyUserEmailUseCase},
};
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::ports::outgoing::{EmailSender, UserEmailNotifier};
use crate::email::application::services::UserEmailService;
use crate::notification::adapter::outgoing::NotificationRepositoryPostgres;
use crate::notification::application::notification_use_cases::NotificationUseCases;
use crate::notification::application::ports::incoming::use_cases::NotificationDispatcher;
use crate::notification::application::service::{
    DispatchNotificationService, ListNotificationsService,
};
use crate::order::adapter::outgoing::{OrderQueryPostgres, OrderRepositoryPostgres};
use crate::order::application::order_use_cases::OrderUseCases;
use crate::order::application::service::{
    CreateOrderService, GetOrderService, UpdatePaymentService,
};
use crate::permission::adapter::outgoing::PermissionRepositoryPostgres;
use crate::permission::application::permission_use_cases::PermissionUseCases;
use crate::permission::application::service::{GetPermissionsService, SetPermissionsService};
use crate::shared::api::{custom_json_config, custom_query_config};
use crate::shared::config::{load_env_files, AppConfig};
use crate::shared::infrastructure::cors::cors;
use crate::shared::infrastructure::Database;
use crate::tracking::adapter::outgoing::{TrackQueryPostgres, TrackRepositoryPostgres};
use crate::tracking::application::service::{
    AppendTrackStepService, CreateTrackService, DeleteTrackService, GetTrackService,
    ListTracksService,
};
use crate::tracking::application::tracking_use_cases::TrackingUseCases;

use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_user_orchestrator: Arc<UserRegistrationOrchestrator>,
    pub verify_user_email_use_case: Arc<dyn IVerifyUserEmailUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub refresh_token_use_case: Arc<dyn IRefreshTokenUseCase + Send + Sync>,
    pub logout_user_use_case: Arc<dyn ILogoutUseCase + Send + Sync>,
    pub signin_history_use_case: Arc<dyn ISigninHistoryUseCase + Send + Sync>,
    pub set_user_status_use_case: Arc<dyn ISetUserStatusUseCase + Send + Sync>,
    pub tracking: TrackingUseCases,
    pub order: OrderUseCases,
    pub permission: PermissionUseCases,
    pub notification: NotificationUseCases,
    pub analytics: AnalyticsUseCases,
    pub database: Database,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let rust_env = load_env_files();
    let config = AppConfig::from_env(rust_env)?;

    let database = Database::connect(&config.database_url, &config.pool)
        .await
        .context("Failed to connect to database")?;
    let db = database.connection();

    Migrator::up(&*db, None)
        .await
        .context("Failed to apply migrations")?;
    info!("Migrations applied");

    // Outgoing adapters
    let user_query = UserQueryPostgres::new(Arc::clone(&db));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db));
    let login_history = LoginHistoryPostgres::new(Arc::clone(&db));
    let order_query = OrderQueryPostgres::new(Arc::clone(&db));
    let order_repo = OrderRepositoryPostgres::new(Arc::clone(&db));
    let track_query = TrackQueryPostgres::new(Arc::clone(&db));
    let track_repo = TrackRepositoryPostgres::new(Arc::clone(&db));
    let notification_repo = NotificationRepositoryPostgres::new(Arc::clone(&db));
    let permission_repo = PermissionRepositoryPostgres::new(Arc::clone(&db));
    let analytics_query = AnalyticsQueryPostgres::new(Arc::clone(&db));

    // Security and email
    let jwt_service = JwtTokenService::new(config.jwt.clone());
    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let password_hasher: Arc<dyn PasswordHasher + Send + Sync> = if config.rust_env == "test" {
        Arc::new(BcryptHasher::with_cost(4))
    } else {
        Arc::new(BcryptHasher::default())
    };

    let smtp_sender = SmtpEmailSender::from_config(&config.smtp, &config.email_from)
        .context("Failed to configure SMTP transport")?;
    let email_sender: Arc<dyn EmailSender + Send + Sync> = Arc::new(smtp_sender);
    let email_notifier: Arc<dyn UserEmailNotifier + Send + Sync> = Arc::new(
        UserEmailService::new(email_sender, config.app_base_url.clone()),
    );

    // Notifications
    let dispatcher: Arc<dyn NotificationDispatcher + Send + Sync> =
        Arc::new(DispatchNotificationService::new(notification_repo.clone()));
    let notification = NotificationUseCases {
        dispatcher: Arc::clone(&dispatcher),
        list_mine: Arc::new(ListNotificationsService::new(notification_repo)),
    };

    // Auth
    let create_user: Arc<dyn ICreateUserUseCase + Send + Sync> = Arc::new(CreateUserUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        Arc::clone(&password_hasher),
    ));
    let register_user_orchestrator = UserRegistrationOrchestrator::new(
        create_user,
        Arc::clone(&token_provider),
        email_notifier,
        Arc::clone(&dispatcher),
    );
    let login_user_use_case = LoginUserUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        login_history.clone(),
        password_hasher,
        Arc::clone(&token_provider),
    );
    let refresh_token_use_case = RefreshTokenUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        Arc::clone(&token_provider),
    );
    let logout_user_use_case = LogoutUseCase::new(user_query.clone(), login_history.clone());
    let verify_user_email_use_case = VerifyUserEmailUseCase::new(user_query.clone(), user_repo.clone());
    let set_user_status_use_case = SetUserStatusUseCase::new(user_repo);

    let user_query_arc: Arc<dyn UserQuery + Send + Sync> = Arc::new(user_query.clone());
    let signin_history_use_case =
        SigninHistoryUseCase::new(UserIdentityResolver::new(user_query_arc), login_history);

    // Orders and tracking
    let order = OrderUseCases {
        create: Arc::new(CreateOrderService::new(
            order_repo.clone(),
            Arc::clone(&dispatcher),
        )),
        get_single: Arc::new(GetOrderService::new(order_query.clone(), user_query.clone())),
        update_payment: Arc::new(UpdatePaymentService::new(order_repo)),
    };

    let tracking = TrackingUseCases {
        create: Arc::new(CreateTrackService::new(track_repo.clone(), order_query)),
        append_step: Arc::new(AppendTrackStepService::new(track_repo.clone())),
        get_single: Arc::new(GetTrackService::new(track_query.clone())),
        get_list: Arc::new(ListTracksService::new(track_query)),
        delete: Arc::new(DeleteTrackService::new(track_repo)),
    };

    // Permissions and analytics
    let permission = PermissionUseCases {
        get: Arc::new(GetPermissionsService::new(permission_repo.clone())),
        set: Arc::new(SetPermissionsService::new(permission_repo, user_query)),
    };
    let analytics = AnalyticsUseCases {
        summary: Arc::new(GetSummaryService::new(analytics_query)),
    };

    let state = AppState {
        register_user_orchestrator: Arc::new(register_user_orchestrator),
        verify_user_email_use_case: Arc::new(verify_user_email_use_case),
        login_user_use_case: Arc::new(login_user_use_case),
        refresh_token_use_case: Arc::new(refresh_token_use_case),
        logout_user_use_case: Arc::new(logout_user_use_case),
        signin_history_use_case: Arc::new(signin_history_use_case),
        set_user_status_use_case: Arc::new(set_user_status_use_case),
        tracking,
        order,
        permission,
        notification,
        analytics,
        database: database.clone(),
    };

    let server_url = config.bind_address();
    info!(address = %server_url, env = %config.rust_env, "Server listening");

    HttpServer::new(move || {
        App::new()
            .wrap(from_fn(cors))
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(server_url)?
    .run()
    .await?;

    database.close().await;
    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_user_email_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::refresh_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::logout_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::signin_history_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::set_user_status_handler);
    // Tracking
    cfg.service(crate::tracking::adapter::incoming::web::routes::list_tracks_handler);
    cfg.service(crate::tracking::adapter::incoming::web::routes::create_track_handler);
    cfg.service(crate::tracking::adapter::incoming::web::routes::get_track_handler);
    cfg.service(crate::tracking::adapter::incoming::web::routes::append_track_step_handler);
    cfg.service(crate::tracking::adapter::incoming::web::routes::delete_track_handler);
    // Orders
    cfg.service(crate::order::adapter::incoming::web::routes::create_order_handler);
    cfg.service(crate::order::adapter::incoming::web::routes::get_order_handler);
    cfg.service(crate::order::adapter::incoming::web::routes::update_payment_handler);
    // Permissions
    cfg.service(crate::permission::adapter::incoming::web::routes::get_permissions_handler);
    cfg.service(crate::permission::adapter::incoming::web::routes::set_permissions_handler);
    // Notifications
    cfg.service(crate::notification::adapter::incoming::web::routes::list_notifications_handler);
    // Analytics
    cfg.service(crate::analytics::adapter::incoming::web::routes::get_summary_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
