use std::sync::Arc;

use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Context;
use log::{info, warn};

use cm_api::app::{self, AppState};
use cm_api::middleware::cors::create_cors;
use cm_core::{
    AuthService, BcryptHasher, CourseRepository, CourseService, CredentialStore,
    MockCourseRepository, MockCredentialStore, PasswordHasher, TokenService, TokenServiceConfig,
};
use cm_infra::{DatabasePool, MySqlCourseRepository, MySqlCredentialStore};
use cm_shared::config::{AppConfig, StoreBackend};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Missing secrets stop the process before anything is bound
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    env_logger::init_from_env(env_logger::Env::new().default_filter_or(config.logging.level.as_str()));

    info!("Starting OpenLogic API Server ({})", config.environment);

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt))?);
    let hasher: Arc<dyn PasswordHasher> = Arc::new(BcryptHasher::new(config.auth.bcrypt_cost));

    match config.store {
        StoreBackend::Mysql => {
            let pool = DatabasePool::new(config.database.clone())
                .await
                .context("Failed to connect to database")?;
            pool.ensure_schema().await.context("Failed to prepare schema")?;
            info!("Database ready: {}", pool.status());

            let credentials = Arc::new(MySqlCredentialStore::from_pool(&pool));
            let courses = Arc::new(MySqlCourseRepository::from_pool(&pool));
            let state = build_state(credentials, courses, hasher, token_service)?;

            let result = serve(&config, state).await;
            pool.close().await;
            result
        }
        StoreBackend::Memory => {
            if config.environment.is_production() {
                warn!("In-memory store selected in production; all data is lost on restart");
            } else {
                info!("Using in-memory store");
            }

            let credentials = Arc::new(MockCredentialStore::new());
            let courses = Arc::new(MockCourseRepository::new());
            let state = build_state(credentials, courses, hasher, token_service)?;

            serve(&config, state).await
        }
    }
}

fn build_state<C, K>(
    credentials: Arc<C>,
    courses: Arc<K>,
    hasher: Arc<dyn PasswordHasher>,
    token_service: Arc<TokenService>,
) -> anyhow::Result<AppState<C, K>>
where
    C: CredentialStore,
    K: CourseRepository,
{
    let auth_service = AuthService::new(credentials, hasher, token_service)?;
    let course_service = CourseService::new(courses);
    Ok(AppState::new(Arc::new(auth_service), Arc::new(course_service)))
}

async fn serve<C, K>(config: &AppConfig, state: AppState<C, K>) -> anyhow::Result<()>
where
    C: CredentialStore + 'static,
    K: CourseRepository + 'static,
{
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let environment = config.environment;
    let server_config = config.server.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(create_cors(environment, &server_config))
            .wrap(Logger::default())
            .configure(|cfg| app::configure(cfg, &state))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("Server terminated with an error")
}
