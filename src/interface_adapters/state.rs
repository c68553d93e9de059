use std::sync::Arc;

use crate::domain::failure::ClientError;
use crate::domain::ports::{KeyValueStore, Navigator, TelemetrySink, ToastSurface, Translator};
use crate::interface_adapters::clients::{ApiClient, HttpSettings};
use crate::interface_adapters::clock::SystemClock;
use crate::interface_adapters::jwt::JwtInspector;
use crate::interface_adapters::telemetry::RemoteTelemetrySink;
use crate::use_cases::error_handler::ErrorHandler;
use crate::use_cases::error_logger::{ErrorLogger, ErrorLoggerConfig};
use crate::use_cases::session::CredentialVault;
use crate::use_cases::stores::{
    ActivitiesStore, AuthStore, CategoriesStore, ConstraintsStore, GroupsStore, ImportStore,
    InsightsStore, TasksStore, TimerStore,
};
use crate::use_cases::toaster::Toaster;
use crate::use_cases::token_refresh::TokenRefreshScheduler;

// Everything the outer layer has to provide.
pub struct AppParts {
    pub http: HttpSettings,
    pub storage: Arc<dyn KeyValueStore>,
    pub surface: Arc<dyn ToastSurface>,
    pub navigator: Arc<dyn Navigator>,
    pub translator: Arc<dyn Translator>,
    pub logger: ErrorLoggerConfig,
}

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ApiClient>,
    pub vault: Arc<CredentialVault>,
    pub errors: Arc<ErrorHandler>,
    pub scheduler: Arc<TokenRefreshScheduler>,
    pub auth: Arc<AuthStore>,
    pub activities: Arc<ActivitiesStore>,
    pub categories: Arc<CategoriesStore>,
    pub groups: Arc<GroupsStore>,
    pub tasks: Arc<TasksStore>,
    pub timer: Arc<TimerStore>,
    pub insights: Arc<InsightsStore>,
    pub constraints: Arc<ConstraintsStore>,
    pub import: Arc<ImportStore>,
}

impl AppState {
    /// Loads persisted credentials and wires the client, handler and stores.
    /// The refresh scheduler is created but not started.
    pub async fn build(parts: AppParts) -> Result<Self, ClientError> {
        let vault = Arc::new(CredentialVault::load(parts.storage).await?);
        let client = Arc::new(ApiClient::new(
            parts.http,
            vault.clone(),
            parts.navigator.clone(),
        )?);

        let logger = Arc::new(ErrorLogger::new(parts.logger));
        if let Some(dsn) = logger.config().dsn {
            let sink: Arc<dyn TelemetrySink> = Arc::new(RemoteTelemetrySink::new(dsn));
            if logger.init_telemetry(sink) {
                tracing::info!("remote telemetry initialized");
            }
        }

        let toaster = Arc::new(Toaster::new());
        toaster.register(parts.surface);
        let errors = Arc::new(ErrorHandler::new(
            logger,
            toaster,
            parts.translator,
            parts.navigator.clone(),
        ));

        let scheduler = Arc::new(TokenRefreshScheduler::new(
            vault.clone(),
            client.clone(),
            Arc::new(JwtInspector),
            Arc::new(SystemClock),
            parts.navigator,
        ));

        Ok(Self {
            auth: Arc::new(AuthStore::new(
                client.clone(),
                client.clone(),
                vault.clone(),
                errors.clone(),
            )),
            activities: Arc::new(ActivitiesStore::new(client.clone(), errors.clone())),
            categories: Arc::new(CategoriesStore::new(client.clone(), errors.clone())),
            groups: Arc::new(GroupsStore::new(client.clone(), errors.clone())),
            tasks: Arc::new(TasksStore::new(client.clone(), errors.clone())),
            timer: Arc::new(TimerStore::new(client.clone(), errors.clone())),
            insights: Arc::new(InsightsStore::new(client.clone(), errors.clone())),
            constraints: Arc::new(ConstraintsStore::new(client.clone(), errors.clone())),
            import: Arc::new(ImportStore::new(client.clone(), errors.clone())),
            scheduler,
            errors,
            vault,
            client,
        })
    }
}
