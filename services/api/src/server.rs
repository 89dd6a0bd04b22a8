use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySubmissionRepository};
use crate::routes::with_submission_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};
use writer_desk::config::AppConfig;
use writer_desk::error::AppError;
use writer_desk::telemetry;
use writer_desk::workflows::submissions::{SubmissionImporter, SubmissionService};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySubmissionRepository::default());
    let submission_service = Arc::new(SubmissionService::new(repository));

    if let Some(path) = &config.submissions.seed_path {
        let submissions = SubmissionImporter::from_path(path)?;
        match submission_service.seed(submissions) {
            Ok(stored) => info!(stored, path = %path.display(), "submission store seeded"),
            Err(err) => warn!(error = %err, "submission seed skipped"),
        }
    }

    let app = with_submission_routes(submission_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "writer submission desk ready");

    axum::serve(listener, app).await?;
    Ok(())
}
