// ============================================================
// Layer 2 — ServeUseCase
// ============================================================
// Starts the HTTP prediction server:
//
//   Step 1: Load + check the model artifact  (Layer 5 - ml)
//   Step 2: Build the axum router             (Layer 7 - server)
//   Step 3: Bind and serve until Ctrl-C       (tokio runtime)
//
// Step 1 runs before anything binds: with no trained model the
// command exits non-zero instead of starting a server that can
// only answer 503.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::application::config::ServeConfig;
use crate::infra::artifact_store::ArtifactStore;
use crate::ml::predictor::PredictionService;
use crate::server::{build_router, AppState};

pub struct ServeUseCase {
    config: ServeConfig,
}

impl ServeUseCase {
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        // ── Step 1: Load model ────────────────────────────────────────────────
        let store   = ArtifactStore::new(&self.config.model_path);
        let service = PredictionService::load(&store)
            .with_context(|| format!("Cannot start server without a model at '{}'", store.path().display()))?;

        // ── Step 2: Router ────────────────────────────────────────────────────
        let app = build_router(Arc::new(AppState::ready(service)));

        // ── Step 3: Serve ─────────────────────────────────────────────────────
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start the async runtime")?;

        let addr = self.config.listen_addr.clone();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            tracing::info!("Student ML API listening on http://{}", addr);

            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
                .context("HTTP server error")?;

            tracing::info!("Server stopped");
            Ok(())
        })
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
