use crate::modules::handlers::{compare::compare, liveness, readiness};
use anyhow::{Context, Result};
use axum::{extract::Extension, routing, Router, Server};
use clap::Args;
use leetcode_compare_libs::{LeetCodeApi, LeetCodeClient};
use std::{env, net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};

/// Public GraphQL endpoint used when LEETCODE_GRAPHQL_URL is not set.
const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql";

#[derive(Debug, Args)]
pub struct ServerArgs {
    #[arg(long)]
    port: Option<u16>,
}

pub async fn run(args: ServerArgs) -> Result<()> {
    let graphql_url = env::var("LEETCODE_GRAPHQL_URL").unwrap_or_else(|_| {
        tracing::warn!(
            "LEETCODE_GRAPHQL_URL environment variable is not set. Default value `{}` will be used.",
            DEFAULT_GRAPHQL_URL
        );
        String::from(DEFAULT_GRAPHQL_URL)
    });

    let client = LeetCodeClient::new(&graphql_url).with_context(|| {
        let message = format!(
            "couldn't create LeetCode client. check the value of LEETCODE_GRAPHQL_URL environment variable: [{}]",
            graphql_url
        );
        tracing::error!(message);
        message
    })?;

    // The upstream being down at startup is not fatal; the readiness probe
    // keeps reporting the state until it recovers.
    if let Err(e) = client.ping().await {
        tracing::warn!(
            "LeetCode GraphQL endpoint {} is not reachable: {:?}",
            graphql_url,
            e
        );
    }

    let app = create_router(client);
    let port = match args.port {
        Some(port) => port,
        None => {
            tracing::warn!("API server will be launched at default port number 8000");
            8000u16
        }
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server start at port {}", port);
    Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to bind server.");

    Ok(())
}

fn create_router(client: LeetCodeClient) -> Router {
    Router::new()
        .route("/api/compare", routing::get(compare))
        .route("/api/liveness", routing::get(liveness))
        .route("/api/readiness", routing::get(readiness))
        .layer(Extension(Arc::new(client)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler.");
    };

    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("SIGINT signal received, starting graceful shutdown.");
}
