use quiz_backend::{
    app,
    config::{get_config, init_config, QuestionSource},
    AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    init_config()?;
    let config = get_config();

    if config.question_source == QuestionSource::Sample {
        tracing::warn!("QUESTION_SOURCE=sample: quiz endpoint serves a fixed sample question");
    } else {
        info!("Quiz questions generated by {}", config.gemini_model);
    }
    info!("Staging uploads in: {}", config.uploads_dir.display());

    let app_state = AppState::new(config)?;
    let app = app(app_state, config);

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("quiz_backend=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.init();
    }
}
