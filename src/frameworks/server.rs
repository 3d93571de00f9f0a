// Framework bootstrap for the arcade backend.

use crate::frameworks::{config, db};
use crate::interface_adapters::clients::dictionary::DictionaryClient;
use crate::interface_adapters::clients::host::HostClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::{
    AppState, BuiltinWordList, InMemoryScoreStore, PostgresScoreStore, SystemClock,
};

use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state().await?;

    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

async fn build_state() -> Result<AppState> {
    // The backend is chosen once at startup; there is no runtime fallback
    // between stores, so a broken database fails loudly here.
    let store: Arc<dyn crate::domain::ports::ScoreStore> = match config::leaderboard_store() {
        config::StoreKind::Postgres => {
            let database_url = config::database_url().ok_or_else(|| {
                std::io::Error::other("LEADERBOARD_STORE=postgres requires DATABASE_URL")
            })?;
            let pool = db::connect_pool(&database_url)
                .await
                .map_err(|e| std::io::Error::other(format!("failed to connect to db: {e}")))?;
            db::run_migrations(&pool)
                .await
                .map_err(|e| std::io::Error::other(format!("failed to run migrations: {e}")))?;
            tracing::info!("leaderboard store: postgres");
            Arc::new(PostgresScoreStore { db: pool })
        }
        config::StoreKind::Memory => {
            tracing::info!("leaderboard store: memory");
            Arc::new(InMemoryScoreStore::default())
        }
    };

    let host_api_url = config::host_api_url();
    let host_api_timeout = config::host_api_timeout();
    let publisher = HostClient::new(host_api_url.clone(), host_api_timeout)
        .map_err(|e| std::io::Error::other(format!("failed to initialize host client: {e}")))?;
    tracing::debug!(
        host_api_url = %host_api_url,
        host_api_timeout_ms = host_api_timeout.as_millis(),
        "host client configured"
    );

    let word_judge: Arc<dyn crate::domain::ports::WordJudge> = match config::dictionary_url() {
        Some(url) => {
            let client = DictionaryClient::new(url.clone(), config::host_api_timeout()).map_err(
                |e| std::io::Error::other(format!("failed to initialize dictionary client: {e}")),
            )?;
            tracing::debug!(dictionary_url = %url, "remote dictionary configured");
            Arc::new(client)
        }
        None => Arc::new(BuiltinWordList),
    };

    // Fail at startup on a bad solution word, like a broken database would.
    let solution_word = config::word_of_the_day();
    if !crate::use_cases::word_check::is_valid_word(&solution_word) {
        return Err(std::io::Error::other(format!(
            "WORD_OF_THE_DAY must be five ascii letters, got {solution_word:?}"
        )));
    }

    Ok(AppState {
        store,
        publisher: Arc::new(publisher),
        word_judge,
        clock: Arc::new(SystemClock),
        solution_word: Arc::from(solution_word.as_str()),
        session_settings: config::default_session_settings(),
    })
}
