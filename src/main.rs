mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::db::db::DBClient;
use crate::db::metadb::MetaExt;
use service::{
    deposit_service::DepositService,
    maturation_service::MaturationService,
    multiplier::PayoutCurve,
    notification_service::NotificationService,
    referral_service::ReferralService,
    withdrawal_service::WithdrawalService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub payout_curve: PayoutCurve,
    // Services
    pub referral_service: Arc<ReferralService>,
    pub deposit_service: Arc<DepositService>,
    pub withdrawal_service: Arc<WithdrawalService>,
    pub maturation_service: Arc<MaturationService>,
    pub notification_service: Arc<NotificationService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config, payout_curve: PayoutCurve) -> Self {
        let db_client_arc = Arc::new(db_client);

        let notification_service = Arc::new(NotificationService::new(db_client_arc.clone()));
        let referral_service = Arc::new(ReferralService::new(db_client_arc.clone(), &config));
        let deposit_service = Arc::new(DepositService::new(
            db_client_arc.clone(),
            &config,
            payout_curve,
            referral_service.clone(),
            notification_service.clone(),
        ));
        let withdrawal_service = Arc::new(WithdrawalService::new(
            db_client_arc.clone(),
            &config,
            notification_service.clone(),
        ));
        let maturation_service = Arc::new(MaturationService::new(
            db_client_arc.clone(),
            &config,
            payout_curve,
            notification_service.clone(),
        ));

        Self {
            env: config,
            db_client: db_client_arc,
            payout_curve,
            referral_service,
            deposit_service,
            withdrawal_service,
            maturation_service,
            notification_service,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            println!("✅ Connection to the database is successful!");
            pool
        }
        Err(err) => {
            println!("🔥 Failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = sqlx::migrate!().run(&pool).await {
        println!("🔥 Failed to run database migrations: {:?}", err);
        std::process::exit(1);
    }

    let db_client = DBClient::new(pool);

    // First boot pins the decay epoch; every later boot reads it back.
    let launch = match db_client.init_launch_time(chrono::Utc::now()).await {
        Ok(launch) => launch,
        Err(err) => {
            println!("🔥 Failed to initialize launch time: {:?}", err);
            std::process::exit(1);
        }
    };
    tracing::info!("payout decay epoch: {}", launch);

    let payout_curve = PayoutCurve::new(&config, launch);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST]);

    let app_state = Arc::new(AppState::new(db_client, config.clone(), payout_curve));

    let app = create_router(app_state.clone()).layer(cors);

    println!("🚀 Server is running on http://localhost:{}", config.port);

    // Maturation worker; stops cleanly on CTRL+C.
    let app_state_clone = app_state.clone();
    tokio::spawn(async move {
        service::background_jobs::start_maturation_job(app_state_clone, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await;
    });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
