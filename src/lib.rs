pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod stores;

use std::sync::Arc;

use redis::aio::ConnectionManager;
use sqlx::PgPool;

use crate::config::Config;
use crate::services::{
    analytics_service::AnalyticsService, completion_sweeper::CompletionSweeper,
    export_service::ExportService, grading_service::GradingService,
    notification_service::NotificationService, quiz_service::QuizService,
    transcript_service::TranscriptService,
};
use crate::stores::{
    answer_keys::PgAnswerKeyStore, members::PgMemberStore, results::PgResultStore,
    transcripts::RedisTranscriptCache, Stores,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub pool: PgPool,
    pub stores: Stores,
    pub grading_service: GradingService,
    pub quiz_service: QuizService,
    pub analytics_service: AnalyticsService,
    pub transcript_service: TranscriptService,
    pub notification_service: NotificationService,
    pub export_service: ExportService,
}

impl AppState {
    /// Wires the Postgres and Redis adapters into every service.
    pub fn new(config: Config, pool: PgPool, cache: ConnectionManager) -> Self {
        let notification_service =
            NotificationService::new(pool.clone(), config.reminder_window_hours);
        let stores = Stores {
            answer_keys: Arc::new(PgAnswerKeyStore::new(pool.clone())),
            results: Arc::new(PgResultStore::new(pool.clone())),
            members: Arc::new(PgMemberStore::new(pool.clone())),
            transcripts: Arc::new(RedisTranscriptCache::new(cache)),
            notifier: Arc::new(notification_service.clone()),
        };
        Self::with_stores(config, pool, stores, notification_service)
    }

    /// Builds the services over caller-supplied collaborators.
    pub fn with_stores(
        config: Config,
        pool: PgPool,
        stores: Stores,
        notification_service: NotificationService,
    ) -> Self {
        let grading_service = GradingService::new(
            stores.answer_keys.clone(),
            stores.results.clone(),
            stores.transcripts.clone(),
            config.submission_policy,
            config.transcript_ttl(),
        );
        let quiz_service = QuizService::new(
            pool.clone(),
            stores.answer_keys.clone(),
            stores.members.clone(),
            stores.notifier.clone(),
        );
        let analytics_service =
            AnalyticsService::new(pool.clone(), stores.results.clone(), stores.members.clone());
        let transcript_service = TranscriptService::new(stores.transcripts.clone());
        let export_service = ExportService::new(config.export_dir.clone());

        Self {
            config: Arc::new(config),
            pool,
            stores,
            grading_service,
            quiz_service,
            analytics_service,
            transcript_service,
            notification_service,
            export_service,
        }
    }

    pub fn completion_sweeper(&self) -> CompletionSweeper {
        CompletionSweeper::new(
            self.stores.answer_keys.clone(),
            self.stores.members.clone(),
            self.stores.results.clone(),
            self.stores.notifier.clone(),
            self.config.reminder_window(),
        )
    }
}
