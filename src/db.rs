//! Database module - PostgreSQL connection and migrations

use sqlx::{postgres::PgPoolOptions, PgPool};

/// Create database connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create tables if not exist
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await?;

    tracing::info!("Database schema applied successfully");
    Ok(())
}

/// Database schema SQL. Both tables are append-only.
const SCHEMA_SQL: &str = r#"
-- Explanations (one per decision)
CREATE TABLE IF NOT EXISTS explanations (
    id BIGSERIAL PRIMARY KEY,
    decision_type VARCHAR(20) NOT NULL,
    decision_id VARCHAR(64) NOT NULL,
    model_name VARCHAR(100) NOT NULL,
    model_version VARCHAR(50) NOT NULL,
    feature_attributions JSONB NOT NULL,
    shap_summary JSONB NOT NULL,
    explanation_text TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Decision audit log
CREATE TABLE IF NOT EXISTS decision_logs (
    id BIGSERIAL PRIMARY KEY,
    decision_type VARCHAR(20) NOT NULL,
    decision_id VARCHAR(64) NOT NULL UNIQUE,
    account_id VARCHAR(255),
    ticker VARCHAR(32),
    input_payload JSONB NOT NULL,
    output_payload JSONB NOT NULL,
    explanation_id BIGINT NOT NULL REFERENCES explanations(id),
    policy_result JSONB NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_explanations_decision ON explanations(decision_id);
CREATE INDEX IF NOT EXISTS idx_decision_logs_type ON decision_logs(decision_type, created_at);
CREATE INDEX IF NOT EXISTS idx_decision_logs_account ON decision_logs(account_id);
CREATE INDEX IF NOT EXISTS idx_decision_logs_ticker ON decision_logs(ticker);
"#;
