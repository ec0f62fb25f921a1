use std::time::Duration;

/// Server configuration loaded from environment variables.
///
/// Pipeline settings (stores, notification destination, timeouts) live in
/// [`PipelineConfig`](vitalwatch_pipeline::PipelineConfig); this only covers
/// the HTTP listener.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    ///
    /// Covers a whole batch. A batch still running when it expires is
    /// dropped mid-record and answered with 408 and no `batchItemFailures`,
    /// so the transport redelivers all of it. Size it against
    /// [`PipelineConfig::record_time_bound`](vitalwatch_pipeline::PipelineConfig::record_time_bound)
    /// times the batch size divided by `RECORD_CONCURRENCY`.
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            request_timeout_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Records per batch guaranteed to finish inside the request timeout,
    /// given the worst-case time of one record and the records in flight.
    pub fn guaranteed_batch_size(&self, record_time_bound: Duration, concurrency: usize) -> u64 {
        let rounds = self.request_timeout().as_millis() / record_time_bound.as_millis().max(1);
        u64::try_from(rounds)
            .unwrap_or(u64::MAX)
            .saturating_mul(concurrency.max(1) as u64)
    }
}
