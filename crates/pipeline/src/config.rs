use std::time::Duration;

/// Default reading store name.
pub const DEFAULT_READING_STORE: &str = "vital_readings";
/// Default alert store name.
pub const DEFAULT_ALERT_STORE: &str = "vital_alerts";

const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;
const DEFAULT_NOTIFY_TIMEOUT_SECS: u64 = 10;
const DEFAULT_RECORD_CONCURRENCY: usize = 1;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Where readings persist.
    pub reading_store_name: String,
    /// Where alert records persist.
    pub alert_store_name: String,
    /// Where critical alerts are published.
    pub notification_destination: String,
    /// Bound on each reading/alert store call.
    pub store_timeout: Duration,
    /// Bound on each notification publish.
    pub notify_timeout: Duration,
    /// Records processed in parallel within one batch (at least 1).
    pub record_concurrency: usize,
}

impl PipelineConfig {
    /// Config with defaults for everything but the notification destination.
    pub fn new(notification_destination: impl Into<String>) -> Self {
        Self {
            reading_store_name: DEFAULT_READING_STORE.to_string(),
            alert_store_name: DEFAULT_ALERT_STORE.to_string(),
            notification_destination: notification_destination.into(),
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
            notify_timeout: Duration::from_secs(DEFAULT_NOTIFY_TIMEOUT_SECS),
            record_concurrency: DEFAULT_RECORD_CONCURRENCY,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                    | Default          |
    /// |----------------------------|------------------|
    /// | `READING_STORE_NAME`       | `vital_readings` |
    /// | `ALERT_STORE_NAME`         | `vital_alerts`   |
    /// | `NOTIFICATION_DESTINATION` | required         |
    /// | `STORE_TIMEOUT_SECS`       | `5`              |
    /// | `NOTIFY_TIMEOUT_SECS`      | `10`             |
    /// | `RECORD_CONCURRENCY`       | `1`              |
    ///
    /// The three numeric settings must be greater than zero.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let notification_destination = lookup("NOTIFICATION_DESTINATION")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("NOTIFICATION_DESTINATION"))?;

        let mut config = Self::new(notification_destination);
        if let Some(name) = lookup("READING_STORE_NAME") {
            config.reading_store_name = name;
        }
        if let Some(name) = lookup("ALERT_STORE_NAME") {
            config.alert_store_name = name;
        }
        if let Some(secs) = parse_positive::<u64, _>(&lookup, "STORE_TIMEOUT_SECS")? {
            config.store_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = parse_positive::<u64, _>(&lookup, "NOTIFY_TIMEOUT_SECS")? {
            config.notify_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = parse_positive::<usize, _>(&lookup, "RECORD_CONCURRENCY")? {
            config.record_concurrency = n;
        }
        Ok(config)
    }

    /// Longest a single record can take: the reading write, then the alert
    /// write and publish running side by side.
    pub fn record_time_bound(&self) -> Duration {
        self.store_timeout + self.store_timeout.max(self.notify_timeout)
    }
}

/// Like [`parse_var`], but `0` is rejected.
fn parse_positive<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr + Default + PartialEq + ToString,
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<T, F>(lookup, name)? {
        Some(value) if value == T::default() => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
        parsed => Ok(parsed),
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_destination_is_set() {
        let config =
            PipelineConfig::from_lookup(lookup(&[("NOTIFICATION_DESTINATION", "log:")])).unwrap();
        assert_eq!(config, PipelineConfig::new("log:"));
        assert_eq!(config.reading_store_name, "vital_readings");
        assert_eq!(config.alert_store_name, "vital_alerts");
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert_eq!(config.record_concurrency, 1);
    }

    #[test]
    fn destination_is_required() {
        assert_matches!(
            PipelineConfig::from_lookup(lookup(&[])),
            Err(ConfigError::Missing("NOTIFICATION_DESTINATION"))
        );
        assert_matches!(
            PipelineConfig::from_lookup(lookup(&[("NOTIFICATION_DESTINATION", "  ")])),
            Err(ConfigError::Missing(_))
        );
    }

    #[test]
    fn overrides_are_parsed() {
        let config = PipelineConfig::from_lookup(lookup(&[
            ("NOTIFICATION_DESTINATION", "https://hooks.example.org/icu"),
            ("READING_STORE_NAME", "icu_readings"),
            ("ALERT_STORE_NAME", "icu_alerts"),
            ("STORE_TIMEOUT_SECS", "2"),
            ("NOTIFY_TIMEOUT_SECS", "3"),
            ("RECORD_CONCURRENCY", "8"),
        ]))
        .unwrap();
        assert_eq!(config.reading_store_name, "icu_readings");
        assert_eq!(config.alert_store_name, "icu_alerts");
        assert_eq!(config.store_timeout, Duration::from_secs(2));
        assert_eq!(config.notify_timeout, Duration::from_secs(3));
        assert_eq!(config.record_concurrency, 8);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert_matches!(
            PipelineConfig::from_lookup(lookup(&[
                ("NOTIFICATION_DESTINATION", "log:"),
                ("STORE_TIMEOUT_SECS", "soon"),
            ])),
            Err(ConfigError::Invalid { name: "STORE_TIMEOUT_SECS", .. })
        );
        assert_matches!(
            PipelineConfig::from_lookup(lookup(&[
                ("NOTIFICATION_DESTINATION", "log:"),
                ("RECORD_CONCURRENCY", "0"),
            ])),
            Err(ConfigError::Invalid { name: "RECORD_CONCURRENCY", .. })
        );
    }

    #[test]
    fn zero_timeouts_are_rejected() {
        assert_matches!(
            PipelineConfig::from_lookup(lookup(&[
                ("NOTIFICATION_DESTINATION", "log:"),
                ("STORE_TIMEOUT_SECS", "0"),
            ])),
            Err(ConfigError::Invalid { name: "STORE_TIMEOUT_SECS", .. })
        );
        assert_matches!(
            PipelineConfig::from_lookup(lookup(&[
                ("NOTIFICATION_DESTINATION", "log:"),
                ("NOTIFY_TIMEOUT_SECS", "0"),
            ])),
            Err(ConfigError::Invalid { name: "NOTIFY_TIMEOUT_SECS", .. })
        );
    }

    #[test]
    fn record_time_bound_covers_reading_then_alert() {
        let mut config = PipelineConfig::new("log:");
        assert_eq!(config.record_time_bound(), Duration::from_secs(15));

        config.store_timeout = Duration::from_secs(8);
        config.notify_timeout = Duration::from_secs(3);
        assert_eq!(config.record_time_bound(), Duration::from_secs(16));
    }
}
