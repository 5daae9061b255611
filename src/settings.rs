//! Process-wide settings read from the environment.
//!
//! Settings are read once at process start. Bad values never abort the
//! process: they are logged and the default is used instead.

use crate::locks::{LockMode, Wait};
use std::env;
use std::time::Duration;

/// Disables locking entirely when set to a non-empty value.
pub const SKIP_LOCK_VAR: &str = "PROJLOCK_SKIP_LOCK";

/// Bootstrap wait in floating-point seconds.
pub const BOOTSTRAP_TIMEOUT_VAR: &str = "PROJLOCK_BOOTSTRAP_TIMEOUT";

/// Makes a failed bootstrap non-fatal when set to a non-empty value.
pub const BOOTSTRAP_GRACEFUL_VAR: &str = "PROJLOCK_BOOTSTRAP_GRACEFUL";

/// Default bootstrap wait.
pub const DEFAULT_BOOTSTRAP_TIMEOUT: Duration = Duration::from_secs(15);

/// Settings controlling the lock protocol and the bootstrap gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Whether locking is enabled.
    pub lock_mode: LockMode,

    /// How long the bootstrap gate waits for the shared lock.
    pub bootstrap_timeout: Wait,

    /// Whether a failed bootstrap lets the process continue without a lock.
    pub bootstrap_graceful: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lock_mode: LockMode::Enabled,
            bootstrap_timeout: Wait::For(DEFAULT_BOOTSTRAP_TIMEOUT),
            bootstrap_graceful: false,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let is_set = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());

        let lock_mode = if is_set(SKIP_LOCK_VAR) {
            LockMode::Disabled
        } else {
            LockMode::Enabled
        };

        let bootstrap_timeout = match lookup(BOOTSTRAP_TIMEOUT_VAR) {
            Some(raw) if !raw.is_empty() => parse_timeout(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    "bad {}={:?}, using {}s",
                    BOOTSTRAP_TIMEOUT_VAR,
                    raw,
                    DEFAULT_BOOTSTRAP_TIMEOUT.as_secs()
                );
                Wait::For(DEFAULT_BOOTSTRAP_TIMEOUT)
            }),
            _ => Wait::For(DEFAULT_BOOTSTRAP_TIMEOUT),
        };

        Self {
            lock_mode,
            bootstrap_timeout,
            bootstrap_graceful: is_set(BOOTSTRAP_GRACEFUL_VAR),
        }
    }
}

/// Parse a timeout in floating-point seconds. Zero means wait forever.
/// Negative, non-finite or unparseable values are rejected.
pub fn parse_timeout(raw: &str) -> Option<Wait> {
    let secs: f64 = raw.trim().parse().ok()?;
    let duration = Duration::try_from_secs_f64(secs).ok()?;
    Some(Wait::from(duration))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let settings = Settings::from_lookup(lookup_from(&[]));

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.lock_mode, LockMode::Enabled);
        assert_eq!(
            settings.bootstrap_timeout,
            Wait::For(Duration::from_secs(15))
        );
        assert!(!settings.bootstrap_graceful);
    }

    #[test]
    fn flags_require_non_empty_values() {
        let settings = Settings::from_lookup(lookup_from(&[
            (SKIP_LOCK_VAR, ""),
            (BOOTSTRAP_GRACEFUL_VAR, ""),
        ]));
        assert_eq!(settings.lock_mode, LockMode::Enabled);
        assert!(!settings.bootstrap_graceful);

        let settings = Settings::from_lookup(lookup_from(&[
            (SKIP_LOCK_VAR, "1"),
            (BOOTSTRAP_GRACEFUL_VAR, "yes"),
        ]));
        assert_eq!(settings.lock_mode, LockMode::Disabled);
        assert!(settings.bootstrap_graceful);
    }

    #[test]
    fn fractional_timeout_is_parsed() {
        let settings = Settings::from_lookup(lookup_from(&[(BOOTSTRAP_TIMEOUT_VAR, "0.25")]));
        assert_eq!(
            settings.bootstrap_timeout,
            Wait::For(Duration::from_millis(250))
        );
    }

    #[test]
    fn zero_timeout_waits_forever() {
        let settings = Settings::from_lookup(lookup_from(&[(BOOTSTRAP_TIMEOUT_VAR, "0")]));
        assert_eq!(settings.bootstrap_timeout, Wait::Forever);
    }

    #[test]
    fn bad_timeout_falls_back_to_default() {
        for raw in ["-1", "soon", "NaN", "inf"] {
            let settings = Settings::from_lookup(lookup_from(&[(BOOTSTRAP_TIMEOUT_VAR, raw)]));
            assert_eq!(
                settings.bootstrap_timeout,
                Wait::For(DEFAULT_BOOTSTRAP_TIMEOUT),
                "value {:?}",
                raw
            );
        }
    }

    #[test]
    #[serial]
    fn from_env_reads_process_environment() {
        // SAFETY: serialized with every other test that touches the environment.
        unsafe {
            env::set_var(SKIP_LOCK_VAR, "1");
            env::set_var(BOOTSTRAP_TIMEOUT_VAR, "2.5");
        }
        let settings = Settings::from_env();
        unsafe {
            env::remove_var(SKIP_LOCK_VAR);
            env::remove_var(BOOTSTRAP_TIMEOUT_VAR);
        }

        assert_eq!(settings.lock_mode, LockMode::Disabled);
        assert_eq!(
            settings.bootstrap_timeout,
            Wait::For(Duration::from_millis(2500))
        );
    }
}
