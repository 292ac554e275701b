use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{config_error, Error};

#[derive(Clone, Debug)]
pub struct Config {
    pub osrm_api_base: String,
    pub osrm_profile: String,
    pub request_timeout: Duration,
    pub average_speed_kmh: f64,
    pub bind_addr: SocketAddr,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            osrm_api_base: "http://router.project-osrm.org".into(),
            osrm_profile: "driving".into(),
            request_timeout: Duration::from_secs(10),
            average_speed_kmh: 30.0,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
        }
    }
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let defaults = Self::default();

        let osrm_api_base = optional(&lookup, "OSRM_API_BASE")?
            .map(|base| base.trim_end_matches('/').to_string())
            .unwrap_or(defaults.osrm_api_base);
        let osrm_profile = optional(&lookup, "OSRM_PROFILE")?.unwrap_or(defaults.osrm_profile);

        let request_timeout = parsed::<u64, _>(&lookup, "OSRM_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let average_speed_kmh = match parsed::<f64, _>(&lookup, "AVERAGE_SPEED_KMH")? {
            Some(speed) if !(speed.is_finite() && speed > 0.0) => {
                return Err(config_error("AVERAGE_SPEED_KMH", "must be a positive number"))
            }
            Some(speed) => speed,
            None => defaults.average_speed_kmh,
        };

        let bind_addr = parsed(&lookup, "BIND_ADDR")?.unwrap_or(defaults.bind_addr);

        Ok(Self {
            osrm_api_base,
            osrm_profile,
            request_timeout,
            average_speed_kmh,
            bind_addr,
        })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Result<Option<String>, Error>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(key) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Result<String, env::VarError>,
{
    optional(lookup, key)?
        .map(|raw| raw.trim().parse::<T>().map_err(|e| config_error(key, e)))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(
        vars: &[(&str, &str)],
    ) -> impl Fn(&str) -> Result<String, env::VarError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |key| vars.get(key).cloned().ok_or(env::VarError::NotPresent)
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.osrm_api_base, "http://router.project-osrm.org");
        assert_eq!(config.osrm_profile, "driving");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.average_speed_kmh, 30.0);
        assert_eq!(config.bind_addr.port(), 3000);
    }

    #[test]
    fn present_keys_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("OSRM_API_BASE", "http://localhost:5000/"),
            ("OSRM_TIMEOUT_SECS", "3"),
            ("AVERAGE_SPEED_KMH", "45.5"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ]))
        .unwrap();

        assert_eq!(config.osrm_api_base, "http://localhost:5000");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.average_speed_kmh, 45.5);
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
    }

    #[test]
    fn malformed_values_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[("OSRM_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(err.code, 2);
        assert!(err.message.contains("OSRM_TIMEOUT_SECS"));

        for speed in ["0", "-5", "NaN", "inf"] {
            let err =
                Config::from_lookup(lookup_from(&[("AVERAGE_SPEED_KMH", speed)])).unwrap_err();
            assert_eq!(err.code, 2, "{} should be rejected", speed);
        }
    }
}
