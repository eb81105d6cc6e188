use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use reqwest::header::{ACCEPT, COOKIE, ORIGIN, REFERER, USER_AGENT};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::query::{QueryInstant, STATION_TIMEZONE};
use crate::range::DayFetcher;

pub static DEFAULT_HOST: &str = "https://sg5.fusionsolar.huawei.com";
pub static DEFAULT_STATION_DN: &str = "NE=50999304";

static ENERGY_BALANCE_PATH: &str = "/rest/pvms/web/station/v3/overview/energy-balance";
static BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
static ACCEPT_JSON: &str = "application/json, text/plain, */*";

// daily granularity
static TIME_DIM_DAY: &str = "2";
static STATION_UTC_OFFSET_HOURS: &str = "7.0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EnergyBalanceQuery<'a> {
    station_dn: &'a str,
    time_dim: &'static str,
    time_zone: &'static str,
    time_zone_str: &'static str,
    query_time: i64,
    date_str: String,
    #[serde(rename = "_")]
    cache_buster: i64,
}

impl<'a> EnergyBalanceQuery<'a> {
    fn new(station_dn: &'a str, query: &QueryInstant) -> Self {
        Self {
            station_dn,
            time_dim: TIME_DIM_DAY,
            time_zone: STATION_UTC_OFFSET_HOURS,
            time_zone_str: STATION_TIMEZONE.name(),
            query_time: query.epoch_millis(),
            date_str: query.date_str(),
            cache_buster: Utc::now().timestamp_millis(),
        }
    }
}

/// Authenticated client for the station overview energy-balance endpoint.
///
/// The session cookie is forwarded verbatim on every request.
pub struct EnergyBalanceClient {
    http: reqwest::Client,
    host: String,
    station_dn: String,
    cookie: String,
    output_dir: PathBuf,
}

impl EnergyBalanceClient {
    pub fn new(cookie: impl Into<String>, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            host: DEFAULT_HOST.to_string(),
            station_dn: DEFAULT_STATION_DN.to_string(),
            cookie: cookie.into(),
            output_dir: output_dir.into(),
        })
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_station(mut self, station_dn: impl Into<String>) -> Self {
        self.station_dn = station_dn.into();
        self
    }

    /// Fetches one day and writes it to `<output_dir>/<YYYY-MM-DD>.json`.
    ///
    /// Nothing is written unless the response is a 2xx with a JSON body.
    pub async fn download_day(&self, query: &QueryInstant) -> Result<PathBuf> {
        let params = EnergyBalanceQuery::new(&self.station_dn, query);
        debug!(
            station = %self.station_dn,
            date_str = %params.date_str,
            query_time = params.query_time,
            "requesting energy balance"
        );

        let response = self
            .http
            .get(format!("{}{}", self.host, ENERGY_BALANCE_PATH))
            .query(&params)
            .header(COOKIE, self.cookie.as_str())
            .header(ACCEPT, ACCEPT_JSON)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(REFERER, format!("{}/", self.host))
            .header(ORIGIN, self.host.as_str())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, date = %query.file_stem(), "energy balance request rejected");
            return Err(Error::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: Value = serde_json::from_str(&body).map_err(Error::Decode)?;

        let path = save_payload(&self.output_dir, &query.file_stem(), &payload).await?;
        info!(date = %query.file_stem(), path = %path.display(), "saved energy balance");
        Ok(path)
    }
}

impl DayFetcher for EnergyBalanceClient {
    async fn fetch_day(&self, query: &QueryInstant) -> Result<PathBuf> {
        self.download_day(query).await
    }
}

async fn save_payload(output_dir: &Path, file_stem: &str, payload: &Value) -> Result<PathBuf> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| Error::Io {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let path = std::path::absolute(output_dir.join(format!("{file_stem}.json"))).map_err(
        |source| Error::Io {
            path: output_dir.to_path_buf(),
            source,
        },
    )?;

    // to_string_pretty keeps non-ASCII characters as-is
    let content = serde_json::to_string_pretty(payload).map_err(|source| Error::Io {
        path: path.clone(),
        source: source.into(),
    })?;
    tokio::fs::write(&path, content)
        .await
        .map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

    Ok(path)
}
