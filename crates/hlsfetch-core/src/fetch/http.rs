//! libcurl-backed segment GET.

use super::SegmentFetcher;
use crate::config::{HlsfetchConfig, HttpConfig};
use crate::retry::FetchError;
use std::collections::BTreeMap;
use std::time::Duration;
use url::Url;

/// Transfer options applied to every segment GET.
#[derive(Debug, Clone, Default)]
pub struct CurlOptions {
    pub http: HttpConfig,
    pub user_agent: Option<String>,
    pub headers: BTreeMap<String, String>,
}

impl CurlOptions {
    pub fn from_config(cfg: &HlsfetchConfig) -> Self {
        Self {
            http: cfg.http.unwrap_or_default(),
            user_agent: cfg.user_agent.clone(),
            headers: cfg.headers.clone(),
        }
    }
}

/// Fetches segments with one `curl::easy::Easy` handle per attempt.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    options: CurlOptions,
}

impl CurlFetcher {
    pub fn new(options: CurlOptions) -> Self {
        Self { options }
    }

    fn configure(&self, easy: &mut curl::easy::Easy, url: &Url) -> Result<(), curl::Error> {
        let http = &self.options.http;
        easy.url(url.as_str())?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(http.connect_timeout_secs))?;
        // Abort stalled transfers instead of relying on the hard timeout alone.
        easy.low_speed_limit(http.low_speed_limit_bytes)?;
        easy.low_speed_time(Duration::from_secs(http.low_speed_time_secs))?;
        easy.timeout(Duration::from_secs(http.timeout_secs))?;
        if let Some(ua) = &self.options.user_agent {
            easy.useragent(ua)?;
        }
        if !self.options.headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in &self.options.headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(())
    }
}

impl SegmentFetcher for CurlFetcher {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let mut easy = curl::easy::Easy::new();
        self.configure(&mut easy, url).map_err(FetchError::Curl)?;

        let mut body = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(FetchError::Curl)?;
            transfer.perform().map_err(FetchError::Curl)?;
        }

        let code = easy.response_code().map_err(FetchError::Curl)?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }
        Ok(body)
    }
}
