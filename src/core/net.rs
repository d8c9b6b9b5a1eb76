// src/core/net.rs

// Blocking HTTP GET (ureq)

use std::io::Read;
use std::time::Duration;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{Error, Result};

fn agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
}

/// Body of `url` as text; any non-2xx status is an error.
/// `into_string` caps bodies at 10 MB, the history file is larger.
pub fn http_get(url: &str) -> Result<String> {
    logd!("GET {url}");
    let http_err = |message: String| Error::Http { url: s!(url), message };
    let resp = agent().get(url).call().map_err(|e| http_err(e.to_string()))?;
    let mut body = String::new();
    resp.into_reader()
        .read_to_string(&mut body)
        .map_err(|e| http_err(e.to_string()))?;
    logd!("GET {url}: {} bytes", body.len());
    Ok(body)
}
