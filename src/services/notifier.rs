//! Fire-and-forget change notifications.
//!
//! After a successful mutation the changed resource URL is posted to an external emitter,
//! which fans it out to subscribed clients. Delivery failures are logged and dropped.

use serde::Serialize;
use std::time::Duration;

pub trait Notifier: Send + Sync {
    fn notify(&self, url: &str);
}

/// Used when no emitter is configured.
#[derive(Debug, Default, Clone)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, url: &str) {
        log::trace!("no emitter configured, dropping notification for {}", url);
    }
}

#[derive(Serialize)]
struct EmitterPayload<'a> {
    url: &'a str,
}

/// Posts `{"url": ...}` to the emitter on a background task.
#[derive(Debug, Clone)]
pub struct HttpNotifier {
    client: reqwest::Client,
    emitter_url: String,
}

impl HttpNotifier {
    pub fn new(emitter_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;
        Ok(Self {
            client,
            emitter_url: emitter_url.into(),
        })
    }

    pub fn from_env() -> Option<Result<Self, reqwest::Error>> {
        std::env::var("EMITTER_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .map(Self::new)
    }
}

impl Notifier for HttpNotifier {
    fn notify(&self, url: &str) {
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                log::warn!("no async runtime, notification for {} dropped", url);
                return;
            }
        };

        let client = self.client.clone();
        let emitter_url = self.emitter_url.clone();
        let url = url.to_string();

        handle.spawn(async move {
            let result = client
                .post(&emitter_url)
                .json(&EmitterPayload { url: &url })
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    log::debug!("📣 notified {} of {}", emitter_url, url);
                }
                Ok(response) => {
                    log::warn!("emitter rejected notification for {}: {}", url, response.status());
                }
                Err(e) => {
                    log::warn!("failed to notify emitter for {}: {}", url, e);
                }
            }
        });
    }
}
