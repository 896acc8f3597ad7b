use reqwest::{Client, Url};
use std::{future::Future, sync::Arc};
use tracing::debug;

use crate::{
    config::ServerConfig,
    error::{Error, Result},
    models::Availability,
};

/// One availability lookup. Implementations never fail: every error is
/// reported as `available: false` for the console that was asked about.
pub trait AvailabilityCheck: Send + Sync {
    fn check(&self, console: &str) -> impl Future<Output = Availability> + Send;
}

impl<T: AvailabilityCheck> AvailabilityCheck for Arc<T> {
    fn check(&self, console: &str) -> impl Future<Output = Availability> + Send {
        (**self).check(console)
    }
}

/// HTTP client for the availability service.
#[derive(Debug, Clone)]
pub struct AvailabilityClient {
    http_client: Client,
    base_url: Url,
}

impl AvailabilityClient {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let base_url = Url::parse(&format!("http://{}:{}/", config.hostname, config.port))
            .map_err(|e| Error::invalid_url(format!("{}:{}: {}", config.hostname, config.port, e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
            base_url,
        })
    }

    /// `http://{hostname}:{port}/availability/{console}`, with the console
    /// name encoded as a single path segment.
    pub fn availability_url(&self, console: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::invalid_url(self.base_url.to_string()))?;
            segments.pop_if_empty().extend(["availability", console]);
        }
        Ok(url)
    }

    /// The returned `console` is always the name that was asked for; the
    /// service's echo of it is only used to validate the payload shape.
    pub async fn try_check(&self, console: &str) -> Result<Availability> {
        let url = self.availability_url(console)?;
        let response = self.http_client.get(url).send().await?.error_for_status()?;
        let body = response.json::<Availability>().await?;
        if body.console != console {
            debug!("Service answered {} for console {}", body.console, console);
        }
        Ok(Availability::new(body.available, console))
    }
}

impl AvailabilityCheck for AvailabilityClient {
    async fn check(&self, console: &str) -> Availability {
        self.try_check(console).await.unwrap_or_else(|e| {
            debug!("Availability check for {} failed: {}", console, e);
            Availability::unavailable(console)
        })
    }
}
