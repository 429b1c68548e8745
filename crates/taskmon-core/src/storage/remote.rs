//! HTTP document store holding one profile document per user.
//!
//! Documents live at `{base}/artifacts/{app_id}/users/{uid}/profile/data`.
//! Reads are `GET` (404 means "no document"), writes are `PATCH` with merge
//! semantics on the server side. Change notification is done by polling.

use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::task::JoinHandle;
use url::Url;

use super::config::RemoteConfig;
use crate::error::RemoteError;
use crate::profile::Profile;

pub struct RemoteStore {
    client: reqwest::Client,
    base: Url,
    app_id: String,
    api_token: Option<String>,
    poll_interval: Duration,
}

impl RemoteStore {
    pub fn new(base_url: &str, app_id: impl Into<String>) -> Result<Self, RemoteError> {
        let mut base = base_url.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base: Url::parse(&base)?,
            app_id: app_id.into(),
            api_token: None,
            poll_interval: Duration::from_secs(5),
        })
    }

    pub fn from_config(config: &RemoteConfig) -> Result<Self, RemoteError> {
        if config.base_url.trim().is_empty() {
            return Err(RemoteError::NotConfigured);
        }
        let mut store = Self::new(&config.base_url, config.app_id.clone())?;
        store.api_token = config.api_token.clone();
        store.poll_interval = Duration::from_secs(config.poll_interval_secs.max(1));
        Ok(store)
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn document_url(&self, user_id: &str) -> Result<Url, RemoteError> {
        let path = format!(
            "artifacts/{}/users/{}/profile/data",
            urlencoding::encode(&self.app_id),
            urlencoding::encode(user_id)
        );
        Ok(self.base.join(&path)?)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Fetch the user's profile document, `None` if it doesn't exist.
    pub async fn fetch(&self, user_id: &str) -> Result<Option<Profile>, RemoteError> {
        let url = self.document_url(user_id)?;
        let response = self.authorize(self.client.get(url.clone())).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            status => Err(RemoteError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }

    /// Write the whole profile document.
    pub async fn save(&self, user_id: &str, profile: &Profile) -> Result<(), RemoteError> {
        let url = self.document_url(user_id)?;
        let response = self
            .authorize(self.client.patch(url.clone()))
            .json(profile)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        tracing::debug!(user_id, "profile written to remote store");
        Ok(())
    }

    /// Poll the user's document and call `on_change` whenever it differs
    /// from the last one seen. The first existing document counts as a change.
    ///
    /// Returns `None` when called outside a tokio runtime.
    pub fn subscribe<F>(
        self: &Arc<Self>,
        user_id: impl Into<String>,
        mut on_change: F,
    ) -> Option<Subscription>
    where
        F: FnMut(Profile) + Send + 'static,
    {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime; remote subscription skipped");
            return None;
        };
        let store = Arc::clone(self);
        let user_id = user_id.into();
        let handle = runtime.spawn(async move {
            let mut interval = tokio::time::interval(store.poll_interval);
            let mut last_seen: Option<Profile> = None;
            loop {
                interval.tick().await;
                match store.fetch(&user_id).await {
                    Ok(Some(profile)) => {
                        if last_seen.as_ref() != Some(&profile) {
                            last_seen = Some(profile.clone());
                            on_change(profile);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => tracing::warn!(error = %e, user_id = %user_id, "remote poll failed"),
                }
            }
        });
        Some(Subscription {
            handle: Some(handle),
        })
    }
}

/// Live change feed; stops when unsubscribed or dropped.
#[derive(Debug)]
pub struct Subscription {
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.stop();
    }

    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::profile::AvatarVariant;
    use mockito::Matcher;

    const DOC_PATH: &str = "/artifacts/default-app-id/users/uid-1/profile/data";

    fn store(server: &mockito::Server) -> RemoteStore {
        RemoteStore::new(&server.url(), "default-app-id").unwrap()
    }

    fn complete_profile() -> Profile {
        let mut profile = Profile::new("Ash", Some("uid-1".into()));
        profile
            .complete_with_starter(&Catalog::builtin(), "Charmander", AvatarVariant::Male)
            .unwrap();
        profile
    }

    #[test]
    fn document_url_escapes_segments() {
        let store = RemoteStore::new("https://example.test/api", "app").unwrap();
        let url = store.document_url("a b/c").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/api/artifacts/app/users/a%20b%2Fc/profile/data"
        );
    }

    #[test]
    fn from_config_requires_base_url() {
        let config = RemoteConfig::default();
        assert!(matches!(
            RemoteStore::from_config(&config),
            Err(RemoteError::NotConfigured)
        ));
    }

    #[tokio::test]
    async fn fetch_missing_document_is_none() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", DOC_PATH)
            .with_status(404)
            .create_async()
            .await;

        assert!(store(&server).fetch("uid-1").await.unwrap().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetch_parses_document() {
        let mut server = mockito::Server::new_async().await;
        let profile = complete_profile();
        server
            .mock("GET", DOC_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(serde_json::to_string(&profile).unwrap())
            .create_async()
            .await;

        let fetched = store(&server).fetch("uid-1").await.unwrap().unwrap();
        assert_eq!(fetched, profile);
        assert_eq!(fetched.partner().unwrap().base_species_name, "Charmander");
    }

    #[tokio::test]
    async fn fetch_server_error_is_reported() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", DOC_PATH)
            .with_status(500)
            .create_async()
            .await;

        let err = store(&server).fetch("uid-1").await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn save_patches_document_with_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let profile = complete_profile();
        let mock = server
            .mock("PATCH", DOC_PATH)
            .match_header("authorization", "Bearer secret")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "trainerName": "Ash",
                "isProfileComplete": true,
            })))
            .with_status(200)
            .create_async()
            .await;

        let config = RemoteConfig {
            base_url: server.url(),
            api_token: Some("secret".into()),
            ..RemoteConfig::default()
        };
        let store = RemoteStore::from_config(&config).unwrap();
        store.save("uid-1", &profile).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn subscription_reports_document_once() {
        let mut server = mockito::Server::new_async().await;
        let profile = complete_profile();
        server
            .mock("GET", DOC_PATH)
            .with_status(200)
            .with_body(serde_json::to_string(&profile).unwrap())
            .create_async()
            .await;

        let store = Arc::new(store(&server).with_poll_interval(Duration::from_millis(20)));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let subscription = store
            .subscribe("uid-1", move |p| {
                let _ = tx.send(p);
            })
            .unwrap();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.trainer_name, "Ash");
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(rx.try_recv().is_err());

        assert!(subscription.is_active());
        subscription.unsubscribe();
    }

    #[test]
    fn subscribe_outside_runtime_is_skipped() {
        let store = Arc::new(RemoteStore::new("http://127.0.0.1:9", "default-app-id").unwrap());
        assert!(store.subscribe("uid-1", |_| {}).is_none());
    }
}
