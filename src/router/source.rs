// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::error::FragmentError;
use crate::http::HttpClient;

/// Where page fragments are loaded from
#[async_trait]
pub trait FragmentSource: Send + Sync {
    /// Load the fragment stored under `resource`, e.g. `pages/home_content.html`
    async fn load(&self, resource: &str) -> Result<String, FragmentError>;
}

/// Fragments served over HTTP relative to a base URL
#[derive(Clone)]
pub struct HttpFragmentSource<C: HttpClient> {
    client: C,
    base_url: Url,
}

impl<C: HttpClient> HttpFragmentSource<C> {
    pub fn new(client: C, base_url: &str) -> Result<Self, FragmentError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl<C: HttpClient> FragmentSource for HttpFragmentSource<C> {
    async fn load(&self, resource: &str) -> Result<String, FragmentError> {
        let url = self.base_url.join(resource)?;

        let response = self
            .client
            .get(url.as_str())
            .await
            .map_err(|e| FragmentError::FetchFailed {
                resource: resource.to_string(),
                source: e,
            })?;

        if !response.is_success() {
            return Err(FragmentError::HttpStatus {
                resource: resource.to_string(),
                status: response.status,
            });
        }

        non_empty(String::from_utf8_lossy(&response.body).into_owned(), resource)
    }
}

/// Fragments read from a local directory
#[derive(Debug, Clone)]
pub struct DirFragmentSource {
    root: PathBuf,
}

impl DirFragmentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FragmentSource for DirFragmentSource {
    async fn load(&self, resource: &str) -> Result<String, FragmentError> {
        let path = self.root.join(resource.trim_start_matches('/'));
        let html = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FragmentError::ReadFailed { path, source: e })?;

        non_empty(html, resource)
    }
}

fn non_empty(html: String, resource: &str) -> Result<String, FragmentError> {
    if html.trim().is_empty() {
        return Err(FragmentError::EmptyBody {
            resource: resource.to_string(),
        });
    }
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use bytes::Bytes;
    use tempfile::tempdir;

    use crate::http::HttpResponse;

    struct RecordingClient {
        status: u16,
        body: &'static str,
        requested: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpClient for RecordingClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, reqwest::Error> {
            self.requested.lock().unwrap().push(url.to_string());
            Ok(HttpResponse {
                status: self.status,
                body: Bytes::from_static(self.body.as_bytes()),
            })
        }
    }

    fn client(status: u16, body: &'static str) -> RecordingClient {
        RecordingClient {
            status,
            body,
            requested: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn http_source_resolves_against_base() {
        let source =
            HttpFragmentSource::new(client(200, "<p>home</p>"), "https://example.com/site").unwrap();

        let html = source.load("pages/home_content.html").await.unwrap();

        assert_eq!(html, "<p>home</p>");
        assert_eq!(
            source.client.requested.lock().unwrap().as_slice(),
            ["https://example.com/site/pages/home_content.html"]
        );
    }

    #[tokio::test]
    async fn http_source_rejects_error_status() {
        let source = HttpFragmentSource::new(client(404, "missing"), "https://example.com/").unwrap();

        let result = source.load("pages/nope.html").await;
        assert!(matches!(
            result,
            Err(FragmentError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn http_source_rejects_empty_body() {
        let source = HttpFragmentSource::new(client(200, "  \n"), "https://example.com/").unwrap();

        let result = source.load("pages/blank.html").await;
        assert!(matches!(result, Err(FragmentError::EmptyBody { .. })));
    }

    #[test]
    fn http_source_requires_valid_base() {
        let result = HttpFragmentSource::new(client(200, ""), "not a url");
        assert!(matches!(result, Err(FragmentError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn dir_source_reads_files() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("pages")).unwrap();
        std::fs::write(dir.path().join("pages/sobre_content.html"), "<h1>Sobre</h1>").unwrap();

        let source = DirFragmentSource::new(dir.path());
        let html = source.load("pages/sobre_content.html").await.unwrap();
        assert_eq!(html, "<h1>Sobre</h1>");
    }

    #[tokio::test]
    async fn dir_source_reports_missing_and_empty_files() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("empty.html"), "").unwrap();

        let source = DirFragmentSource::new(dir.path());

        assert!(matches!(
            source.load("missing.html").await,
            Err(FragmentError::ReadFailed { .. })
        ));
        assert!(matches!(
            source.load("empty.html").await,
            Err(FragmentError::EmptyBody { .. })
        ));
    }
}
