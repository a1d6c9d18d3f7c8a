use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use crate::types::Entry;
use crate::{DictionaryProvider, LookupError, ProviderMetadata};

/// Client for dictionaryapi.dev-style services:
/// `GET {base_url}/{language}/{word}`
#[derive(Clone)]
pub struct DictionaryApiClient {
    client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl DictionaryApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url, timeout)
    }

    /// Use a preconfigured client. `timeout` should match the client's own.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let base_url =
            Url::parse(base_url).map_err(|e| LookupError::InvalidUrl(format!("{base_url}: {e}")))?;

        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidUrl(base_url.to_string()));
        }

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Word and language become their own percent-encoded path segments
    pub fn entry_url(&self, language: &str, word: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(language)
            .push(word);
        Ok(url)
    }

    fn map_transport(&self, error: reqwest::Error) -> LookupError {
        if error.is_timeout() {
            LookupError::Timeout(self.timeout)
        } else {
            LookupError::Network(error)
        }
    }
}

#[async_trait]
impl DictionaryProvider for DictionaryApiClient {
    async fn lookup(&self, word: &str, language: &str) -> Result<Vec<Entry>, LookupError> {
        let url = self.entry_url(language, word)?;
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown status")
                    .to_string(),
            });
        }

        let body = response.text().await.map_err(|e| self.map_transport(e))?;
        let entries: Vec<Entry> = serde_json::from_str(&body)?;
        tracing::debug!("Dictionary returned {} entries", entries.len());

        Ok(entries)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "dictionaryapi.dev".to_string(),
            base_url: self.base_url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn client(base_url: &str, timeout: Duration) -> DictionaryApiClient {
        let http = reqwest::Client::builder()
            .no_proxy()
            .timeout(timeout)
            .build()
            .unwrap();
        DictionaryApiClient::with_client(http, base_url, timeout).unwrap()
    }

    /// Accept one connection, answer with a canned response, return the request head
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_head(&mut socket).await;

            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (format!("http://{addr}/api/v2/entries"), handle)
    }

    async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = vec![0u8; 8192];
        let mut read = 0;
        loop {
            let n = socket.read(&mut buf[read..]).await.unwrap();
            read += n;
            if n == 0 || buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        String::from_utf8_lossy(&buf[..read]).to_string()
    }

    #[test]
    fn entry_url_encodes_segments() {
        let client = client(
            "https://api.dictionaryapi.dev/api/v2/entries/",
            Duration::from_secs(1),
        );

        assert_eq!(
            client.entry_url("sv", "hund").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/sv/hund"
        );
        assert_eq!(
            client.entry_url("sv", "ice cream/x").unwrap().as_str(),
            "https://api.dictionaryapi.dev/api/v2/entries/sv/ice%20cream%2Fx"
        );
    }

    #[test]
    fn rejects_unusable_base_url() {
        let http = reqwest::Client::new();
        assert!(matches!(
            DictionaryApiClient::with_client(http.clone(), "not a url", Duration::from_secs(1)),
            Err(LookupError::InvalidUrl(_))
        ));
        assert!(matches!(
            DictionaryApiClient::with_client(http, "mailto:someone@example.org", Duration::from_secs(1)),
            Err(LookupError::InvalidUrl(_))
        ));
    }

    #[test]
    fn metadata_reports_base_url() {
        let client = client("http://127.0.0.1:9/api/v2/entries", Duration::from_secs(1));
        assert_eq!(client.metadata().base_url, "http://127.0.0.1:9/api/v2/entries");
    }

    #[tokio::test]
    async fn loosely_shaped_payload_still_parses() {
        let (base_url, _server) = serve_once(
            "200 OK",
            r#"[{"word":null,"phonetics":null,"meanings":[{"definitions":[{"definition":"a dog"},{"example":"x"}]}]},{"word":"hund"}]"#,
        )
        .await;

        let entries = client(&base_url, Duration::from_secs(5))
            .lookup("hund", "sv")
            .await
            .unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].first_definition().unwrap(), Some("a dog"));
        assert_eq!(entries[0].first_audio(), None);
    }

    #[tokio::test]
    async fn parses_success_response() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"[{"word":"hund","phonetics":[{"audio":"https://example.org/hund.mp3"}],"meanings":[{"definitions":[{"definition":"a domesticated carnivorous mammal"}]}]}]"#,
        )
        .await;

        let entries = client(&base_url, Duration::from_secs(5))
            .lookup("hund", "sv")
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].first_definition().unwrap(),
            Some("a domesticated carnivorous mammal")
        );

        let request = server.await.unwrap();
        assert!(
            request.starts_with("GET /api/v2/entries/sv/hund HTTP/1.1"),
            "unexpected request: {request}"
        );
    }

    #[tokio::test]
    async fn non_success_status_carries_status_text() {
        let (base_url, _server) =
            serve_once("404 Not Found", r#"{"title":"No Definitions Found"}"#).await;

        let err = client(&base_url, Duration::from_secs(5))
            .lookup("qwzx", "sv")
            .await
            .unwrap_err();

        match err {
            LookupError::Status {
                status,
                status_text,
            } => {
                assert_eq!(status, 404);
                assert_eq!(status_text, "Not Found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let (base_url, _server) = serve_once("200 OK", "<html>oops</html>").await;

        let err = client(&base_url, Duration::from_secs(5))
            .lookup("hund", "sv")
            .await
            .unwrap_err();

        assert!(matches!(err, LookupError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let _ = read_head(&mut socket).await;
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let err = client(
            &format!("http://{addr}/api/v2/entries"),
            Duration::from_millis(200),
        )
        .lookup("hund", "sv")
        .await
        .unwrap_err();

        assert!(matches!(err, LookupError::Timeout(_)), "got {err:?}");
    }
}
