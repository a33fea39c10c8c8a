use anyhow::{bail, Context, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::TableStore;
use crate::import::Record;

/// Where the table store lives and how to authenticate against it.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://<project>.supabase.co`.
    pub base_url: String,
    /// API key sent both as `apikey` and as the bearer token.
    pub api_key: String,
}

/// Table store speaking the PostgREST dialect exposed under `/rest/v1/`.
#[derive(Debug, Clone)]
pub struct RestTableStore {
    client: Client,
    rest_root: Url,
    api_key: String,
}

impl RestTableStore {
    pub fn new(client: Client, config: &StoreConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .with_context(|| format!("invalid store URL: {}", config.base_url))?;
        if config.api_key.trim().is_empty() {
            bail!("store API key is empty");
        }
        // `join` drops the last path segment unless it ends in '/'
        let base = if base.path().ends_with('/') {
            base
        } else {
            Url::parse(&format!("{}/", base.as_str()))?
        };
        let rest_root = base.join("rest/v1/")?;
        Ok(Self {
            client,
            rest_root,
            api_key: config.api_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.rest_root
            .join(table)
            .with_context(|| format!("invalid table name: {}", table))
    }
}

impl TableStore for RestTableStore {
    async fn insert(&self, table: &str, rows: &[Record]) -> Result<()> {
        let url = self.table_url(table)?;
        debug!(%url, rows = rows.len(), "posting batch");

        let resp = self
            .client
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(rows)
            .send()
            .await
            .with_context(|| format!("sending insert into {}", table))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("insert into {} failed with {}: {}", table, status, body);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store_for(server: &MockServer) -> RestTableStore {
        let config = StoreConfig {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
        };
        RestTableStore::new(Client::new(), &config).unwrap()
    }

    fn ana() -> Record {
        Record {
            name: "Ana".to_string(),
            instrument: Some("Violino".to_string()),
            locality: Some("Jardim".to_string()),
            city: None,
            group: Some("Jardim".to_string()),
            role: None,
            level: None,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_insert_posts_json_array_with_auth() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/cadastro"))
            .and(header("apikey", "test-key"))
            .and(header("authorization", "Bearer test-key"))
            .and(header("prefer", "return=minimal"))
            .and(body_json(json!([{
                "nome": "Ana",
                "instrumento": "Violino",
                "localidade": "Jardim",
                "cidade": null,
                "comum": "Jardim",
                "cargo": null,
                "nivel": null,
                "ativo": true,
            }])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        store_for(&server).insert("cadastro", &[ana()]).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_insert_error_status_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/cadastro"))
            .respond_with(ResponseTemplate::new(409).set_body_string("duplicate key"))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .insert("cadastro", &[ana()])
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("409"), "{msg}");
        assert!(msg.contains("duplicate key"), "{msg}");
    }

    #[test]
    fn test_table_url_with_and_without_trailing_slash() {
        for base in ["https://example.supabase.co", "https://example.supabase.co/"] {
            let store = RestTableStore::new(
                Client::new(),
                &StoreConfig {
                    base_url: base.to_string(),
                    api_key: "k".to_string(),
                },
            )
            .unwrap();
            assert_eq!(
                store.table_url("cadastro").unwrap().as_str(),
                "https://example.supabase.co/rest/v1/cadastro"
            );
        }
    }

    #[test]
    fn test_rejects_bad_config() {
        let bad_url = StoreConfig {
            base_url: "not a url".to_string(),
            api_key: "k".to_string(),
        };
        assert!(RestTableStore::new(Client::new(), &bad_url).is_err());

        let no_key = StoreConfig {
            base_url: "https://example.supabase.co".to_string(),
            api_key: "  ".to_string(),
        };
        assert!(RestTableStore::new(Client::new(), &no_key).is_err());
    }
}
