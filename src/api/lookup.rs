//! Auxiliary lookups: dictionary definitions, random facts and QR codes.

use crate::{
    config::settings::LookupConfig,
    errors::{Error, Result},
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

/// Meanings kept per word.
const MAX_MEANINGS: usize = 3;
/// Definitions kept per meaning.
const MAX_DEFINITIONS: usize = 2;

/// Dictionary entry for one word.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Definition {
    /// The word as the dictionary spells it
    pub word: String,
    /// Phonetic spelling, when known
    #[serde(default)]
    pub phonetic: Option<String>,
    /// Meanings by part of speech
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

/// Definitions for one part of speech.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    /// Noun, verb, ...
    pub part_of_speech: String,
    /// Definitions
    pub definitions: Vec<DefinitionText>,
}

/// One definition line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefinitionText {
    /// Definition text
    pub definition: String,
    /// Usage example
    #[serde(default)]
    pub example: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Fact {
    text: String,
}

/// Client for the lookup services.
pub struct LookupClient {
    settings: LookupConfig,
    client: Client,
}

impl LookupClient {
    /// Creates a client from the `[lookup]` settings.
    #[must_use]
    pub fn new(settings: LookupConfig) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    /// English definitions of `word`, trimmed to a few meanings.
    pub async fn define(&self, word: &str) -> Result<Definition> {
        let word = word.trim();
        if word.is_empty() {
            return Err(Error::user("Give me a word to define."));
        }

        let url = format!(
            "{}/api/v2/entries/en/{word}",
            self.settings.dictionary_url.trim_end_matches('/')
        );
        debug!("request {url}");

        let response = self
            .client
            .get(&url)
            .timeout(self.settings.request_timeout())
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::user(format!("No definitions found for `{word}`.")));
        }
        let entries: Vec<Definition> = response.error_for_status()?.json().await?;

        let mut entry = entries.into_iter().next().ok_or_else(|| {
            Error::user(format!("No definitions found for `{word}`."))
        })?;
        entry.meanings.truncate(MAX_MEANINGS);
        for meaning in &mut entry.meanings {
            meaning.definitions.truncate(MAX_DEFINITIONS);
        }
        Ok(entry)
    }

    /// A random fact in English.
    pub async fn random_fact(&self) -> Result<String> {
        let url = format!(
            "{}/api/v2/facts/random",
            self.settings.facts_url.trim_end_matches('/')
        );
        debug!("request {url}");

        let fact: Fact = self
            .client
            .get(&url)
            .query(&[("language", "en")])
            .timeout(self.settings.request_timeout())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(fact.text)
    }

    /// PNG bytes of a QR code encoding `data`.
    pub async fn qr_code(&self, data: &str) -> Result<Vec<u8>> {
        if data.trim().is_empty() {
            return Err(Error::user("There is nothing to encode."));
        }

        let url = format!(
            "{}/v1/create-qr-code/",
            self.settings.qr_url.trim_end_matches('/')
        );
        debug!("request {url}");

        let bytes = self
            .client
            .get(&url)
            .query(&[("size", "300x300"), ("data", data)])
            .timeout(self.settings.request_timeout())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use mockito::Matcher;
    use std::io::Write as _;

    fn client(url: &str) -> LookupClient {
        LookupClient::new(LookupConfig {
            dictionary_url: url.to_string(),
            facts_url: url.to_string(),
            qr_url: url.to_string(),
            request_timeout_secs: 1,
        })
    }

    #[tokio::test]
    async fn test_define_trims_meanings_and_definitions() {
        let mut server = mockito::Server::new_async().await;
        let body = r#"[{
            "word": "hub",
            "phonetic": "/hʌb/",
            "meanings": [
                {"partOfSpeech": "noun", "definitions": [
                    {"definition": "d1"}, {"definition": "d2"}, {"definition": "d3"}]},
                {"partOfSpeech": "verb", "definitions": [{"definition": "v1", "example": "e"}]},
                {"partOfSpeech": "adjective", "definitions": [{"definition": "a1"}]},
                {"partOfSpeech": "adverb", "definitions": [{"definition": "x1"}]}
            ]
        }]"#;
        server
            .mock("GET", "/api/v2/entries/en/hub")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let definition = client(&server.url()).define("hub").await.unwrap();
        assert_eq!(definition.meanings.len(), 3);
        assert_eq!(definition.meanings[0].definitions.len(), 2);
        assert_eq!(definition.meanings[1].definitions[0].example.as_deref(), Some("e"));
    }

    #[tokio::test]
    async fn test_unknown_word_is_user_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v2/entries/en/qwzx")
            .with_status(404)
            .with_body(r#"{"title": "No Definitions Found"}"#)
            .create_async()
            .await;

        let error = client(&server.url()).define("qwzx").await.unwrap_err();
        assert!(error.is_user_facing());
        assert_eq!(error.to_string(), "No definitions found for `qwzx`.");
    }

    #[tokio::test]
    async fn test_random_fact() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v2/facts/random")
            .match_query(Matcher::UrlEncoded("language".to_owned(), "en".to_owned()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "1", "text": "Honey never spoils."}"#)
            .create_async()
            .await;

        let fact = client(&server.url()).random_fact().await.unwrap();
        assert_eq!(fact, "Honey never spoils.");
    }

    #[tokio::test]
    async fn test_slow_fact_service_times_out() {
        let mut server =
            mockito::Server::new_with_opts_async(mockito::ServerOpts::default()).await;
        server
            .mock("GET", "/api/v2/facts/random")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(|w| {
                std::thread::sleep(std::time::Duration::from_secs(3));
                w.write_all(br#"{"text": "late"}"#)
            })
            .create_async()
            .await;

        let error = client(&server.url()).random_fact().await.unwrap_err();
        assert!(matches!(error, Error::Http(ref e) if e.is_timeout()), "{error:?}");
        assert!(!error.is_user_facing());
    }

    #[tokio::test]
    async fn test_qr_code_returns_bytes() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/create-qr-code/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("size".to_owned(), "300x300".to_owned()),
                Matcher::UrlEncoded("data".to_owned(), "hello world".to_owned()),
            ]))
            .with_status(200)
            .with_header("content-type", "image/png")
            .with_body([0x89, b'P', b'N', b'G'])
            .create_async()
            .await;

        let bytes = client(&server.url()).qr_code("hello world").await.unwrap();
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_empty_qr_input_is_rejected_without_request() {
        let error = client("http://127.0.0.1:1").qr_code("  ").await.unwrap_err();
        assert!(error.is_user_facing());
    }
}
