//! Loaded wordlists, fetched once at startup and immutable afterwards

use log::{info, warn};
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use super::catalog::WordlistId;

#[derive(Debug, Error)]
pub enum WordlistError {
    #[error("failed to fetch {name} wordlist from {url}: {source}")]
    Fetch {
        name: &'static str,
        url: String,
        source: reqwest::Error,
    },
    #[error("{name} wordlist source {url} answered with HTTP {status}")]
    Status {
        name: &'static str,
        url: String,
        status: StatusCode,
    },
    #[error("failed to parse {name} wordlist: {source}")]
    Parse {
        name: &'static str,
        source: serde_json::Error,
    },
    #[error("{0} wordlist has no words")]
    Empty(&'static str),
    #[error("wordlist id {0} is not in the catalog")]
    NotFound(i64),
}

#[derive(Debug, Clone)]
pub struct Wordlist {
    pub id: WordlistId,
    pub name: &'static str,
    pub expected_size: usize,
    pub source: String,
    words: Vec<String>,
}

impl Wordlist {
    /// An entry that has not been loaded yet (unusable)
    pub fn unloaded(id: WordlistId, source: impl Into<String>) -> Self {
        Self {
            id,
            name: id.name(),
            expected_size: id.expected_size(),
            source: source.into(),
            words: Vec::new(),
        }
    }

    /// An entry built from words already in memory
    pub fn with_words<I, S>(id: WordlistId, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut wordlist = Self::unloaded(id, "memory");
        wordlist.words = words.into_iter().map(Into::into).collect();
        wordlist
    }

    /// Usable iff at least one word was loaded
    pub fn is_usable(&self) -> bool {
        !self.words.is_empty()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parse a wordlist body: a JSON array of strings
///
/// Blank entries are dropped so they can never be drawn.
pub fn parse_words(
    id: WordlistId,
    body: &[u8],
) -> Result<Vec<String>, WordlistError> {
    let mut words = Vec::with_capacity(id.expected_size());
    let parsed: Vec<String> = serde_json::from_slice(body).map_err(|source| {
        WordlistError::Parse {
            name: id.name(),
            source,
        }
    })?;
    words.extend(
        parsed
            .into_iter()
            .map(|w| w.trim().to_string())
            .filter(|w| !w.is_empty()),
    );
    Ok(words)
}

/// The catalog with its words, resolved by id
#[derive(Debug, Clone, Default)]
pub struct WordlistRegistry {
    wordlists: Vec<Wordlist>,
}

impl WordlistRegistry {
    /// Fetch every catalog entry from `base_url`
    ///
    /// Any entry that cannot be fetched, parsed, or turns out empty fails the
    /// whole load: serving with a broken list is not an option.
    pub async fn load(base_url: &str, timeout: Duration) -> Result<Self, WordlistError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("passph/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| WordlistError::Fetch {
                name: "any",
                url: base_url.to_string(),
                source,
            })?;

        let mut wordlists = Vec::with_capacity(WordlistId::ALL.len());
        for id in WordlistId::ALL {
            let wordlist = Self::load_entry(&client, id, &id.source_url(base_url)).await?;
            wordlists.push(wordlist);
        }

        Ok(Self { wordlists })
    }

    /// Fetch a single catalog entry
    pub async fn load_entry(
        client: &reqwest::Client,
        id: WordlistId,
        url: &str,
    ) -> Result<Wordlist, WordlistError> {
        let mut wordlist = Wordlist::unloaded(id, url);

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|source| WordlistError::Fetch {
                name: id.name(),
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(WordlistError::Status {
                name: id.name(),
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| WordlistError::Fetch {
                name: id.name(),
                url: url.to_string(),
                source,
            })?;

        wordlist.words = parse_words(id, &body)?;
        if !wordlist.is_usable() {
            return Err(WordlistError::Empty(id.name()));
        }

        if wordlist.len() != wordlist.expected_size {
            warn!(
                "{} wordlist has {} words, expected {}",
                wordlist.name,
                wordlist.len(),
                wordlist.expected_size
            );
        }
        info!("📚 Loaded {} wordlist ({} words)", wordlist.name, wordlist.len());

        Ok(wordlist)
    }

    /// Build a registry from lists that are already in memory
    pub fn from_wordlists(wordlists: impl IntoIterator<Item = Wordlist>) -> Self {
        let mut wordlists: Vec<Wordlist> = wordlists.into_iter().collect();
        wordlists.sort_by_key(|w| w.id.index());
        wordlists.dedup_by_key(|w| w.id);
        Self { wordlists }
    }

    pub fn get(&self, id: WordlistId) -> Option<&Wordlist> {
        self.wordlists.iter().find(|w| w.id == id)
    }

    /// Resolve a raw id as stored or clicked by a user
    pub fn resolve(&self, index: i64) -> Result<&Wordlist, WordlistError> {
        WordlistId::from_index(index)
            .and_then(|id| self.get(id))
            .ok_or(WordlistError::NotFound(index))
    }

    pub fn is_usable(&self, index: i64) -> bool {
        self.resolve(index).map_or(false, Wordlist::is_usable)
    }

    /// Ids of every usable list, in catalog order
    pub fn usable_ids(&self) -> impl Iterator<Item = WordlistId> + '_ {
        self.wordlists
            .iter()
            .filter(|w| w.is_usable())
            .map(|w| w.id)
    }

    pub fn len(&self) -> usize {
        self.wordlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wordlists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one HTTP response on a random local port
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/words.json")
    }

    fn client() -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_words_drops_blanks() {
        let words = parse_words(WordlistId::Bip39, br#"["abandon", " ", "ability", ""]"#).unwrap();
        assert_eq!(words, vec!["abandon", "ability"]);
    }

    #[test]
    fn test_parse_words_rejects_non_array() {
        let result = parse_words(WordlistId::Bip39, br#"{"words": []}"#);
        assert!(matches!(result, Err(WordlistError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_load_entry_success() {
        let url = serve_once("200 OK", r#"["alpha", "bravo", "charlie"]"#).await;

        let wordlist = WordlistRegistry::load_entry(&client(), WordlistId::DiceShort1, &url)
            .await
            .unwrap();

        assert!(wordlist.is_usable());
        assert_eq!(wordlist.words(), ["alpha", "bravo", "charlie"]);
        assert_eq!(wordlist.source, url);
        assert_eq!(wordlist.name, "Dice Short 1");
    }

    #[tokio::test]
    async fn test_load_entry_empty_list_is_fatal() {
        let url = serve_once("200 OK", "[]").await;
        let result = WordlistRegistry::load_entry(&client(), WordlistId::Wordle, &url).await;
        assert!(matches!(result, Err(WordlistError::Empty("Wordle"))));
    }

    #[tokio::test]
    async fn test_load_entry_http_error() {
        let url = serve_once("404 Not Found", "missing").await;
        let result = WordlistRegistry::load_entry(&client(), WordlistId::Wordle, &url).await;
        assert!(matches!(result, Err(WordlistError::Status { .. })));
    }

    #[tokio::test]
    async fn test_load_entry_garbage_body() {
        let url = serve_once("200 OK", "<html>nope</html>").await;
        let result = WordlistRegistry::load_entry(&client(), WordlistId::Wordle, &url).await;
        assert!(matches!(result, Err(WordlistError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_load_fails_when_source_unreachable() {
        // Bind then drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = WordlistRegistry::load(&format!("http://{addr}"), Duration::from_secs(1)).await;
        assert!(matches!(result, Err(WordlistError::Fetch { .. })));
    }

    #[test]
    fn test_resolve_and_usability() {
        let registry = WordlistRegistry::from_wordlists([
            Wordlist::with_words(WordlistId::Bip39, ["abandon", "ability"]),
            Wordlist::unloaded(WordlistId::Wordle, "http://example.invalid"),
        ]);

        assert_eq!(registry.resolve(0).unwrap().id, WordlistId::Bip39);
        assert!(registry.is_usable(0));
        // Known to the registry but never loaded
        assert!(registry.resolve(1).is_ok());
        assert!(!registry.is_usable(1));
        // Valid catalog id missing from this registry
        assert!(matches!(registry.resolve(2), Err(WordlistError::NotFound(2))));
        // Outside the catalog
        assert!(matches!(registry.resolve(99), Err(WordlistError::NotFound(99))));
        assert!(!registry.is_usable(-1));
    }

    #[test]
    fn test_usable_ids_in_catalog_order() {
        let registry = WordlistRegistry::from_wordlists([
            Wordlist::with_words(WordlistId::DiceLong, ["c"]),
            Wordlist::with_words(WordlistId::Bip39, ["a"]),
            Wordlist::unloaded(WordlistId::Wordle, "nowhere"),
        ]);

        let ids: Vec<_> = registry.usable_ids().collect();
        assert_eq!(ids, vec![WordlistId::Bip39, WordlistId::DiceLong]);
    }
}
