//! Query parameter helpers.
//!
//! The server reads several parameters more than once (`pluginProperty`,
//! `tagDef`, `customField`, `controlPluginName`), so parameters are kept as an
//! ordered list of pairs rather than a map.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use killbill_model::AuditLevel;
use url::form_urlencoded;

/// Default page size of the pagination endpoints.
pub const DEFAULT_LIMIT: u64 = 100;

/// Default time the server waits for an operation to complete when asked to.
pub const DEFAULT_CALL_TIMEOUT_SECONDS: u64 = 10;

/// Ordered query parameters; keys may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter when a value is present.
    #[must_use]
    pub fn with_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append one parameter per value, under the same key.
    #[must_use]
    pub fn with_all<I>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// Append a local date as `YYYY-MM-DD`.
    #[must_use]
    pub fn with_date(self, key: impl Into<String>, date: Option<NaiveDate>) -> Self {
        self.with_opt(key, date.map(|d| d.format("%Y-%m-%d")))
    }

    /// Append an instant in RFC 3339.
    #[must_use]
    pub fn with_date_time(self, key: impl Into<String>, at: Option<DateTime<Utc>>) -> Self {
        self.with_opt(key, at.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)))
    }

    /// Append the `audit` level.
    #[must_use]
    pub fn with_audit(self, audit: AuditLevel) -> Self {
        self.with("audit", audit)
    }

    /// Append `offset` and `limit`.
    #[must_use]
    pub fn with_page(self, page: Pagination) -> Self {
        self.with("offset", page.offset).with("limit", page.limit)
    }

    /// Append one `pluginProperty` per key/value pair.
    #[must_use]
    pub fn with_plugin_properties(self, properties: &[(String, String)]) -> Self {
        self.with_all(
            "pluginProperty",
            properties.iter().map(|(k, v)| plugin_property(k, v)),
        )
    }

    /// Append the wait-for-completion parameters when enabled.
    #[must_use]
    pub fn with_call_completion(self, completion: CallCompletion) -> Self {
        if completion.is_active() {
            self.with("callCompletion", true)
                .with("callTimeoutSec", completion.timeout_seconds)
        } else {
            self
        }
    }

    /// Append a parameter in place.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Append every parameter of `other`, after the existing ones.
    pub fn extend(&mut self, other: &QueryParams) {
        self.pairs.extend(other.pairs.iter().cloned());
    }

    /// First value of a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value of a key, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Window of a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pagination {
    /// Index of the first record.
    pub offset: u64,
    /// Maximum number of records.
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// A page starting at `offset`.
    #[must_use]
    pub const fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// The page after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self {
            offset: self.offset + self.limit,
            limit: self.limit,
        }
    }
}

/// Asks the server to wait until an entitlement change has been processed
/// before answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallCompletion {
    /// Whether to wait.
    pub enabled: bool,
    /// How long the server may wait.
    pub timeout_seconds: u64,
}

impl Default for CallCompletion {
    fn default() -> Self {
        Self {
            enabled: false,
            timeout_seconds: DEFAULT_CALL_TIMEOUT_SECONDS,
        }
    }
}

impl CallCompletion {
    /// Answer right away.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Wait up to `timeout_seconds`.
    #[must_use]
    pub const fn wait(timeout_seconds: u64) -> Self {
        Self {
            enabled: true,
            timeout_seconds,
        }
    }

    /// Whether the server is asked to wait. A zero wait is no wait.
    #[must_use]
    pub const fn is_active(self) -> bool {
        self.enabled && self.timeout_seconds > 0
    }

    /// HTTP timeout needed to outlast the server-side wait.
    #[must_use]
    pub fn http_timeout(self, default: Duration) -> Duration {
        if self.is_active() {
            default.max(Duration::from_secs(self.timeout_seconds))
        } else {
            default
        }
    }
}

/// Encodes one plugin property as `key=value`, each side form-encoded.
#[must_use]
pub fn plugin_property(key: &str, value: &str) -> String {
    format!("{}={}", form_encode(key), form_encode(value))
}

/// Percent-encodes a path segment.
#[must_use]
pub fn encode_segment(segment: &str) -> String {
    // Form encoding maps spaces to '+' and escapes literal '+', so every
    // remaining '+' is a space.
    form_encode(segment).replace('+', "%20")
}

fn form_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_repeated_keys_in_order() {
        let params = QueryParams::new()
            .with("tagDef", "a")
            .with("audit", AuditLevel::Full)
            .with("tagDef", "b");

        assert_eq!(params.get_all("tagDef").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(params.get("audit"), Some("FULL"));
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn optional_values_are_skipped() {
        let params = QueryParams::new()
            .with_opt("externalKey", None::<String>)
            .with_date("requestedDate", None)
            .with_opt("withPluginInfo", Some(true));

        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("withPluginInfo", "true")]);
    }

    #[test]
    fn plugin_properties_are_encoded_pairs() {
        let props = vec![
            ("card type".to_string(), "visa".to_string()),
            ("token".to_string(), "a=b&c".to_string()),
        ];
        let params = QueryParams::new().with_plugin_properties(&props);

        assert_eq!(
            params.get_all("pluginProperty").collect::<Vec<_>>(),
            vec!["card+type=visa", "token=a%3Db%26c"]
        );
    }

    #[test]
    fn pagination_defaults() {
        let page = Pagination::default();
        assert_eq!(page, Pagination::new(0, 100));
        assert_eq!(page.next(), Pagination::new(100, 100));

        let params = QueryParams::new().with_page(page);
        assert_eq!(params.get("offset"), Some("0"));
        assert_eq!(params.get("limit"), Some("100"));
    }

    #[test]
    fn dates_are_iso() {
        let params = QueryParams::new()
            .with_date("targetDate", NaiveDate::from_ymd_opt(2024, 1, 31))
            .with_date_time(
                "effectiveDate",
                DateTime::parse_from_rfc3339("2024-01-31T10:00:00Z")
                    .ok()
                    .map(|t| t.with_timezone(&Utc)),
            );

        assert_eq!(params.get("targetDate"), Some("2024-01-31"));
        assert_eq!(params.get("effectiveDate"), Some("2024-01-31T10:00:00.000Z"));
    }

    #[test]
    fn call_completion_raises_timeout() {
        let default = Duration::from_secs(10);
        assert_eq!(CallCompletion::none().http_timeout(default), default);
        assert_eq!(CallCompletion::wait(5).http_timeout(default), default);
        assert_eq!(
            CallCompletion::wait(30).http_timeout(default),
            Duration::from_secs(30)
        );

        let params = QueryParams::new().with_call_completion(CallCompletion::wait(30));
        assert_eq!(params.get("callCompletion"), Some("true"));
        assert_eq!(params.get("callTimeoutSec"), Some("30"));
        assert!(QueryParams::new()
            .with_call_completion(CallCompletion::none())
            .is_empty());
    }

    #[test]
    fn zero_wait_disables_call_completion() {
        let zero = CallCompletion::wait(0);
        assert!(!zero.is_active());
        assert!(QueryParams::new().with_call_completion(zero).is_empty());
        assert_eq!(
            zero.http_timeout(Duration::from_secs(10)),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        assert_eq!(encode_segment("john@example.com"), "john%40example.com");
        assert_eq!(encode_segment("a b+c/d"), "a%20b%2Bc%2Fd");
    }
}
