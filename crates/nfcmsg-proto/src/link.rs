//! Deep-link codec.
//!
//! A message travels through a deep link as the `m` query parameter:
//!
//! ```text
//! <scheme>://<host>[/path]?m=<percent-encoded UTF-8 message>
//! ```
//!
//! Two profiles exist. The custom profile (`nfcmsg://read`) checks only the
//! scheme, since platforms are free to mangle the host of a non-HTTP scheme.
//! The web profile (`https://<host>/read`) checks scheme and host, since an
//! `https` link without a host check would match any web page.
//!
//! # Invariants
//!
//! - Round-trip: `codec.decode(&codec.encode(s)) == Some(s)` for every `s`.
//! - Decoding never errors. Malformed, foreign-scheme and foreign-host links
//!   all decode to `None`.

use url::Url;

/// Query parameter carrying the message.
pub const MESSAGE_PARAM: &str = "m";

/// Scheme of the custom profile.
pub const CUSTOM_SCHEME: &str = "nfcmsg";

/// Host of the custom profile.
pub const CUSTOM_HOST: &str = "read";

/// Scheme of the web profile.
pub const WEB_SCHEME: &str = "https";

/// Default host of the web profile.
pub const DEFAULT_WEB_HOST: &str = "nfcmsg.app";

/// Path of the web profile.
pub const WEB_PATH: &str = "/read";

/// Whether decoding validates the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostPolicy {
    /// Accept any host.
    Ignore,
    /// Host must match the codec's host (ASCII case-insensitive).
    Match,
}

/// Encodes messages into deep links and decodes them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCodec {
    scheme: String,
    host: String,
    path: String,
    host_policy: HostPolicy,
}

impl LinkCodec {
    /// Custom-scheme profile: `nfcmsg://read?m=...`, host not validated.
    pub fn custom() -> Self {
        Self {
            scheme: CUSTOM_SCHEME.to_string(),
            host: CUSTOM_HOST.to_string(),
            path: String::new(),
            host_policy: HostPolicy::Ignore,
        }
    }

    /// Web profile: `https://<host>/read?m=...`, scheme and host validated.
    pub fn web(host: impl Into<String>) -> Self {
        Self {
            scheme: WEB_SCHEME.to_string(),
            host: host.into(),
            path: WEB_PATH.to_string(),
            host_policy: HostPolicy::Match,
        }
    }

    /// Expected scheme (without `://`).
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Host written into encoded links.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path written into encoded links. Empty for the custom profile.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Host validation policy applied on decode.
    pub fn host_policy(&self) -> HostPolicy {
        self.host_policy
    }

    /// Fixed link prefix, everything before the query.
    pub fn prefix(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.path)
    }

    /// Encode `message` into a deep link.
    ///
    /// No length limit is applied here. Tag capacity is enforced by whoever
    /// writes the link.
    pub fn encode(&self, message: &str) -> String {
        format!("{}?{MESSAGE_PARAM}={}", self.prefix(), urlencoding::encode(message))
    }

    /// Decode a deep link back into its message.
    ///
    /// Returns `None` when the link is malformed or has no authority,
    /// belongs to another scheme, fails the host policy, or carries no `m`
    /// parameter. The host is the one a URL parser resolves, so userinfo,
    /// ports and backslash separators cannot smuggle a foreign host past
    /// the check.
    pub fn decode(&self, url: &str) -> Option<String> {
        let url = Url::parse(url).ok()?;

        if !url.has_host() || !url.scheme().eq_ignore_ascii_case(&self.scheme) {
            return None;
        }
        if self.host_policy == HostPolicy::Match
            && !url.host_str().is_some_and(|host| host.eq_ignore_ascii_case(&self.host))
        {
            return None;
        }

        url.query_pairs().find(|(key, _)| key == MESSAGE_PARAM).map(|(_, value)| value.into_owned())
    }
}

impl Default for LinkCodec {
    fn default() -> Self {
        Self::custom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_encode_matches_documented_shape() {
        let codec = LinkCodec::custom();
        insta::assert_snapshot!(codec.encode("Hello World"), @"nfcmsg://read?m=Hello%20World");
        insta::assert_snapshot!(codec.encode("Hello from NFC"), @"nfcmsg://read?m=Hello%20from%20NFC");
    }

    #[test]
    fn web_encode_escapes_reserved_characters() {
        let codec = LinkCodec::web(DEFAULT_WEB_HOST);
        insta::assert_snapshot!(codec.encode("a&b=c"), @"https://nfcmsg.app/read?m=a%26b%3Dc");
        insta::assert_snapshot!(codec.encode("héllo"), @"https://nfcmsg.app/read?m=h%C3%A9llo");
    }

    #[test]
    fn cold_start_link_decodes() {
        let codec = LinkCodec::custom();
        assert_eq!(codec.decode("nfcmsg://read?m=Hello%20World"), Some("Hello World".into()));
    }

    #[test]
    fn custom_profile_ignores_host() {
        let codec = LinkCodec::custom();
        assert_eq!(codec.decode("nfcmsg://elsewhere/x?m=hi"), Some("hi".into()));
        assert_eq!(codec.decode("nfcmsg:///?m=hi"), Some("hi".into()));
    }

    #[test]
    fn web_profile_checks_host() {
        let codec = LinkCodec::web("nfcmsg.app");
        assert_eq!(codec.decode("https://nfcmsg.app/read?m=hi"), Some("hi".into()));
        assert_eq!(codec.decode("https://NFCMSG.app:443/read?m=hi"), Some("hi".into()));
        assert_eq!(codec.decode("https://user@nfcmsg.app/read?m=hi"), Some("hi".into()));
        assert_eq!(codec.decode("https://example.com/read?m=hi"), None);
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert_eq!(LinkCodec::custom().decode("NFCMSG://read?m=x"), Some("x".into()));
    }

    #[test]
    fn foreign_scheme_is_absent() {
        let codec = LinkCodec::custom();
        assert_eq!(codec.decode("https://read?m=hi"), None);
        assert_eq!(codec.decode("otherapp://read?m=hi"), None);
    }

    #[test]
    fn malformed_links_are_absent() {
        let codec = LinkCodec::custom();
        for url in ["", "nfcmsg", "nfcmsg:read?m=x", "://read?m=x", "1nfc://read?m=x", "nf cmsg://r?m=x"]
        {
            assert_eq!(codec.decode(url), None, "{url:?}");
        }
    }

    #[test]
    fn missing_param_is_absent() {
        let codec = LinkCodec::custom();
        assert_eq!(codec.decode("nfcmsg://read/path"), None);
        assert_eq!(codec.decode("nfcmsg://read?x=1&mm=2"), None);
    }

    #[test]
    fn empty_param_is_present() {
        let codec = LinkCodec::custom();
        assert_eq!(codec.decode("nfcmsg://read?m="), Some(String::new()));
        assert_eq!(codec.decode("nfcmsg://read?m"), Some(String::new()));
    }

    #[test]
    fn first_param_wins_and_plus_is_space() {
        let codec = LinkCodec::custom();
        assert_eq!(codec.decode("nfcmsg://read?a=1&m=one+two&m=three"), Some("one two".into()));
    }

    #[test]
    fn fragment_is_ignored() {
        let codec = LinkCodec::custom();
        assert_eq!(codec.decode("nfcmsg://read?m=hi#m=bye"), Some("hi".into()));
    }

    #[test]
    fn invalid_utf8_escape_is_replaced() {
        let decoded = LinkCodec::custom().decode("nfcmsg://read?m=%FF%FE");
        assert_eq!(decoded.as_deref(), Some("\u{FFFD}\u{FFFD}"));
    }
}
