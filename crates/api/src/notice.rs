//! Flash notices carried across a redirect in a cookie.
//!
//! The cookie value is `<level>:<message>`. It is written just before a
//! redirect and removed by the page that renders it.

use std::fmt;
use std::str::FromStr;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Name of the notice cookie.
pub const NOTICE_COOKIE: &str = "notice";

/// Severity of a notice, used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// The action worked.
    Success,
    /// The action was rejected.
    Error,
    /// Neutral information.
    Info,
}

impl NoticeLevel {
    /// Returns the wire and CSS name of the level.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

impl FromStr for NoticeLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            _ => Err(()),
        }
    }
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// Creates a success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Creates an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    /// Creates an info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Parses a cookie value. Unknown levels and missing separators yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (level, message) = value.split_once(':')?;
        Some(Self {
            level: level.parse().ok()?,
            message: message.to_string(),
        })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.level.as_str(), self.message)
    }
}

/// Adds the notice cookie to a jar.
#[must_use]
pub fn set_notice(jar: CookieJar, notice: &Notice) -> CookieJar {
    jar.add(
        Cookie::build((NOTICE_COOKIE, notice.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax),
    )
}

/// Reads the pending notice and removes its cookie.
#[must_use]
pub fn take_notice(jar: CookieJar) -> (CookieJar, Option<Notice>) {
    let Some(notice) = jar.get(NOTICE_COOKIE).and_then(|c| Notice::parse(c.value())) else {
        return (jar, None);
    };
    (
        jar.remove(Cookie::build((NOTICE_COOKIE, "")).path("/")),
        Some(notice),
    )
}
