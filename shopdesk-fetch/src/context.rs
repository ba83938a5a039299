//! Fetch context providing access to the transport and clock.
//!
//! The fetch context is built once from configuration and passed to every
//! operation. Nothing in the protocol code reads the environment or the
//! system clock directly.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;

use crate::host::http::{HttpClient, HttpTransport};

/// Default cap on the number of days fetched per listing.
pub const DEFAULT_MAX_DAYS: u32 = 31;

// ============================================================================
// Clock
// ============================================================================

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchSettings {
    /// Timeout for each HTTP request.
    pub timeout: Duration,
    /// Maximum number of days fetched per listing.
    pub max_days: u32,
    /// Domains the default transport may contact; unrestricted when `None`.
    pub allowed_domains: Option<Vec<String>>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_days: DEFAULT_MAX_DAYS,
            allowed_domains: None,
        }
    }
}

impl FetchSettings {
    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the day cap. Zero is raised to one.
    #[must_use]
    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days.max(1);
        self
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context handed to every operation.
#[derive(Clone)]
pub struct FetchContext {
    /// Transport for outbound requests.
    pub http: Arc<dyn HttpTransport>,
    /// Source of timestamps for request signing.
    pub clock: Arc<dyn Clock>,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context with the default transport and system clock.
    pub fn new() -> Self {
        Self::with_settings(FetchSettings::default())
    }

    /// Creates a context with custom settings.
    pub fn with_settings(settings: FetchSettings) -> Self {
        Self::builder().settings(settings).build()
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the current time from the context clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Returns the effective timeout for requests.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }

    /// Returns the day cap for listings.
    pub fn max_days(&self) -> u32 {
        self.settings.max_days
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
pub struct FetchContextBuilder {
    http: Option<Arc<dyn HttpTransport>>,
    clock: Option<Arc<dyn Clock>>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            http: None,
            clock: None,
            settings: FetchSettings::default(),
        }
    }

    /// Sets the transport.
    #[must_use]
    pub fn http(mut self, http: Arc<dyn HttpTransport>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the fetch settings.
    #[must_use]
    pub fn settings(mut self, settings: FetchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Sets the day cap.
    #[must_use]
    pub fn max_days(mut self, max_days: u32) -> Self {
        self.settings = self.settings.with_max_days(max_days);
        self
    }

    /// Builds the fetch context.
    ///
    /// Without an explicit transport, an [`HttpClient`] is built from the
    /// timeout and domain allowlist in the settings.
    pub fn build(self) -> FetchContext {
        let settings = self.settings;
        let http = self.http.unwrap_or_else(|| {
            let client = HttpClient::with_timeout(settings.timeout);
            let client = match &settings.allowed_domains {
                Some(domains) => client.allow_domains(domains.clone()),
                None => client,
            };
            Arc::new(client)
        });

        FetchContext {
            http,
            clock: self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            settings,
        }
    }
}

impl Default for FetchContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
