/// Default number of rows per page for list queries.
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Configuration for a [`Compiler`](super::Compiler).
///
/// Statement logging is disabled by default and only has an effect when the
/// crate is built with the `tracing` feature.
#[derive(Debug, Clone)]
pub struct CompilerConfig {
    /// Page size used when a list query does not specify one.
    pub default_page_size: u64,
    /// Upper bound for the page size of list queries. `None` means unbounded.
    pub max_page_size: Option<u64>,
    /// Whether compiled statements are emitted as tracing events.
    pub log_statements: bool,
    /// Truncate logged statements (in bytes). `None` means no truncation.
    pub log_max_sql_length: Option<usize>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
            log_statements: false,
            log_max_sql_length: Some(200),
        }
    }
}

impl CompilerConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size used when a list query does not specify one.
    ///
    /// Clamped to at least 1.
    pub fn default_page_size(mut self, size: u64) -> Self {
        self.default_page_size = size.max(1);
        self
    }

    /// Cap the page size of list queries.
    pub fn max_page_size(mut self, size: u64) -> Self {
        self.max_page_size = Some(size.max(1));
        self
    }

    /// Emit every compiled statement as a tracing event.
    pub fn enable_logging(mut self) -> Self {
        self.log_statements = true;
        self
    }

    /// Stop emitting compiled statements.
    pub fn disable_logging(mut self) -> Self {
        self.log_statements = false;
        self
    }

    /// Set maximum logged SQL length.
    pub fn log_max_sql_length(mut self, len: usize) -> Self {
        self.log_max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in logs.
    pub fn no_truncate(mut self) -> Self {
        self.log_max_sql_length = None;
        self
    }

    /// Resolve the effective page size for a requested one (0 = default).
    pub(crate) fn page_size(&self, requested: u64) -> u64 {
        let size = if requested == 0 {
            self.default_page_size
        } else {
            requested
        };
        match self.max_page_size {
            Some(max) => size.min(max),
            None => size,
        }
    }
}
