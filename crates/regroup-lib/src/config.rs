//! Host-tunable analyzer settings.

/// Configuration for [`PatternAnalyzer`](crate::PatternAnalyzer).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Maximum number of memoized analyses; `None` keeps every entry.
    pub cache_limit: Option<usize>,
    /// Module prefix of the dialect's flag constants
    pub flags_module: String,
    /// Unqualified names of the verbose flag
    pub verbose_flag_names: Vec<String>,
    /// Numeric value of the verbose flag
    pub verbose_bit: i64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            cache_limit: None,
            flags_module: "re".to_string(),
            verbose_flag_names: vec!["X".to_string(), "VERBOSE".to_string()],
            verbose_bit: 64,
        }
    }
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_limit(mut self, limit: usize) -> Self {
        self.cache_limit = Some(limit);
        self
    }

    pub fn unbounded(mut self) -> Self {
        self.cache_limit = None;
        self
    }

    pub fn flags_module(mut self, module: impl Into<String>) -> Self {
        self.flags_module = module.into();
        self
    }

    pub fn verbose_flag_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.verbose_flag_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn verbose_bit(mut self, bit: i64) -> Self {
        self.verbose_bit = bit;
        self
    }

    /// Whether `name` is one of the module's flag constants.
    ///
    /// Accepts `re.NAME` and the enum spelling `re.RegexFlag.NAME`.
    pub(crate) fn flag_constant<'n>(&self, name: &'n str) -> Option<&'n str> {
        let rest = name
            .strip_prefix(self.flags_module.as_str())?
            .strip_prefix('.')?;
        let rest = rest.strip_prefix("RegexFlag.").unwrap_or(rest);
        (!rest.is_empty() && !rest.contains('.')).then_some(rest)
    }

    pub(crate) fn is_verbose_name(&self, constant: &str) -> bool {
        self.verbose_flag_names.iter().any(|n| n == constant)
    }
}
