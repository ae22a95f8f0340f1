use once_cell::sync::OnceCell;
use spantag_log::LogError;
use spantag_protocol::Attributes;

use crate::config::DecoratorsConfig;
use crate::defaults::builtin_rules;
use crate::rule::DecorationRule;

static GLOBAL: OnceCell<DecorationEngine> = OnceCell::new();

/// Applies rules to a set of attributes in order.
///
/// Every rule sees the attributes written by the rules before it. When two rules write the same
/// tag, the later one wins.
pub fn apply(rules: &[DecorationRule], attributes: &mut Attributes) {
    for rule in rules {
        rule.apply(attributes);
    }
}

/// An immutable, ordered list of decoration rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecorationEngine {
    rules: Vec<DecorationRule>,
}

impl DecorationEngine {
    /// Creates an engine from a list of valid rules.
    pub fn new(rules: Vec<DecorationRule>) -> Self {
        Self { rules }
    }

    /// Creates an engine with the built-in rules.
    pub fn builtin() -> Self {
        Self::new(builtin_rules())
    }

    /// Creates an engine from configuration.
    ///
    /// Entries that do not form a valid rule are skipped with a warning. An empty list of
    /// decorators results in an engine that does nothing.
    pub fn from_config(config: &DecoratorsConfig) -> Self {
        let mut rules = Vec::with_capacity(config.decorators.len());

        for (index, entry) in config.decorators.iter().enumerate() {
            match DecorationRule::from_config(entry) {
                Ok(rule) => rules.push(rule),
                Err(error) => spantag_log::warn!(
                    index,
                    "skipping decoration rule: {}",
                    LogError(&error)
                ),
            }
        }

        spantag_log::debug!(
            "loaded {} of {} decoration rules",
            rules.len(),
            config.decorators.len()
        );
        Self::new(rules)
    }

    /// Creates an engine from configuration, or with the built-in rules if there is none.
    pub fn from_optional_config(config: Option<&DecoratorsConfig>) -> Self {
        match config {
            Some(config) => Self::from_config(config),
            None => {
                spantag_log::debug!("no decorator configuration, using built-in rules");
                Self::builtin()
            }
        }
    }

    /// Returns the shared engine.
    ///
    /// Unless [`install`](Self::install) was called before, this initializes the shared engine with
    /// the built-in rules.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Makes this engine the shared engine.
    ///
    /// The shared engine is set only once. If it has already been initialized, the engine is
    /// returned back as error.
    pub fn install(self) -> Result<(), Self> {
        GLOBAL.set(self)
    }

    /// Returns the rules in application order.
    pub fn rules(&self) -> &[DecorationRule] {
        &self.rules
    }

    /// Applies all rules to a set of attributes.
    pub fn apply(&self, attributes: &mut Attributes) {
        apply(&self.rules, attributes);
    }
}
