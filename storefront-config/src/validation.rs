use thiserror::Error;

use super::models::SearchConfig;

/// Page sizes above this are legal but produce very large responses.
const LARGE_MAX_LIMIT: usize = 10_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("limits.max_limit must be greater than zero")]
    ZeroMaxLimit,
    #[error("limits.default_limit ({default_limit}) exceeds limits.max_limit ({max_limit})")]
    DefaultExceedsMax {
        default_limit: usize,
        max_limit: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }
}

pub fn apply_guard_rails(config: &SearchConfig) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let limits = &config.limits;
    let mut warnings = ConfigWarnings::default();

    if limits.max_limit == 0 {
        return Err(ConfigGuardRailError::ZeroMaxLimit);
    }
    if limits.default_limit > limits.max_limit {
        return Err(ConfigGuardRailError::DefaultExceedsMax {
            default_limit: limits.default_limit,
            max_limit: limits.max_limit,
        });
    }

    if limits.default_limit == 0 {
        warnings.push_with_hint(
            "limits.default_limit is 0; queries without an explicit limit return no items",
            "Set limits.default_limit to a positive page size such as 20",
        );
    }

    if limits.max_limit > LARGE_MAX_LIMIT {
        warnings.push_with_hint(
            format!(
                "limits.max_limit is {}; a single page may materialize very large responses",
                limits.max_limit
            ),
            format!("Keep limits.max_limit at or below {LARGE_MAX_LIMIT}"),
        );
    }

    if limits.max_predicates == 0 {
        warnings.push(
            "limits.max_predicates is 0; every query with a `where` filter will be rejected",
        );
    }

    if limits.max_range_values == 0 {
        warnings.push(
            "limits.max_range_values is 0; every non-empty `in`/`nin` filter will be rejected",
        );
    }

    Ok(warnings)
}
