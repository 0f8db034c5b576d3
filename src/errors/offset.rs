// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for offset resolution.

/// Errors that can occur while resolving an [`Offset`](crate::Offset).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OffsetError {
    /// The time rule name does not map to any known offset.
    ///
    /// Known rules are `WEEKDAY`, `EOM`, `W@MON` through `W@SUN`,
    /// `Q@JAN`, `Q@FEB`, `Q@MAR` and `A@DEC`.
    #[error("Unknown time rule: {rule}")]
    UnknownTimeRule {
        /// The rule name that failed to resolve
        rule: String,
    },
}

impl OffsetError {
    /// Create an `UnknownTimeRule` error.
    pub fn unknown_time_rule(rule: impl Into<String>) -> Self {
        OffsetError::UnknownTimeRule { rule: rule.into() }
    }
}
