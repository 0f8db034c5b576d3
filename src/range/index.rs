// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Plain ordered date index without offset metadata.

use std::ops::Deref;

use chrono::NaiveDateTime;

/// An ordered sequence of dates with no offset attached.
///
/// Returned by [`DateRange::take`](crate::DateRange::take) and
/// [`DateRange::filter`](crate::DateRange::filter), where the selected dates
/// need not lie on a regular grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DateIndex(Vec<NaiveDateTime>);

impl DateIndex {
    /// Wraps a vector of dates.
    pub fn new(values: Vec<NaiveDateTime>) -> Self {
        Self(values)
    }

    /// Consumes the index and returns the dates.
    pub fn into_vec(self) -> Vec<NaiveDateTime> {
        self.0
    }
}

impl Deref for DateIndex {
    type Target = [NaiveDateTime];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<NaiveDateTime>> for DateIndex {
    fn from(values: Vec<NaiveDateTime>) -> Self {
        Self(values)
    }
}

impl FromIterator<NaiveDateTime> for DateIndex {
    fn from_iter<I: IntoIterator<Item = NaiveDateTime>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for DateIndex {
    type Item = NaiveDateTime;
    type IntoIter = std::vec::IntoIter<NaiveDateTime>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
