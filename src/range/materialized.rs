// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Materialized, sliceable date ranges.
//!
//! A [`DateRange`] is a strided view over a shared, immutable buffer of dates
//! together with the [`Offset`] the dates lie on. Slicing never copies: the
//! slice points into the same buffer. Ranges resolved from the canonical cache
//! additionally remember the canonical buffer they were cut from, through a
//! weak pointer that never keeps it alive.
//!
//! # Examples
//!
//! ```rust
//! use daterange::{DateRange, DateRangeRequest};
//!
//! let request = DateRangeRequest::new().from_date("2021-01-04").to_date("2021-01-29");
//! let range = DateRange::new(&request).unwrap();
//! assert_eq!(range.len(), 20);
//!
//! // Every fifth business day is every Monday
//! let mondays = range.slice_step(.., 5).unwrap();
//! assert_eq!(mondays.len(), 4);
//! assert_eq!(mondays.offset().n(), 5);
//! ```

use std::fmt;
use std::iter::{StepBy, Take};
use std::ops::{Bound, Index, RangeBounds};
use std::slice;
use std::sync::{Arc, Weak};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::cache::RangeCache;
use crate::errors::DateRangeError;
use crate::offsets::Offset;
use crate::range::index::DateIndex;
use crate::range::lazy::LazyDateRange;
use crate::range::request::{DateRangeRequest, ResolvedRequest};
use crate::tracing::spans;

/// Non-owning pointer to the canonical buffer a range was sliced from.
#[derive(Debug, Clone)]
struct ParentRef {
    data: Weak<[NaiveDateTime]>,
    offset: Offset,
}

/// A fixed-frequency, strictly increasing sequence of dates.
///
/// Every element lies on [`offset`](Self::offset)'s grid and consecutive
/// elements are exactly one offset apart.
#[derive(Debug, Clone)]
pub struct DateRange {
    data: Arc<[NaiveDateTime]>,
    start: usize,
    len: usize,
    stride: usize,
    offset: Offset,
    parent: Option<ParentRef>,
}

impl DateRange {
    /// Builds a range, using the process-wide canonical cache when eligible.
    ///
    /// The cache is consulted when both boundaries are given and lie strictly
    /// inside the cache window and the offset is anchored and not a tick.
    /// Everything else is generated directly.
    ///
    /// # Errors
    ///
    /// Any [`DateRangeError`] raised while resolving the request, generating
    /// the dates or looking them up in the cache.
    pub fn new(request: &DateRangeRequest) -> Result<Self, DateRangeError> {
        Self::with_cache(request, RangeCache::global())
    }

    /// Builds a range against an explicit cache instance.
    ///
    /// # Errors
    ///
    /// See [`DateRange::new`].
    pub fn with_cache(
        request: &DateRangeRequest,
        cache: &RangeCache,
    ) -> Result<Self, DateRangeError> {
        let resolved = request.resolve()?;
        let span = spans::construct_range(
            &resolved.offset,
            resolved.from_date,
            resolved.to_date,
            resolved.periods,
        );
        let _guard = span.enter();

        let window = cache.config();
        let in_window = |dt: Option<NaiveDateTime>| dt.is_some_and(|dt| window.contains_strictly(dt));

        if in_window(resolved.from_date)
            && in_window(resolved.to_date)
            && resolved.offset.is_anchored()
            && !resolved.offset.is_tick()
        {
            debug!("Resolving range against canonical cache");
            return cache.get_cached_range(
                resolved.from_date,
                resolved.to_date,
                resolved.periods,
                Some(resolved.offset),
                None,
            );
        }

        Self::materialize(resolved)
    }

    /// Resolves a range against the process-wide canonical cache.
    ///
    /// See [`RangeCache::get_cached_range`].
    ///
    /// # Errors
    ///
    /// See [`RangeCache::get_cached_range`].
    pub fn get_cached_range(
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
        periods: Option<usize>,
        offset: Option<Offset>,
        time_rule: Option<&str>,
    ) -> Result<Self, DateRangeError> {
        RangeCache::global().get_cached_range(start, end, periods, offset, time_rule)
    }

    /// Wraps a pre-built sequence of dates.
    ///
    /// The dates are trusted to lie on `offset`'s grid; only ordering is
    /// checked.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::UnsortedSequence`] unless the dates are
    /// strictly increasing.
    pub fn from_sequence(
        values: Vec<NaiveDateTime>,
        offset: Offset,
    ) -> Result<Self, DateRangeError> {
        if let Some(position) = values
            .windows(2)
            .position(|pair| pair[1] <= pair[0])
            .map(|i| i + 1)
        {
            return Err(DateRangeError::UnsortedSequence { position });
        }
        Ok(Self::from_parts(Arc::from(values), offset))
    }

    /// Wraps a buffer without validation.
    pub(crate) fn from_parts(data: Arc<[NaiveDateTime]>, offset: Offset) -> Self {
        let len = data.len();
        Self {
            data,
            start: 0,
            len,
            stride: 1,
            offset,
            parent: None,
        }
    }

    /// The half-open window `[start, end)` of a canonical buffer, remembering
    /// the buffer as its parent.
    pub(crate) fn sliced_from_canonical(
        canonical: &Arc<[NaiveDateTime]>,
        start: usize,
        end: usize,
        offset: Offset,
    ) -> Self {
        let start = start.min(canonical.len());
        Self {
            data: Arc::clone(canonical),
            start,
            len: end.clamp(start, canonical.len()) - start,
            stride: 1,
            offset,
            parent: Some(ParentRef {
                data: Arc::downgrade(canonical),
                offset,
            }),
        }
    }

    fn materialize(resolved: ResolvedRequest) -> Result<Self, DateRangeError> {
        let generator = LazyDateRange::from_resolved(
            resolved.from_date,
            resolved.to_date,
            resolved.periods,
            resolved.offset,
            resolved.time_rule,
        )?;
        let span = spans::materialize_range(
            &resolved.offset,
            generator.from_date(),
            generator.to_date(),
        );
        let _guard = span.enter();

        let data: Arc<[NaiveDateTime]> = generator.into_iter().collect();
        debug!(len = data.len(), "Materialized date range");
        Ok(Self::from_parts(data, resolved.offset))
    }

    /// Number of dates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the range has no dates.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The offset consecutive dates are apart.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Canonical time rule name of the offset, if any.
    pub fn time_rule(&self) -> Option<&'static str> {
        self.offset.time_rule()
    }

    /// Date at `index`.
    pub fn get(&self, index: usize) -> Option<NaiveDateTime> {
        (index < self.len).then(|| self.data[self.start + index * self.stride])
    }

    /// First date.
    pub fn first(&self) -> Option<NaiveDateTime> {
        self.get(0)
    }

    /// Last date.
    pub fn last(&self) -> Option<NaiveDateTime> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Position of `date` in the range.
    pub fn position(&self, date: NaiveDateTime) -> Option<usize> {
        let (mut low, mut high) = (0, self.len);
        while low < high {
            let mid = low + (high - low) / 2;
            let candidate = self.data[self.start + mid * self.stride];
            match candidate.cmp(&date) {
                std::cmp::Ordering::Equal => return Some(mid),
                std::cmp::Ordering::Less => low = mid + 1,
                std::cmp::Ordering::Greater => high = mid,
            }
        }
        None
    }

    /// Whether `date` is one of the range's dates.
    pub fn contains(&self, date: NaiveDateTime) -> bool {
        self.position(date).is_some()
    }

    /// Iterates over the dates in order.
    pub fn iter(&self) -> DateRangeIter<'_> {
        DateRangeIter {
            inner: self.data[self.start..]
                .iter()
                .step_by(self.stride)
                .take(self.len),
        }
    }

    /// Copies the dates into a vector.
    pub fn to_vec(&self) -> Vec<NaiveDateTime> {
        self.iter().collect()
    }

    /// Unit-step slice sharing storage with `self`.
    ///
    /// Bounds are clamped to the range like array slicing: out-of-range
    /// bounds shrink the result rather than failing. The offset and parent are
    /// inherited.
    pub fn slice<R: RangeBounds<usize>>(&self, bounds: R) -> Self {
        let (start, end) = self.clamp_bounds(&bounds);
        Self {
            data: Arc::clone(&self.data),
            start: self.buffer_position(start),
            len: end - start,
            stride: self.stride,
            offset: self.offset,
            parent: self.parent.clone(),
        }
    }

    /// Slice taking every `step`-th date, sharing storage with `self`.
    ///
    /// A step other than one rescales the offset by `step`.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::InvalidSliceStep`] when `step` is zero.
    pub fn slice_step<R: RangeBounds<usize>>(
        &self,
        bounds: R,
        step: usize,
    ) -> Result<Self, DateRangeError> {
        if step == 0 {
            return Err(DateRangeError::InvalidSliceStep { step });
        }
        let (start, end) = self.clamp_bounds(&bounds);
        let offset = if step == 1 {
            self.offset
        } else {
            self.offset
                .times(i64::try_from(step).unwrap_or(i64::MAX))
        };
        Ok(Self {
            data: Arc::clone(&self.data),
            start: self.buffer_position(start),
            len: (end - start).div_ceil(step),
            stride: self.stride * step,
            offset,
            parent: self.parent.clone(),
        })
    }

    /// Buffer position of element `index`, kept within the buffer for empty
    /// views past the end.
    fn buffer_position(&self, index: usize) -> usize {
        (self.start + index * self.stride).min(self.data.len())
    }

    fn clamp_bounds<R: RangeBounds<usize>>(&self, bounds: &R) -> (usize, usize) {
        let start = match bounds.start_bound() {
            Bound::Included(&s) => s,
            Bound::Excluded(&s) => s.saturating_add(1),
            Bound::Unbounded => 0,
        }
        .min(self.len);
        let end = match bounds.end_bound() {
            Bound::Included(&e) => e.saturating_add(1),
            Bound::Excluded(&e) => e,
            Bound::Unbounded => self.len,
        }
        .clamp(start, self.len);
        (start, end)
    }

    /// Selects dates by position into a plain index.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::IndexOutOfBounds`] for any position past the
    /// end.
    pub fn take(&self, positions: &[usize]) -> Result<DateIndex, DateRangeError> {
        positions
            .iter()
            .map(|&index| {
                self.get(index).ok_or(DateRangeError::IndexOutOfBounds {
                    index,
                    len: self.len,
                })
            })
            .collect()
    }

    /// Selects the dates where `mask` is true into a plain index.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::LengthMismatch`] unless `mask` has one entry
    /// per date.
    pub fn filter(&self, mask: &[bool]) -> Result<DateIndex, DateRangeError> {
        if mask.len() != self.len {
            return Err(DateRangeError::LengthMismatch {
                expected: self.len,
                actual: mask.len(),
            });
        }
        Ok(self
            .iter()
            .zip(mask)
            .filter_map(|(date, &keep)| keep.then_some(date))
            .collect())
    }

    /// Whether this range was cut from a canonical cached range.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// The canonical range this range was cut from, while it is still alive.
    pub fn parent(&self) -> Option<DateRange> {
        let parent = self.parent.as_ref()?;
        parent
            .data
            .upgrade()
            .map(|data| Self::from_parts(data, parent.offset))
    }

    /// Whether both ranges view the same underlying buffer.
    pub fn shares_storage_with(&self, other: &DateRange) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Shifts the whole range by `n` offsets.
    ///
    /// For `n > 0` the first `n` dates are dropped and `n` new dates are
    /// generated past the end; `n < 0` does the same at the head. `n == 0`
    /// returns the range itself, sharing storage.
    ///
    /// When `|n|` covers the whole range the drop-and-append rule no longer
    /// applies: the result keeps the range's length and is regenerated
    /// starting `n` offsets after the first date. A three-date range shifted
    /// by five therefore still has three dates, not five dates continuing
    /// after the last one.
    ///
    /// # Errors
    ///
    /// - [`DateRangeError::EmptyRange`] when shifting an empty range by a
    ///   non-zero amount
    /// - [`DateRangeError::DateOutOfRange`] when the new dates overflow
    /// - any error from generating the new dates
    pub fn shift(&self, n: i64) -> Result<Self, DateRangeError> {
        if n == 0 {
            return Ok(self.clone());
        }
        let span = spans::shift_range(&self.offset, n, self.len);
        let _guard = span.enter();

        let (first, last) = self
            .first()
            .zip(self.last())
            .ok_or_else(|| DateRangeError::empty_range("shift"))?;
        let steps = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);

        if steps >= self.len {
            let start = self
                .offset
                .apply(first, n)
                .ok_or_else(|| DateRangeError::date_out_of_range(format!("shifting {first} by {n}")))?;
            debug!(start = %start, "Shift covers the whole range, regenerating");
            return self.generate(DateRangeRequest::new().from_date(start).periods(self.len));
        }

        let mut values = Vec::with_capacity(self.len);
        if n > 0 {
            let start = self
                .offset
                .apply(last, 1)
                .ok_or_else(|| DateRangeError::date_out_of_range(format!("extending past {last}")))?;
            let tail = self.generate(DateRangeRequest::new().from_date(start).periods(steps))?;
            values.extend(self.slice(steps..).iter());
            values.extend(tail.iter());
        } else {
            let end = self
                .offset
                .apply(first, -1)
                .ok_or_else(|| DateRangeError::date_out_of_range(format!("extending before {first}")))?;
            let head = self.generate(DateRangeRequest::new().to_date(end).periods(steps))?;
            values.extend(head.iter());
            values.extend(self.slice(..self.len - steps).iter());
        }

        Ok(Self::from_parts(Arc::from(values), self.offset))
    }

    fn generate(&self, request: DateRangeRequest) -> Result<Self, DateRangeError> {
        DateRange::new(&request.offset(self.offset))
    }
}

impl PartialEq for DateRange {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for DateRange {}

impl Index<usize> for DateRange {
    type Output = NaiveDateTime;

    fn index(&self, index: usize) -> &Self::Output {
        assert!(
            index < self.len,
            "index {index} out of bounds for date range of length {}",
            self.len
        );
        &self.data[self.start + index * self.stride]
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DateRange")?;
        writeln!(f, "offset: {}", self.offset)?;
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => writeln!(f, "[{first}, ..., {last}]")?,
            _ => writeln!(f, "[]")?,
        }
        write!(f, "length: {}", self.len)
    }
}

/// Iterator over the dates of a [`DateRange`].
#[derive(Debug, Clone)]
pub struct DateRangeIter<'a> {
    inner: Take<StepBy<slice::Iter<'a, NaiveDateTime>>>,
}

impl Iterator for DateRangeIter<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for DateRangeIter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for DateRangeIter<'_> {}

impl<'a> IntoIterator for &'a DateRange {
    type Item = NaiveDateTime;
    type IntoIter = DateRangeIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn january() -> DateRange {
        // Twenty business days, 2021-01-04 through 2021-01-29
        DateRange::new(
            &DateRangeRequest::new()
                .from_date("2021-01-04")
                .periods(20),
        )
        .unwrap()
    }

    #[test]
    fn test_index_returns_scalar() {
        let range = january();
        assert_eq!(range[0], dt(2021, 1, 4));
        assert_eq!(range[5], dt(2021, 1, 11));
        assert_eq!(range.get(19), Some(dt(2021, 1, 29)));
        assert_eq!(range.get(20), None);
        assert_eq!(range.last(), Some(dt(2021, 1, 29)));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let range = january();
        let _ = range[20];
    }

    #[test]
    fn test_slice_shares_storage_and_offset() {
        let range = january();
        let slice = range.slice(2..7);
        assert_eq!(slice.len(), 5);
        assert!(slice.shares_storage_with(&range));
        assert_eq!(slice.offset(), range.offset());
        for i in 0..slice.len() {
            assert_eq!(slice[i], range[i + 2]);
        }
    }

    #[test]
    fn test_slice_clamps() {
        let range = january();
        assert_eq!(range.slice(15..100).len(), 5);
        assert!(range.slice(30..).is_empty());
        assert!(range.slice(10..5).is_empty());
        assert_eq!(range.slice(..=2).len(), 3);
    }

    #[test]
    fn test_slice_step_rescales_offset() {
        let range = january();
        let stepped = range.slice_step(1..12, 5).unwrap();
        assert_eq!(stepped.to_vec(), vec![dt(2021, 1, 5), dt(2021, 1, 12), dt(2021, 1, 19)]);
        assert_eq!(stepped.offset(), Offset::business_day() * 5);

        let nested = stepped.slice(1..);
        assert_eq!(nested.to_vec(), vec![dt(2021, 1, 12), dt(2021, 1, 19)]);

        let unit = range.slice_step(.., 1).unwrap();
        assert_eq!(unit.offset(), Offset::business_day());
        assert_eq!(unit, range);
    }

    #[test]
    fn test_empty_strided_view_past_end() {
        let stepped = january().slice_step(.., 3).unwrap();
        let empty = stepped.slice(stepped.len()..);
        assert!(empty.is_empty());
        assert_eq!(empty.iter().count(), 0);
        assert_eq!(empty.last(), None);
    }

    #[test]
    fn test_slice_step_zero_rejected() {
        let err = january().slice_step(.., 0).unwrap_err();
        assert_eq!(err, DateRangeError::InvalidSliceStep { step: 0 });
    }

    #[test]
    fn test_take_and_filter_return_plain_index() {
        let range = january();
        let taken = range.take(&[0, 4, 5]).unwrap();
        assert_eq!(&*taken, &[dt(2021, 1, 4), dt(2021, 1, 8), dt(2021, 1, 11)]);

        let err = range.take(&[25]).unwrap_err();
        assert_eq!(err, DateRangeError::IndexOutOfBounds { index: 25, len: 20 });

        let mask: Vec<bool> = (0..20).map(|i| i % 10 == 0).collect();
        let filtered = range.filter(&mask).unwrap();
        assert_eq!(filtered.into_vec(), vec![dt(2021, 1, 4), dt(2021, 1, 18)]);

        assert!(matches!(
            range.filter(&[true]),
            Err(DateRangeError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_from_sequence_validates_order() {
        let ok = DateRange::from_sequence(vec![dt(2021, 1, 4), dt(2021, 1, 5)], Offset::business_day())
            .unwrap();
        assert_eq!(ok.len(), 2);
        assert!(!ok.has_parent());

        let err = DateRange::from_sequence(
            vec![dt(2021, 1, 4), dt(2021, 1, 6), dt(2021, 1, 6)],
            Offset::business_day(),
        )
        .unwrap_err();
        assert_eq!(err, DateRangeError::UnsortedSequence { position: 2 });
    }

    #[test]
    fn test_shift_forward_and_back() {
        let range = DateRange::new(
            &DateRangeRequest::new()
                .from_date("2021-01-01")
                .periods(5),
        )
        .unwrap();

        let forward = range.shift(2).unwrap();
        assert_eq!(
            forward.to_vec(),
            vec![
                dt(2021, 1, 5),
                dt(2021, 1, 6),
                dt(2021, 1, 7),
                dt(2021, 1, 8),
                dt(2021, 1, 11)
            ]
        );
        assert_eq!(forward.offset(), range.offset());

        let back = forward.shift(-2).unwrap();
        assert_eq!(back, range);
    }

    #[test]
    fn test_shift_zero_is_identity() {
        let range = january();
        let same = range.shift(0).unwrap();
        assert!(same.shares_storage_with(&range));
        assert_eq!(same, range);
    }

    #[test]
    fn test_shift_past_whole_range() {
        let range = DateRange::new(
            &DateRangeRequest::new()
                .from_date("2021-01-04")
                .periods(3),
        )
        .unwrap();
        let shifted = range.shift(5).unwrap();
        assert_eq!(
            shifted.to_vec(),
            vec![dt(2021, 1, 11), dt(2021, 1, 12), dt(2021, 1, 13)]
        );
        let back = range.shift(-3).unwrap();
        assert_eq!(
            back.to_vec(),
            vec![dt(2020, 12, 30), dt(2020, 12, 31), dt(2021, 1, 1)]
        );
    }

    #[test]
    fn test_shift_empty_range_fails() {
        let empty = january().slice(0..0);
        assert_eq!(
            empty.shift(1).unwrap_err(),
            DateRangeError::EmptyRange { operation: "shift" }
        );
        assert!(empty.shift(0).unwrap().is_empty());
    }

    #[test]
    fn test_position_on_strided_view() {
        let range = january().slice_step(.., 5).unwrap();
        assert_eq!(range.position(dt(2021, 1, 11)), Some(1));
        assert_eq!(range.position(dt(2021, 1, 12)), None);
        assert!(range.contains(dt(2021, 1, 25)));
    }

    #[test]
    fn test_iter_is_double_ended() {
        let range = january().slice(0..3);
        let reversed: Vec<_> = range.iter().rev().collect();
        assert_eq!(reversed, vec![dt(2021, 1, 6), dt(2021, 1, 5), dt(2021, 1, 4)]);
        assert_eq!(range.iter().len(), 3);
    }

    #[test]
    fn test_display_layout() {
        let range = january().slice(0..2);
        assert_eq!(
            range.to_string(),
            "DateRange\noffset: <1 BusinessDay>\n[2021-01-04 00:00:00, ..., 2021-01-05 00:00:00]\nlength: 2"
        );
        assert!(range.slice(0..0).to_string().contains("[]"));
    }
}
