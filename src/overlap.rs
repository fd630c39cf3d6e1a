use chrono::NaiveDateTime;

/// Half-open interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Span {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A stored appointment as seen by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Booked {
    pub id: u64,
    pub span: Span,
}

/// The two time fields of an appointment being created or edited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Draft {
    pub id: Option<u64>,
    pub pickup: Option<NaiveDateTime>,
    pub arrival: Option<NaiveDateTime>,
}

impl Draft {
    /// An edit of the stored appointment `id`; a time left out keeps its stored value.
    pub fn edit(
        id: u64,
        stored: &Span,
        pickup: Option<NaiveDateTime>,
        arrival: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            id: Some(id),
            pickup: Some(pickup.unwrap_or(stored.start)),
            arrival: Some(arrival.unwrap_or(stored.end)),
        }
    }

    /// The draft's interval, once both ends are known.
    pub fn span(&self) -> Option<Span> {
        match (self.pickup, self.arrival) {
            (Some(pickup), Some(arrival)) => Some(Span::new(pickup, arrival)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    InvalidInterval {
        pickup: NaiveDateTime,
        arrival: NaiveDateTime,
    },
}

impl std::fmt::Display for IntervalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntervalError::InvalidInterval { pickup, arrival } => write!(
                f,
                "arrival time ({}) must be after pickup time ({})",
                arrival, pickup
            ),
        }
    }
}

impl std::error::Error for IntervalError {}

/// Result of checking a draft. Both signals stay off until the draft has both times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Verdict {
    pub invalid: Option<IntervalError>,
    pub overlapping: Vec<u64>,
}

impl Verdict {
    pub fn valid(&self) -> bool {
        self.invalid.is_none()
    }

    pub fn overlap(&self) -> bool {
        !self.overlapping.is_empty()
    }

    /// Turns the hard validity signal into an error; overlap never fails.
    pub fn ensure_valid(&self) -> Result<(), IntervalError> {
        match &self.invalid {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// Row bounds a store may use to narrow what it passes to [`check`]: only rows
/// with `pickup < pickup_before` and `arrival > arrival_after` can overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateWindow {
    pub pickup_before: NaiveDateTime,
    pub arrival_after: NaiveDateTime,
}

impl CandidateWindow {
    /// `None` when the draft cannot overlap anything.
    pub fn for_draft(draft: &Draft) -> Option<Self> {
        match draft.span() {
            Some(span) if !span.is_empty() => Some(Self {
                pickup_before: span.end,
                arrival_after: span.start,
            }),
            _ => None,
        }
    }

    pub fn admits(&self, span: &Span) -> bool {
        span.start < self.pickup_before && span.end > self.arrival_after
    }
}

/// Checks a draft against a snapshot of other appointments.
///
/// The draft is invalid iff both times are set and pickup is not strictly before
/// arrival. Overlap is only looked for on a valid draft, and never against the
/// draft's own id.
pub fn check<'a, I>(draft: &Draft, others: I) -> Verdict
where
    I: IntoIterator<Item = &'a Booked>,
{
    let span = match draft.span() {
        Some(span) => span,
        None => return Verdict::default(),
    };

    if span.is_empty() {
        return Verdict {
            invalid: Some(IntervalError::InvalidInterval {
                pickup: span.start,
                arrival: span.end,
            }),
            overlapping: Vec::new(),
        };
    }

    let overlapping = others
        .into_iter()
        .filter(|other| Some(other.id) != draft.id)
        .filter(|other| span.overlaps(&other.span))
        .map(|other| other.id)
        .collect();

    Verdict {
        invalid: None,
        overlapping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn booked(id: u64, start: NaiveDateTime, end: NaiveDateTime) -> Booked {
        Booked {
            id,
            span: Span::new(start, end),
        }
    }

    fn draft(id: Option<u64>, pickup: NaiveDateTime, arrival: NaiveDateTime) -> Draft {
        Draft {
            id,
            pickup: Some(pickup),
            arrival: Some(arrival),
        }
    }

    #[test]
    fn clear_draft_is_valid_without_overlap() {
        let others = [booked(1, at(12, 0), at(13, 0))];
        let v = check(&draft(None, at(9, 0), at(10, 0)), &others);
        assert!(v.valid());
        assert!(!v.overlap());
    }

    #[test]
    fn arrival_before_pickup_is_invalid() {
        let v = check(&draft(None, at(9, 0), at(8, 0)), &[] as &[Booked]);
        assert!(!v.valid());
        assert!(v.ensure_valid().is_err());
    }

    #[test]
    fn arrival_equal_to_pickup_is_invalid() {
        let v = check(&draft(None, at(9, 0), at(9, 0)), &[] as &[Booked]);
        assert!(!v.valid());
    }

    #[test]
    fn invalid_draft_reports_no_overlap() {
        let others = [booked(2, at(7, 0), at(11, 0))];
        let v = check(&draft(None, at(9, 0), at(8, 0)), &others);
        assert!(!v.valid());
        assert!(!v.overlap());
    }

    #[test]
    fn partial_overlap_is_flagged() {
        let others = [booked(2, at(9, 30), at(11, 0))];
        let v = check(&draft(None, at(9, 0), at(10, 0)), &others);
        assert!(v.valid());
        assert!(v.overlap());
        assert_eq!(v.overlapping, vec![2]);
    }

    #[test]
    fn touching_boundary_does_not_overlap() {
        let others = [booked(3, at(10, 0), at(11, 0))];
        let v = check(&draft(None, at(9, 0), at(10, 0)), &others);
        assert!(v.valid());
        assert!(!v.overlap());

        let others = [booked(4, at(8, 0), at(9, 0))];
        let v = check(&draft(None, at(9, 0), at(10, 0)), &others);
        assert!(!v.overlap());
    }

    #[test]
    fn same_pickup_overlaps() {
        let others = [booked(5, at(9, 0), at(9, 15))];
        let v = check(&draft(None, at(9, 0), at(12, 0)), &others);
        assert!(v.overlap());
    }

    #[test]
    fn containment_overlaps_both_ways() {
        let outer = [booked(6, at(8, 0), at(12, 0))];
        assert!(check(&draft(None, at(9, 0), at(10, 0)), &outer).overlap());

        let inner = [booked(7, at(9, 15), at(9, 45))];
        assert!(check(&draft(None, at(9, 0), at(10, 0)), &inner).overlap());
    }

    #[test]
    fn own_id_is_excluded() {
        let others = [booked(8, at(9, 0), at(10, 0))];
        let v = check(&draft(Some(8), at(9, 0), at(10, 0)), &others);
        assert!(v.valid());
        assert!(!v.overlap());

        let v = check(&draft(Some(9), at(9, 0), at(10, 0)), &others);
        assert!(v.overlap());
    }

    #[test]
    fn reports_every_overlapping_id() {
        let others = [
            booked(1, at(8, 0), at(9, 30)),
            booked(2, at(10, 0), at(11, 0)),
            booked(3, at(9, 45), at(10, 30)),
        ];
        let v = check(&draft(None, at(9, 0), at(10, 0)), &others);
        assert_eq!(v.overlapping, vec![1, 3]);
    }

    fn windowed(draft: &Draft, all: &[Booked]) -> Verdict {
        let rows: Vec<Booked> = match CandidateWindow::for_draft(draft) {
            Some(window) => all
                .iter()
                .filter(|b| window.admits(&b.span))
                .copied()
                .collect(),
            None => Vec::new(),
        };
        check(draft, &rows)
    }

    #[test]
    fn window_keeps_every_overlap() {
        let all = [
            booked(1, at(8, 0), at(9, 0)),
            booked(2, at(10, 0), at(11, 0)),
            booked(3, at(9, 0), at(9, 15)),
            booked(4, at(8, 0), at(12, 0)),
            booked(5, at(9, 15), at(9, 45)),
            booked(6, at(9, 30), at(11, 0)),
            booked(7, at(12, 0), at(13, 0)),
        ];
        let d = draft(None, at(9, 0), at(10, 0));
        let v = windowed(&d, &all);
        assert_eq!(v, check(&d, &all));
        assert_eq!(v.overlapping, vec![3, 4, 5, 6]);

        let window = CandidateWindow::for_draft(&d).unwrap();
        assert!(!window.admits(&all[0].span));
        assert!(!window.admits(&all[1].span));
        assert!(window.admits(&all[2].span));
    }

    #[test]
    fn window_is_absent_for_unusable_drafts() {
        assert_eq!(CandidateWindow::for_draft(&draft(None, at(9, 0), at(8, 0))), None);
        assert_eq!(CandidateWindow::for_draft(&draft(None, at(9, 0), at(9, 0))), None);
        assert_eq!(CandidateWindow::for_draft(&Draft::default()), None);

        let all = [booked(1, at(7, 0), at(11, 0))];
        let d = draft(None, at(9, 0), at(8, 0));
        assert_eq!(windowed(&d, &all), check(&d, &all));
    }

    #[test]
    fn edit_keeps_stored_times() {
        let stored = Span::new(at(9, 0), at(10, 0));
        let d = Draft::edit(8, &stored, None, Some(at(10, 30)));
        assert_eq!(d, draft(Some(8), at(9, 0), at(10, 30)));

        let d = Draft::edit(8, &stored, Some(at(9, 30)), None);
        assert_eq!(d, draft(Some(8), at(9, 30), at(10, 0)));

        let d = Draft::edit(8, &stored, Some(at(10, 0)), None);
        assert!(!check(&d, &[] as &[Booked]).valid());
    }

    #[test]
    fn edited_appointment_does_not_overlap_itself() {
        let all = [
            booked(8, at(9, 0), at(10, 0)),
            booked(9, at(10, 0), at(11, 0)),
            booked(10, at(10, 30), at(12, 0)),
        ];
        let stored = all[0].span;

        let d = Draft::edit(8, &stored, None, Some(at(9, 45)));
        let v = windowed(&d, &all);
        assert!(v.valid());
        assert!(!v.overlap());

        let d = Draft::edit(8, &stored, None, Some(at(10, 45)));
        let v = windowed(&d, &all);
        assert_eq!(v.overlapping, vec![9, 10]);
        assert_eq!(v, check(&d, &all));
    }

    #[test]
    fn unset_times_suppress_both_signals() {
        let others = [booked(1, at(8, 0), at(12, 0))];
        let missing_arrival = Draft {
            id: None,
            pickup: Some(at(9, 0)),
            arrival: None,
        };
        let v = check(&missing_arrival, &others);
        assert!(v.valid());
        assert!(!v.overlap());

        let v = check(&Draft::default(), &others);
        assert!(v.valid());
        assert!(!v.overlap());
    }

    #[test]
    fn check_is_repeatable() {
        let others = [booked(2, at(9, 30), at(11, 0))];
        let d = draft(Some(1), at(9, 0), at(10, 0));
        assert_eq!(check(&d, &others), check(&d, &others));
    }

    #[test]
    fn invalid_interval_message_names_both_times() {
        let err = check(&draft(None, at(9, 0), at(8, 0)), &[] as &[Booked])
            .ensure_valid()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("2025-01-10 08:00:00"));
        assert!(msg.contains("2025-01-10 09:00:00"));
    }
}
