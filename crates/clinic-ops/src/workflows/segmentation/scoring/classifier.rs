use super::super::domain::{RfmScores, Segment};

type Predicate = fn(u8, u8, u8) -> bool;

/// Segment rules evaluated top to bottom; the first match wins.
///
/// Predicates overlap (an `R=1, F=4, M=4` customer satisfies both `Loyal` and
/// `AtRisk`), so the order of this table determines the outcome.
pub const SEGMENT_RULES: [(Predicate, Segment); 9] = [
    (|r, f, m| r >= 4 && f >= 4 && m >= 4, Segment::Champions),
    (|_, f, m| f >= 4 && m >= 4, Segment::Loyal),
    (|r, f, m| r <= 2 && f >= 3 && m >= 3, Segment::AtRisk),
    (|r, f, m| r >= 4 && f <= 2 && m <= 2, Segment::New),
    (|r, f, m| r >= 4 && f >= 2 && m >= 2, Segment::Potential),
    (|r, f, m| r >= 3 && f >= 3 && m >= 3, Segment::Promising),
    (|r, f, m| r >= 3 && f >= 3 && m <= 2, Segment::NeedAttention),
    (|r, f, m| r <= 2 && f >= 3 && m >= 2, Segment::AboutToSleep),
    (|r, f, _| r <= 2 && f <= 2, Segment::Hibernating),
];

pub fn classify(scores: &RfmScores) -> Segment {
    let (r, f, m) = (
        scores.recency.get(),
        scores.frequency.get(),
        scores.monetary.get(),
    );

    SEGMENT_RULES
        .iter()
        .find(|(matches, _)| matches(r, f, m))
        .map(|(_, segment)| *segment)
        .unwrap_or(Segment::Lost)
}
