//! Change-point segmentation of a signal column.
//!
//! A segment is a maximal run of consecutive rows sharing one signal value.
//! Segment ids are the emission index, so they increase monotonically and
//! are never reused.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub signal: i64,
    pub start: usize,
    pub len: usize,
}

impl Segment {
    /// Index one past the segment's last row; the first row of the next segment.
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Partition `signals` into segments, in row order.
pub fn segment_signals(signals: &[i64]) -> Vec<Segment> {
    let mut segments = Vec::new();
    let Some(&first) = signals.first() else {
        return segments;
    };

    let mut current = first;
    let mut start = 0;
    for (i, &signal) in signals.iter().enumerate().skip(1) {
        if signal != current {
            segments.push(Segment {
                signal: current,
                start,
                len: i - start,
            });
            current = signal;
            start = i;
        }
    }
    segments.push(Segment {
        signal: current,
        start,
        len: signals.len() - start,
    });

    segments
}

/// Segments that have a closing bar: all but the one containing the last row.
pub fn closed_segments(signals: &[i64]) -> Vec<Segment> {
    let mut segments = segment_signals(signals);
    segments.pop();
    segments
}
