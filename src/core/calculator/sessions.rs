//! Pairs the IN/OUT punches of one employee-day into work sessions.

use crate::models::punch::Punch;
use crate::models::punch_kind::PunchKind;
use crate::models::session::WorkSession;
use chrono::NaiveDateTime;

/// Which side of a day is short of punches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingSide {
    /// More INs than OUTs.
    Out,
    /// More OUTs than INs.
    In,
}

/// Day-level punch count mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingPunch {
    pub side: MissingSide,
    pub ins: usize,
    pub outs: usize,
}

/// Build the sessions of a day.
///
/// Punches are sorted by timestamp first (stable, so ties keep input order).
/// One IN can be open at a time: a second IN while one is open is ignored,
/// an OUT with nothing open is dropped and a trailing open IN yields nothing.
pub fn reconstruct_sessions(punches: &[Punch]) -> Vec<WorkSession> {
    if punches.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&Punch> = punches.iter().collect();
    sorted.sort_by_key(|p| p.timestamp);

    let mut sessions = Vec::new();
    let mut open_in: Option<NaiveDateTime> = None;

    for p in sorted {
        match p.kind {
            PunchKind::In => {
                if open_in.is_none() {
                    open_in = Some(p.timestamp);
                }
            }
            PunchKind::Out => {
                if let Some(start) = open_in.take() {
                    // zero-length pairs consume both punches but are not sessions
                    if p.timestamp > start {
                        sessions.push(WorkSession {
                            start,
                            end: p.timestamp,
                        });
                    }
                }
            }
        }
    }

    sessions
}

/// Compare the IN and OUT counts of a day. `None` when they match
/// (including the empty day).
pub fn missing_punch(punches: &[Punch]) -> Option<MissingPunch> {
    let ins = punches.iter().filter(|p| p.kind.is_in()).count();
    let outs = punches.len() - ins;

    if ins == outs {
        return None;
    }

    let side = if ins > outs {
        MissingSide::Out
    } else {
        MissingSide::In
    };

    Some(MissingPunch { side, ins, outs })
}

pub fn total_seconds(sessions: &[WorkSession]) -> i64 {
    sessions.iter().map(WorkSession::duration_seconds).sum()
}

/// Worked hours rounded to 2 decimals, for display.
pub fn hours_of(sessions: &[WorkSession]) -> f64 {
    let h = total_seconds(sessions) as f64 / 3600.0;
    (h * 100.0).round() / 100.0
}
