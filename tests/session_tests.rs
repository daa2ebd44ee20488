mod common;

use chrono::Duration;
use common::{p_in, p_out, ts};
use rpayclock::core::calculator::sessions::{
    MissingSide, hours_of, missing_punch, reconstruct_sessions, total_seconds,
};
use rpayclock::models::punch::Punch;
use rpayclock::models::punch_kind::PunchKind;

#[test]
fn test_two_pairs_make_two_sessions() {
    let punches = vec![
        p_in("2025-03-03 09:00"),
        p_out("2025-03-03 13:00"),
        p_in("2025-03-03 14:00"),
        p_out("2025-03-03 17:30"),
    ];

    let sessions = reconstruct_sessions(&punches);

    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].start, ts("2025-03-03 09:00"));
    assert_eq!(sessions[0].end, ts("2025-03-03 13:00"));
    assert_eq!(sessions[1].start, ts("2025-03-03 14:00"));
    assert_eq!(total_seconds(&sessions), 7 * 3600 + 1800);
    assert_eq!(hours_of(&sessions), 7.5);
    assert!(missing_punch(&punches).is_none());
}

#[test]
fn test_input_order_does_not_matter() {
    let punches = vec![
        p_out("2025-03-03 17:00"),
        p_in("2025-03-03 09:00"),
    ];

    let sessions = reconstruct_sessions(&punches);

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].duration_seconds(), 8 * 3600);
}

#[test]
fn test_first_in_wins_over_a_second_in() {
    let punches = vec![
        p_in("2025-03-03 08:00"),
        p_in("2025-03-03 09:00"),
        p_out("2025-03-03 12:00"),
    ];

    let sessions = reconstruct_sessions(&punches);

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].start, ts("2025-03-03 08:00"));
    assert_eq!(sessions[0].end, ts("2025-03-03 12:00"));

    let mp = missing_punch(&punches).expect("counts differ");
    assert_eq!(mp.side, MissingSide::Out);
    assert_eq!((mp.ins, mp.outs), (2, 1));
}

#[test]
fn test_stray_out_is_dropped() {
    let punches = vec![
        p_out("2025-03-03 08:00"),
        p_in("2025-03-03 09:00"),
        p_out("2025-03-03 12:00"),
    ];

    let sessions = reconstruct_sessions(&punches);

    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].start, ts("2025-03-03 09:00"));

    let mp = missing_punch(&punches).expect("counts differ");
    assert_eq!(mp.side, MissingSide::In);
}

#[test]
fn test_trailing_in_yields_no_session() {
    let punches = vec![
        p_in("2025-03-03 09:00"),
        p_out("2025-03-03 12:00"),
        p_in("2025-03-03 13:00"),
    ];

    let sessions = reconstruct_sessions(&punches);

    assert_eq!(sessions.len(), 1);
    assert_eq!(
        missing_punch(&punches).map(|m| m.side),
        Some(MissingSide::Out)
    );
}

#[test]
fn test_zero_length_pair_is_consumed_without_a_session() {
    let punches = vec![
        p_in("2025-03-03 09:00"),
        p_out("2025-03-03 09:00"),
        p_out("2025-03-03 10:00"),
    ];

    // the 09:00 OUT closes the 09:00 IN, so the 10:00 OUT has nothing open
    assert!(reconstruct_sessions(&punches).is_empty());
}

#[test]
fn test_empty_day() {
    assert!(reconstruct_sessions(&[]).is_empty());
    assert!(missing_punch(&[]).is_none());
    assert_eq!(hours_of(&[]), 0.0);
}

#[test]
fn test_hours_are_rounded_for_display_only() {
    let punches = vec![p_in("2025-03-03 09:00"), p_out("2025-03-03 09:20")];
    let sessions = reconstruct_sessions(&punches);

    assert_eq!(total_seconds(&sessions), 1200);
    assert_eq!(hours_of(&sessions), 0.33);
}

/// Every IN/OUT sequence up to 8 punches, ten minutes apart.
fn all_days(max_len: usize) -> Vec<Vec<Punch>> {
    let base = ts("2025-03-03 08:00");
    let mut out = Vec::new();

    for len in 0..=max_len {
        for mask in 0u32..(1 << len) {
            let day = (0..len)
                .map(|i| {
                    let kind = if mask & (1 << i) == 0 { PunchKind::In } else { PunchKind::Out };
                    let at = base + Duration::minutes(10 * i as i64);
                    Punch::new("EMP-001", at, kind)
                })
                .collect();
            out.push(day);
        }
    }

    out
}

#[test]
fn test_session_counts_over_every_short_sequence() {
    let days = all_days(8);
    assert_eq!(days.len(), (1 << 9) - 1);

    for day in &days {
        let ins = day.iter().filter(|p| p.kind == PunchKind::In).count();
        let outs = day.len() - ins;
        let sessions = reconstruct_sessions(day);

        assert!(sessions.len() <= ins.min(outs), "too many sessions for {:?}", day);
        for w in sessions.windows(2) {
            assert!(w[0].end <= w[1].start, "overlapping sessions for {:?}", day);
        }
        for s in &sessions {
            assert!(s.end > s.start);
        }

        match missing_punch(day) {
            None => assert_eq!(ins, outs),
            Some(mp) => {
                assert_eq!((mp.ins, mp.outs), (ins, outs));
                let expected = if ins > outs { MissingSide::Out } else { MissingSide::In };
                assert_eq!(mp.side, expected, "wrong side for {:?}", day);
            }
        }
    }
}

#[test]
fn test_alternating_days_pair_every_in() {
    let base = ts("2025-03-03 08:00");

    for pairs in 0..=4 {
        let day: Vec<Punch> = (0..pairs * 2)
            .map(|i| {
                let kind = if i % 2 == 0 { PunchKind::In } else { PunchKind::Out };
                Punch::new("EMP-001", base + Duration::minutes(10 * i as i64), kind)
            })
            .collect();

        assert_eq!(reconstruct_sessions(&day).len(), pairs);
        assert!(missing_punch(&day).is_none());
    }
}
