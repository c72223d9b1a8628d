use incident_drill::game::{resolve_choice, resolve_choice_at, NextStep};
use incident_drill::{
    ChoiceDefinition, Difficulty, GameError, Outcome, PhaseDefinition, ScenarioDefinition,
    SessionState, StateDeltas, StateField,
};
use proptest::prelude::*;

fn scenario(id: &str, phases: Vec<PhaseDefinition>) -> ScenarioDefinition {
    ScenarioDefinition {
        id: id.to_string(),
        title: id.to_uppercase(),
        description: String::new(),
        difficulty: Difficulty::Normal,
        category: "Ransomware".to_string(),
        industry: None,
        estimated_time_minutes: 10,
        required_level: 1,
        briefing: None,
        objectives: Vec::new(),
        phases,
        scoring: None,
        completion_awards: Vec::new(),
    }
}

fn plain(label: &str, deltas: StateDeltas) -> ChoiceDefinition {
    ChoiceDefinition::new(label, Outcome::with_deltas(deltas))
}

/// One phase whose only choice applies `deltas` and loops back to itself
fn looping(deltas: StateDeltas) -> ScenarioDefinition {
    scenario(
        "loop",
        vec![PhaseDefinition::new("loop", "Loop").choice(plain("again", deltas).jump_to("loop"))],
    )
}

#[test]
fn worked_example_across_two_scenarios() {
    let mut session = SessionState::new("first");
    assert_eq!(session.score(), 0);
    assert_eq!(session.reputation(), 100);
    assert_eq!(session.budget(), 100_000);

    let first = scenario(
        "first",
        vec![PhaseDefinition::new("detection", "Detection").choice(
            plain(
                "isolate",
                StateDeltas::new()
                    .with(StateField::Score, 50)
                    .with(StateField::Reputation, 0)
                    .with(StateField::ContainmentLevel, 80),
            )
            .achievement("quick_thinker"),
        )],
    );
    let result = resolve_choice(&mut session, &first, "detection", 0).unwrap();
    assert_eq!(session.score(), 50);
    assert_eq!(session.reputation(), 100);
    assert_eq!(session.containment_level(), 80);
    assert_eq!(session.unlocked_achievements().len(), 1);
    assert!(session.has_achievement("quick_thinker"));
    assert_eq!(session.decisions().len(), 1);
    assert!(result.achievement.as_ref().unwrap().newly_unlocked);

    let second = scenario(
        "second",
        vec![PhaseDefinition::new("detection", "Detection")
            .choice(plain("again", StateDeltas::new().with(StateField::Score, 5)).achievement("quick_thinker"))],
    );
    let result = resolve_choice(&mut session, &second, "detection", 0).unwrap();
    assert_eq!(session.unlocked_achievements().len(), 1);
    let unlock = result.achievement.unwrap();
    assert_eq!(unlock.id, "quick_thinker");
    assert!(!unlock.newly_unlocked);
    assert!(result.newly_unlocked_achievements.is_empty());
    assert_eq!(session.decisions().len(), 2);
}

#[test]
fn phases_advance_in_declaration_order() {
    let s = scenario(
        "linear",
        vec![
            PhaseDefinition::new("detection", "D").choice(plain("a", StateDeltas::new())),
            PhaseDefinition::new("containment", "C").choice(plain("b", StateDeltas::new())),
            PhaseDefinition::new("recovery", "R").choice(plain("c", StateDeltas::new())),
        ],
    );
    let mut session = SessionState::new("linear");

    let r = resolve_choice(&mut session, &s, "detection", 0).unwrap();
    assert_eq!(r.next, NextStep::Phase("containment".to_string()));
    assert_eq!(session.current_phase(), Some("containment"));

    let r = resolve_choice(&mut session, &s, "containment", 0).unwrap();
    assert_eq!(r.next_phase(), Some("recovery"));

    let r = resolve_choice(&mut session, &s, "recovery", 0).unwrap();
    assert!(r.is_complete());
    assert!(session.has_completed("linear"));
    assert_eq!(session.current_phase(), None);
}

#[test]
fn explicit_jump_overrides_order() {
    let s = scenario(
        "branch",
        vec![
            PhaseDefinition::new("detection", "D")
                .choice(plain("skip ahead", StateDeltas::new()).jump_to("recovery")),
            PhaseDefinition::new("containment", "C").choice(plain("b", StateDeltas::new())),
            PhaseDefinition::new("recovery", "R").choice(plain("c", StateDeltas::new())),
        ],
    );
    let mut session = SessionState::new("branch");
    let r = resolve_choice(&mut session, &s, "detection", 0).unwrap();
    assert_eq!(r.next, NextStep::Phase("recovery".to_string()));
}

#[test]
fn self_jump_is_executed_literally() {
    let s = looping(StateDeltas::new().with(StateField::TimeElapsed, 15));
    let mut session = SessionState::new("loop");
    for _ in 0..5 {
        let r = resolve_choice(&mut session, &s, "loop", 0).unwrap();
        assert_eq!(r.next_phase(), Some("loop"));
    }
    assert_eq!(session.time_elapsed(), 75);
    assert_eq!(session.decisions().len(), 5);
    assert!(!session.has_completed("loop"));
}

#[test]
fn failed_resolutions_leave_session_untouched() {
    let s = scenario(
        "drill",
        vec![PhaseDefinition::new("detection", "D")
            .choice(plain("a", StateDeltas::new().with(StateField::Score, 10)))
            .choice(plain("b", StateDeltas::new()))],
    );
    let mut session = SessionState::new("drill");
    assert!(resolve_choice(&mut session, &s, "detection", 1).unwrap().is_complete());
    let before = session.clone();

    let err = resolve_choice(&mut session, &s, "detection", 2).unwrap_err();
    assert!(matches!(err, GameError::ScenarioComplete(_)));
    assert_eq!(session, before);

    let mut fresh = SessionState::new("drill");
    let before = fresh.clone();
    let err = resolve_choice(&mut fresh, &s, "detection", 2).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidChoice {
            phase: "detection".to_string(),
            index: 2,
            available: 2
        }
    );
    let err = resolve_choice(&mut fresh, &s, "eradication", 0).unwrap_err();
    assert!(matches!(err, GameError::PhaseNotFound { .. }));
    assert_eq!(fresh, before);
}

#[test]
fn decision_log_is_append_only() {
    let s = looping(StateDeltas::new().with(StateField::Score, 1));
    let mut session = SessionState::new("loop");
    let t0 = chrono::Utc::now();
    resolve_choice_at(&mut session, &s, "loop", 0, t0).unwrap();
    let first = session.decisions()[0].clone();

    let t1 = t0 + chrono::Duration::seconds(30);
    resolve_choice_at(&mut session, &s, "loop", 0, t1).unwrap();
    assert_eq!(session.decisions().len(), 2);
    assert_eq!(session.decisions()[0], first);
    assert_eq!(session.decisions()[1].timestamp, t1);
    assert_eq!(session.decisions()[1].phase_name, "loop");
}

#[test]
fn budget_may_go_negative() {
    let s = looping(StateDeltas::new().with(StateField::Budget, -2_500_000));
    let mut session = SessionState::new("loop");
    let r = resolve_choice(&mut session, &s, "loop", 0).unwrap();
    assert_eq!(session.budget(), -2_400_000);
    assert_eq!(r.effective.budget, Some(-2_500_000));
}

fn gauge_field() -> impl Strategy<Value = StateField> {
    prop_oneof![
        Just(StateField::Reputation),
        Just(StateField::ContainmentLevel),
        Just(StateField::StakeholderConfidence),
        Just(StateField::TeamMorale),
    ]
}

proptest! {
    #[test]
    fn gauges_stay_within_bounds(
        field in gauge_field(),
        deltas in prop::collection::vec(-300i64..300, 1..40),
    ) {
        let mut session = SessionState::new("loop");
        let mut expected = session.value(field);
        for delta in deltas {
            let s = looping(StateDeltas::new().with(field, delta));
            let before = session.value(field);
            let r = resolve_choice(&mut session, &s, "loop", 0).unwrap();
            let value = session.value(field);
            expected = (expected + delta).clamp(0, 100);
            prop_assert!((0..=100).contains(&value));
            prop_assert_eq!(value, expected);
            prop_assert_eq!(r.effective.get(field), Some(value - before));
            prop_assert_eq!(session.decisions().last().unwrap().deltas.get(field), Some(delta));
        }
    }

    #[test]
    fn unlock_is_idempotent(repeats in 1usize..10) {
        let s = scenario(
            "loop",
            vec![PhaseDefinition::new("loop", "Loop")
                .choice(plain("again", StateDeltas::new()).achievement("threat_hunter").jump_to("loop"))],
        );
        let mut session = SessionState::new("loop");
        let mut newly = 0;
        for _ in 0..repeats {
            let r = resolve_choice(&mut session, &s, "loop", 0).unwrap();
            if r.achievement.map(|a| a.newly_unlocked).unwrap_or(false) {
                newly += 1;
            }
        }
        prop_assert_eq!(newly, 1);
        prop_assert_eq!(session.unlocked_achievements().len(), 1);
        prop_assert_eq!(session.decisions().len(), repeats);
    }
}
