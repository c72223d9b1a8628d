use incident_drill::game::scenarios::builtin_catalog;
use incident_drill::game::{
    ContentError, ContentFormat, ContentLoader, EndingRank, Grade, PlaythroughState, ScenarioFilter,
};
use incident_drill::{Game, GameError, PlayerProfile, SessionDefaults};
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use std::sync::Arc;

const DEMO_CATALOG: &str = include_str!("../content/catalog.yaml");

fn builtin_game() -> Game {
    Game::new(Arc::new(builtin_catalog().unwrap()))
}

fn play_all(game: &mut Game, picks: &[usize]) {
    for &pick in picks {
        game.choose(pick).unwrap();
    }
}

#[test]
fn optimal_night_shift_run() {
    let mut game = builtin_game();
    let profile = Rc::new(RefCell::new(PlayerProfile::new("Agent")));
    game.add_observer(Box::new(Rc::clone(&profile)));

    game.start_scenario("night_shift_ransomware").unwrap();
    assert!(matches!(game.state(), PlaythroughState::Briefing { .. }));
    game.begin_mission().unwrap();
    play_all(&mut game, &[2, 0, 3, 3, 3, 3]);

    assert_eq!(
        game.state(),
        &PlaythroughState::Complete {
            scenario_id: "night_shift_ransomware".to_string()
        }
    );
    let session = game.session().unwrap();
    assert_eq!(session.score(), 345);
    assert_eq!(session.reputation(), 100);
    assert_eq!(session.time_elapsed(), 319);
    assert!(session.has_achievement("perfect_score"));
    assert!(session.has_achievement("reputation_master"));
    assert!(!session.has_achievement("speed_runner"));
    assert_eq!(session.unlocked_achievements().len(), 8);

    let debrief = game.debrief().unwrap();
    assert_eq!(debrief.ending, EndingRank::Exemplary);
    assert_eq!(debrief.grade, None);
    assert_eq!(debrief.decisions, 6);

    let profile = profile.borrow();
    assert_eq!(profile.decisions_total, 6);
    assert_eq!(profile.scenarios_completed, 1);
    assert_eq!(profile.best_score, 345);
    // 1750 from achievement points plus the final score
    assert_eq!(profile.xp, 2_095);
    assert_eq!(profile.level, 2);
    assert_eq!(profile.achievements.len(), 8);
}

#[test]
fn fast_but_costly_run_earns_speed_runner_only() {
    let mut game = builtin_game();
    game.start_scenario("night_shift_ransomware").unwrap();
    game.begin_mission().unwrap();
    play_all(&mut game, &[2, 1, 3, 0, 2, 1]);

    let session = game.session().unwrap();
    assert_eq!(session.time_elapsed(), 124);
    assert_eq!(session.score(), 165);
    assert_eq!(session.reputation(), 90);
    assert!(session.has_achievement("speed_runner"));
    assert!(!session.has_achievement("perfect_score"));
    assert!(!session.has_achievement("reputation_master"));
    assert_eq!(game.debrief().unwrap().ending, EndingRank::Survival);
}

#[test]
fn choices_are_refused_outside_a_phase() {
    let mut game = builtin_game();
    assert_eq!(game.begin_mission().unwrap_err(), GameError::NoActiveScenario);
    assert_eq!(
        game.start_scenario("apt_999").unwrap_err(),
        GameError::ScenarioNotFound("apt_999".to_string())
    );

    game.start_scenario("ransomware_001").unwrap();
    assert_eq!(
        game.choose(0).unwrap_err(),
        GameError::MissionNotStarted("ransomware_001".to_string())
    );
    game.begin_mission().unwrap();
    play_all(&mut game, &[0, 0, 0, 0]);

    let before = game.session().unwrap().clone();
    assert_eq!(
        game.choose(0).unwrap_err(),
        GameError::ScenarioComplete("ransomware_001".to_string())
    );
    assert_eq!(
        game.collect_evidence("ev_phishing").unwrap_err(),
        GameError::ScenarioComplete("ransomware_001".to_string())
    );
    assert_eq!(game.session().unwrap(), &before);
}

#[test]
fn invalid_choice_keeps_the_phase() {
    let mut game = builtin_game();
    game.start_scenario("ransomware_001").unwrap();
    game.begin_mission().unwrap();
    let err = game.choose(9).unwrap_err();
    assert_eq!(
        err,
        GameError::InvalidChoice {
            phase: "detection".to_string(),
            index: 9,
            available: 4
        }
    );
    assert_eq!(game.current_phase().unwrap().name, "detection");
    assert!(game.session().unwrap().decisions().is_empty());
}

#[test]
fn lockdown_with_outside_help() {
    let mut game = builtin_game();
    game.start_scenario("ransomware_001").unwrap();
    game.begin_mission().unwrap();
    for ev in ["ev_phishing", "ev_beacon", "ev_lateral", "ev_encryption"] {
        assert!(game.collect_evidence(ev).unwrap());
    }

    let result = game.choose(3).unwrap();
    assert_eq!(
        result.newly_unlocked_features,
        vec!["expert_mode".to_string(), "advanced_forensics".to_string()]
    );
    assert_eq!(result.next_phase(), Some("containment"));
    play_all(&mut game, &[0, 0, 0]);

    let session = game.session().unwrap();
    assert_eq!(session.budget(), 50_000);
    assert_eq!(session.evidence_collected().len(), 4);
    assert_eq!(session.team_morale(), 100);

    let debrief = game.debrief().unwrap();
    assert_eq!(debrief.score, 290);
    assert_eq!(debrief.ending, EndingRank::Success);
    assert_eq!(debrief.grade, Some(Grade::A));
    assert_eq!(debrief.features.len(), 2);
}

#[test]
fn configured_defaults_seed_new_sessions() {
    let defaults = SessionDefaults {
        budget: 10_000,
        reputation: 60,
        ..SessionDefaults::default()
    };
    let mut game = Game::with_defaults(Arc::new(builtin_catalog().unwrap()), defaults);
    game.start_scenario("ransomware_001").unwrap();
    game.begin_mission().unwrap();
    game.choose(3).unwrap();
    let session = game.session().unwrap();
    assert_eq!(session.budget(), -40_000);
    assert_eq!(session.reputation(), 70);
}

#[test]
fn demo_catalog_loads_and_plays() {
    let result = ContentLoader::new()
        .load_str(DEMO_CATALOG, ContentFormat::Yaml)
        .unwrap();
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);

    let catalog = result.catalog;
    assert!(catalog
        .list_scenarios(&ScenarioFilter::default().available_at(1))
        .is_empty());
    assert_eq!(catalog.list_scenarios(&ScenarioFilter::default().category("bec")).len(), 1);

    let mut game = Game::new(Arc::clone(&catalog));
    game.start_scenario("bec_001").unwrap();
    game.begin_mission().unwrap();
    assert!(game.collect_evidence("ev_headers").unwrap());
    play_all(&mut game, &[0, 0, 0]);

    let session = game.session().unwrap();
    assert!(session.has_achievement("wire_stopper"));
    assert!(session.has_achievement("header_hunter"));
    assert!(session.has_achievement("calm_under_pressure"));
    let debrief = game.debrief().unwrap();
    assert_eq!(debrief.score, 150);
    assert_eq!(debrief.grade, Some(Grade::B));
}

#[test]
fn demo_catalog_wire_fraud_branch_skips_investigation() {
    let catalog = ContentLoader::new()
        .load_str(DEMO_CATALOG, ContentFormat::Yaml)
        .unwrap()
        .catalog;
    let mut game = Game::new(catalog);
    game.start_scenario("bec_001").unwrap();
    game.begin_mission().unwrap();

    let result = game.choose(2).unwrap();
    assert_eq!(result.next_phase(), Some("recovery"));
    game.choose(1).unwrap();

    let session = game.session().unwrap();
    assert_eq!(session.budget(), -380_000);
    assert_eq!(session.team_morale(), 80);
    assert!(!session.has_achievement("calm_under_pressure"));
    assert_eq!(game.debrief().unwrap().ending, EndingRank::Failure);
}

#[test]
fn json_catalog_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("drills.json");
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"{{
  "achievements": [{{"id": "quick_thinker", "name": "Quick Thinker", "description": "", "point_value": 100}}],
  "scenarios": [{{
    "id": "json_drill",
    "title": "JSON Drill",
    "description": "Loaded from disk",
    "difficulty": "hard",
    "phases": [{{
      "name": "detection",
      "title": "Detection",
      "choices": [{{
        "label": "Isolate",
        "outcome": {{"deltas": {{"score": 50, "containmentLevel": 80}}, "achievement_id": "quick_thinker"}}
      }}]
    }}]
  }}]
}}"#
    )
    .unwrap();

    let result = ContentLoader::new().load_file(&path).unwrap();
    let scenario = result.catalog.get_scenario("json_drill").unwrap();
    assert_eq!(scenario.phases[0].choices[0].outcome.deltas.containment_level, Some(80));
}

#[test]
fn unknown_delta_field_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    let text = DEMO_CATALOG.replace("deltas: { score: 5 }", "deltas: { score: 5, mediaAttention: 3 }");
    std::fs::write(&path, text).unwrap();

    let err = ContentLoader::new().load_file(&path).unwrap_err();
    assert!(matches!(err, ContentError::Yaml(_)), "{err}");
}

#[test]
fn unsupported_extension_and_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let txt = dir.path().join("drills.txt");
    std::fs::write(&txt, "scenarios: []").unwrap();
    assert!(matches!(
        ContentLoader::new().load_file(&txt).unwrap_err(),
        ContentError::UnsupportedFormat(_)
    ));

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(
        ContentLoader::new().load_file(&missing).unwrap_err(),
        ContentError::Io { .. }
    ));
}

#[test]
fn retry_loop_loads_with_a_warning() {
    let text = r#"
scenarios:
  - id: retry
    title: Retry
    description: Loops until the analyst gets it right
    difficulty: beginner
    phases:
      - name: triage
        title: Triage
        choices:
          - label: Guess
            outcome: { deltas: { score: -5 }, next_phase: triage }
          - label: Check the logs
            outcome: { deltas: { score: 20 } }
"#;
    let result = ContentLoader::new().load_str(text, ContentFormat::Yaml).unwrap();
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].location.as_deref(), Some("retry/triage"));
    assert!(result.warnings[0].to_string().contains("can loop"));

    let mut game = Game::new(result.catalog);
    game.start_scenario("retry").unwrap();
    game.begin_mission().unwrap();
    play_all(&mut game, &[0, 0, 1]);
    assert_eq!(game.session().unwrap().score(), 10);
    assert!(game.debrief().is_ok());
}
