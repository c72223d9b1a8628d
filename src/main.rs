//! Incident Drill
//!
//! Terminal front end for the scenario engine: list the catalog, lint
//! content files, or play a scenario by typing choice numbers.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Commands, IocArgs, ListArgs, PlayArgs, ValidateArgs};
use incident_drill::config::EngineConfig;
use incident_drill::game::{scenarios, ContentLoader, NextStep, ScenarioCatalog, ScenarioFilter};
use incident_drill::logging::init_logging;
use incident_drill::{Game, PlayerProfile};
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Arc;
use tracing::info;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let content = cli.content.clone().or_else(|| config.content.path.clone());

    match cli.command {
        Commands::Validate(args) => validate(&args),
        Commands::List(args) => {
            let catalog = load_catalog(content.as_deref())?;
            list(&catalog, &args);
            Ok(())
        }
        Commands::Ioc(args) => {
            let catalog = load_catalog(content.as_deref())?;
            iocs(&catalog, &args)
        }
        Commands::Play(args) => {
            let catalog = load_catalog(content.as_deref())?;
            let game = Game::with_defaults(catalog, config.session.clone());
            let stdin = io::stdin();
            play(game, &args, stdin.lock(), io::stdout().lock())
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Arc<ScenarioCatalog>> {
    match path {
        Some(path) => {
            let result = ContentLoader::new()
                .load_file(path)
                .with_context(|| format!("loading content {}", path.display()))?;
            Ok(result.catalog)
        }
        None => {
            let catalog = scenarios::builtin_catalog().context("built-in content")?;
            Ok(Arc::new(catalog))
        }
    }
}

fn validate(args: &ValidateArgs) -> Result<()> {
    let result = ContentLoader::new()
        .load_file(&args.file)
        .with_context(|| format!("validating {}", args.file.display()))?;
    for warning in &result.warnings {
        println!("warning: {}", warning);
    }
    println!(
        "{}: {} scenario(s), {} achievement(s), {} warning(s)",
        args.file.display(),
        result.catalog.len(),
        result.catalog.achievements().len(),
        result.warnings.len()
    );
    Ok(())
}

fn list(catalog: &ScenarioCatalog, args: &ListArgs) {
    let filter = ScenarioFilter {
        difficulty: args.difficulty,
        category: args.category.clone(),
        max_required_level: args.level,
    };
    let scenarios = catalog.list_scenarios(&filter);
    if scenarios.is_empty() {
        println!("No scenarios match.");
        return;
    }
    for s in scenarios {
        println!(
            "{:<24} {} {:<12} {:>3} min  L{}  {}",
            s.id,
            s.difficulty.badge(),
            s.category,
            s.estimated_time_minutes,
            s.required_level,
            s.title
        );
    }
}

/// One-based choice number typed by the player to a choice index
fn parse_choice(command: &str) -> Option<usize> {
    command.parse::<usize>().ok()?.checked_sub(1)
}

fn iocs(catalog: &ScenarioCatalog, args: &IocArgs) -> Result<()> {
    if let Some(observation) = &args.analyze {
        let hits = catalog.analyze_indicator(observation);
        if hits.is_empty() {
            println!("No detection pattern matches.");
        }
        for hit in hits {
            println!("{} [{} confidence]", hit.pattern.pattern, hit.pattern.confidence);
            println!("  {}", hit.pattern.reasoning);
            for ioc in hit.iocs {
                println!("  -> {} ({})", ioc.name, ioc.severity);
            }
        }
        return Ok(());
    }

    if let Some(id) = &args.id {
        let Some(ioc) = catalog.get_ioc(id) else {
            bail!("unknown IOC '{}'", id);
        };
        println!("{} [{}] {}", ioc.name, ioc.severity, ioc.category);
        println!("{}", ioc.description);
        for indicator in ioc.indicators() {
            println!("  {:<14} {}", indicator.kind, indicator.indicator);
            if !indicator.detection.is_empty() {
                println!("  {:<14} detect: {}", "", indicator.detection);
            }
        }
        println!("ATT&CK: {}", ioc.mitre_attack.join(", "));
        println!("Actors: {}", ioc.threat_actors.join(", "));
        for step in catalog.remediation(id) {
            println!("  * {}", step);
        }
        return Ok(());
    }

    let mut entries: Vec<_> = match &args.actor {
        Some(actor) => catalog.iocs_by_threat_actor(actor),
        None => catalog.iocs().iter().collect(),
    };
    if let Some(category) = &args.category {
        entries.retain(|i| i.category.eq_ignore_ascii_case(category));
    }
    if entries.is_empty() {
        println!("No IOCs match.");
    }
    for ioc in entries {
        println!("{:<20} {:<9} {:<28} {}", ioc.id, ioc.severity, ioc.category, ioc.name);
    }
    Ok(())
}

fn play(mut game: Game, args: &PlayArgs, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
    let profile = Rc::new(RefCell::new(PlayerProfile::new(&args.player)));
    game.add_observer(Box::new(Rc::clone(&profile)));

    let scenario = game.start_scenario(&args.scenario_id)?;
    writeln!(out, "\n=== {} ===", scenario.title)?;
    writeln!(out, "{}", scenario.description)?;
    if let Some(briefing) = &scenario.briefing {
        writeln!(out, "\n{}", briefing)?;
    }
    for objective in &scenario.objectives {
        writeln!(out, "  - {}", objective.description)?;
    }
    game.begin_mission()?;

    let mut line = String::new();
    while let Some(phase) = game.current_phase() {
        writeln!(out, "\n--- {} ---\n{}", phase.title, phase.description)?;
        for ev in &phase.evidence_items {
            writeln!(out, "  [evidence {}] {}", ev.id, ev.brief())?;
        }
        for (i, choice) in phase.choices.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, choice.label)?;
        }
        if phase.is_narrative_only() {
            bail!("phase '{}' offers no choices", phase.name);
        }
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out, "\nDrill abandoned.")?;
            return Ok(());
        }
        let command = line.trim();

        if command == "q" {
            writeln!(out, "Drill abandoned.")?;
            return Ok(());
        }
        if command == "h" {
            for hint in &phase.hints {
                writeln!(out, "  hint: {}", hint)?;
            }
            continue;
        }
        if let Some(id) = command.strip_prefix("e ") {
            let id = id.trim();
            match game.collect_evidence(id) {
                Ok(true) => {
                    writeln!(out, "  collected {}", id)?;
                    if let Some(ev) = game.current_phase().and_then(|p| p.evidence(id)) {
                        for ioc in ev.iocs.iter().filter_map(|l| game.catalog().get_ioc(l)) {
                            writeln!(out, "    linked IOC: {} ({})", ioc.name, ioc.severity)?;
                        }
                    }
                }
                Ok(false) => writeln!(out, "  already collected")?,
                Err(e) => writeln!(out, "  {}", e)?,
            }
            continue;
        }
        let Some(index) = parse_choice(command) else {
            writeln!(out, "  enter a choice number, 'e <evidence>', 'h' or 'q'")?;
            continue;
        };

        let result = match game.choose(index) {
            Ok(result) => result,
            Err(e) => {
                writeln!(out, "  {}", e)?;
                continue;
            }
        };
        if let Some(feedback) = &result.feedback {
            writeln!(out, "\n{} {}: {}", feedback.kind.symbol(), feedback.title, feedback.message)?;
            for detail in &feedback.details {
                writeln!(out, "    {}", detail)?;
            }
        }
        for id in &result.newly_unlocked_achievements {
            let label = game
                .catalog()
                .get_achievement(id)
                .map(|a| a.label())
                .unwrap_or_else(|| id.clone());
            writeln!(out, "  Achievement unlocked: {}", label)?;
        }
        for feature in &result.newly_unlocked_features {
            writeln!(out, "  Unlocked: {}", feature)?;
        }
        if let Some(session) = game.session() {
            writeln!(
                out,
                "  score {} | reputation {} | containment {} | budget {} | time {}",
                session.score(),
                session.reputation(),
                session.containment_level(),
                session.budget(),
                session.time_elapsed()
            )?;
        }
        if result.next == NextStep::Complete {
            break;
        }
    }

    let debrief = game.debrief()?;
    writeln!(out, "\n=== DEBRIEF: {} ===", debrief.ending)?;
    writeln!(out, "{}", debrief.ending.summary())?;
    writeln!(out, "{}", debrief.ending.career_impact())?;
    if let Some(grade) = debrief.grade {
        writeln!(out, "Grade: {}", grade)?;
    }
    writeln!(out, "Decisions: {}  Achievements: {}", debrief.decisions, debrief.achievements.join(", "))?;

    let profile = profile.borrow();
    info!(player = %profile.name, xp = profile.xp, level = profile.level, "drill finished");
    writeln!(out, "{} - {} ({} XP)", profile.name, profile.title, profile.xp)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_play(input: &str) -> String {
        let catalog = Arc::new(scenarios::builtin_catalog().unwrap());
        let args = PlayArgs {
            scenario_id: "ransomware_001".to_string(),
            player: "Tester".to_string(),
        };
        let mut out = Vec::new();
        play(Game::new(catalog), &args, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn choice_numbers_are_one_based() {
        assert_eq!(parse_choice("1"), Some(0));
        assert_eq!(parse_choice("4"), Some(3));
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("-1"), None);
        assert_eq!(parse_choice("two"), None);
    }

    #[test]
    fn zero_is_rejected_as_input_not_as_a_choice() {
        let out = run_play("0\nq\n");
        assert!(out.contains("enter a choice number"), "{out}");
        assert!(!out.contains("Invalid choice"), "{out}");
        assert!(out.contains("Drill abandoned."));
    }

    #[test]
    fn full_playthrough_prints_debrief() {
        let out = run_play("e ev_lateral\n4\n1\n1\n1\n");
        assert!(out.contains("linked IOC: Mimikatz (critical)"), "{out}");
        assert!(out.contains("Unlocked: expert_mode"));
        assert!(out.contains("=== DEBRIEF: SUCCESS - CRISIS AVERTED ==="), "{out}");
        assert!(out.contains("Grade: A"));
    }
}
