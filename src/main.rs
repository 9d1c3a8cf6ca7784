//! work-persona - work style survey
//!
//! This is the main entry point for the work-persona binary.
//! It walks a user through seven questions, matches the answers to a persona
//! and audience segment, and renders shareable results.

use std::io;

use clap::Parser;
use tracing::{debug, info, warn};

use work_persona::cli::{CatalogSection, Cli, Commands, ConfigSubcommand, ProgressSubcommand};
use work_persona::config::{self, AppConfig};
use work_persona::error::{Error, Result};
use work_persona::survey::codec::link_persona_id;
use work_persona::survey::{
    absolute_link, decode_link, run_interactive, Answers, Assessment, Catalog, Outcome,
    SurveySession,
};
use work_persona::{logging, render, version};

fn main() {
    // Parse CLI arguments first (before logging, so we know verbosity)
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    // For commands that don't need full logging, use simple setup
    match &cli.command {
        Commands::Version => {
            version::print_version();
            return Ok(());
        }
        Commands::Config { subcommand } => {
            logging::init_simple(tracing::Level::WARN)?;
            return handle_config_command(subcommand.clone(), cli.config.as_deref());
        }
        _ => {}
    }

    let config = AppConfig::load(cli.config.as_deref())?;

    // The guards must be kept alive for the lifetime of the program
    let _log_guards = logging::init_logging(&config.logging, cli.verbose, cli.quiet)?;

    let build = version::build_info();
    debug!(version = %build.full_version(), "Starting work-persona");

    let catalog = Catalog::bundled();

    match cli.command {
        Commands::Survey { fresh } => run_survey(&config, catalog, fresh),
        Commands::Score { answers, json } => run_score(&config, &catalog, &answers, json),
        Commands::Results {
            link,
            share_text,
            json,
        } => show_results(&config, &catalog, &link, share_text, json),
        Commands::Progress { subcommand } => handle_progress_command(&config, &catalog, subcommand),
        Commands::Catalog { section } => {
            print_catalog(&catalog, section);
            Ok(())
        }
        Commands::Version | Commands::Config { .. } => {
            // Already handled above
            unreachable!();
        }
    }
}

/// Run the interactive survey on stdin/stdout
fn run_survey(config: &AppConfig, catalog: Catalog, fresh: bool) -> Result<()> {
    let mut session = SurveySession::start(catalog, config.progress_keeper());
    if fresh {
        session.restart();
        info!("Saved progress discarded");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();

    if let Some(outcome) = run_interactive(&mut session, stdin.lock(), stdout.lock())? {
        let link = absolute_link(&config.survey.base_url, &outcome.link);
        println!();
        print!("{}", render::render_result(&outcome.assessment, &link));
    }

    Ok(())
}

/// Score `question=answer` pairs given on the command line
fn run_score(config: &AppConfig, catalog: &Catalog, pairs: &[String], json: bool) -> Result<()> {
    let answers = parse_answer_pairs(catalog, pairs)?;
    let outcome = Outcome::new(Assessment::from_answers(catalog, &answers));
    print_outcome(config, outcome, json)
}

/// Parse `q1=q1a` style pairs. Unknown ids are kept and later ignored by scoring.
fn parse_answer_pairs(catalog: &Catalog, pairs: &[String]) -> Result<Answers> {
    let mut answers = Answers::new();
    for pair in pairs {
        let (question_id, answer_id) = pair
            .split_once('=')
            .map(|(q, a)| (q.trim(), a.trim()))
            .filter(|(q, a)| !q.is_empty() && !a.is_empty())
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "'{}' is not a QUESTION=ANSWER pair (e.g. q1=q1a)",
                    pair
                ))
            })?;

        match catalog.question(question_id) {
            None => warn!(question = question_id, "Unknown question id, it will not be scored"),
            Some(question) if question.answer(answer_id).is_none() => warn!(
                question = question_id,
                answer = answer_id,
                "Unknown answer id, it will not be scored"
            ),
            Some(_) => {}
        }

        answers.insert(question_id.to_string(), answer_id.to_string());
    }

    if answers.len() < catalog.total_questions() {
        debug!(
            answered = answers.len(),
            total = catalog.total_questions(),
            "Scoring a partial set of answers"
        );
    }
    Ok(answers)
}

/// Decode a share link and render it
fn show_results(
    config: &AppConfig,
    catalog: &Catalog,
    link: &str,
    share_text: bool,
    json: bool,
) -> Result<()> {
    let decoded = decode_link(catalog, link);
    let traits = decoded
        .traits
        .ok_or_else(|| Error::invalid_result_link(link))?;
    let persona = decoded.persona.ok_or_else(|| Error::UnknownPersona {
        persona_id: link_persona_id(link).unwrap_or_default(),
    })?;

    let assessment = Assessment::with_persona(catalog, persona, traits);
    if share_text {
        println!(
            "{}",
            render::share_text(persona, assessment.segment, &config.survey.base_url)
        );
        return Ok(());
    }

    print_outcome(config, Outcome::new(assessment), json)
}

fn print_outcome(config: &AppConfig, outcome: Outcome, json: bool) -> Result<()> {
    let link = absolute_link(&config.survey.base_url, &outcome.link);
    if json {
        let outcome = Outcome { link, ..outcome };
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print!("{}", render::render_result(&outcome.assessment, &link));
    }
    Ok(())
}

/// Handle progress subcommands
fn handle_progress_command(
    config: &AppConfig,
    catalog: &Catalog,
    subcommand: ProgressSubcommand,
) -> Result<()> {
    let keeper = config.progress_keeper();

    match subcommand {
        ProgressSubcommand::Show => match keeper.try_load()? {
            None => println!("No saved progress."),
            Some(progress) => {
                let total = catalog.total_questions();
                println!(
                    "Question {} of {}, {} answered",
                    (progress.current_step + 1).min(total),
                    total,
                    progress.answers.len()
                );
                if let Some(at) = progress.completed_at {
                    println!("Completed at {}", at.to_rfc3339());
                }
                for (question_id, answer_id) in &progress.answers {
                    println!("  {} = {}", question_id, answer_id);
                }
            }
        },
        ProgressSubcommand::Clear => {
            keeper.try_clear()?;
            println!("Saved progress cleared.");
        }
    }

    Ok(())
}

/// Print one section of the bundled catalog
fn print_catalog(catalog: &Catalog, section: CatalogSection) {
    match section {
        CatalogSection::Questions => {
            for question in catalog.questions() {
                println!("{}: {}", question.id, question.prompt);
                for answer in question.answers {
                    println!("  {:<4} {}", answer.id, answer.text);
                }
                println!();
            }
        }
        CatalogSection::Personas => {
            for persona in catalog.personas() {
                println!(
                    "{:<10} {} {} - {}",
                    persona.id, persona.emoji, persona.name, persona.tagline
                );
            }
        }
        CatalogSection::Segments => {
            for segment in catalog.segments() {
                let requirements = if segment.is_fallback() {
                    "(fallback)".to_string()
                } else {
                    segment
                        .requirements
                        .iter()
                        .map(|(t, level)| format!("{}={}", t.slug(), level))
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                println!("{:<22} {:<24} {}", segment.id, segment.name, requirements);
            }
        }
    }
}

/// Handle configuration subcommands
fn handle_config_command(subcommand: ConfigSubcommand, config_path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = AppConfig::load(config_path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate => {
            AppConfig::load(config_path)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use work_persona::survey::{self, Trait};

    fn pairs(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_answer_pairs() {
        let catalog = Catalog::bundled();
        let answers = parse_answer_pairs(&catalog, &pairs(&["q1=q1a", " q2 = q2c "])).unwrap();
        assert_eq!(answers.get("q1").map(String::as_str), Some("q1a"));
        assert_eq!(answers.get("q2").map(String::as_str), Some("q2c"));
    }

    #[test]
    fn test_parse_answer_pairs_keeps_unknown_ids() {
        let catalog = Catalog::bundled();
        let answers = parse_answer_pairs(&catalog, &pairs(&["q9=q9a", "q1=zzz"])).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(
            survey::calculate_traits(&catalog, &answers),
            survey::TraitScores::default()
        );
    }

    #[test]
    fn test_parse_answer_pairs_rejects_malformed() {
        let catalog = Catalog::bundled();
        for bad in ["q1", "=q1a", "q1=", ""] {
            let err = parse_answer_pairs(&catalog, &pairs(&[bad])).unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_trait_slugs_match_json_keys() {
        let catalog = Catalog::bundled();
        let outcome = Outcome::new(Assessment::from_answers(&catalog, &Answers::new()));
        let json = serde_json::to_value(&outcome).unwrap();
        for t in Trait::all() {
            assert!(json["traits"].get(t.slug()).is_some(), "missing {}", t.slug());
        }
        let link = json["link"].as_str().unwrap();
        assert!(link.starts_with("/results?p="));
        assert!(link.ends_with("&v=0&st=0&sp=0&e=0"));
    }
}
