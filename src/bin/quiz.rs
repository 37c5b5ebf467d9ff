//! Terminal quiz front-end for the Math Robo Tutor server.
//!
//! Environment: MATH_TUTOR_URL, MATH_TUTOR_PROFILE, MATH_TUTOR_SPEECH (see `math_tutor::config`),
//! plus LOG_LEVEL / LOG_FORMAT for stderr logs.

use std::io::{self, Write};

use rand::{rngs::StdRng, SeedableRng};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::info;

use math_tutor::catalog::{self, GRADES};
use math_tutor::client::QuestionClient;
use math_tutor::config::ClientConfig;
use math_tutor::domain::QuestionSource;
use math_tutor::profile::{FileNameStore, NameStore};
use math_tutor::protocol::GenerateIn;
use math_tutor::quiz::{FeedbackPlayer, Phase, TerminalFeedback, TutorApp};
use math_tutor::telemetry;

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing(telemetry::CLIENT_FILTER);

    let cfg = ClientConfig::from_env();
    info!(target: "math_tutor", url = %cfg.base_url, profile = %cfg.profile_path, "Quiz client starting");

    let client = QuestionClient::new(&cfg.base_url)?;
    let mut player = TerminalFeedback { speech_command: cfg.speech_command.clone() };
    let mut app = TutorApp::new(FileNameStore::new(&cfg.profile_path));
    let mut input: Input = BufReader::new(tokio::io::stdin()).lines();
    let mut rng = StdRng::from_entropy();
    let mut pending: Option<GenerateIn> = None;

    app.load();
    loop {
        match app.phase() {
            Phase::Idle => app.load(),
            Phase::NamePrompt => {
                if let Some(e) = app.name_error() {
                    println!("{e}");
                }
                let Some(line) = ask(&mut input, "What is your name? (Enter to skip, q to quit) ").await? else { break };
                match line.as_str() {
                    "q" => break,
                    "" => app.dismiss_name_prompt(),
                    name => {
                        app.set_name(name);
                        app.save_name();
                    }
                }
            }
            Phase::Configuring => {
                show_selection(&app);
                let Some(line) = ask(&mut input, "> ").await? else { break };
                if !configure(&mut app, &line, &mut pending) {
                    break;
                }
            }
            Phase::Loading => {
                let Some(req) = pending.take() else { break };
                println!("Generating questions...");
                let result = client.generate(&req).await;
                app.finish_generate(result, &mut rng);
                if let Phase::Presenting(_) = app.phase() {
                    show_source(app.source());
                }
            }
            Phase::Presenting(index) => {
                let Some(q) = app.session().current_question().cloned() else { break };
                println!();
                println!("Question {} of {} [{}]", index + 1, app.session().len(), catalog::type_label(&q.kind));
                println!("{}", q.question);
                for (i, opt) in q.options.iter().enumerate() {
                    println!("  {}) {}", i + 1, opt);
                }
                let Some(line) = ask(&mut input, "Your answer (1-4, s to hear it, q to quit): ").await? else { break };
                match line.as_str() {
                    "q" => break,
                    "s" => {
                        if let Some(u) = app.speak_current() {
                            player.speak(&u);
                        }
                    }
                    pick => {
                        let chosen = pick.parse::<usize>().ok().and_then(|n| n.checked_sub(1)).and_then(|i| q.options.get(i));
                        let Some(choice) = chosen else {
                            println!("Pick one of the numbers shown.");
                            continue;
                        };
                        if let Some(outcome) = app.select_answer(choice) {
                            player.play_tone(outcome.tone);
                            println!("{}", outcome.message);
                            tokio::time::sleep(outcome.advance_after).await;
                            app.advance();
                        }
                    }
                }
            }
            Phase::Feedback(_) => {
                app.advance();
            }
            Phase::Completed => {
                show_summary(&app);
                let Some(line) = ask(&mut input, "[a] start again  [n] next topic  [c] change grade/topic  [l] log out  [q] quit: ").await? else { break };
                match line.as_str() {
                    "a" => pending = app.start_again(),
                    "n" => pending = app.practice_next_topic(),
                    "c" => app.reconfigure(),
                    "l" => app.logout(),
                    "q" => break,
                    _ => {}
                }
                if let Some(e) = app.error() {
                    println!("{e}");
                }
            }
            Phase::Farewell => {
                println!("Goodbye! Come back soon for more practice.");
                let Some(line) = ask(&mut input, "Press Enter to sign in again, q to quit: ").await? else { break };
                if line == "q" {
                    break;
                }
                app.back_from_farewell();
            }
        }
    }
    Ok(())
}

async fn ask(input: &mut Input, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    Ok(input.next_line().await?.map(|l| l.trim().to_string()))
}

fn show_selection<S: NameStore>(app: &TutorApp<S>) {
    println!();
    if app.student_name().trim().is_empty() {
        println!("Not signed in.");
    } else {
        println!("Hi {}! Lifetime score: {}%", app.student_name(), app.lifetime().percent());
    }
    println!("Grades:");
    for (i, g) in GRADES.iter().enumerate() {
        let mark = if app.grade().map(|s| s.value) == Some(g.value) { "*" } else { " " };
        println!(" {mark}{:>2}) {}", i + 1, g.label);
    }
    let topics = app.available_topics();
    if !topics.is_empty() {
        println!("Topics ({}):", app.difficulty_label());
        for (i, t) in topics.iter().enumerate() {
            let mark = if app.topic().map(|s| s.value) == Some(t.value) { "*" } else { " " };
            println!(" {mark}{:>2}) {} - {}", i + 1, t.label, t.description);
        }
    }
    if let Some(e) = app.error() {
        println!("{e}");
    }
    println!("g <n> grade | t <n> topic | s start | n sign in | l log out | q quit");
}

/// Apply one configuration command. Returns false to quit.
fn configure<S: NameStore>(app: &mut TutorApp<S>, line: &str, pending: &mut Option<GenerateIn>) -> bool {
    let mut parts = line.split_whitespace();
    let cmd = parts.next().unwrap_or_default();
    let index = parts.next().and_then(|n| n.parse::<usize>().ok()).and_then(|n| n.checked_sub(1));
    match (cmd, index) {
        ("q", _) => return false,
        ("g", Some(i)) => {
            if let Some(g) = GRADES.get(i) {
                app.select_grade(g.value);
            }
        }
        ("t", Some(i)) => {
            if let Some(t) = app.available_topics().get(i).copied() {
                app.select_topic(t.value);
            }
        }
        ("s", _) => *pending = app.begin_generate(),
        ("n", _) => app.open_name_prompt(),
        ("l", _) => app.logout(),
        _ => println!("Unknown command."),
    }
    true
}

fn show_source(source: Option<QuestionSource>) {
    match source {
        Some(QuestionSource::Offline) => println!("(Offline practice set: the question generator is unavailable right now.)"),
        Some(QuestionSource::OfflineError) => println!("(Offline practice set: the question generator could not sign in.)"),
        None => {}
    }
}

fn show_summary<S: NameStore>(app: &TutorApp<S>) {
    let summary = app.summary();
    println!();
    println!("You scored {} out of {}!", summary.score, summary.total);
    for (i, a) in summary.answers.iter().enumerate() {
        let mark = if a.is_correct { "ok" } else { "x " };
        let choice = a.choice.as_deref().unwrap_or("-");
        println!(" {mark} {:>2}. {} (yours: {}, answer: {})", i + 1, a.question, choice, a.correct_answer);
    }
    println!(
        "Lifetime: {} of {} correct ({}%)",
        summary.lifetime.correct,
        summary.lifetime.attempts,
        summary.lifetime.percent()
    );
}
