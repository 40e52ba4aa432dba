//! MindBridge CLI - the terminal view over the wellness core
//!
//! Usage:
//!   mindbridge --log happy                  # Log today's mood
//!   mindbridge --stats                      # Streak / average / total
//!   mindbridge --chart                      # ASCII mood trend
//!   mindbridge --chat                       # Interactive support chat
//!   mindbridge --breathe                    # Guided 4-7-8 breathing
//!   mindbridge --ground                     # 5-4-3-2-1 grounding steps

use clap::Parser;
use colored::Colorize;
use rand::Rng;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use mindbridge::core::{
    ChatResponder, FileStorage, SystemClock, WellnessSession, WELCOME_MESSAGE,
};
use mindbridge::types::{BreathingPhase, ChatMessage, MoodLabel, ALL_MOODS};
use mindbridge::{
    core, DEFAULT_HISTORY_FILE, TYPING_DELAY_MAX_MS, TYPING_DELAY_MIN_MS, VERSION,
};

#[derive(Parser, Debug)]
#[command(
    name = "mindbridge",
    version = VERSION,
    about = "MindBridge - mood tracking and supportive chat companion",
    long_about = "MindBridge is a client-side wellness companion.\n\n\
                  It keeps a local mood history with streak and trend stats,\n\
                  offers a scripted supportive chat with crisis-keyword detection,\n\
                  and guides two self-help exercises (paced breathing, grounding).\n\n\
                  Modes:\n  \
                  --log <MOOD>   Log today's mood (very-sad, sad, neutral, happy, very-happy)\n  \
                  --stats        Show streak, average mood and entry count\n  \
                  --chart        Show the last 30 days as an ASCII chart\n  \
                  --chat         Interactive support chat (default)\n  \
                  --breathe      Guided breathing exercise\n  \
                  --ground       Grounding exercise"
)]
struct Args {
    /// Log today's mood and exit
    #[arg(short, long)]
    log: Option<String>,

    /// Show mood statistics
    #[arg(short, long)]
    stats: bool,

    /// Show the mood trend chart
    #[arg(long)]
    chart: bool,

    /// Interactive support chat - read lines from stdin
    #[arg(short, long)]
    chat: bool,

    /// Run the guided breathing exercise (press Enter to stop early)
    #[arg(short, long)]
    breathe: bool,

    /// Run the grounding exercise (n = next, p = previous, q = quit)
    #[arg(short, long)]
    ground: bool,

    /// Seed two weeks of sample history when none exists yet
    #[arg(long)]
    demo: bool,

    /// Seed for deterministic reply selection
    #[arg(long)]
    seed: Option<u64>,

    /// Mood history file (default: ./mindbridge-mood-history.json)
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    data_file: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let responder = match args.seed {
        Some(seed) => ChatResponder::seeded(seed),
        None => ChatResponder::new(),
    };
    let mut session = WellnessSession::with_responder(
        Box::new(FileStorage::new(&args.data_file)),
        Box::new(SystemClock),
        responder,
    );

    if args.demo {
        session.seed_demo_history();
    }

    if let Some(ref label) = args.log {
        run_log(&mut session, label, &args);
    } else if args.stats {
        run_stats(&session, &args);
    } else if args.chart {
        run_chart(&session, &args);
    } else if args.breathe {
        run_breathe(&session).await;
    } else if args.ground {
        run_ground(&mut session);
    } else {
        // Chat is the default mode, like the landing page of the original
        run_chat(&mut session, &args).await;
    }
}

/// Log today's mood, print the confirmation and encouragement lines
fn run_log(session: &mut WellnessSession, label: &str, args: &Args) {
    let entry = session.log_mood(label);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entry).unwrap());
        return;
    }

    let display = core::display_label_of(&entry.mood);
    let emoji = label
        .parse::<MoodLabel>()
        .map(|m| m.emoji())
        .unwrap_or("📝");
    println!(
        "{} {}",
        emoji,
        format!("Mood logged successfully: {}!", display).green()
    );
    println!("  {}", core::feedback_for(&entry.mood).dimmed());

    let stats = session.stats();
    println!(
        "  Streak: {} day(s) | Total entries: {}",
        stats.streak, stats.total_entries
    );
}

/// Print streak / average / total
fn run_stats(session: &WellnessSession, args: &Args) {
    let stats = session.stats();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats).unwrap());
        return;
    }

    print_header("Mood Stats");
    println!("  Current streak:  {} day(s)", stats.streak);
    println!("  Average mood:    {}", stats.average_label);
    println!("  Total entries:   {}", stats.total_entries);
}

/// ASCII rendition of the last 30 days
fn run_chart(session: &WellnessSession, args: &Args) {
    let series = session.series(None);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&series).unwrap());
        return;
    }

    print_header("Mood Trend");
    if series.is_empty() {
        println!("  No moods logged yet. Try: mindbridge --log happy");
        return;
    }

    for (date, score) in &series {
        let bar = "█".repeat(*score as usize);
        let label = score_display(*score);
        let bar = match score {
            1 | 2 => bar.red(),
            3 => bar.yellow(),
            _ => bar.green(),
        };
        println!("  {}  {:<5} {} ({})", date, bar, label, score);
    }
}

/// Interactive support chat with simulated typing latency
async fn run_chat(session: &mut WellnessSession, args: &Args) {
    print_header("Support Chat");
    println!("Type a message and press Enter. Type 'quit' to exit.");
    println!();
    println!("{}", WELCOME_MESSAGE.cyan());
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut transcript: Vec<ChatMessage> = vec![ChatMessage::assistant(WELCOME_MESSAGE)];

    loop {
        print!("you > ");
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!(
                "\nTake care of yourself. ({} messages this session)",
                transcript.len()
            );
            break;
        }
        if line.is_empty() {
            continue;
        }

        transcript.push(ChatMessage::user(line));
        let reply = session.classify_and_reply(line);

        if reply.is_crisis {
            print_crisis_banner();
        }

        if args.json {
            println!("{}", serde_json::to_string(&reply).unwrap());
            transcript.push(ChatMessage::assistant(reply.text.as_str()));
            continue;
        }

        println!("{}", "MindBridge AI is typing...".dimmed());
        tokio::time::sleep(typing_delay()).await;

        let message = ChatMessage::assistant(reply.text.as_str());
        println!(
            "{} {} {}",
            message.sent_at.format("%H:%M").to_string().dimmed(),
            format!("[{}]", reply.category).dimmed(),
            message.text.cyan()
        );
        println!();
        transcript.push(message);
    }
}

/// Run the breathing exercise until completion or Enter
async fn run_breathe(session: &WellnessSession) {
    print_header("Breathing Exercise");
    println!("Follow the prompts: in for 4, hold for 7, out for 8. Five cycles.");
    println!("Press Enter at any time to stop.");
    println!();

    let mut rx = session.subscribe_breathing();
    session.start_breathing();

    // Blocking stdin watcher; a line on it means "stop"
    let (stop_tx, mut stop_rx) = tokio::sync::mpsc::channel::<()>(1);
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = io::stdin().lock().read_line(&mut line);
        let _ = stop_tx.blocking_send(());
    });

    loop {
        tokio::select! {
            update = rx.recv() => {
                let Ok(update) = update else { break };
                print_breathing_update(&update);
                if update.completed {
                    println!();
                    println!("{}", "Well done! You completed the breathing exercise.".green());
                    break;
                }
                if update.phase == BreathingPhase::Idle {
                    break;
                }
            }
            _ = stop_rx.recv() => {
                let update = session.stop_breathing();
                println!("{}", update.phase.instruction());
                break;
            }
        }
    }
}

/// Step through grounding with n/p/q
fn run_ground(session: &mut WellnessSession) {
    print_header("Grounding Exercise");
    println!("The 5-4-3-2-1 technique. n = next step, p = previous step, q = quit.");
    println!();
    println!("Step 1/5: {}", session.grounding_step_text());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("[n/p/q] > ");
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let update = match line.trim().to_lowercase().as_str() {
            "n" | "next" | "" => session.grounding_next(),
            "p" | "prev" | "previous" => session.grounding_prev(),
            "q" | "quit" | "exit" => break,
            _ => {
                println!("  n = next, p = previous, q = quit");
                continue;
            }
        };

        if update.completed {
            println!(
                "{}",
                "Great job completing the grounding exercise!".green()
            );
            break;
        }

        println!(
            "Step {}/{}: {}",
            update.step_index,
            update.total_steps,
            session.grounding_step_text()
        );
        if !update.can_go_back {
            println!("{}", "  (first step)".dimmed());
        }
    }
}

/// Uniform pick from the simulated-typing window
fn typing_delay() -> Duration {
    let ms = rand::thread_rng().gen_range(TYPING_DELAY_MIN_MS..=TYPING_DELAY_MAX_MS);
    Duration::from_millis(ms)
}

fn print_breathing_update(update: &mindbridge::types::BreathingUpdate) {
    let color = update.phase.color_code();
    let reset = BreathingPhase::color_reset();
    println!(
        "{}[{}] cycle {}/5 - {}{}",
        color,
        update.phase,
        update.cycles_completed,
        update.phase.instruction(),
        reset
    );
}

fn print_crisis_banner() {
    println!();
    println!("{}", "╔══════════════════════════════════════════════════════════╗".red());
    println!("{}", "║  You are not alone. Immediate support is available:      ║".red().bold());
    println!("{}", "║    • Call or text 988 (Suicide & Crisis Lifeline)        ║".red());
    println!("{}", "║    • Text HOME to 741741 (Crisis Text Line)              ║".red());
    println!("{}", "║    • Call 911 if you are in immediate danger             ║".red());
    println!("{}", "╚══════════════════════════════════════════════════════════╝".red());
    println!();
}

fn print_header(mode: &str) {
    println!("{}", format!("=== MindBridge v{} - {} ===", VERSION, mode).bold());
    println!();
}

/// Display label for a stored score (the inverse of the score table)
fn score_display(score: u8) -> &'static str {
    ALL_MOODS
        .iter()
        .find(|m| core::score_of(m.as_str()) == score)
        .map(|m| core::display_label_of(m.as_str()))
        .unwrap_or("Unknown")
}
