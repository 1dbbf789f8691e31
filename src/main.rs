use novel_flow::gallery::ImageId;
use novel_flow::narrative::{EndingKind, EndingStats};
use novel_flow::save::{SaveManager, SlotId, SlotStorage};
use novel_flow::workflow::ConfirmationKind;
use novel_flow::{AnswerOutcome, FlowConfig, FlowController, FlowError, Screen};
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// How often `wait` re-checks the running task
const LOADING_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// One line of console input
#[derive(Debug, Clone, Copy, PartialEq)]
enum Intent {
    Go(Screen),
    NewGame,
    Load(SlotId),
    Save(SlotId),
    Exit,
    Answer(bool),
    Slots,
    Gallery,
    View(ImageId),
    Unlock(ImageId),
    Ending(EndingKind, u32, u64),
    Credits,
    Restart,
    Status,
    Wait,
    Help,
    Quit,
}

fn parse_number<T: std::str::FromStr>(arg: Option<&str>, what: &str) -> Result<T, String> {
    arg.ok_or_else(|| format!("missing {}", what))?
        .parse()
        .map_err(|_| format!("invalid {}", what))
}

fn parse_intent(line: &str) -> Result<Intent, String> {
    let mut words = line.split_whitespace();
    let command = words.next().ok_or_else(|| "empty command".to_string())?;

    let intent = match command {
        "go" => {
            let name = words.next().ok_or_else(|| "missing screen".to_string())?;
            Intent::Go(Screen::from_name(name).ok_or_else(|| format!("unknown screen '{}'", name))?)
        }
        "new" => Intent::NewGame,
        "load" => Intent::Load(parse_number(words.next(), "slot")?),
        "save" => Intent::Save(parse_number(words.next(), "slot")?),
        "exit" => Intent::Exit,
        "yes" | "y" => Intent::Answer(true),
        "no" | "n" => Intent::Answer(false),
        "slots" => Intent::Slots,
        "gallery" => Intent::Gallery,
        "view" => Intent::View(parse_number(words.next(), "image id")?),
        "unlock" => Intent::Unlock(parse_number(words.next(), "image id")?),
        "ending" => {
            let kind = match words.next() {
                Some("good") => EndingKind::Good,
                Some("neutral") => EndingKind::Neutral,
                Some("bad") => EndingKind::Bad,
                _ => return Err("ending kind must be good, neutral or bad".to_string()),
            };
            let choices = parse_number(words.next(), "choice count")?;
            let seconds = parse_number(words.next(), "playtime seconds")?;
            Intent::Ending(kind, choices, seconds)
        }
        "credits" => Intent::Credits,
        "restart" => Intent::Restart,
        "status" => Intent::Status,
        "wait" => Intent::Wait,
        "help" | "?" => Intent::Help,
        "quit" | "q" => Intent::Quit,
        other => return Err(format!("unknown command '{}'", other)),
    };

    Ok(intent)
}

fn print_controls() {
    println!("Controls:");
    println!("go <screen>      - Navigate (main, game, gallery, settings, narrative,");
    println!("                   loadSlots, saveSlots, pause, credits, gameEnd)");
    println!("new              - Start a new game");
    println!("load <slot>      - Load a save slot");
    println!("save <slot>      - Save into a slot");
    println!("exit             - Quit to the main menu");
    println!("yes / no         - Answer the confirmation dialog");
    println!("slots / gallery  - List save slots / gallery images");
    println!("view <id>        - Open a gallery image");
    println!("unlock <id>      - Simulate a narrative unlock milestone");
    println!("ending <good|neutral|bad> <choices> <seconds> - Simulate an ending");
    println!("credits / restart - Leave the ending screen");
    println!("status           - Show the current state");
    println!("wait             - Block until the loading screen finishes");
    println!("quit             - Leave the player");
}

fn print_slots<S: SlotStorage>(flow: &FlowController<S>) {
    for slot in flow.list_slots() {
        match &slot.contents {
            Some(contents) => println!(
                "  [{}] {} - {} ({})",
                slot.id,
                contents.name,
                contents.scene_label,
                contents.saved_at.format("%Y-%m-%d %H:%M:%S")
            ),
            None => println!("  [{}] Empty slot", slot.id),
        }
    }
}

fn print_gallery<S: SlotStorage>(flow: &FlowController<S>) {
    for image in flow.list_images() {
        let state = if image.is_unlocked() { " " } else { "🔒" };
        println!("  {} [{}] {}", state, image.id, image.title);
    }
}

fn print_status<S: SlotStorage>(flow: &FlowController<S>) {
    let progress = flow.narrative_progress();
    println!("Screen: {}", flow.current_screen().name());
    println!(
        "Progress: {} (line {})",
        progress.scene_label(),
        progress.dialogue_index
    );
    if let Some(request) = flow.pending_confirmation() {
        println!("Awaiting confirmation: {}", request.kind.prompt());
    }
    if let Some(line) = loading_line(flow, Instant::now()) {
        println!("Loading: {}", line);
    }
    if let Some(report) = flow.last_ending() {
        println!(
            "Last ending: {} ({} choices, {})",
            report.kind.title(),
            report.stats.choices_made,
            report.stats.completion_time()
        );
    }
}

/// Finishes the running task, if its loading period is over
fn tick<S: SlotStorage>(flow: &mut FlowController<S>) {
    match flow.update() {
        Ok(Some(done)) => println!("✓ {} -> {}", done.kind.title(), done.screen.name()),
        Ok(None) => {}
        Err(e) => println!("✗ {}", e),
    }
}

/// Loading screen text for the running task, if any
fn loading_line<S: SlotStorage>(flow: &FlowController<S>, now: Instant) -> Option<String> {
    flow.loading_task().map(|task| {
        format!(
            "{} {} {:>3.0}%",
            task.kind().title(),
            task.kind().subtitle(),
            task.progress(now) * 100.0
        )
    })
}

/// Prompt shown before each line; carries the loading screen while a task runs
fn prompt<S: SlotStorage>(flow: &FlowController<S>, now: Instant) -> String {
    match loading_line(flow, now) {
        Some(line) => format!("[{} | {}] > ", flow.current_screen().name(), line),
        None => format!("[{}] > ", flow.current_screen().name()),
    }
}

/// Redraws the loading screen until the running task completes
fn wait_for_loading<S: SlotStorage>(flow: &mut FlowController<S>) -> io::Result<()> {
    let mut stdout = io::stdout();
    while let Some(line) = loading_line(flow, Instant::now()) {
        write!(stdout, "\r{}", line)?;
        stdout.flush()?;
        std::thread::sleep(LOADING_POLL_INTERVAL);
        if flow.loading_task().is_some_and(|task| task.is_finished(Instant::now())) {
            writeln!(stdout)?;
        }
        tick(flow);
    }
    Ok(())
}

fn handle<S: SlotStorage>(flow: &mut FlowController<S>, intent: Intent) -> Result<(), FlowError> {
    match intent {
        Intent::Go(screen) => {
            flow.request_transition(screen);
        }
        Intent::NewGame => {
            let request = flow.request_confirmation(ConfirmationKind::NewGame, None)?;
            println!("{} (yes/no)", request.kind.prompt());
        }
        Intent::Load(slot) => {
            let request = flow.request_load(slot)?;
            println!("{} (yes/no)", request.kind.prompt());
        }
        Intent::Save(slot) => {
            let request = flow.request_save(slot)?;
            println!("{} (yes/no)", request.kind.prompt());
        }
        Intent::Exit => {
            let request = flow.request_confirmation(ConfirmationKind::Exit, None)?;
            println!("{} (yes/no)", request.kind.prompt());
        }
        Intent::Answer(confirmed) => match flow.answer(confirmed)? {
            AnswerOutcome::Started(kind) => {
                println!("{} {}", kind.title(), kind.subtitle());
            }
            AnswerOutcome::Declined => println!("Cancelled"),
            AnswerOutcome::Exited => println!("Back to the main menu"),
        },
        Intent::Slots => print_slots(flow),
        Intent::Gallery => print_gallery(flow),
        Intent::View(id) => {
            let image = flow.view_image(id)?;
            println!("{}: {}", image.title, image.description);
            if let Some(full) = image.full_image() {
                println!("  {}", full);
            }
        }
        Intent::Unlock(id) => {
            if flow.on_gallery_unlock(id)? {
                println!("✓ Gallery image {} unlocked", id);
            }
        }
        Intent::Ending(kind, choices, seconds) => {
            let stats = EndingStats::new(choices, Duration::from_secs(seconds));
            flow.on_ending_reached(kind, stats);
            println!("{} - {} choices in {}", kind.title(), choices, stats.completion_time());
        }
        Intent::Credits => {
            flow.continue_to_credits();
        }
        Intent::Restart => {
            flow.restart();
        }
        Intent::Status => print_status(flow),
        Intent::Help => print_controls(),
        Intent::Wait | Intent::Quit => {}
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => FlowConfig::load_from_file(path)?,
        None => FlowConfig::default(),
    };

    let save_manager = SaveManager::new(config.resolved_save_directory())?;
    let mut flow = FlowController::with_storage(&config, save_manager)?;

    print_controls();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        tick(&mut flow);
        print!("{}", prompt(&flow, Instant::now()));
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_intent(&line) {
            Ok(Intent::Quit) => break,
            Ok(Intent::Wait) => wait_for_loading(&mut flow)?,
            Ok(intent) => {
                if let Err(e) = handle(&mut flow, intent) {
                    println!("✗ {}", e);
                }
            }
            Err(msg) => println!("✗ {} (type 'help')", msg),
        }
    }

    flow.abandon();
    Ok(())
}
