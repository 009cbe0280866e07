use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use four_in_a_line::ai::{LearningAgent, Participant};
use four_in_a_line::config::AppConfig;
use four_in_a_line::controller::{Controller, GameEnd};
use four_in_a_line::game::{Board, Outcome, Player};
use four_in_a_line::policy::FilePolicyStore;
use four_in_a_line::training::trainer::Trainer;
use four_in_a_line::ui::{read_name, EndAction, TextPlayer, TuiPlayer};

/// Four In A Line: Connect Four against a self-taught agent.
#[derive(Parser)]
#[command(name = "four-in-a-line", version, about = "Connect Four with a tabular RL agent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Train both agents against each other and save their policies
    Training {
        /// Number of self-play games (overrides training.num_games)
        games: Option<usize>,
    },
    /// Play one game against the agent on the console (default)
    Cli,
    /// Play against the agent in a full-screen terminal UI
    Gui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Cli);

    // Log lines would corrupt the alternate screen
    let default_filter = match command {
        Command::Gui => "warn",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    match command {
        Command::Training { games } => {
            if let Some(games) = games {
                config.training.num_games = games;
            }
            config.validate().context("validating training settings")?;
            run_training(&config)
        }
        Command::Cli => play_console(&config),
        Command::Gui => play_terminal_ui(&config),
    }
}

fn run_training(config: &AppConfig) -> Result<()> {
    let store = FilePolicyStore::new(&config.policy.dir);
    let mut first = LearningAgent::new(config.policy.first_agent.clone(), Player::X, &config.agent);
    let mut second =
        LearningAgent::new(config.policy.second_agent.clone(), Player::O, &config.agent);
    first.load_policy(&store);
    second.load_policy(&store);

    let report = Trainer::new(config.training.clone()).train(&mut first, &mut second);
    println!(
        "Played {} games: {} won {}, {} won {}, {} draws",
        report.games,
        first.name(),
        report.first_wins,
        second.name(),
        report.second_wins,
        report.draws
    );

    for agent in [&first, &second] {
        if let Err(e) = agent.save_policy(&store) {
            log::error!("could not save policy for {}: {}", agent.name(), e);
        }
    }
    Ok(())
}

/// The agent sitting opposite a human who plays `human`. It reuses the
/// training policy of the seat it takes.
fn seat_agent(config: &AppConfig, store: &FilePolicyStore, human: Player) -> LearningAgent {
    let player = human.other();
    let name = match player {
        Player::X => &config.policy.first_agent,
        Player::O => &config.policy.second_agent,
    };
    let mut agent = LearningAgent::new(name.clone(), player, &config.agent);
    agent.load_policy(store);
    agent.set_exploration_rate(config.play.exploration_rate);
    agent
}

fn coin_flip_seat() -> Player {
    if rand::random::<bool>() {
        Player::X
    } else {
        Player::O
    }
}

fn result_message(outcome: Outcome, human: Player, human_name: &str, agent_name: &str) -> String {
    match outcome.winner() {
        Some(winner) if winner == human => format!("{human_name} won!"),
        Some(_) => format!("{agent_name} won!"),
        None => "Tie!".to_string(),
    }
}

/// Play `human` against `agent`, X always opening. Returns how the game
/// ended and the final position.
fn play_seated(
    human: &mut dyn Participant,
    human_player: Player,
    agent: &mut LearningAgent,
) -> (GameEnd, Board) {
    let mut controller = match human_player {
        Player::X => Controller::new(human, agent),
        Player::O => Controller::new(agent, human),
    };
    let end = controller.play_game();
    (end, *controller.state().board())
}

fn save_after_game(agent: &LearningAgent, store: &FilePolicyStore) {
    if let Err(e) = agent.save_policy(store) {
        log::error!("could not save policy for {}: {}", agent.name(), e);
    }
}

fn play_console(config: &AppConfig) -> Result<()> {
    let store = FilePolicyStore::new(&config.policy.dir);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("Four in a line!");
    let name = read_name(&mut input, &mut io::stdout(), &config.play.human_name)
        .context("reading player name")?;

    let human_player = coin_flip_seat();
    let mut agent = seat_agent(config, &store, human_player);
    println!(
        "{}, you play '{}'{}",
        name,
        human_player.name().to_lowercase(),
        if human_player == Player::X { " and move first" } else { "" }
    );

    let mut human = TextPlayer::new(name.clone(), input, io::stdout());
    let (end, board) = play_seated(&mut human, human_player, &mut agent);

    match end {
        GameEnd::Finished(outcome) => {
            print!("{board}");
            println!("{}", result_message(outcome, human_player, &name, agent.name()));
            save_after_game(&agent, &store);
        }
        GameEnd::Abandoned => println!("Game abandoned."),
    }
    Ok(())
}

fn play_terminal_ui(config: &AppConfig) -> Result<()> {
    println!("Four in a line!");
    let name = read_name(&mut io::stdin().lock(), &mut io::stdout(), &config.play.human_name)
        .context("reading player name")?;

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    let mut tui = TuiPlayer::new(terminal, name.clone(), Player::X);
    let res = terminal_ui_loop(config, &name, &mut tui);

    // Restore terminal, always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(tui.terminal_mut().backend_mut(), LeaveAlternateScreen);
    let _ = tui.terminal_mut().show_cursor();

    res
}

fn terminal_ui_loop(
    config: &AppConfig,
    name: &str,
    tui: &mut TuiPlayer<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    let store = FilePolicyStore::new(&config.policy.dir);
    loop {
        let human_player = coin_flip_seat();
        let mut agent = seat_agent(config, &store, human_player);
        tui.set_player(human_player);
        tui.set_message(format!(
            "You play {}{}",
            human_player.name(),
            if human_player == Player::X { " and move first" } else { "" }
        ));

        let (end, board) = play_seated(tui, human_player, &mut agent);
        match end {
            GameEnd::Finished(outcome) => {
                save_after_game(&agent, &store);
                let message =
                    result_message(outcome, human_player, name, agent.name());
                match tui.show_result(&board, &message)? {
                    EndAction::Restart => continue,
                    EndAction::Quit => return Ok(()),
                }
            }
            GameEnd::Abandoned if tui.take_restart_request() => continue,
            GameEnd::Abandoned => return Ok(()),
        }
    }
}
