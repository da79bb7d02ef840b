use std::io::{self, BufRead, Write};
use std::thread;

use indoc::indoc;
use instant::Instant;
use log::warn;
use xiangqi_dare::engine::{Engine, PlayOutcome};
use xiangqi_dare::game::{Action, RewardGrant};
use xiangqi_dare::notation::parse_move;
use xiangqi_dare::rules::{EngineConfig, GameMode};

use crate::tui::render_game;


const HELP: &str = indoc! {"
    Commands:
      h2e2        move a piece (also h2-e2)
      close       close the open adventure
      undo        take back the last move (needs an undo token)
      reward <r>  grant a reward for the last move: immunity, undo, taunt, seal
      hide        hide the taunt
      pass        pass the turn
      mode <m>    start a new game in mode pve, local or online
      reset       start a new game
      help        show this message
      quit        exit
"};

enum Command {
    Dispatch(Action),
    Close,
    SetMode(GameMode),
    Reset,
    Help,
    Quit,
}

pub fn run(config: EngineConfig, ascii: bool) -> anyhow::Result<()> {
    let mut engine = Engine::new(config);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    println!("{}", HELP);
    loop {
        drive_ai(&mut engine);
        println!("\n{}", render_game(engine.state(), ascii));
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((from, to)) = parse_move(line) {
            report(engine.play_move(from, to));
            continue;
        }
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        let result = match command {
            Command::Dispatch(action) => engine.dispatch(action),
            Command::Close => engine.close_adventure(),
            Command::SetMode(mode) => engine.set_mode(mode),
            Command::Reset => engine.reset(),
            Command::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Command::Quit => return Ok(()),
        };
        if let Err(rejection) = result {
            println!("Rejected: {rejection:?}");
        }
    }
}

fn parse_command(line: &str) -> anyhow::Result<Command> {
    let mut words = line.split_whitespace();
    let command = match (words.next(), words.next()) {
        (Some("close"), None) => Command::Close,
        (Some("undo"), None) => Command::Dispatch(Action::UndoMove),
        (Some("hide"), None) => Command::Dispatch(Action::HideTaunt),
        (Some("pass"), None) => Command::Dispatch(Action::ForceTurn),
        (Some("reset"), None) => Command::Reset,
        (Some("help"), None) => Command::Help,
        (Some("quit" | "exit"), None) => Command::Quit,
        (Some("reward"), Some(grant)) => Command::Dispatch(Action::ApplyReward(parse_grant(grant)?)),
        (Some("mode"), Some(mode)) => Command::SetMode(crate::parse_mode(mode)?),
        (Some(word), None) if word.len() == 4 => anyhow::bail!("Bad move: {word}. Moves look like h2e2."),
        _ => anyhow::bail!("Unknown command: {line}. Type \"help\" for the list of commands."),
    };
    Ok(command)
}

fn parse_grant(grant: &str) -> anyhow::Result<RewardGrant> {
    match grant {
        "immunity" => Ok(RewardGrant::Immunity),
        "undo" => Ok(RewardGrant::UndoToken),
        "taunt" => Ok(RewardGrant::Taunt),
        "seal" => Ok(RewardGrant::SealChariots),
        _ => anyhow::bail!("Unknown reward: {grant}"),
    }
}

// Lets the AI play for as long as it is its turn. An adventure drawn by the AI is shown
// and closed right away.
fn drive_ai(engine: &mut Engine) {
    loop {
        let now = Instant::now();
        let Some(outcome) = engine.poll_ai(now) else {
            match engine.ai_deadline() {
                Some(deadline) if deadline > now => thread::sleep(deadline - now),
                _ => return,
            }
            continue;
        };
        report(outcome);
        if let PlayOutcome::Captured { adventure: Some(adventure) } = outcome {
            if let Some(card) = adventure.card() {
                println!("AI drew: {}", card.text);
            }
            if let Err(rejection) = engine.close_adventure() {
                warn!("Cannot close AI adventure: {:?}", rejection);
            }
        }
    }
}

fn report(outcome: PlayOutcome) {
    match outcome {
        PlayOutcome::Moved => {}
        PlayOutcome::Captured { adventure: None } => println!("The General has fallen!"),
        PlayOutcome::Captured { adventure: Some(_) } => {}
        PlayOutcome::Shielded(_) => println!("The target was immune: capture blocked"),
        PlayOutcome::Rejected(rejection) => println!("Rejected: {rejection:?}"),
    }
}
