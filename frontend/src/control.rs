use clap::{Parser, Subcommand};
use log::debug;
use smol::channel::Sender;
use xiangqi::location::Location;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    #[command(alias = "c", about = "click a board point such as b7, or off the board when omitted")]
    Click { at: Option<Location> },
    #[command(about = "abandon the current game and start again")]
    Restart,
    #[command(about = "show the board")]
    Board,
    #[command(alias = "q", about = "leave")]
    Quit,
}

/// Reads commands from stdin until it closes or the receiving side goes away.
pub fn begin(sender: Sender<Command>) {
    while let Some(command) = read_input() {
        if sender.send_blocking(command).is_err() {
            break;
        }
    }
    debug!("input closed");
}

fn read_input() -> Option<Command> {
    loop {
        let mut line = String::new();
        if let Err(_) | Ok(0) = std::io::stdin().read_line(&mut line) {
            return None;
        }

        match parse_line(&line) {
            Some(Ok(command)) => return Some(command),
            Some(Err(err)) => print!("{err}"),
            None => continue,
        }
    }
}

/// A bare point such as `b7` is shorthand for `click b7`. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Option<Result<Command, clap::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Ok(at) = line.parse::<Location>() {
        return Some(Ok(Command::Click { at: Some(at) }));
    }

    #[derive(Parser)]
    #[command(
        name = "",
        no_binary_name = true,
        disable_help_flag = true,
        disable_version_flag = true,
        next_line_help = false,
        help_template = "{usage-heading} {usage}\n{all-args}"
    )]
    struct Input {
        #[command(subcommand)]
        command: Command,
    }

    Some(Input::try_parse_from(line.split_whitespace()).map(|Input { command }| command))
}
