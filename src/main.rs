use std::{
    fs::File,
    io::{self, BufRead, BufReader, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use hearth::{logging, Command, Game, Outcome, Scenario, ScenarioLoader, TerrainMode};

#[derive(Debug, Parser)]
#[command(author, version, about = "Single-player grid strategy session")]
struct Cli {
    /// Path to a scenario YAML file
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the grid side length
    #[arg(long)]
    grid_size: Option<usize>,

    /// Pin the terrain seed (a fresh one is drawn when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Use the 10x10 all-grass map
    #[arg(long)]
    flat: bool,

    /// Read commands from a file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn scenario(&self) -> Result<Scenario> {
        let mut scenario = match (&self.scenario, self.flat) {
            (Some(path), _) => ScenarioLoader::new(".").load(path)?,
            (None, true) => Scenario::flat(),
            (None, false) => Scenario::default(),
        };
        if self.flat {
            scenario.terrain = TerrainMode::Flat;
        }
        if let Some(size) = self.grid_size {
            scenario.grid_size = size;
        }
        if let Some(seed) = self.seed {
            scenario.seed = Some(seed);
        }
        scenario.validate()?;
        Ok(scenario)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let scenario = cli.scenario()?;
    logging::init(&scenario.logging.level, cli.verbose);

    let mut game = scenario.build_game()?;
    info!(scenario = %scenario.name, "session started");

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };

    run_session(&mut game, input, io::stdout().lock())?;
    info!(turn = game.turn(), "session finished");
    Ok(())
}

fn run_session(game: &mut Game, input: impl BufRead, mut out: impl Write) -> Result<()> {
    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read command")?;
        let command = match Command::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                warn!(line = index + 1, "{err}");
                continue;
            }
        };

        match game.apply(&command) {
            Ok(Outcome::Quit) => break,
            Ok(outcome) => {
                serde_json::to_writer(&mut out, &outcome)?;
                writeln!(out)?;
            }
            Err(err) => warn!(line = index + 1, "{err}"),
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_prints_one_json_line_per_outcome() {
        let mut game = Scenario::flat().build_game().unwrap();
        let script = "move 1 0\nsettle\n# comment\nselect 99 0\n\
                      build Melee Fighter\nend\nquit\nend\n";
        let mut out = Vec::new();
        run_session(&mut game, script.as_bytes(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains(r#""result":"moved""#));
        assert!(lines[3].contains(r#""turn":1"#));
        assert_eq!(game.turn(), 1);
    }
}
