use anyhow::{bail, Context, Result};
use colored::Colorize;

use brainprint_core::{Engine, SessionActions, SessionRequest};
use brainprint_shared::{GameContext, Mode, PlayerAction, TimedAction};

use crate::output;

fn parse_mode(raw: &str) -> Result<Mode> {
    match raw.replace('_', "-").to_lowercase().as_str() {
        "one-shot" | "oneshot" => Ok(Mode::OneShot),
        "journey" => Ok(Mode::Journey),
        "arena" => Ok(Mode::Arena),
        "endurance" => Ok(Mode::Endurance),
        other => bail!("unknown mode '{other}'; expected one-shot, journey, arena, or endurance"),
    }
}

#[derive(serde::Deserialize)]
struct EnduranceLegFile {
    game_id: String,
    actions: Vec<PlayerAction>,
}

pub async fn run(
    engine: &Engine,
    game_id: &str,
    mode: &str,
    seed: &str,
    language: &str,
    actions_path: Option<std::path::PathBuf>,
    json_mode: bool,
) -> Result<()> {
    let mode = parse_mode(mode)?;
    let sp = if !json_mode { Some(output::spinner(&format!("Running {game_id} ({})...", mode.as_str()))) } else { None };

    let result = if mode == Mode::Endurance {
        let path = actions_path.context("endurance mode requires --actions pointing at a leg list JSON file")?;
        let raw = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
        let legs: Vec<EnduranceLegFile> = serde_json::from_str(&raw).context("failed to parse endurance leg file")?;
        let ctx = GameContext::new(language, seed, mode, 0);
        engine
            .run_endurance_sequence(&ctx, legs.into_iter().map(|l| (l.game_id, l.actions)).collect())
            .await?
    } else {
        let actions = match (&mode, &actions_path) {
            (Mode::Arena, Some(path)) => {
                let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
                let timed: Vec<TimedAction> = serde_json::from_str(&raw).context("failed to parse timed action file")?;
                SessionActions::Timed(timed)
            }
            (Mode::Arena, None) => SessionActions::Timed(vec![]),
            (_, Some(path)) => {
                let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
                let plain: Vec<PlayerAction> = serde_json::from_str(&raw).context("failed to parse action file")?;
                SessionActions::Plain(plain)
            }
            (_, None) => SessionActions::Plain(vec![]),
        };

        let request = SessionRequest {
            game_id: game_id.to_string(),
            mode,
            context: GameContext::new(language, seed, mode, 0),
            actions,
        };
        engine.run_game(request).await?
    };

    if let Some(sp) = sp {
        sp.finish_and_clear();
    }

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    output::print_header(&format!("{game_id} result"));
    println!("  {}     {:.1}", "score:".dimmed(), result.summary.score);
    if let Some(acc) = result.summary.accuracy {
        println!("  {}  {:.1}%", "accuracy:".dimmed(), acc * 100.0);
    }
    if !result.summary.skill_signals.is_empty() {
        println!("  {}", "skill signals:".dimmed());
        let mut signals: Vec<_> = result.summary.skill_signals.iter().collect();
        signals.sort_by(|a, b| a.0.cmp(b.0));
        for (name, value) in signals {
            println!("    {}  {:.1}", name.cyan(), value);
        }
    }
    println!();

    Ok(())
}
