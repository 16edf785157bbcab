use game_core::{LocationGame, Placement, ScoringEngine};
use game_types::{GamePhase, Player};
use std::fmt::Write;

fn player_label(player: &Player) -> String {
    format!("[{}] {} ({})", player.id, player.name, player.color.as_str())
}

/// Text view of the game, the terminal counterpart of the game card.
pub fn render(game: &LocationGame) -> String {
    let mut out = String::new();
    match game.phase() {
        GamePhase::Setup => render_setup(game, &mut out),
        GamePhase::Playing => render_playing(game, &mut out),
        GamePhase::Results => render_results(game, &mut out),
    }
    out
}

fn render_setup(game: &LocationGame, out: &mut String) {
    let _ = writeln!(out, "== Setup ==");
    if game.players().is_empty() {
        let _ = writeln!(out, "Players: none yet");
    } else {
        let _ = writeln!(out, "Players:");
        for player in game.players() {
            let _ = writeln!(out, "  {}", player_label(player));
        }
    }

    let question = game.question().trim();
    let _ = writeln!(
        out,
        "Question: {}",
        if question.is_empty() { "(not set)" } else { question }
    );
    let _ = writeln!(
        out,
        "Image: {}",
        if game.image().is_some() { "uploaded" } else { "(none)" }
    );

    match (game.image(), game.target_point()) {
        (None, _) => {}
        (Some(_), None) => {
            let _ = writeln!(out, "Click on the image to set the target location");
        }
        (Some(_), Some(target)) => {
            let _ = writeln!(out, "Target: ({:.1}, {:.1})", target.x, target.y);
            match game.start_blocker() {
                None => {
                    let _ = writeln!(out, "Ready: type 'start'");
                }
                Some(reason) => {
                    let _ = writeln!(out, "Not ready: {}", reason);
                }
            }
        }
    }
}

fn render_playing(game: &LocationGame, out: &mut String) {
    let _ = writeln!(out, "== Playing ==");
    let _ = writeln!(out, "Question: {}", game.question());

    match game.current_player() {
        None => {
            let remaining = game.remaining_players();
            let _ = writeln!(out, "Players remaining: {}", remaining.len());
            for player in remaining {
                let _ = writeln!(out, "  {}'s turn -> 'turn {}'", player.name, player.id);
            }
        }
        Some(player) => {
            let _ = writeln!(out, "{}, click on the map to place your marker", player.name);
            if let Some(pending) = game.pending_guess() {
                let _ = writeln!(
                    out,
                    "Marker at ({:.1}, {:.1}) -> 'confirm'",
                    pending.x, pending.y
                );
            }
        }
    }

    if game.can_reveal_results() {
        let _ = writeln!(out, "Everyone has guessed -> 'reveal'");
    }
}

fn render_results(game: &LocationGame, out: &mut String) {
    let _ = writeln!(out, "== Results ==");
    let _ = writeln!(out, "Question: {}", game.question());
    let _ = writeln!(out, "Final Rankings");

    for (rank, guess) in game.podium().iter().enumerate() {
        let medal = Placement::for_rank(rank).map(|p| p.medal()).unwrap_or("  ");
        let _ = writeln!(
            out,
            "{} {} - {} units away",
            medal,
            guess.player_name,
            ScoringEngine::display_distance(guess.distance)
        );
    }

    for line in game.distance_lines() {
        let _ = writeln!(
            out,
            "  {} line ({:.1}, {:.1}) -> ({:.1}, {:.1}), label {} at ({:.1}, {:.1})",
            line.color.as_str(),
            line.from.x,
            line.from.y,
            line.to.x,
            line.to.y,
            line.label_distance,
            line.midpoint.x,
            line.midpoint.y
        );
    }
    let _ = writeln!(out, "Type 'reset' for a new game");
}
