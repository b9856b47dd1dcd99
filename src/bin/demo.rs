//! Drive a scripted game (fool's mate) through the tap interface and print
//! each returned engine snapshot as JSON. Useful for eyeballing the wire
//! shape a UI would consume.

use tapchess::game::GameState;

fn main() {
    eprintln!("tapchess demo (built {})", env!("BUILD_TIMESTAMP"));

    // Fool's mate: 1. f3 e5 2. g4 Qh4#
    let moves: [((usize, usize), (usize, usize)); 4] = [
        ((6, 5), (5, 5)),
        ((1, 4), (3, 4)),
        ((6, 6), (4, 6)),
        ((0, 3), (4, 7)),
    ];

    let mut state = GameState::new();
    for (from, to) in moves {
        state.tap(from.0, from.1);
        let result = state.tap(to.0, to.1);
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to serialize state: {e}"),
        }
        if state.is_game_over() {
            break;
        }
    }

    let result = state.snapshot();
    let loser = if result.white_checkmate {
        Some("White")
    } else if result.black_checkmate {
        Some("Black")
    } else {
        None
    };
    match loser {
        Some(side) => eprintln!("{side} is checkmated."),
        None => eprintln!("Game still in progress."),
    }
}
