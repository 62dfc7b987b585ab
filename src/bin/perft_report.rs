//! Perft reference runner.
//!
//! Usage:
//! `cargo run --release --bin perft_report`
//! `cargo run --release --bin perft_report -- --depth 4`
//!
//! Prints one `info string` line per position with node counts, leaf
//! statistics and elapsed time, then a final pass/fail summary against the
//! published node counts.

use std::time::Instant;

use plum_variants::chess_errors::ChessResult;
use plum_variants::game_state::chess_rules::{STARTING_POSITION_FEN, WIDE_BOARD_FEN};
use plum_variants::game_state::game_state::GameState;
use plum_variants::move_generation::legal_move_generator::FastLegalMoveGenerator;
use plum_variants::move_generation::perft::perft;

struct ReportCase {
    name: &'static str,
    fen: &'static str,
    expected_nodes: &'static [usize],
}

const CASES: &[ReportCase] = &[
    ReportCase {
        name: "startpos",
        fen: STARTING_POSITION_FEN,
        expected_nodes: &[20, 400, 8902, 197_281, 4_865_609],
    },
    ReportCase {
        name: "kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_nodes: &[48, 2039, 97_862, 4_085_603],
    },
    ReportCase {
        name: "position_3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_nodes: &[14, 191, 2812, 43_238, 674_624],
    },
    ReportCase {
        name: "position_4",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        expected_nodes: &[6, 264, 9467, 422_333],
    },
    ReportCase {
        name: "position_5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        expected_nodes: &[44, 1486, 62_379, 2_103_487],
    },
    ReportCase {
        name: "position_6",
        fen: "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10",
        expected_nodes: &[46, 2079, 89_890, 3_894_594],
    },
    ReportCase {
        name: "wide_10x8",
        fen: WIDE_BOARD_FEN,
        expected_nodes: &[],
    },
];

fn parse_arg_u8(flag: &str, default: u8) -> u8 {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            if let Ok(v) = args[i + 1].parse::<u8>() {
                return v.max(1);
            }
        }
    }
    default
}

fn run_case(case: &ReportCase, depth: u8, generator: &FastLegalMoveGenerator) -> ChessResult<bool> {
    let mut game = GameState::from_fen(case.fen)?;
    let started = Instant::now();
    let counts = perft(generator, &mut game, depth)?;
    let elapsed_ms = started.elapsed().as_millis();

    let expected = case.expected_nodes.get(usize::from(depth) - 1).copied();
    let verdict = match expected {
        Some(nodes) if nodes == counts.nodes => "ok",
        Some(_) => "MISMATCH",
        None => "unchecked",
    };
    println!(
        "info string perft {} depth {} nodes {} captures {} ep {} castles {} promotions {} checks {} elapsed_ms {} result {}",
        case.name,
        depth,
        counts.nodes,
        counts.captures,
        counts.en_passant,
        counts.castles,
        counts.promotions,
        counts.checks,
        elapsed_ms,
        verdict
    );
    Ok(expected.map_or(true, |nodes| nodes == counts.nodes))
}

fn main() -> ChessResult<()> {
    let depth = parse_arg_u8("--depth", 3);
    let generator = FastLegalMoveGenerator;

    println!("perft report: depth={depth}");
    let mut failures = 0usize;
    for case in CASES {
        if !run_case(case, depth, &generator)? {
            failures += 1;
        }
    }

    println!(
        "info string perft summary cases {} failures {}",
        CASES.len(),
        failures
    );
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}
