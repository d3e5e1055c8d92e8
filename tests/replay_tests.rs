// Integration tests for recorded replays and history navigation

use cranetty::driver::{self, SolveError};
use cranetty::engine::constants::DEFAULT_SNAPSHOT_LIMIT;
use cranetty::engine::{MoveMode, Replay, SimulationError};
use cranetty::parser::Parser;
use cranetty::ui::panes::yard_rows;

const SAMPLE: &str = "    [D]
[N] [C]
[Z] [M] [P]
 1   2   3

move 1 from 2 to 1
move 3 from 1 to 3
move 2 from 2 to 1
move 1 from 1 to 2
";

fn record(mode: MoveMode) -> Replay {
    let parser = Parser::new(SAMPLE.as_bytes()).expect("Parser creation failed");
    let instructions = parser.parse_instructions().expect("Parsing failed");
    let stacks = parser.parse_stacks().expect("Parsing failed");
    Replay::record(stacks, &instructions, mode, DEFAULT_SNAPSHOT_LIMIT).expect("Recording failed")
}

fn texts(replay: &Replay) -> Vec<String> {
    replay
        .transcript_lines()
        .iter()
        .map(|line| line.text.clone())
        .collect()
}

#[test]
fn test_single_mode_transcript() {
    let mut replay = record(MoveMode::Single);
    replay.jump_to_end();
    assert_eq!(
        texts(&replay),
        vec![
            "move 1 from 2 to 1: D -> stack 1",
            "move 3 from 1 to 3: DNZ -> stack 3",
            "move 2 from 2 to 1: CM -> stack 1",
            "move 1 from 1 to 2: M -> stack 2",
        ]
    );
}

#[test]
fn test_bulk_mode_transcript() {
    let mut replay = record(MoveMode::Bulk);
    replay.jump_to_end();
    assert_eq!(
        texts(&replay),
        vec![
            "move 1 from 2 to 1: D -> stack 1",
            "move 3 from 1 to 3: ZND -> stack 3",
            "move 2 from 2 to 1: MC -> stack 1",
            "move 1 from 1 to 2: C -> stack 2",
        ]
    );
}

#[test]
fn test_time_travel_restores_each_state() {
    let mut replay = record(MoveMode::Single);
    assert_eq!(replay.total_snapshots(), 5);

    let mut forward = Vec::new();
    loop {
        forward.push(replay.stacks().expect("No snapshot").tops());
        if replay.step_forward().is_err() {
            break;
        }
    }
    assert_eq!(forward, ["NDP", "DCP", "CZ", "MZ", "CMZ"]);

    let mut backward = Vec::new();
    loop {
        backward.push(replay.stacks().expect("No snapshot").tops());
        if replay.step_backward().is_err() {
            break;
        }
    }
    forward.reverse();
    assert_eq!(backward, forward);
    assert_eq!(replay.history_position(), 0);
}

#[test]
fn test_final_yard_drawing() {
    let mut replay = record(MoveMode::Bulk);
    replay.jump_to_end();
    let stacks = replay.stacks().expect("No snapshot");
    assert_eq!(
        yard_rows(stacks),
        vec![
            "        [D]",
            "        [N]",
            "        [Z]",
            "[M] [C] [P]",
            " 1   2   3 ",
        ]
    );
}

#[test]
fn test_replays_agree_with_solve() {
    let solution = driver::solve(SAMPLE.as_bytes()).expect("Solving failed");
    let replays =
        driver::record_replays(SAMPLE.as_bytes(), DEFAULT_SNAPSHOT_LIMIT).expect("Recording failed");
    for replay in &replays {
        assert!(replay.is_complete());
        assert_eq!(
            replay.final_tops().as_deref(),
            Some(solution.for_mode(replay.mode()))
        );
    }
}

#[test]
fn test_snapshot_limit_stops_recording() {
    let full = record(MoveMode::Bulk);
    let per_snapshot = full.memory_usage() / full.total_snapshots();

    let parser = Parser::new(SAMPLE.as_bytes()).expect("Parser creation failed");
    let instructions = parser.parse_instructions().expect("Parsing failed");
    let stacks = parser.parse_stacks().expect("Parsing failed");
    let replay = Replay::record(stacks, &instructions, MoveMode::Bulk, per_snapshot * 2)
        .expect("Recording failed");

    assert!(replay.total_snapshots() < 5);
    assert!(matches!(
        replay.failure(),
        Some(SimulationError::SnapshotLimitExceeded { .. })
    ));
    assert!(replay.memory_usage() <= per_snapshot * 2);

    assert!(matches!(
        driver::record_replays(SAMPLE.as_bytes(), 1),
        Err(SolveError::Simulation {
            error: SimulationError::SnapshotLimitExceeded { .. },
            ..
        })
    ));
}
