// Integration tests for parsing and simulating crate manifests

use cranetty::driver::{self, SolveError};
use cranetty::engine::{Crane, InstructionFault, MoveMode, SimulationError};
use cranetty::input;
use cranetty::memory::Container;
use cranetty::parser::{Instruction, ParseError, Parser};

const SAMPLE: &str = "    [D]
[N] [C]
[Z] [M] [P]
 1   2   3

move 1 from 2 to 1
move 3 from 1 to 3
move 2 from 2 to 1
move 1 from 1 to 2
";

#[test]
fn test_sample_in_both_modes() {
    let solution = driver::solve(SAMPLE.as_bytes()).expect("Solving failed");
    assert_eq!(solution.single, "CMZ");
    assert_eq!(solution.bulk, "MCD");
}

#[test]
fn test_modes_run_on_fresh_stacks() {
    // Parse
    let parser = Parser::new(SAMPLE.as_bytes()).expect("Parser creation failed");
    let instructions = parser.parse_instructions().expect("Parsing failed");

    // Execute bulk mode first; single mode must not see its result
    let mut bulk = parser.parse_stacks().expect("Parsing failed");
    Crane::new(MoveMode::Bulk)
        .run(&mut bulk, &instructions)
        .expect("Execution failed");
    let mut single = parser.parse_stacks().expect("Parsing failed");
    Crane::new(MoveMode::Single)
        .run(&mut single, &instructions)
        .expect("Execution failed");

    assert_eq!(single.tops(), "CMZ");
    assert_eq!(bulk.tops(), "MCD");
}

#[test]
fn test_missing_quantity_is_parse_error() {
    let input = SAMPLE.replace("move 3 from 1 to 3", "move from 1 to 3");
    match driver::solve(input.as_bytes()) {
        Err(SolveError::Parse(err)) => {
            assert_eq!(err.location().map(|l| l.line), Some(7));
        }
        other => panic!("Expected a parse error, got {:?}", other),
    }
}

#[test]
fn test_malformed_instruction_lines() {
    let cases = [
        "move 1 from 1",
        "move 1 form 1 to 2",
        "move 0 from 1 to 2",
        "move 1 from 1 to 2 now",
        "move  1 from 1 to 2",
        "move -1 from 1 to 2",
        "move 99999999999999999999999 from 1 to 2",
        "",
    ];
    for line in cases {
        let input = format!("[A]\n 1 \n\nmove 1 from 1 to 1\n{}\nmove 1 from 1 to 1\n", line);
        let err = driver::solve(input.as_bytes()).unwrap_err();
        assert!(
            matches!(err, SolveError::Parse(ParseError::Malformed { .. })),
            "'{}' should not parse, got {:?}",
            line,
            err
        );
    }
}

#[test]
fn test_missing_separator_is_parse_error() {
    let err = Parser::new(b"[A]\n 1 \nmove 1 from 1 to 1\n").err().unwrap();
    assert!(err.to_string().contains("Missing empty line"));
}

#[test]
fn test_bad_labels_are_parse_error() {
    let parser = Parser::new(b"[A] [B]\n 1   3 \n\n").expect("Parser creation failed");
    assert!(parser.parse_stacks().is_err());
}

#[test]
fn test_last_line_without_newline() {
    let input = SAMPLE.trim_end_matches('\n');
    let solution = driver::solve(input.as_bytes()).expect("Solving failed");
    assert_eq!(solution.single, "CMZ");
    assert_eq!(solution.bulk, "MCD");
}

#[test]
fn test_trailing_empty_lines_are_ignored() {
    let solution =
        driver::solve(b"[A]\n 1   2 \n\nmove 1 from 1 to 2\n\n").expect("Solving failed");
    assert_eq!(solution.single, "A");
    assert_eq!(solution.bulk, "A");

    let input = format!("{}\n\n", SAMPLE);
    let solution = driver::solve(input.as_bytes()).expect("Solving failed");
    assert_eq!(solution.single, "CMZ");
    assert_eq!(solution.bulk, "MCD");
}

#[test]
fn test_too_many_crates_is_invalid_instruction() {
    let parser = Parser::new(SAMPLE.as_bytes()).expect("Parser creation failed");
    let mut stacks = parser.parse_stacks().expect("Parsing failed");

    for mode in MoveMode::ALL {
        let err = Crane::new(mode)
            .apply(&mut stacks, &Instruction::new(4, 2, 1), 1)
            .unwrap_err();
        assert_eq!(
            err,
            SimulationError::InvalidInstruction {
                step: 1,
                instruction: Instruction::new(4, 2, 1),
                fault: InstructionFault::NotEnoughCrates {
                    requested: 4,
                    available: 3,
                },
            }
        );
        assert_eq!(stacks, parser.parse_stacks().expect("Parsing failed"));
    }

    let input = SAMPLE.replace("move 2 from 2 to 1", "move 2 from 4 to 1");
    assert!(matches!(
        driver::solve(input.as_bytes()),
        Err(SolveError::Simulation {
            error: SimulationError::InvalidInstruction {
                step: 3,
                fault: InstructionFault::SourceOutOfRange { stack: 4, count: 3 },
                ..
            },
            ..
        })
    ));
}

#[test]
fn test_empty_instruction_list_is_identity() {
    let input = "[A]     [B]\n[C] [D] [E]\n 1   2   3 \n\n";
    let parser = Parser::new(input.as_bytes()).expect("Parser creation failed");
    let instructions = parser.parse_instructions().expect("Parsing failed");
    assert!(instructions.is_empty());

    for mode in MoveMode::ALL {
        let mut stacks = parser.parse_stacks().expect("Parsing failed");
        Crane::new(mode)
            .run(&mut stacks, &instructions)
            .expect("Execution failed");
        assert_eq!(stacks, parser.parse_stacks().expect("Parsing failed"));
    }

    let solution = driver::solve(input.as_bytes()).expect("Solving failed");
    assert_eq!(solution.single, "ADB");
}

#[test]
fn test_empty_stacks_are_omitted_from_tops() {
    let input = "    [B]\n    [A]\n 1   2 \n\nmove 2 from 2 to 1\n";
    let solution = driver::solve(input.as_bytes()).expect("Solving failed");
    assert_eq!(solution.single, "A");
    assert_eq!(solution.bulk, "B");
}

#[test]
fn test_crates_are_conserved() {
    let input = "[A] [B] [C] [D]\n[E] [F] [G] [H]\n 1   2   3   4 \n\n";
    let parser = Parser::new(input.as_bytes()).expect("Parser creation failed");

    // Deterministic pseudo-random walk of valid instructions
    let mut seed: u32 = 12345;
    let mut next = move |bound: usize| {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        (seed >> 16) as usize % bound
    };

    for mode in MoveMode::ALL {
        let mut stacks = parser.parse_stacks().expect("Parsing failed");
        let census = stacks.census();
        let crane = Crane::new(mode);

        for step in 1..=200 {
            let source = next(4);
            let available = stacks.stack(source).map_or(0, |s| s.len());
            if available == 0 {
                continue;
            }
            let instruction = Instruction::new(1 + next(available), source + 1, next(4) + 1);
            crane
                .apply(&mut stacks, &instruction, step)
                .expect("Execution failed");
            assert_eq!(stacks.census(), census);
            assert_eq!(stacks.total_crates(), 8);
        }
    }
}

#[test]
fn test_solve_from_chunked_source() {
    let bytes = SAMPLE.as_bytes();
    let mut position = 0;
    // Three bytes per read
    let mut source = input::from_fn(|buf: &mut [u8]| {
        let n = (bytes.len() - position).min(3).min(buf.len());
        buf[..n].copy_from_slice(&bytes[position..position + n]);
        position += n;
        Ok(n)
    });
    let solution = driver::solve_source(&mut source).expect("Solving failed");
    assert_eq!(solution.bulk, "MCD");
}

#[test]
fn test_container_growth_policy() {
    let mut container: Container<u64> = Container::new();
    assert_eq!(container.capacity(), 0);

    for i in 0..100u64 {
        container.push(i).expect("Push failed");
        let cap = container.capacity();
        assert_eq!(container.len() as u64, i + 1);
        assert!(cap >= container.len());
        assert!(cap % 4 == 0 && (cap / 4).is_power_of_two());
    }
    assert_eq!(container.capacity(), 128);
}
