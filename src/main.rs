use std::{
    io::{self, Read},
    process,
};

use nfa_determinization::{
    automaton::{determinize::DeterminizeOptions, fsm::Fsm, Symbol},
    logger::LogLevel,
};

/// Parses the whitespace-separated input format: a header of
/// `vertex_count edge_count terminal_count alphabet_size`, then one
/// `start finish symbol` triple per edge, then the terminal vertex ids.
/// Symbol code 0 is epsilon.
fn read_fsm(input: &str) -> Result<Fsm, String> {
    let mut tokens = input.split_whitespace();

    let mut next_number = |what: &str| -> Result<u64, String> {
        let token = tokens.next().ok_or_else(|| format!("missing {what}"))?;
        token
            .parse::<u64>()
            .map_err(|_| format!("invalid {what}: {token}"))
    };

    let vertex_count = next_number("vertex count")? as usize;
    let edge_count = next_number("edge count")?;
    let terminal_count = next_number("terminal count")?;
    let alphabet_size = next_number("alphabet size")? as u32;

    let mut fsm = Fsm::new(alphabet_size, vertex_count);

    for _ in 0..edge_count {
        let start = next_number("edge start")? as usize;
        let finish = next_number("edge finish")? as usize;
        let code = next_number("edge symbol")? as u32;

        fsm.add_edge(start, finish, Symbol::from_code(code))
            .map_err(|error| error.to_string())?;
    }

    for _ in 0..terminal_count {
        let vertex = next_number("terminal vertex")? as usize;

        fsm.add_terminal(vertex).map_err(|error| error.to_string())?;
    }

    Ok(fsm)
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let json = args.iter().any(|arg| arg == "--json");
    let verbose = args.iter().any(|arg| arg == "-v" || arg == "--verbose");

    let mut input = String::new();
    if let Err(error) = io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read stdin: {error}");
        process::exit(1);
    }

    let fsm = match read_fsm(&input) {
        Ok(fsm) => fsm,
        Err(message) => {
            eprintln!("invalid automaton: {message}");
            process::exit(1);
        }
    };

    let log_level = if verbose {
        LogLevel::Debug
    } else {
        LogLevel::Error
    };

    let result = DeterminizeOptions::default()
        .with_log_level(log_level)
        .to_determinizer(fsm)
        .run();

    match result {
        Ok(converted) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&converted.to_description())
                        .expect("descriptions serialize")
                );
            } else {
                print!("{}", converted.render());
            }
        }
        Err(error) => {
            eprintln!("conversion failed: {error}");
            process::exit(1);
        }
    }
}
