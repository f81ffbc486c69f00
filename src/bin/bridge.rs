// Line protocol for a host UI or recognizer process.
// Requests arrive one per line on stdin; replies go to stdout, logs to stderr.
use cipher_core::trace_init::init_tracing;
use cipher_core::{CipherEngine, Classification};
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

fn main() -> io::Result<()> {
    init_tracing();
    info!("cipher bridge starting");

    let engine = CipherEngine::new();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let input = line?;
        debug!(request = %input, "<-");
        let (command, arg) = match input.split_once(' ') {
            Some((command, arg)) => (command, arg),
            None => (input.as_str(), ""),
        };

        if command == "EXIT" {
            info!("received EXIT");
            break;
        }
        handle_command(&engine, command, arg, &mut stdout)?;
        stdout.flush()?;
    }
    info!("cipher bridge shutting down");
    Ok(())
}

fn handle_command<W: Write>(
    engine: &CipherEngine,
    command: &str,
    arg: &str,
    out: &mut W,
) -> io::Result<()> {
    match command {
        "ENCODE" => {
            let encoding = engine.encode(arg);
            reply(out, &format!("ROMAN {}", encoding.roman))?;
            reply(out, &format!("NUMERIC {}", encoding.numeric))
        }
        "DECODE" => reply(out, &format!("TEXT {}", engine.decode(arg))),
        "SCAN" => {
            let outcome = engine.scan(arg);
            match outcome.classification {
                Classification::Valid { text, flavor } => {
                    reply(out, &format!("SCAN_OK {flavor} {text}"))?;
                    match outcome.decoded {
                        Some(decoded) => reply(out, &format!("TEXT {decoded}")),
                        None => Ok(()),
                    }
                }
                Classification::Invalid => reply(out, "SCAN_FAIL"),
            }
        }
        "TABLE" => {
            for entry in engine.reference_table() {
                reply(
                    out,
                    &format!("ENTRY {} {} {}", entry.letter, entry.ordinal, entry.roman),
                )?;
            }
            Ok(())
        }
        _ => {
            warn!(command, "unknown command");
            reply(out, "ERROR unknown command")
        }
    }
}

fn reply<W: Write>(out: &mut W, line: &str) -> io::Result<()> {
    debug!(reply = line, "->");
    writeln!(out, "{line}")
}
