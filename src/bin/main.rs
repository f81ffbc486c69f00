use cipher_core::output::write_atomic;
use cipher_core::settings::{parse_settings_toml, Settings};
use cipher_core::trace_init::init_tracing;
use cipher_core::{CipherEngine, CipherError, Classification, ScanOutcome};
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use std::fs;
use std::io::{self, stdin, stdout, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "roman_cipher", about = "Roman numeral letter cipher")]
struct Cli {
    /// Path to a settings TOML file (optional)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Write the result to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
    /// Output as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode text into the Roman (and numeric) cipher
    Encode {
        /// Text to encode; read from stdin when omitted
        text: Option<String>,
    },
    /// Decode a Roman cipher string
    Decode {
        /// Cipher to decode; read from stdin when omitted
        cipher: Option<String>,
    },
    /// Recover and decode a cipher from recognized (OCR) text
    Scan {
        /// Recognized text; read from stdin when omitted
        raw: Option<String>,
        /// Read the recognized text from a file
        #[arg(long, conflicts_with = "raw")]
        file: Option<PathBuf>,
    },
    /// Print the letter / number / numeral reference table
    Table,
    /// Interactive encode/decode shell
    Shell,
    /// Print the default settings TOML
    DefaultConfig,
}

const EXIT_OK: u8 = 0;
/// Exit status when `scan` finds no cipher in the recognized text.
const EXIT_NO_CIPHER: u8 = 2;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();
    match run(cli) {
        Ok(status) => ExitCode::from(status),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u8, CipherError> {
    let settings = load_settings(cli.config.as_ref())?;
    let show_numeric = settings.output.numeric_breakdown;
    let engine = CipherEngine::with_settings(settings);

    let rendered = match cli.command {
        Command::Encode { text } => {
            let text = text_or_stdin(text)?;
            let encoding = engine.encode(&text);
            if cli.json {
                to_json(&encoding)
            } else if show_numeric && !encoding.numeric.is_empty() {
                format!("{}\n{}", encoding.roman, encoding.numeric)
            } else {
                encoding.roman
            }
        }
        Command::Decode { cipher } => {
            let decoded = engine.decode(&text_or_stdin(cipher)?);
            if cli.json {
                to_json(&serde_json::json!({ "text": decoded }))
            } else {
                decoded
            }
        }
        Command::Scan { raw, file } => {
            let raw = match file {
                Some(path) => fs::read_to_string(path)?,
                None => text_or_stdin(raw)?,
            };
            let outcome = engine.scan(&raw);
            let status = if outcome.classification.is_valid() {
                EXIT_OK
            } else {
                EXIT_NO_CIPHER
            };
            if cli.json {
                emit(&to_json(&outcome), cli.output.as_ref())?;
            } else {
                match render_scan(&outcome) {
                    Some(text) => emit(&text, cli.output.as_ref())?,
                    None => eprintln!(
                        "No cipher detected. Try a clearer image or type it in manually."
                    ),
                }
            }
            return Ok(status);
        }
        Command::Table => {
            if cli.json {
                to_json(&engine.reference_table().collect::<Vec<_>>())
            } else {
                engine
                    .reference_table()
                    .map(|e| format!("{}  {:>2}  {}", e.letter, e.ordinal, e.roman))
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        }
        Command::Shell => {
            run_shell(&engine)?;
            return Ok(EXIT_OK);
        }
        Command::DefaultConfig => cipher_core::settings::default_toml().trim_end().to_string(),
    };

    emit(&rendered, cli.output.as_ref())?;
    Ok(EXIT_OK)
}

/// Text rendering of a scan, or `None` when no cipher was found.
fn render_scan(outcome: &ScanOutcome) -> Option<String> {
    match (&outcome.classification, &outcome.decoded) {
        (Classification::Valid { text, flavor }, Some(decoded)) => {
            Some(format!("{flavor}: {text}\n{decoded}"))
        }
        (Classification::Valid { text, flavor }, None) => Some(format!("{flavor}: {text}")),
        (Classification::Invalid, _) => None,
    }
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings, CipherError> {
    match path {
        Some(path) => Ok(parse_settings_toml(&fs::read_to_string(path)?)?),
        None => Ok(Settings::default()),
    }
}

fn text_or_stdin(arg: Option<String>) -> io::Result<String> {
    match arg {
        Some(text) => Ok(text),
        None => {
            let mut buf = String::new();
            stdin().read_to_string(&mut buf)?;
            Ok(buf.trim_end_matches(['\r', '\n']).to_string())
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

fn emit(rendered: &str, output: Option<&PathBuf>) -> Result<(), CipherError> {
    match output {
        Some(path) => {
            write_atomic(path, &format!("{rendered}\n"))?;
            eprintln!("Written to '{}'", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq)]
enum Mode {
    Encode,
    Decode,
    Scan,
}

fn run_shell(engine: &CipherEngine) -> Result<(), CipherError> {
    let mut mode = Mode::Encode;

    loop {
        print_header(mode)?;

        let mut input = String::new();
        if stdin().read_line(&mut input)? == 0 {
            break;
        }
        let cmd = input.trim();

        match cmd {
            "exit" => break,
            ":e" => mode = Mode::Encode,
            ":d" => mode = Mode::Decode,
            ":s" => mode = Mode::Scan,
            ":t" => {
                for entry in engine.reference_table() {
                    println!(
                        "  {}  {:>2}  {}",
                        entry.letter.to_string().bold(),
                        entry.ordinal,
                        entry.roman.clone().yellow()
                    );
                }
            }
            "" => {}
            text => print_result(engine, mode, text),
        }
    }
    Ok(())
}

fn print_header(mode: Mode) -> io::Result<()> {
    let label = match mode {
        Mode::Encode => "ENCODE",
        Mode::Decode => "DECODE",
        Mode::Scan => "SCAN",
    };
    println!();
    println!("{} [{}]", "Roman Numeral Cipher".bold(), label.yellow());
    println!("':e' encode, ':d' decode, ':s' scan recognized text, ':t' reference table, 'exit' to quit.");
    print!("> ");
    stdout().flush()
}

fn print_result(engine: &CipherEngine, mode: Mode, text: &str) {
    match mode {
        Mode::Encode => {
            let encoding = engine.encode(text);
            if encoding.roman.is_empty() {
                println!("{}", "No letters to encode.".dark_grey());
                return;
            }
            println!("Roman:   {}", encoding.roman.yellow());
            if engine.settings().output.numeric_breakdown {
                println!("Numeric: {}", encoding.numeric);
            }
        }
        Mode::Decode => println!("Text:    {}", engine.decode(text).yellow()),
        Mode::Scan => {
            let outcome = engine.scan(text);
            match outcome.classification {
                Classification::Valid { text, flavor } => {
                    println!("Detected {flavor}: {}", text.yellow());
                    if let Some(decoded) = outcome.decoded {
                        println!("Text:    {}", decoded.yellow());
                    }
                }
                Classification::Invalid => {
                    println!("{}", "No cipher detected.".red());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_rendering() {
        let engine = CipherEngine::new();
        assert_eq!(
            render_scan(&engine.scan("xii xv xxii v")).as_deref(),
            Some("roman: XII.XV.XXII.V\nLOVE")
        );
        assert_eq!(
            render_scan(&engine.scan("12 15 22 5")).as_deref(),
            Some("numeric: 12.15.22.5")
        );
    }

    #[test]
    fn failed_scan_renders_nothing() {
        assert_eq!(render_scan(&CipherEngine::new().scan("@@@###")), None);
    }

    #[test]
    fn failed_scan_returns_exit_code_and_still_writes_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.json");
        let cli = Cli::parse_from([
            "roman_cipher",
            "scan",
            "@@@###",
            "--json",
            "--output",
            path.to_str().unwrap(),
        ]);
        assert_eq!(run(cli).unwrap(), EXIT_NO_CIPHER);
        let written = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["classification"]["status"], "invalid");
    }

    #[test]
    fn successful_scan_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.txt");
        let cli = Cli::parse_from(["roman_cipher", "scan", "XX IX V", "-o", path.to_str().unwrap()]);
        assert_eq!(run(cli).unwrap(), EXIT_OK);
        assert_eq!(fs::read_to_string(&path).unwrap(), "roman: XX.IX.V\nTHE\n");
    }
}
