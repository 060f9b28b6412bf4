//! id3tag
//!
//! Command line front-end over `id3-core`.
//!
//! ```text
//! id3tag <file>                            list every frame as `ID = value`
//! id3tag <file> <name>                     print one frame
//! id3tag <in-file> <name> <value> <out>    write a copy with one frame set
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser};
use id3_core::names::known_names;
use id3_core::prelude::*;
use tracing::{debug, Level};

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_NOT_FOUND: u8 = 3;

#[derive(Debug, Parser)]
#[command(name = "id3tag", version, about = "Read and rewrite ID3v2.4 text frames", long_about = None)]
struct Cli {
    /// Audio file starting with an ID3v2.4 tag
    file: PathBuf,

    /// Friendly frame name
    name: Option<String>,

    /// New value for the frame (requires an output file)
    #[arg(requires = "output")]
    value: Option<String>,

    /// Destination for the rewritten file; must differ from the input
    output: Option<PathBuf>,

    /// Reject frames with any flag byte set (default: only both bytes set)
    #[arg(long)]
    strict_flags: bool,

    /// Print listings and rewrite reports as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let after_help = format!("Frame names: {}", known_names().collect::<Vec<_>>().join(", "));
    let matches = Cli::command().after_help(after_help).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_tracing(cli.verbose);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code_for(&err)
        }
    };
    ExitCode::from(code)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<u8> {
    let config = if cli.strict_flags {
        CodecConfig::strict()
    } else {
        CodecConfig::default()
    };
    let manager = TagManager::new(config);
    debug!(?config, file = %cli.file.display(), "starting");

    match (&cli.name, &cli.value, &cli.output) {
        (None, None, None) => list(&manager, &cli.file, cli.json),
        (Some(name), None, None) => show(&manager, &cli.file, name),
        (Some(name), Some(value), Some(output)) => {
            set(&manager, &cli.file, name, value, output, cli.json)
        }
        _ => {
            Cli::command()
                .error(
                    clap::error::ErrorKind::MissingRequiredArgument,
                    "expected <file>, <file> <name>, or <file> <name> <value> <output>",
                )
                .exit();
        }
    }
}

fn list(manager: &TagManager, file: &Path, json: bool) -> Result<u8> {
    let tag = manager
        .get_frames(file)
        .with_context(|| format!("reading tag from {}", file.display()))?;

    if json {
        let map: BTreeMap<&str, &str> = tag.iter().map(|(id, v)| (id.as_str(), v)).collect();
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(EXIT_SUCCESS);
    }

    for (id, value) in tag.iter() {
        println!("{id} = {value}");
    }
    Ok(EXIT_SUCCESS)
}

fn show(manager: &TagManager, file: &Path, name: &str) -> Result<u8> {
    let value = manager
        .get_frame_value(file, name)
        .with_context(|| format!("reading {name} from {}", file.display()))?;

    match value {
        Some(value) => {
            println!("{value}");
            Ok(EXIT_SUCCESS)
        }
        None => {
            eprintln!("tag {name} not found");
            Ok(EXIT_NOT_FOUND)
        }
    }
}

fn set(
    manager: &TagManager,
    file: &Path,
    name: &str,
    value: &str,
    output: &Path,
    json: bool,
) -> Result<u8> {
    let report = manager
        .set_frame_value(file, name, value, output)
        .with_context(|| format!("writing {name} from {} to {}", file.display(), output.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(EXIT_SUCCESS)
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<TagError>().map(TagError::kind) {
        Some(ErrorKind::UnknownFrameName) => EXIT_NOT_FOUND,
        Some(ErrorKind::Validation) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use id3_core::tag::encode_tag;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("id3tag").chain(args.iter().copied()))
    }

    fn tagged_file(dir: &tempfile::TempDir, frames: &[(&str, &str)]) -> PathBuf {
        let mut tag = Tag::new();
        for (id, value) in frames {
            tag.insert(FrameId::new(id).unwrap(), *value);
        }
        let mut bytes = encode_tag(&tag).unwrap();
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let path = dir.path().join("in.mp3");
        fs::write(&path, bytes).unwrap();
        path
    }

// # ✅ 1. Positional modes

    #[test]
    fn accepts_the_three_modes() {
        let cli = parse(&["a.mp3"]).unwrap();
        assert!(cli.name.is_none() && cli.value.is_none() && cli.output.is_none());

        let cli = parse(&["a.mp3", "title"]).unwrap();
        assert_eq!(cli.name.as_deref(), Some("title"));
        assert!(cli.value.is_none());

        let cli = parse(&["a.mp3", "title", "X", "b.mp3", "--strict-flags", "--json"]).unwrap();
        assert_eq!(cli.value.as_deref(), Some("X"));
        assert_eq!(cli.output, Some(PathBuf::from("b.mp3")));
        assert!(cli.strict_flags && cli.json);
    }

    #[test]
    fn rejects_bad_arity() {
        // no file
        assert!(parse(&[]).is_err());
        // value without output
        let err = parse(&["a.mp3", "title", "X"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(err.exit_code(), i32::from(EXIT_USAGE));
        // one positional too many
        assert!(parse(&["a.mp3", "title", "X", "b.mp3", "extra"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        assert_eq!(parse(&["a.mp3", "-vv"]).unwrap().verbose, 2);
    }

// # 🚦 2. Exit codes

    #[test]
    fn exit_codes_follow_error_kind() {
        let unknown = anyhow::Error::new(TagError::UnknownFrameName("genre".into()));
        assert_eq!(exit_code_for(&unknown), EXIT_NOT_FOUND);

        let invalid = anyhow::Error::new(TagError::Validation("empty".into()))
            .context("writing title");
        assert_eq!(exit_code_for(&invalid), EXIT_USAGE);

        let io = anyhow::Error::new(TagError::Io(std::io::Error::from(
            std::io::ErrorKind::NotFound,
        )));
        assert_eq!(exit_code_for(&io), EXIT_FAILURE);

        assert_eq!(exit_code_for(&anyhow::anyhow!("other")), EXIT_FAILURE);
    }

    #[test]
    fn show_reports_missing_frame_as_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = tagged_file(&dir, &[("TIT2", "Hi")]);
        let manager = TagManager::default();

        assert_eq!(show(&manager, &path, "title").unwrap(), EXIT_SUCCESS);
        assert_eq!(show(&manager, &path, "album").unwrap(), EXIT_NOT_FOUND);

        let err = show(&manager, &path, "genre").unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_NOT_FOUND);
    }

    #[test]
    fn set_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let src = tagged_file(&dir, &[]);
        let dst = dir.path().join("out.mp3");
        let manager = TagManager::default();

        assert_eq!(set(&manager, &src, "album", "A", &dst, false).unwrap(), EXIT_SUCCESS);
        assert_eq!(list(&manager, &dst, false).unwrap(), EXIT_SUCCESS);
        assert_eq!(list(&manager, &dst, true).unwrap(), EXIT_SUCCESS);
        assert!(fs::read(&dst).unwrap().ends_with(&[0xAA, 0xBB]));

        let err = set(&manager, &src, "album", "A", &src, false).unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_USAGE);
    }

    #[test]
    fn unreadable_input_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let err = list(&TagManager::default(), &dir.path().join("absent.mp3"), false).unwrap_err();
        assert_eq!(exit_code_for(&err), EXIT_FAILURE);
    }
}
