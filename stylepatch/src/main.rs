use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use stylepatch_lib::config::DEFAULT_STYLESHEET;
use stylepatch_lib::style::replacement::DEFAULT_SELECTOR;
use stylepatch_lib::{patch_file, render, LineEnding, PatchConfig, Replacement};

const SUCCESS_MESSAGE: &str = "✅ CSS已成功修改";

#[derive(Parser)]
#[command(name = "stylepatch")]
#[command(about = "Replace the first `body { ... }` rule of a stylesheet")]
struct Args {
    /// Stylesheet to patch.
    #[arg(short, long, default_value = DEFAULT_STYLESHEET)]
    input: PathBuf,

    /// Where to write the result. Defaults to overwriting the input.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Selector whose rule block is replaced.
    #[arg(long, default_value = DEFAULT_SELECTOR, requires = "replacement_file")]
    selector: String,

    /// File holding the replacement rule block.
    #[arg(long, value_name = "PATH")]
    replacement_file: Option<PathBuf>,

    /// Fail if no matching rule block is found.
    #[arg(long)]
    strict: bool,

    /// Line ending used when writing (crlf or lf).
    #[arg(long, default_value_t = LineEnding::Crlf)]
    line_ending: LineEnding,

    /// Print the patched stylesheet instead of writing it.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // parse the args given in terminal
    let args: Args = Args::parse();

    if let Err(err) = run(args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = build_config(&args)?;

    if args.dry_run {
        print!("{}", render(&config)?);
        return Ok(());
    }

    // a missing block is already logged by the library
    patch_file(&config)?;
    println!("{}", SUCCESS_MESSAGE);
    Ok(())
}

fn build_config(args: &Args) -> Result<PatchConfig> {
    let mut config = PatchConfig::for_path(&args.input)?
        .strict(args.strict)
        .line_ending(args.line_ending);

    if let Some(output) = &args.output {
        config = config.output(output);
    }

    if let Some(path) = &args.replacement_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read replacement block {}", path.display()))?;
        let replacement = Replacement::new(&args.selector, text.trim_end())
            .with_context(|| format!("replacement block in {}", path.display()))?;
        config = config.replacement(replacement);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_patches_default_stylesheet() {
        let args = Args::try_parse_from(["stylepatch"]).unwrap();
        let config = build_config(&args).unwrap();
        assert_eq!(config.input, PathBuf::from("public/css/style.css"));
        assert_eq!(config.output_path(), config.input.as_path());
        assert_eq!(config.replacement.selector(), "body");
        assert_eq!(config.line_ending, LineEnding::Crlf);
        assert!(!config.strict);
        assert!(!args.dry_run);
    }

    #[test]
    fn selector_needs_a_replacement_file() {
        assert!(Args::try_parse_from(["stylepatch", "--selector", ".card"]).is_err());
    }

    #[test]
    fn parses_line_ending_and_flags() {
        let args = Args::try_parse_from([
            "stylepatch",
            "-i",
            "a.css",
            "-o",
            "b.css",
            "--line-ending",
            "lf",
            "--strict",
            "--dry-run",
        ])
        .unwrap();
        let config = build_config(&args).unwrap();
        assert_eq!(config.output_path(), PathBuf::from("b.css").as_path());
        assert_eq!(config.line_ending, LineEnding::Lf);
        assert!(config.strict);
        assert!(args.dry_run);
    }

    #[test]
    fn missing_block_still_succeeds_and_rewrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.css");
        fs::write(&path, ".foo{a:b}\n").unwrap();
        let args = Args::try_parse_from(["stylepatch", "-i", path.to_str().unwrap()]).unwrap();

        run(args).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), ".foo{a:b}\r\n");
    }

    #[test]
    fn success_message_is_fixed() {
        assert_eq!(SUCCESS_MESSAGE, "✅ CSS已成功修改");
    }
}
