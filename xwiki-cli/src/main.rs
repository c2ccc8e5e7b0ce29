// Command-line interface for xwiki
//
// This binary converts between Markdown and XWiki markup and renders XWiki previews.
//
// The conversions themselves live in the xwiki-babel crate; this binary only reads files, picks
// formats, applies configuration and writes the results.
//
// Converting:
//
// The conversion needs a to and from pair. The from can be auto-detected from the file extension,
// while being overwrittable by an explicit --from flag.
// Usage:
//  xwiki <input> --to <format> [--from <format>] [--output <file> | --save]  - Convert (default)
//  xwiki convert <input> --to <format> ...       - Same as above (explicit)
//  xwiki preview <input> [--output <file>]       - Render a standalone HTML preview page
//  xwiki inspect <path> [<transform>]            - Trace a conversion (defaults to "trace-text")
//  xwiki --list-formats | --list-transforms
//
// Extra Parameters:
//
// Format-specific parameters can be passed using --extra-<parameter-name> <value>.
// The CLI layer strips the "extra-" prefix and passes the parameters to the target format.
// Example:
//  xwiki page.xwiki --to html --extra-standalone false

mod transforms;

use transforms::Conversion;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use xwiki_babel::formats::html::page::default_css;
use xwiki_babel::FormatRegistry;
use xwiki_config::{Loader, XwikiConfig};

const CONFIG_FILE: &str = "xwiki.toml";

const SUBCOMMANDS: &[&str] = &["convert", "preview", "inspect", "generate-css", "help"];

/// Parse extra-* arguments from command line args
/// Returns (cleaned_args_without_extras, extra_params_map)
///
/// Supports both:
/// - `--extra-<key> <value>` (explicit value)
/// - `--extra-<key>` (boolean flag, defaults to "true")
/// - `--extras-<key>` (alias for `--extra-<key>`)
fn parse_extra_args(args: &[String]) -> (Vec<String>, HashMap<String, String>) {
    let mut cleaned_args = Vec::new();
    let mut extra_params = HashMap::new();
    let mut i = 0;

    while i < args.len() {
        let arg = &args[i];

        let key_opt = if let Some(key) = arg.strip_prefix("--extra-") {
            Some(key)
        } else {
            arg.strip_prefix("--extras-")
        };

        if let Some(key) = key_opt {
            let has_value = i + 1 < args.len() && !args[i + 1].starts_with('-');
            if has_value {
                extra_params.insert(key.to_string(), args[i + 1].clone());
                i += 2;
            } else {
                extra_params.insert(key.to_string(), "true".to_string());
                i += 1;
            }
            continue;
        }

        cleaned_args.push(arg.clone());
        i += 1;
    }

    (cleaned_args, extra_params)
}

fn input_arg(id: &'static str) -> Arg {
    Arg::new(id)
        .help("Input file path")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn from_arg() -> Arg {
    Arg::new("from")
        .long("from")
        .help("Source format (auto-detected from file extension if not specified)")
        .value_hint(ValueHint::Other)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("xwiki")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert between Markdown and XWiki markup, and preview XWiki as HTML")
        .long_about(
            "xwiki converts documents between Markdown and XWiki 2.x markup and renders\n\
            XWiki documents to HTML previews.\n\n\
            Commands:\n  \
            - convert: Transform between formats (markdown, xwiki, html)\n  \
            - preview: Render an XWiki file to a standalone HTML page\n  \
            - inspect: Trace a conversion pass by pass\n\n\
            Extra Parameters:\n  \
            Use --extra-<name> [value] to pass format-specific options.\n  \
            Boolean flags can omit the value (defaults to 'true').\n\n\
            Examples:\n  \
            xwiki notes.md --to xwiki                # Convert to XWiki (stdout)\n  \
            xwiki notes.md --to xwiki --save         # Write next to the input or to the configured folder\n  \
            xwiki page.xwiki --to markdown -o out.md # Convert to a Markdown file\n  \
            xwiki preview page.xwiki -o page.html    # Standalone preview page",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("list-transforms")
                .long("list-transforms")
                .help("List available inspect transforms")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("list-formats")
                .long("list-formats")
                .help("List available formats")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to an xwiki.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported conversions:\n  \
                    - markdown -> xwiki\n  \
                    - xwiki -> markdown\n  \
                    - xwiki -> html\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, -o writes a file, and --save writes\n\
                    to the configured output folder (or next to the input).",
                )
                .arg(input_arg("input"))
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg())
                .arg(
                    Arg::new("save")
                        .long("save")
                        .help("Write to the configured output folder, or next to the input")
                        .action(ArgAction::SetTrue)
                        .conflicts_with("output"),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Render an XWiki file to a standalone HTML page")
                .long_about(
                    "Render an XWiki file to a complete HTML page with the preview stylesheet.\n\n\
                    Relative image paths are resolved against the input file. Settings in the\n\
                    [preview] section of the configuration apply.",
                )
                .arg(input_arg("input"))
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Trace a conversion pass by pass")
                .long_about(
                    "Show the intermediate results of a conversion.\n\n\
                    Transforms:\n  \
                    - trace-text: Document after every pass (default)\n  \
                    - trace-json: Same, as JSON\n  \
                    - passes:     Pass names in order\n  \
                    - toc-json:   Headings listed by the table of contents\n\n\
                    Without --to, Markdown is traced into XWiki and XWiki into HTML.",
                )
                .arg(
                    Arg::new("path")
                        .help("Path to the input file")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("Transform to apply. Defaults to 'trace-text'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(from_arg())
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format of the traced conversion")
                        .value_hint(ValueHint::Other),
                ),
        )
        .subcommand(
            Command::new("generate-css")
                .about("Output the stylesheet embedded in preview pages")
                .long_about(
                    "Outputs the CSS embedded in standalone HTML previews.\n\n\
                    Use it as a starting point for custom styling and point\n\
                    preview.custom_css in xwiki.toml at the edited copy.",
                ),
        )
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let (cleaned_args, extra_params) = parse_extra_args(&args);

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&cleaned_args) {
        Ok(m) => m,
        Err(e) => {
            // A bare file as first argument means `convert`
            if cleaned_args.len() > 1
                && !cleaned_args[1].starts_with('-')
                && !SUBCOMMANDS.contains(&cleaned_args[1].as_str())
            {
                let mut new_args = vec![cleaned_args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&cleaned_args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    if matches.get_flag("list-transforms") {
        handle_list_transforms_command();
        return;
    }
    if matches.get_flag("list-formats") {
        handle_list_formats_command();
        return;
    }

    let config = load_cli_config(matches.get_one::<String>("config").map(|s| s.as_str()));

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let from = source_format(input, sub_matches);
            let target = if sub_matches.get_flag("save") {
                Target::Save
            } else {
                match sub_matches.get_one::<String>("output") {
                    Some(path) => Target::File(PathBuf::from(path)),
                    None => Target::Stdout,
                }
            };
            handle_convert_command(input, &from, to, target, &extra_params, &config);
        }
        Some(("preview", sub_matches)) => {
            let input = required(sub_matches, "input");
            let target = match sub_matches.get_one::<String>("output") {
                Some(path) => Target::File(PathBuf::from(path)),
                None => Target::Stdout,
            };
            let mut params = extra_params.clone();
            params.insert("standalone".to_string(), "true".to_string());
            handle_convert_command(input, "xwiki", "html", target, &params, &config);
        }
        Some(("inspect", sub_matches)) => {
            let path = required(sub_matches, "path");
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            let from = source_format(path, sub_matches);
            let to = match sub_matches.get_one::<String>("to") {
                Some(to) => to.clone(),
                None if from == "markdown" => "xwiki".to_string(),
                None => "html".to_string(),
            };
            let conversion = Conversion { from: &from, to: &to };
            handle_inspect_command(path, transform, conversion, &extra_params, &config);
        }
        Some(("generate-css", _)) => {
            print!("{}", default_css());
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Where converted output goes.
enum Target {
    Stdout,
    File(PathBuf),
    Save,
}

fn required<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    match matches.get_one::<String>(id) {
        Some(value) => value.as_str(),
        None => {
            eprintln!("Error: missing required argument '{id}'");
            std::process::exit(1);
        }
    }
}

fn source_format(input: &str, matches: &ArgMatches) -> String {
    if let Some(from) = matches.get_one::<String>("from") {
        return from.clone();
    }
    match FormatRegistry::default().detect_format_from_filename(input) {
        Some(detected) => detected,
        None => {
            eprintln!("Error: Could not detect format from filename '{input}'");
            eprintln!("Please specify --from explicitly");
            std::process::exit(1);
        }
    }
}

/// Handle the inspect command
fn handle_inspect_command(
    path: &str,
    transform: &str,
    conversion: Conversion<'_>,
    extra_params: &HashMap<String, String>,
    config: &XwikiConfig,
) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let params = format_options(path, conversion.to, config, extra_params);
    let output = transforms::execute_transform(&source, transform, conversion, &params)
        .unwrap_or_else(|e| {
            eprintln!("Execution error: {e}");
            std::process::exit(1);
        });

    print!("{output}");
}

/// Handle the convert and preview commands
fn handle_convert_command(
    input: &str,
    from: &str,
    to: &str,
    target: Target,
    extra_params: &HashMap<String, String>,
    config: &XwikiConfig,
) {
    let registry = FormatRegistry::default();

    if let Err(e) = registry.get(from) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    if let Err(e) = registry.get(to) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let source = fs::read_to_string(input).unwrap_or_else(|e| {
        eprintln!("Error reading file '{input}': {e}");
        std::process::exit(1);
    });

    let options = format_options(input, to, config, extra_params);
    let result = registry
        .convert_with_options(&source, from, to, &options)
        .unwrap_or_else(|e| {
            eprintln!("Conversion error: {e}");
            std::process::exit(1);
        });

    let path = match target {
        Target::Stdout => {
            print!("{result}");
            return;
        }
        Target::File(path) => path,
        Target::Save => {
            let extension = registry.primary_extension(to).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(1);
            });
            config.convert.output_path(Path::new(input), to, &extension)
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            eprintln!("Error creating folder '{}': {e}", parent.display());
            std::process::exit(1);
        }
    }
    fs::write(&path, result).unwrap_or_else(|e| {
        eprintln!("Error writing file '{}': {e}", path.display());
        std::process::exit(1);
    });
    log::info!("wrote {}", path.display());
    eprintln!("Converted {input} to {}", path.display());
}

/// Target format options: configuration first, then `--extra-*` overrides.
///
/// Only HTML takes options; the location of the input document is always passed so relative
/// image paths resolve.
fn format_options(
    input: &str,
    to: &str,
    config: &XwikiConfig,
    extra_params: &HashMap<String, String>,
) -> HashMap<String, String> {
    let mut options = HashMap::new();
    if to == "html" {
        options = config.preview.format_options();
        if let Ok(document) = fs::canonicalize(input) {
            options.insert(
                "document".to_string(),
                document.to_string_lossy().into_owned(),
            );
        }
        if let Some(css_path) = &config.preview.custom_css {
            let css = fs::read_to_string(css_path).unwrap_or_else(|e| {
                eprintln!("Error reading stylesheet '{}': {e}", css_path.display());
                std::process::exit(1);
            });
            options.insert("custom-css".to_string(), css);
        }
    }
    for (key, value) in extra_params {
        options.insert(key.clone(), value.clone());
    }
    options
}

/// Handle the list-transforms command
fn handle_list_transforms_command() {
    println!("Available transforms:\n");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

/// Handle the list-formats command
fn handle_list_formats_command() {
    let registry = FormatRegistry::default();
    println!("Available formats:\n");
    for format_name in registry.list_formats() {
        let description = registry
            .get(&format_name)
            .map(|format| format.description().to_string())
            .unwrap_or_default();
        println!("  {format_name:<10} {description}");
    }
}

fn load_cli_config(explicit_path: Option<&str>) -> XwikiConfig {
    let loader = Loader::new().with_optional_file(CONFIG_FILE);
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
