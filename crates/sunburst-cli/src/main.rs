use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use sunburst_core::{FeatureMapping, ProductRecord, SunburstConfig, TreeNode, build_tree};
use sunburst_render::zoom::Interaction;
use sunburst_render::{Chart, LayoutOptions, PartitionLayout, Scene, ZoomState};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SUNBURST_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(sunburst_core::Error),
    Render(sunburst_render::Error),
    Json(serde_json::Error),
    UnknownPath(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::UnknownPath(path) => write!(f, "no node at path `{path}`"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<sunburst_core::Error> for CliError {
    fn from(value: sunburst_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<sunburst_render::Error> for CliError {
    fn from(value: sunburst_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Render,
}

#[derive(Debug, Clone, PartialEq)]
enum ClickTarget {
    Center,
    /// Names below the root; empty is the root itself.
    Path(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
struct Click {
    target: ClickTarget,
    at_ms: f64,
}

impl FromStr for Click {
    type Err = ();

    /// `<path>@<ms>` where `path` is `/`-joined names or `..` for the center disc.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, at) = s.rsplit_once('@').ok_or(())?;
        let at_ms = at.trim().parse::<f64>().map_err(|_| ())?;
        if !(at_ms.is_finite() && at_ms >= 0.0) {
            return Err(());
        }
        let target = if path.trim() == ".." {
            ClickTarget::Center
        } else {
            ClickTarget::Path(
                path.split('/')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            )
        };
        Ok(Self { target, at_ms })
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    records: bool,
    mapping: Option<String>,
    configs: Vec<String>,
    clicks: Vec<Click>,
    at_ms: Option<f64>,
    pretty: bool,
    out: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOut<'a> {
    home: &'a PartitionLayout,
    state: ZoomState,
    interactions: &'a [Interaction],
    scene: Scene,
}

fn usage() -> &'static str {
    "sunburst-cli\n\
\n\
USAGE:\n\
  sunburst-cli [layout] [--records] [--mapping <path>] [--config <json>|<path>]... [--click <path>@<ms>]... [--at <ms>] [--pretty] [--out <path>] [<path>|-]\n\
  sunburst-cli render [--records] [--mapping <path>] [--config <json>|<path>]... [--click <path>@<ms>]... [--at <ms>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a `{ name, children, value }` tree, or with --records a JSON array of product records.\n\
  - --click paths are '/'-joined names below the root; '..' clicks the center disc.\n\
  - Repeated --config layers are deep-merged in order; later keys win.\n\
  - Without --at, the frame is taken once every animation has finished.\n\
  - With --at, clicks later than that time are not applied.\n\
  - Set SUNBURST_LOG (e.g. `debug`) to log to stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--records" => args.records = true,
            "--pretty" => args.pretty = true,
            "--mapping" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.mapping = Some(path.clone());
            }
            "--config" => {
                let Some(cfg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.configs.push(cfg.clone());
            }
            "--click" => {
                let Some(click) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.clicks
                    .push(click.parse::<Click>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--at" => {
                let Some(at) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                let at = at.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !at.is_finite() {
                    return Err(CliError::Usage(usage()));
                }
                args.at_ms = Some(at);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

/// Each layer is inline JSON when it looks like an object, otherwise a file path.
fn load_config(layers: &[String]) -> Result<SunburstConfig, CliError> {
    let mut config = SunburstConfig::default();
    for raw in layers {
        let text = if raw.trim_start().starts_with('{') {
            raw.clone()
        } else {
            std::fs::read_to_string(raw)?
        };
        let layer = SunburstConfig::from_json_str(&text)?;
        config.deep_merge(layer.as_value());
    }
    Ok(config)
}

fn load_mapping(path: Option<&str>) -> Result<FeatureMapping, CliError> {
    match path {
        None => Ok(FeatureMapping::sunscreen()),
        Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    write_text(&text, out)
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn apply_click(chart: &mut Chart, click: &Click) -> Result<Interaction, CliError> {
    chart.settle(click.at_ms);
    match &click.target {
        ClickTarget::Center => Ok(chart.center_click(click.at_ms)),
        ClickTarget::Path(names) => {
            let names = names.iter().map(String::as_str).collect::<Vec<_>>();
            let id = chart
                .find(&names)
                .ok_or_else(|| CliError::UnknownPath(names.join("/")))?;
            Ok(chart.select(id, click.at_ms)?)
        }
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let config = load_config(&args.configs)?;

    let tree = if args.records {
        let records = ProductRecord::from_json_array(&text)?;
        let mapping = load_mapping(args.mapping.as_deref())?;
        build_tree(sunburst_core::root_name(&config), &records, &mapping)?
    } else {
        TreeNode::from_json_str(&text)?
    };

    let mut chart = Chart::new(&tree, &config, &LayoutOptions::default())?;

    let mut clicks = args.clicks.clone();
    clicks.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
    if let Some(at_ms) = args.at_ms {
        let requested = clicks.len();
        clicks.retain(|c| c.at_ms <= at_ms);
        if clicks.len() < requested {
            tracing::debug!(
                skipped = requested - clicks.len(),
                at_ms,
                "clicks after the frame time are not applied"
            );
        }
    }
    let mut interactions = Vec::with_capacity(clicks.len());
    for click in &clicks {
        interactions.push(apply_click(&mut chart, click)?);
    }

    let at_ms = args.at_ms.unwrap_or_else(|| {
        let o = chart.options();
        let longest = o
            .zoom_duration_ms
            .max(o.pop_out_duration_ms)
            .max(o.detail.fade_ms);
        clicks.last().map(|c| c.at_ms).unwrap_or(0.0) + longest
    });
    chart.settle(at_ms);
    tracing::debug!(clicks = clicks.len(), at_ms, "sampling frame");

    match args.command {
        Command::Layout => {
            let out = LayoutOut {
                home: chart.home(),
                state: chart.state(at_ms),
                interactions: &interactions,
                scene: chart.scene(at_ms),
            };
            write_json(&out, args.pretty, args.out.as_deref())
        }
        Command::Render => write_text(&chart.render_svg(at_ms), args.out.as_deref()),
    }
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::UnknownPath(_)) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("sunburst-cli")
            .chain(parts.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parses_clicks() {
        assert_eq!(
            "Skin Concern/Moisturizing@250".parse::<Click>(),
            Ok(Click {
                target: ClickTarget::Path(vec!["Skin Concern".into(), "Moisturizing".into()]),
                at_ms: 250.0,
            })
        );
        assert_eq!(
            "..@1000".parse::<Click>(),
            Ok(Click {
                target: ClickTarget::Center,
                at_ms: 1000.0,
            })
        );
        assert!("Skin Concern".parse::<Click>().is_err());
        assert!("a@-5".parse::<Click>().is_err());
    }

    #[test]
    fn parses_render_args() {
        let args = parse_args(&argv(&[
            "render",
            "--records",
            "--click",
            "SPF Range@0",
            "--at",
            "375",
            "in.json",
        ]))
        .unwrap();
        assert!(matches!(args.command, Command::Render));
        assert!(args.records);
        assert_eq!(args.clicks.len(), 1);
        assert_eq!(args.at_ms, Some(375.0));
        assert_eq!(args.input.as_deref(), Some("in.json"));
    }

    #[test]
    fn config_layers_merge_in_order() {
        let config = load_config(&[
            r#"{"sunburst":{"width":600,"theme":"warm"}}"#.to_string(),
            r#"{"sunburst":{"width":400}}"#.to_string(),
        ])
        .unwrap();
        assert_eq!(config.get_f64("sunburst.width"), Some(400.0));
        assert_eq!(config.get_str("sunburst.theme"), Some("warm"));
        assert_eq!(load_config(&[]).unwrap(), SunburstConfig::default());
    }

    #[test]
    fn rejects_unknown_flags_and_second_input() {
        assert!(matches!(
            parse_args(&argv(&["--nope"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["a.json", "b.json"])),
            Err(CliError::Usage(_))
        ));
    }
}
