use futures::executor::block_on;
use nucleus::catalog::company_counts;
use nucleus::forms::FormKind;
use nucleus::model::company_count_label;
use nucleus::render::raster::{RasterError, RasterOptions, svg_to_png};
use nucleus::render::{HeadlessError, HeadlessSite, InteractionState};
use nucleus::{
    ApplicationForm, ContactForm, DataProvider, DirectoryQuery, FormError, FormSubmitter,
    HistoryNavigator, IndustryFilter, JobQuery, JobStatus, LogMailer, Notice, ResumeAttachment,
    SiteConfig, StaticCatalog, UploadPolicy,
};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod logger;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Nucleus(nucleus::Error),
    Headless(HeadlessError),
    Raster(RasterError),
    Json(serde_json::Error),
    Form { kind: FormKind, err: FormError },
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Nucleus(err) => write!(f, "{err}"),
            CliError::Headless(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Form { kind, err } => {
                write!(f, "{}", Notice::from_error(*kind, err).message)
            }
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<nucleus::Error> for CliError {
    fn from(value: nucleus::Error) -> Self {
        Self::Nucleus(value)
    }
}

impl From<HeadlessError> for CliError {
    fn from(value: HeadlessError) -> Self {
        Self::Headless(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy)]
enum Command {
    Orbital,
    Layout,
    Industries,
    Companies,
    Jobs,
    Route,
    Build,
    Contact,
    Apply,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orbital" => Ok(Self::Orbital),
            "layout" => Ok(Self::Layout),
            "industries" => Ok(Self::Industries),
            "companies" => Ok(Self::Companies),
            "jobs" => Ok(Self::Jobs),
            "route" => Ok(Self::Route),
            "build" => Ok(Self::Build),
            "contact" => Ok(Self::Contact),
            "apply" => Ok(Self::Apply),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Option<Command>,
    input: Option<String>,
    config: Option<String>,
    data: Option<String>,
    verbose: bool,
    pretty: bool,
    events: Option<String>,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    diagram_id: Option<String>,
    out: Option<String>,
    industry: Option<String>,
    company: Option<String>,
    search: String,
    resume: Option<String>,
}

#[derive(Serialize)]
struct IndustryCountOut<'a> {
    id: &'a str,
    name: &'a str,
    icon: Option<&'a str>,
    companies: usize,
    label: String,
}

fn usage() -> &'static str {
    "nucleus-cli\n\
\n\
USAGE:\n\
  nucleus-cli orbital [--events <script>] [--format svg|png] [--scale <n>] [--background <color>] [--id <diagram-id>] [--out <path>|-]\n\
  nucleus-cli layout [--events <script>] [--pretty]\n\
  nucleus-cli industries [--pretty]\n\
  nucleus-cli companies [--industry <id>|all] [--search <text>] [--pretty]\n\
  nucleus-cli jobs [--company <id>] [--search <text>] [--pretty]\n\
  nucleus-cli route <path>\n\
  nucleus-cli build [--out <dir>]\n\
  nucleus-cli contact <form.json> [--resume <file>] [--pretty]\n\
  nucleus-cli apply <form.json> --resume <file> [--pretty]\n\
\n\
GLOBAL OPTIONS:\n\
  --config <file>   site config overrides (.yaml, .yml, .json5 or .json)\n\
  --data <file>     catalog JSON ({\"industries\": [...], \"companies\": [...], \"jobs\": [...]})\n\
  --verbose         debug logging (RUST_LOG takes precedence)\n\
\n\
NOTES:\n\
  - Event scripts are comma separated: enter:<id>,leave,click:<id>,company:<slug>\n\
  - orbital prints SVG to stdout by default; PNG output defaults to ./orbital.png.\n\
  - build writes to ./site unless --out is given.\n\
  - Forms are validated and logged; nothing is delivered.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "--verbose" | "-v" => args.verbose = true,
            "--pretty" => args.pretty = true,
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--data" => args.data = Some(next_value(&mut it)?.clone()),
            "--events" => args.events = Some(next_value(&mut it)?.clone()),
            "--format" => {
                args.render_format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                args.render_scale = next_value(&mut it)?
                    .parse::<f32>()
                    .map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = next_value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--id" => args.diagram_id = Some(next_value(&mut it)?.clone()),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--industry" => args.industry = Some(next_value(&mut it)?.clone()),
            "--company" => args.company = Some(next_value(&mut it)?.clone()),
            "--search" => args.search = next_value(&mut it)?.clone(),
            "--resume" => args.resume = Some(next_value(&mut it)?.clone()),
            other if other.starts_with("--") => return Err(CliError::Usage(usage())),
            word => match (args.command, word.parse::<Command>()) {
                (None, Ok(command)) => args.command = Some(command),
                (None, Err(())) => return Err(CliError::Usage(usage())),
                (Some(_), _) => {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(word.to_string());
                }
            },
        }
    }

    if args.command.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn load_config(path: Option<&str>) -> Result<SiteConfig, CliError> {
    let Some(path) = path else {
        return Ok(SiteConfig::defaults());
    };
    let text = std::fs::read_to_string(path)?;
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".yaml") || lower.ends_with(".yml") {
        Ok(SiteConfig::from_yaml_str(&text)?)
    } else if lower.ends_with(".json5") || lower.ends_with(".json") {
        Ok(SiteConfig::from_json5_str(&text)?)
    } else {
        Err(CliError::Usage(
            "config must be a .yaml, .yml, .json5 or .json file",
        ))
    }
}

fn load_site(args: &Args) -> Result<HeadlessSite, CliError> {
    let catalog = match args.data.as_deref() {
        Some(path) => StaticCatalog::from_json_str(&std::fs::read_to_string(path)?)?,
        None => StaticCatalog::bundled()?,
    };
    let config = load_config(args.config.as_deref())?;
    Ok(HeadlessSite::new(catalog).with_config(config))
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, value)?;
    } else {
        serde_json::to_writer(&mut stdout, value)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None | Some("-") => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn replayed_state(site: &HeadlessSite, events: Option<&str>) -> Result<InteractionState, CliError> {
    let Some(script) = events else {
        return Ok(InteractionState::Idle);
    };
    let navigator = HistoryNavigator::new();
    let state = site.state_for_script(script, &navigator)?;
    for route in navigator.history() {
        tracing::info!(route = %route, "navigation requested");
    }
    Ok(state)
}

fn read_form<T: serde::de::DeserializeOwned>(input: Option<&str>) -> Result<T, CliError> {
    let Some(path) = input else {
        return Err(CliError::Usage(usage()));
    };
    Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

fn resume_attachment(path: Option<&str>) -> Result<Option<ResumeAttachment>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let size = std::fs::metadata(path)?.len();
    let file_name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    Ok(Some(ResumeAttachment::guess(file_name, size)))
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(command) = args.command else {
        return Err(CliError::Usage(usage()));
    };
    let site = load_site(&args)?;

    match command {
        Command::Orbital => {
            let state = replayed_state(&site, args.events.as_deref())?;
            tracing::debug!(state = ?state, "rendering orbital");
            let svg = match args.diagram_id.as_deref() {
                Some(id) => site.render_orbital_svg_with_diagram_id(&state, id)?,
                None => site.render_orbital_svg(&state)?,
            };
            match args.render_format {
                RenderFormat::Svg => write_text(&svg, args.out.as_deref()),
                RenderFormat::Png => {
                    let bytes = svg_to_png(
                        &svg,
                        &RasterOptions {
                            scale: args.render_scale,
                            background: args.background.clone(),
                        },
                    )?;
                    let out = args.out.as_deref().unwrap_or("orbital.png");
                    if out == "-" {
                        std::io::stdout().lock().write_all(&bytes)?;
                    } else {
                        std::fs::write(out, bytes)?;
                    }
                    Ok(())
                }
            }
        }
        Command::Layout => {
            let state = replayed_state(&site, args.events.as_deref())?;
            write_json(&site.layout(&state), args.pretty)
        }
        Command::Industries => {
            let rows: Vec<IndustryCountOut<'_>> = company_counts(&site.catalog)
                .into_iter()
                .map(|(industry, count)| IndustryCountOut {
                    id: &industry.id,
                    name: &industry.name,
                    icon: industry.icon.as_deref(),
                    companies: count,
                    label: company_count_label(count),
                })
                .collect();
            write_json(&rows, args.pretty)
        }
        Command::Companies => {
            let query = DirectoryQuery::new(
                args.search.clone(),
                IndustryFilter::parse(args.industry.as_deref().unwrap_or("all")),
            );
            write_json(&query.apply(&site.catalog), args.pretty)
        }
        Command::Jobs => {
            let query = JobQuery {
                search: args.search.clone(),
                company_id: args.company.clone(),
            };
            write_json(&query.apply(&site.catalog), args.pretty)
        }
        Command::Route => {
            let Some(path) = args.input.as_deref() else {
                return Err(CliError::Usage(usage()));
            };
            write_text(&site.render_path(path)?, None)
        }
        Command::Build => {
            let dir = PathBuf::from(args.out.as_deref().unwrap_or("site"));
            let pages = site.build_site()?;
            for page in &pages {
                let path = dir.join(&page.path);
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, &page.contents)?;
            }
            tracing::info!(pages = pages.len(), dir = %dir.display(), "site built");
            Ok(())
        }
        Command::Contact => {
            let mut form: ContactForm = read_form(args.input.as_deref())?;
            form.resume = resume_attachment(args.resume.as_deref())?;
            let submitter = FormSubmitter::new(LogMailer, UploadPolicy::from_config(&site.config));
            let receipt = block_on(submitter.submit_contact(&form, &site.catalog)).map_err(
                |err| CliError::Form {
                    kind: FormKind::Contact,
                    err,
                },
            )?;
            write_json(&receipt, args.pretty)
        }
        Command::Apply => {
            let mut form: ApplicationForm = read_form(args.input.as_deref())?;
            form.resume = resume_attachment(args.resume.as_deref())?;
            let job = site
                .catalog
                .job(&form.job_id)
                .filter(|job| job.status == JobStatus::Open)
                .ok_or_else(|| nucleus::Error::UnknownJob {
                    id: form.job_id.clone(),
                })?;
            let submitter = FormSubmitter::new(LogMailer, UploadPolicy::from_config(&site.config));
            let receipt = block_on(submitter.submit_application(&form, job, &site.catalog))
                .map_err(|err| CliError::Form {
                    kind: FormKind::Application,
                    err,
                })?;
            write_json(&receipt, args.pretty)
        }
    }
}

fn main() {
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

    logger::init_cli_logger(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(err @ CliError::Form { .. }) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
