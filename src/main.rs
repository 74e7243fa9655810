use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;

use flowcard::brief::parse_brief;
use flowcard::flow::load_flow;
use flowcard::{compose, Brief, Flow, StyleOverride};

/// Analyze a recorded flow and render a share card.
#[derive(Parser, Debug)]
#[command(name = "flowcard", version, about)]
struct Args {
    /// Path to the flow JSON file
    #[arg(long, default_value = "flow.json")]
    flow: PathBuf,

    /// Brief as inline JSON or a path to a JSON file; skips the
    /// completion provider when given
    #[arg(long)]
    brief: Option<String>,

    /// Output directory for the card (and report, when the analyst runs)
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Completion cache location
    #[arg(long, default_value = ".cache/ai.jsonl")]
    cache: PathBuf,

    /// Chat model to use for analysis (requires the `openai` feature)
    #[arg(long)]
    model: Option<String>,
}

fn brief_from_arg(arg: &str) -> Brief {
    let raw = match fs::read_to_string(Path::new(arg)) {
        Ok(contents) => contents,
        Err(_) => arg.to_string(),
    };
    parse_brief(&raw)
}

/// Brief used when no provider is available: the flow name as the
/// headline, placeholder bullets for the body.
fn brief_from_flow(flow: &Flow) -> Brief {
    Brief {
        overlay: flow.name.clone().unwrap_or_default(),
        elements: Vec::new(),
    }
}

#[cfg(feature = "openai")]
fn brief_from_provider(
    args: &Args,
    flow: &Flow,
    api_key: String,
) -> anyhow::Result<(Brief, Option<StyleOverride>, String)> {
    use flowcard::ai::openai::OpenAiClient;
    use flowcard::ai::{style_override_from_inference, CompletionCache};
    use flowcard::prompts;
    use flowcard::report::extract_title_and_summary;

    let provider = OpenAiClient::new(api_key, args.model.clone())?;
    let mut cache = CompletionCache::load(&args.cache)?;

    let flow_json = fs::read_to_string(&args.flow).context("re-reading flow for analysis")?;
    let report = cache.complete_or_fetch(
        &provider,
        prompts::SYSTEM_ANALYST,
        &prompts::user_analyst(&flow_json),
    )?;
    let (title, summary) = extract_title_and_summary(&report, flow.name.as_deref());

    let raw_brief = cache.complete_or_fetch(
        &provider,
        prompts::SYSTEM_IMAGE,
        &prompts::user_image(&title, &summary),
    )?;
    let brief = parse_brief(&raw_brief);

    let seen = flowcard::card::style::candidate_colors(flow);
    let raw_style = cache.complete_or_fetch(
        &provider,
        prompts::SYSTEM_STYLE,
        &prompts::user_style(
            flow.name.as_deref().unwrap_or_default(),
            flow.font.as_deref(),
            &seen,
        ),
    )?;
    let style = style_override_from_inference(&raw_style);

    Ok((brief, style, report))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let flow = load_flow(&args.flow).with_context(|| format!("loading {}", args.flow.display()))?;
    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    let (brief, style, report): (Brief, Option<StyleOverride>, Option<String>) =
        if let Some(arg) = &args.brief {
            (brief_from_arg(arg), None, None)
        } else {
            #[cfg(feature = "openai")]
            {
                match std::env::var("OPENAI_API_KEY") {
                    Ok(key) => {
                        let (brief, inferred, text) = brief_from_provider(&args, &flow, key)?;
                        (brief, inferred, Some(text))
                    }
                    Err(_) => {
                        info!("OPENAI_API_KEY not set; rendering from flow alone");
                        (brief_from_flow(&flow), None, None)
                    }
                }
            }
            #[cfg(not(feature = "openai"))]
            {
                (brief_from_flow(&flow), None, None)
            }
        };

    if let Some(text) = &report {
        let report_path = args.out.join("report.md");
        fs::write(&report_path, text)
            .with_context(|| format!("writing {}", report_path.display()))?;
        info!("wrote {}", report_path.display());
    }

    let card_path = args.out.join("social.png");
    compose(&brief, &card_path, Some(&flow), style.as_ref())?;
    info!("wrote {}", card_path.display());
    Ok(())
}
