//! Partial Guard demo
//!
//! Each scenario plays the role of one trivial page handler: build a page
//! model with zero or more nested fragment models, render the fragment
//! regions through the guard API, render the outer page template, and print
//! the HTML. The two "problem" scenarios go through the fallback-prone
//! primitive instead, to show what the guards close off.
//!
//! Usage:
//!   partial-guard <SCENARIO> [--filled] [--config <FILE>]

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use minijinja::Value;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use partial_guard::{
    ContextScope, PartialRenderer, Rendered, RenderError, ViewConfig, ViewData, ViewEngine,
};

#[derive(Parser)]
#[command(name = "partial-guard")]
#[command(about = "Demo for guarded partial-template rendering")]
struct Cli {
    /// Scenario to run
    #[arg(value_enum)]
    scenario: Scenario,

    /// Populate the optional fragments to see the non-suppressed paths
    #[arg(short, long)]
    filled: bool,

    /// View configuration file (TOML); defaults to templates/ with strict rendering
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scenario {
    /// Fallback-prone render with no model anywhere in scope
    TheProblem,
    /// Fallback-prone render that picks up the page model instead of a fragment
    TheProblemException,
    /// Null model still renders, as an explicit none
    PartialOrNull,
    /// Null model renders nothing at all
    PartialOrDiscard,
    /// Null model renders neither the partial nor the wrapper
    PartialOrDiscardWrapped,
    /// Absent or empty sequence renders nothing at all
    PartialOrDiscardIfEmpty,
    /// Absent or empty sequence renders neither the partial nor the wrapper
    PartialOrDiscardIfEmptyWrapped,
}

/// Display model for one demo page
#[derive(Debug, Serialize)]
struct PageModel {
    page_title: String,
    main_fragment: Option<FragmentModel>,
    other_fragments: Option<Vec<Option<FragmentModel>>>,
}

/// Display model for one reusable page fragment
#[derive(Debug, Serialize)]
struct FragmentModel {
    title: String,
    text: String,
}

impl PageModel {
    fn titled(page_title: &str) -> Self {
        Self {
            page_title: page_title.to_string(),
            main_fragment: None,
            other_fragments: None,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let config = match &cli.config {
        Some(path) => match ViewConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading view configuration '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        None => ViewConfig::default(),
    };

    let engine = ViewEngine::from_config(&config);
    match run_scenario(cli.scenario, cli.filled, &engine) {
        Ok(html) => {
            println!("{}", html);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("partial_guard=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("partial_guard=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();
}

fn run_scenario(
    scenario: Scenario,
    filled: bool,
    engine: &ViewEngine,
) -> Result<String, RenderError> {
    match scenario {
        Scenario::TheProblem => the_problem(engine),
        Scenario::TheProblemException => the_problem_exception(engine),
        Scenario::PartialOrNull => partial_or_null(engine, filled),
        Scenario::PartialOrDiscard => partial_or_discard(engine, filled),
        Scenario::PartialOrDiscardWrapped => partial_or_discard_wrapped(engine, filled),
        Scenario::PartialOrDiscardIfEmpty => partial_or_discard_if_empty(engine, filled),
        Scenario::PartialOrDiscardIfEmptyWrapped => {
            partial_or_discard_if_empty_wrapped(engine, filled)
        }
    }
}

/// Ambient bag for one page: the title plus the page model itself, the way a
/// host framework leaves the page's own model in scope for every sub-render.
fn page_data(page: &PageModel) -> ViewData {
    let mut data = ViewData::new();
    data.insert("page_title", &page.page_title);
    data.insert("model", page);
    data
}

fn render_page(
    partials: &PartialRenderer<'_>,
    main_region: Rendered,
    other_region: Rendered,
) -> Result<String, RenderError> {
    let mut data = partials.ambient().clone();
    data.insert_value("main_region", region(main_region));
    data.insert_value("other_region", region(other_region));
    partials.partial_with_ambient("page", ContextScope::Override(&data))
}

/// A suppressed region contributes nothing to the page.
fn region(rendered: Rendered) -> Value {
    Value::from_safe_string(rendered.into_content().unwrap_or_default())
}

/// No model anywhere in scope: under a strict engine the fragment template
/// cannot even ask whether the model is null. This scenario fails on purpose.
fn the_problem(engine: &ViewEngine) -> Result<String, RenderError> {
    let mut data = ViewData::new();
    data.insert("page_title", "This page cannot tell a null model from no model");
    let partials = PartialRenderer::new(engine).with_ambient(data);

    let fragment = partials.partial_with_ambient("fragment", ContextScope::Ambient)?;
    render_page(&partials, Rendered::Content(fragment), Rendered::Suppressed)
}

/// The ambient bag carries the page model, so the fallback-prone render hands
/// a page model to a template expecting fragment fields. This scenario fails
/// on purpose.
fn the_problem_exception(engine: &ViewEngine) -> Result<String, RenderError> {
    let page = PageModel::titled("This page will fail to render");
    let partials = PartialRenderer::new(engine).with_ambient(page_data(&page));

    let fragment = partials.partial_with_ambient("fragment", ContextScope::Ambient)?;
    render_page(&partials, Rendered::Content(fragment), Rendered::Suppressed)
}

fn partial_or_null(engine: &ViewEngine, filled: bool) -> Result<String, RenderError> {
    let mut page = PageModel::titled("This page renders 'The fragment is null!'");
    if filled {
        page.main_fragment = Some(FragmentModel {
            title: "A real fragment".to_string(),
            text: "Rendered because the model is present.".to_string(),
        });
    }
    let partials = PartialRenderer::new(engine).with_ambient(page_data(&page));

    let fragment =
        partials.partial_or_null("fragment", page.main_fragment.as_ref(), ContextScope::Ambient)?;
    render_page(&partials, Rendered::Content(fragment), Rendered::Suppressed)
}

fn partial_or_discard(engine: &ViewEngine, filled: bool) -> Result<String, RenderError> {
    let mut page = PageModel::titled("This page does not render the fragment at all");
    if filled {
        page.main_fragment = Some(FragmentModel {
            title: "A real fragment".to_string(),
            text: "Rendered because the model is present.".to_string(),
        });
    }
    let partials = PartialRenderer::new(engine).with_ambient(page_data(&page));

    let main_region =
        partials.partial_or_discard("fragment", page.main_fragment.as_ref(), ContextScope::Ambient)?;
    render_page(&partials, main_region, Rendered::Suppressed)
}

fn partial_or_discard_wrapped(engine: &ViewEngine, filled: bool) -> Result<String, RenderError> {
    let mut page = PageModel::titled("This page renders neither the fragment nor its box");
    if filled {
        page.main_fragment = Some(FragmentModel {
            title: "A boxed fragment".to_string(),
            text: "The box appears only around a rendered fragment.".to_string(),
        });
    }
    let partials = PartialRenderer::new(engine).with_ambient(page_data(&page));

    let main_region = partials.partial_or_discard_with(
        "fragment",
        page.main_fragment.as_ref(),
        |inner| partials.wrap("fragment_box", inner),
        ContextScope::Ambient,
    )?;
    render_page(&partials, main_region, Rendered::Suppressed)
}

fn partial_or_discard_if_empty(engine: &ViewEngine, filled: bool) -> Result<String, RenderError> {
    let mut page = PageModel::titled("This page does not render the fragment list at all");
    if filled {
        // One real entry and one null entry: the null passes through unfiltered.
        page.other_fragments = Some(vec![
            Some(FragmentModel {
                title: "First".to_string(),
                text: "A list with at least one element renders in full.".to_string(),
            }),
            None,
        ]);
    }
    let partials = PartialRenderer::new(engine).with_ambient(page_data(&page));

    let other_region = partials.partial_or_discard_if_empty(
        "fragment_list",
        page.other_fragments.as_deref(),
        ContextScope::Ambient,
    )?;
    render_page(&partials, Rendered::Suppressed, other_region)
}

fn partial_or_discard_if_empty_wrapped(
    engine: &ViewEngine,
    filled: bool,
) -> Result<String, RenderError> {
    let mut page = PageModel::titled("This page renders neither the list nor its bullets");
    if filled {
        page.other_fragments = Some(vec![Some(FragmentModel {
            title: "Only".to_string(),
            text: "No empty <ul></ul> ever appears on this page.".to_string(),
        })]);
    }
    let partials = PartialRenderer::new(engine).with_ambient(page_data(&page));

    let other_region = partials.partial_or_discard_if_empty_with(
        "fragment_list",
        page.other_fragments.as_deref(),
        |inner| partials.wrap("fragment_bullets", inner),
        ContextScope::Ambient,
    )?;
    render_page(&partials, Rendered::Suppressed, other_region)
}
