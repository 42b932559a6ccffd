//! # CLI Layer
//!
//! One client of the bites library, and the only place that touches the
//! terminal: argument parsing, prompts, rendering and exit codes all live
//! here. Handlers call one `BitesApi` method and render its `CmdResult`;
//! none of them contains business logic.

use super::render::{
    print_config, print_detail, print_links, print_map, print_messages, print_place,
    print_predictions, print_records,
};
use super::setup::{Cli, Commands, FormArgs, PlaceArgs};
use bites::api::{self, BitesApi};
use bites::clipboard::{copy_to_clipboard, format_links};
use bites::commands::config::ConfigAction;
use bites::commands::map::MapFocus;
use bites::commands::{FormChanges, PlacePick};
use bites::error::{BitesError, Result};
use bites::form::FormInput;
use bites::logging::{init_logging, Verbosity};
use bites::model::Coordinates;
use bites::places::HttpTransport;
use bites::selector::RecordSelector;
use bites::store::fs::FsKv;
use clap::Parser;
use colored::Colorize;
use console::Term;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

const DATA_DIR_ENV: &str = "BITES_DATA_DIR";

struct AppContext {
    api: BitesApi<FsKv, HttpTransport>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Add { form, place }) => handle_add(&ctx, form, place),
        Some(Commands::Edit {
            selector,
            form,
            place,
        }) => handle_edit(&ctx, selector, form, place),
        Some(Commands::Delete { selectors }) => handle_delete(&ctx, selectors),
        Some(Commands::Details { selector, refresh }) => handle_details(&ctx, selector, refresh),
        Some(Commands::Map { record, at, place }) => handle_map(&ctx, record, at, place),
        Some(Commands::Link { selectors, copy }) => handle_link(&ctx, selectors, copy),
        Some(Commands::Suggest { query, pick, near }) => {
            handle_suggest(&ctx, query.join(" "), pick, near)
        }
        Some(Commands::Seed) => handle_seed(&ctx),
        Some(Commands::Clear { yes }) => handle_clear(&ctx, yes),
        Some(Commands::About) => handle_about(&ctx),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

/// `--data-dir`, then `$BITES_DATA_DIR`, then the platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "bites", "bites")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            BitesError::Store(format!(
                "could not determine a data directory; pass --data-dir or set {}",
                DATA_DIR_ENV
            ))
        })
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    debug!(data_dir = %data_dir.display(), "using data directory");
    Ok(AppContext {
        api: api::open(&data_dir)?,
    })
}

fn form_changes(ctx: &AppContext, form: FormArgs, place: PlaceArgs) -> FormChanges {
    FormChanges {
        pick: place
            .search
            .map(|query| ctx.api.pick(&query, place.pick, place.near)),
        input: FormInput {
            name: form.name,
            rating: form.rating,
            location: form.at,
            contact: form.contact,
            address: form.address,
        },
    }
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list()?;
    print_records(&result.listed);
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &AppContext, form: FormArgs, place: PlaceArgs) -> Result<()> {
    let result = ctx.api.add(form_changes(ctx, form, place))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(ctx: &AppContext, selector: String, form: FormArgs, place: PlaceArgs) -> Result<()> {
    let result = ctx.api.edit(&selector, form_changes(ctx, form, place))?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &AppContext, selectors: Vec<String>) -> Result<()> {
    let result = ctx.api.delete(&selectors)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_details(ctx: &AppContext, selector: String, refresh: bool) -> Result<()> {
    let result = ctx.api.details(&selector, refresh)?;
    if let Some(detail) = &result.detail {
        print_detail(detail);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_map(
    ctx: &AppContext,
    record: Option<String>,
    at: Option<Coordinates>,
    place: PlaceArgs,
) -> Result<()> {
    let focus = match (record, at, place.search) {
        (Some(selector), _, _) => MapFocus::Record(RecordSelector::new(selector)),
        (_, Some(point), _) => MapFocus::Point(point),
        (_, _, Some(query)) => MapFocus::Search(ctx.api.pick(&query, place.pick, place.near)),
        _ => MapFocus::Home,
    };

    let result = ctx.api.map(focus)?;
    if let Some(map) = &result.map {
        print_map(map);
        println!();
        println!("Open in maps: {}", map.center.map_link());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_link(ctx: &AppContext, selectors: Vec<String>, copy: bool) -> Result<()> {
    let result = ctx.api.links(&selectors)?;
    print_links(&result.links);
    if copy && !result.links.is_empty() {
        match copy_to_clipboard(&format_links(&result.links)) {
            Ok(()) => println!("{}", "Copied to clipboard".green()),
            // Links were already printed; a missing clipboard is not fatal.
            Err(e) => println!("{}", e.to_string().yellow()),
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_suggest(
    ctx: &AppContext,
    query: String,
    pick: Option<usize>,
    near: Option<Coordinates>,
) -> Result<()> {
    let request: PlacePick = ctx.api.pick(&query, pick.unwrap_or(1), near);
    let result = match pick {
        Some(_) => ctx.api.show_pick(&request)?,
        None => ctx.api.suggest(&request)?,
    };

    match &result.place {
        Some(place) => print_place(result.predictions.first(), place),
        None => print_predictions(&result.predictions),
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_seed(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.seed()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_clear(ctx: &AppContext, yes: bool) -> Result<()> {
    if !yes && !confirm("Delete all saved restaurants? [y/N] ")? {
        println!("Nothing cleared.");
        return Ok(());
    }
    let result = ctx.api.clear()?;
    print_messages(&result.messages);
    Ok(())
}

/// Ask on the terminal. Without one there is nobody to ask, so the
/// answer is an error rather than a silent yes or no.
fn confirm(prompt: &str) -> Result<bool> {
    let term = Term::stdout();
    if !term.is_term() {
        return Err(BitesError::validation(
            "Refusing to continue without confirmation; pass --yes",
        ));
    }
    term.write_str(prompt)?;
    let answer = term.read_line()?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn handle_about(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.about();
    if let Some(text) = &result.text {
        println!("{}", text);
    }
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (&action, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}

/// A follow-up line for errors that left stored data untouched.
pub fn error_hint(err: &BitesError) -> Option<&'static str> {
    err.is_recoverable()
        .then_some("Nothing was changed; try again in a moment.")
}
