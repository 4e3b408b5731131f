//! Tessera command-line driver.
//!
//! Loads a RON document, builds a block settings menu for a selection, and
//! renders or dispatches through it.
//!
//! Usage:
//!   tessera doc.ron menu --select 0
//!   tessera doc.ron run duplicate --select 1 2
//!   tessera doc.ron run "Edit as HTML" --select 0
//!   tessera --config menu.ron doc.ron keys ctrl+shift+d --select 0
//!
//! Selections are zero-based positions within the root (`--root N` picks a
//! top-level block as the container).

mod document;
mod tree;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args as ClapArgs, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tessera_blocks::BlockRegistry;
use tessera_menu::{BlockSettingsMenu, Dropdown, KeyEvent, MenuCommand, MenuConfig, MenuProps};
use tessera_store::MemoryStore;
use tessera_types::BlockId;

use document::DocumentFile;

/// Drive the block settings menu against a document file.
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(about = "Block settings menu driver")]
struct Args {
    /// Menu config (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Document file (RON)
    doc: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct Target {
    /// Positions of the selected blocks within the root
    #[arg(short, long, num_args = 1.., required = true)]
    select: Vec<usize>,

    /// Position of the container block at the document root
    #[arg(short, long)]
    root: Option<usize>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the toggle and the open menu's entries
    Menu {
        #[command(flatten)]
        target: Target,
    },
    /// Run duplicate, remove, toggle, or an item by label
    Run {
        action: String,
        #[command(flatten)]
        target: Target,
    },
    /// Feed a raw chord (e.g. ctrl+shift+d) through the shortcut handler
    Keys {
        chord: String,
        #[command(flatten)]
        target: Target,
    },
}

impl Command {
    fn target(&self) -> &Target {
        match self {
            Command::Menu { target } | Command::Run { target, .. } | Command::Keys { target, .. } => target,
        }
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MenuConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => MenuConfig::default(),
    };
    let doc = DocumentFile::load(&args.doc)?;
    let registry = doc.registry()?;
    let mut store = doc.into_store()?;

    let props = resolve_target(&store, args.command.target())?.with_hidden(config.is_hidden);
    let menu = BlockSettingsMenu::new(props, &config)?;
    tracing::info!(
        selected = menu.props().client_ids().len(),
        platform = %config.platform,
        "menu ready"
    );

    match &args.command {
        Command::Menu { .. } => print_menu(&menu, &mut store, &registry)?,
        Command::Run { action, .. } => {
            run_action(&menu, action, &mut store, &registry)?;
            print_tree(&store);
        }
        Command::Keys { chord, .. } => {
            let event: KeyEvent = chord.parse()?;
            let mut dropdown = Dropdown::new();
            if menu.handle_key(&event, &mut store, &registry, &mut dropdown)? {
                println!("{chord}: handled");
            } else {
                println!("{chord}: no binding");
            }
            print_tree(&store);
        }
    }
    Ok(())
}

/// Map positional selection arguments to block ids.
fn resolve_target(store: &MemoryStore, target: &Target) -> Result<MenuProps> {
    let root: Option<BlockId> = match target.root {
        Some(position) => Some(
            *store
                .order(None)
                .get(position)
                .with_context(|| format!("no block at root position {position}"))?,
        ),
        None => None,
    };

    let siblings = store.order(root);
    let mut ids = Vec::with_capacity(target.select.len());
    for position in &target.select {
        match siblings.get(*position) {
            Some(id) => ids.push(*id),
            None => bail!("no block at position {position} (container has {})", siblings.len()),
        }
    }
    Ok(MenuProps::new(ids, root)?)
}

fn print_menu(menu: &BlockSettingsMenu, store: &mut MemoryStore, registry: &BlockRegistry) -> Result<()> {
    let mut dropdown = Dropdown::new();
    println!("{}", tree::format_toggle(&menu.render_toggle(&dropdown)));

    menu.click_toggle(store, &mut dropdown)?;
    let view = menu.render(&*store, registry, &dropdown);
    println!("{}", tree::format_toggle(&view.toggle));
    for line in tree::format_entries(view.entries.as_deref().unwrap_or_default()) {
        println!("{line}");
    }
    Ok(())
}

fn run_action(menu: &BlockSettingsMenu, action: &str, store: &mut MemoryStore, registry: &BlockRegistry) -> Result<()> {
    let mut dropdown = Dropdown::new();
    match action.to_ascii_lowercase().as_str() {
        "duplicate" => menu.execute(&MenuCommand::Duplicate, store, registry, &mut dropdown)?,
        "remove" => menu.execute(&MenuCommand::Remove, store, registry, &mut dropdown)?,
        "toggle" => {
            menu.click_toggle(store, &mut dropdown)?;
            println!("{}", tree::format_toggle(&menu.render_toggle(&dropdown)));
        }
        _ => {
            menu.click_toggle(store, &mut dropdown)?;
            let entries = menu.render_content(&*store, registry);
            let item = entries
                .iter()
                .filter_map(|e| e.item())
                .find(|i| i.label.eq_ignore_ascii_case(action))
                .with_context(|| format!("no menu item labelled '{action}'"))?
                .clone();
            menu.activate(&item, store, registry, &mut dropdown)?;
            tracing::info!(label = %item.label, open = dropdown.is_open(), "activated");
        }
    }
    Ok(())
}

fn print_tree(store: &MemoryStore) {
    for line in tree::format_block_tree(store) {
        println!("{line}");
    }
}
