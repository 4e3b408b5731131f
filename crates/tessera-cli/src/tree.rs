//! Document and menu rendering as plain text lines.

use tessera_menu::{MenuEntry, ToggleView};
use tessera_store::{EditorStore, MemoryStore};
use tessera_types::{BlockId, BlockMode, BlockRecord};

/// Format the document as an ASCII tree, one block per line.
///
/// Selected blocks are marked with `*`, locked containers with their lock.
pub fn format_block_tree(store: &MemoryStore) -> Vec<String> {
    let selected = store.selected_block_ids();
    let mut lines = Vec::new();
    if let Some(lock) = store.get_template_lock(None) {
        lines.push(format!("(root, locked: {lock})"));
    }
    let blocks = store.blocks(None);
    for (idx, block) in blocks.iter().enumerate() {
        format_block(store, block, idx, "", idx == blocks.len() - 1, &selected, &mut lines);
    }
    lines
}

fn format_block(
    store: &MemoryStore,
    block: &BlockRecord,
    position: usize,
    prefix: &str,
    is_last: bool,
    selected: &[BlockId],
    lines: &mut Vec<String>,
) {
    let connector = if is_last { "└─ " } else { "├─ " };
    let marker = if selected.contains(&block.id) { "*" } else { " " };

    let mut line = format!("{prefix}{connector}{marker}{position} {} {}", block.name, block.id.short());
    if store.get_block_mode(block.id) == BlockMode::Html {
        line.push_str(" [html]");
    }
    if let Some(lock) = store.get_template_lock(Some(block.id)) {
        line.push_str(&format!(" [locked: {lock}]"));
    }
    if let Some(content) = block.attribute_str("content") {
        line.push_str(&format!(" \"{}\"", summarize(content, 40)));
    }
    lines.push(line);

    let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
    for (idx, child) in block.inner_blocks.iter().enumerate() {
        let last = idx == block.inner_blocks.len() - 1;
        format_block(store, child, idx, &child_prefix, last, selected, lines);
    }
}

fn summarize(content: &str, max_chars: usize) -> String {
    let flat = content.replace('\n', " ");
    if flat.chars().count() <= max_chars {
        return flat;
    }
    let truncated: String = flat.chars().take(max_chars).collect();
    format!("{truncated}…")
}

pub fn format_toggle(toggle: &ToggleView) -> String {
    let visibility = if toggle.is_visible { "visible" } else { "hidden" };
    format!("[{}] {} ({visibility})", toggle.icon, toggle.label)
}

/// Format menu entries, one per line, shortcuts right-aligned.
pub fn format_entries(entries: &[MenuEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| match entry {
            MenuEntry::Separator => "  ────────".to_string(),
            MenuEntry::Fill(item) | MenuEntry::Item(item) => {
                let icon = item.icon.as_deref().unwrap_or("-");
                let tag = if matches!(entry, MenuEntry::Fill(_)) { "+" } else { " " };
                let mut line = format!(" {tag}{:<28} [{icon}]", item.label);
                if let Some(shortcut) = &item.shortcut {
                    line.push_str(&format!("  {shortcut}"));
                }
                line
            }
        })
        .collect()
}
