//! End-to-end menu scenarios against a call-recording store.

use tessera_blocks::{BlockRegistry, names};
use tessera_menu::{
    BlockSettingsMenu, Dropdown, FillItem, FillProps, KeyEvent, MenuCommand, MenuConfig, MenuEntry,
    MenuError, MenuItem, MenuProps, Platform, SlotFill,
};
use tessera_store::{EditorStore, MemoryStore, SelectionState, StoreError};
use tessera_types::{BlockId, BlockMode, BlockRecord, ReusableBlock, ReusableId, TemplateLock};

/// Store writes observed by [`RecordingStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Insert { ids: Vec<BlockId>, index: usize, root: Option<BlockId> },
    Remove(Vec<BlockId>),
    Select(BlockId),
    MultiSelect(BlockId, BlockId),
    ToggleMode(BlockId),
    Replace(Vec<BlockId>),
    ToReusable(BlockId),
    ToStatic(BlockId),
    DeleteReusable(ReusableId),
}

/// Forwards to a [`MemoryStore`], logging every write.
struct RecordingStore {
    inner: MemoryStore,
    calls: Vec<Call>,
}

impl RecordingStore {
    fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl EditorStore for RecordingStore {
    fn get_block(&self, id: BlockId) -> Option<BlockRecord> {
        self.inner.get_block(id)
    }

    fn get_block_index(&self, id: BlockId, root: Option<BlockId>) -> Option<usize> {
        self.inner.get_block_index(id, root)
    }

    fn get_block_root(&self, id: BlockId) -> Option<Option<BlockId>> {
        self.inner.get_block_root(id)
    }

    fn get_template_lock(&self, root: Option<BlockId>) -> Option<TemplateLock> {
        self.inner.get_template_lock(root)
    }

    fn get_block_mode(&self, id: BlockId) -> BlockMode {
        self.inner.get_block_mode(id)
    }

    fn get_reusable_block(&self, id: ReusableId) -> Option<ReusableBlock> {
        self.inner.get_reusable_block(id)
    }

    fn insert_blocks(&mut self, blocks: Vec<BlockRecord>, index: usize, root: Option<BlockId>) -> tessera_store::Result<()> {
        self.calls.push(Call::Insert {
            ids: blocks.iter().map(|b| b.id).collect(),
            index,
            root,
        });
        self.inner.insert_blocks(blocks, index, root)
    }

    fn remove_blocks(&mut self, ids: &[BlockId]) -> tessera_store::Result<()> {
        self.calls.push(Call::Remove(ids.to_vec()));
        self.inner.remove_blocks(ids)
    }

    fn select_block(&mut self, id: BlockId) -> tessera_store::Result<()> {
        self.calls.push(Call::Select(id));
        self.inner.select_block(id)
    }

    fn multi_select(&mut self, start: BlockId, end: BlockId) -> tessera_store::Result<()> {
        self.calls.push(Call::MultiSelect(start, end));
        self.inner.multi_select(start, end)
    }

    fn toggle_block_mode(&mut self, id: BlockId) -> tessera_store::Result<()> {
        self.calls.push(Call::ToggleMode(id));
        self.inner.toggle_block_mode(id)
    }

    fn replace_blocks(&mut self, ids: &[BlockId], blocks: Vec<BlockRecord>) -> tessera_store::Result<()> {
        self.calls.push(Call::Replace(ids.to_vec()));
        self.inner.replace_blocks(ids, blocks)
    }

    fn convert_block_to_reusable(&mut self, id: BlockId) -> tessera_store::Result<ReusableId> {
        self.calls.push(Call::ToReusable(id));
        self.inner.convert_block_to_reusable(id)
    }

    fn convert_block_to_static(&mut self, id: BlockId) -> tessera_store::Result<()> {
        self.calls.push(Call::ToStatic(id));
        self.inner.convert_block_to_static(id)
    }

    fn delete_reusable_block(&mut self, id: ReusableId) -> tessera_store::Result<()> {
        self.calls.push(Call::DeleteReusable(id));
        self.inner.delete_reusable_block(id)
    }
}

// ============================================================================
// Fixtures
// ============================================================================

fn config() -> MenuConfig {
    MenuConfig {
        platform: Platform::Other,
        ..MenuConfig::default()
    }
}

fn doc(block_names: &[&str]) -> (RecordingStore, Vec<BlockId>) {
    let blocks: Vec<BlockRecord> = block_names.iter().map(|n| BlockRecord::new(*n)).collect();
    let ids = blocks.iter().map(|b| b.id).collect();
    (RecordingStore::new(MemoryStore::from_blocks(blocks).unwrap()), ids)
}

fn menu_for(ids: &[BlockId]) -> BlockSettingsMenu {
    let props = MenuProps::new(ids, None).unwrap();
    BlockSettingsMenu::new(props, &config()).unwrap()
}

fn labels(entries: &[MenuEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.item().map_or_else(|| "---".to_string(), |i| i.label.clone()))
        .collect()
}

fn find(entries: &[MenuEntry], label: &str) -> Option<MenuItem> {
    entries
        .iter()
        .filter_map(MenuEntry::item)
        .find(|i| i.label == label)
        .cloned()
}

// ============================================================================
// Capability and lock guards
// ============================================================================

#[test]
fn unsupported_block_disables_duplicate() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH, names::MORE]);
    let menu = menu_for(&ids);

    let state = menu.binding_state(&store, &registry);
    assert!(!state.can_duplicate);

    let entries = menu.render_content(&store, &registry);
    assert!(find(&entries, "Duplicate").is_none());
    assert!(find(&entries, "Remove Block").is_some());

    menu.on_duplicate(&mut store, &registry).unwrap();
    assert!(store.calls.is_empty());
}

#[test]
fn locked_container_hides_structural_items() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH]);
    store.inner.set_template_lock(None, Some(TemplateLock::Insert)).unwrap();
    let menu = menu_for(&ids);

    let entries = menu.render_content(&store, &registry);
    assert!(find(&entries, "Duplicate").is_none());
    assert!(find(&entries, "Remove Block").is_none());

    menu.on_duplicate(&mut store, &registry).unwrap();
    assert_eq!(store.count(|c| matches!(c, Call::Insert { .. })), 0);
}

#[test]
fn remove_ignores_can_duplicate() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH, names::MORE, names::HEADING]);
    let selected = vec![ids[0], ids[1]];
    let menu = menu_for(&selected);
    let mut dropdown = Dropdown::opened();

    assert!(!menu.binding_state(&store, &registry).can_duplicate);
    let remove = find(&menu.render_content(&store, &registry), "Remove Block").unwrap();
    menu.activate(&remove, &mut store, &registry, &mut dropdown).unwrap();

    assert_eq!(store.calls, vec![Call::Remove(selected)]);
    assert_eq!(store.inner.order(None), &[ids[2]]);
}

#[test]
fn remove_in_locked_container_surfaces_store_error() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH]);
    store.inner.set_template_lock(None, Some(TemplateLock::All)).unwrap();
    let menu = menu_for(&ids);

    let err = menu
        .execute(&MenuCommand::Remove, &mut store, &registry, &mut Dropdown::new())
        .unwrap_err();
    assert!(matches!(err, MenuError::Store(StoreError::Locked { .. })));
    assert_eq!(store.calls.len(), 1);
    assert_eq!(store.inner.block_count(), 1);
}

// ============================================================================
// Duplicate
// ============================================================================

#[test]
fn duplicate_single_block_inserts_after_without_multi_select() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH]);
    let menu = menu_for(&ids);

    assert_eq!(
        labels(&menu.render_content(&store, &registry)),
        vec!["Edit as HTML", "Duplicate", "Add to Reusable Blocks", "---", "Remove Block"]
    );

    menu.on_duplicate(&mut store, &registry).unwrap();

    assert_eq!(store.calls.len(), 1);
    let Call::Insert { ids: inserted, index, root } = &store.calls[0] else {
        panic!("expected insert, got {:?}", store.calls[0]);
    };
    assert_eq!(inserted.len(), 1);
    assert_ne!(inserted[0], ids[0]);
    assert_eq!(*index, 1);
    assert_eq!(*root, None);
    assert_eq!(store.count(|c| matches!(c, Call::MultiSelect(..))), 0);
    assert_eq!(store.inner.selection(), SelectionState::Single(inserted[0]));
}

#[test]
fn duplicate_range_after_last_selected_then_multi_selects() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::HEADING, names::PARAGRAPH, names::PARAGRAPH, names::GROUP]);
    let selected = vec![ids[1], ids[2]];
    let menu = menu_for(&selected);

    menu.on_duplicate(&mut store, &registry).unwrap();

    assert_eq!(store.calls.len(), 2);
    let Call::Insert { ids: clones, index, .. } = store.calls[0].clone() else {
        panic!("expected insert first");
    };
    assert_eq!(clones.len(), 2);
    assert_eq!(index, 3);
    assert_eq!(store.calls[1], Call::MultiSelect(clones[0], clones[1]));

    let order = store.inner.order(None);
    assert_eq!(order, &[ids[0], ids[1], ids[2], clones[0], clones[1], ids[3]]);
    assert_eq!(
        store.inner.selection(),
        SelectionState::Range {
            start: clones[0],
            end: clones[1]
        }
    );
}

#[test]
fn duplicate_keeps_nested_blocks_with_fresh_ids() {
    let registry = BlockRegistry::with_core_types();
    let inner = BlockRecord::new(names::PARAGRAPH).with_attribute("content", "nested");
    let inner_id = inner.id;
    let group = BlockRecord::new(names::GROUP).with_inner_blocks(vec![inner]);
    let group_id = group.id;
    let mut store = RecordingStore::new(MemoryStore::from_blocks(vec![group]).unwrap());
    let menu = menu_for(&[group_id]);

    menu.on_duplicate(&mut store, &registry).unwrap();

    let copy = store.inner.get_block(store.inner.order(None)[1]).unwrap();
    assert_eq!(copy.inner_blocks.len(), 1);
    assert_ne!(copy.inner_blocks[0].id, inner_id);
    assert_eq!(copy.inner_blocks[0].attribute_str("content"), Some("nested"));
}

#[test]
fn duplicate_inside_container_uses_root() {
    let registry = BlockRegistry::with_core_types();
    let child = BlockRecord::new(names::PARAGRAPH);
    let child_id = child.id;
    let group = BlockRecord::new(names::GROUP).with_inner_blocks(vec![child]);
    let group_id = group.id;
    let mut store = RecordingStore::new(MemoryStore::from_blocks(vec![group]).unwrap());
    let props = MenuProps::new(child_id, Some(group_id)).unwrap();
    let menu = BlockSettingsMenu::new(props, &config()).unwrap();

    menu.on_duplicate(&mut store, &registry).unwrap();

    assert!(matches!(
        store.calls[0],
        Call::Insert { index: 1, root: Some(root), .. } if root == group_id
    ));
    assert_eq!(store.inner.order(Some(group_id)).len(), 2);
}

// ============================================================================
// Trigger
// ============================================================================

#[test]
fn toggle_click_selects_single_block_before_opening() {
    let (mut store, ids) = doc(&[names::PARAGRAPH, names::PARAGRAPH]);
    let menu = menu_for(&[ids[1]]);
    let mut dropdown = Dropdown::new();

    menu.click_toggle(&mut store, &mut dropdown).unwrap();

    assert_eq!(store.calls, vec![Call::Select(ids[1])]);
    assert!(dropdown.is_open());
    assert_eq!(menu.render_toggle(&dropdown).label, "Hide Options");

    menu.click_toggle(&mut store, &mut dropdown).unwrap();
    assert!(!dropdown.is_open());
    assert_eq!(store.count(|c| matches!(c, Call::Select(_))), 2);
}

#[test]
fn toggle_click_on_stale_block_still_opens() {
    let (mut store, _) = doc(&[names::PARAGRAPH]);
    let stale = BlockId::new();
    let menu = menu_for(&[stale]);
    let registry = BlockRegistry::with_core_types();
    let mut dropdown = Dropdown::new();

    let err = menu.click_toggle(&mut store, &mut dropdown).unwrap_err();
    assert!(matches!(err, MenuError::Store(StoreError::BlockNotFound(id)) if id == stale));
    assert!(dropdown.is_open());
    assert_eq!(store.calls, vec![Call::Select(stale)]);

    let entries = menu.render(&store, &registry, &dropdown).entries.unwrap();
    assert_eq!(labels(&entries), vec!["---", "Remove Block"]);
}

#[test]
fn toggle_click_with_many_blocks_does_not_select() {
    let (mut store, ids) = doc(&[names::PARAGRAPH, names::PARAGRAPH]);
    let menu = menu_for(&ids);
    let mut dropdown = Dropdown::new();

    menu.click_toggle(&mut store, &mut dropdown).unwrap();

    assert!(store.calls.is_empty());
    assert!(dropdown.is_open());
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn shortcuts_fire_while_menu_closed() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH, names::HEADING]);
    let menu = menu_for(&[ids[0]]);
    let mut dropdown = Dropdown::new();

    let duplicate: KeyEvent = "ctrl+shift+d".parse().unwrap();
    assert!(menu.handle_key(&duplicate, &mut store, &registry, &mut dropdown).unwrap());
    assert_eq!(store.count(|c| matches!(c, Call::Insert { index: 1, .. })), 1);
    assert!(!dropdown.is_open());

    let remove: KeyEvent = "ctrl+alt+backspace".parse().unwrap();
    assert!(menu.handle_key(&remove, &mut store, &registry, &mut dropdown).unwrap());
    assert!(store.calls.contains(&Call::Remove(vec![ids[0]])));
    assert_eq!(store.inner.block_count(), 2);
}

#[test]
fn duplicate_shortcut_respects_guard() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::MORE]);
    let menu = menu_for(&ids);

    let duplicate: KeyEvent = "ctrl+shift+d".parse().unwrap();
    assert!(menu.handle_key(&duplicate, &mut store, &registry, &mut Dropdown::new()).unwrap());
    assert!(store.calls.is_empty());
}

// ============================================================================
// Extension slot
// ============================================================================

struct CopyAnchor;

impl SlotFill for CopyAnchor {
    fn items(&self, _selection: &tessera_types::Selection, _store: &dyn EditorStore) -> Vec<FillItem> {
        vec![FillItem::new("Copy Anchor", "copy").with_icon("admin-links")]
    }

    fn activate(&self, action: &str, mut props: FillProps<'_>, store: &mut dyn EditorStore) -> tessera_menu::Result<()> {
        assert_eq!(action, "copy");
        store.select_block(props.selection.first())?;
        props.on_close.call();
        Ok(())
    }
}

#[test]
fn fills_render_first_and_receive_on_close() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH]);
    let mut menu = menu_for(&ids);
    menu.slots_mut().register("copy-anchor", Box::new(CopyAnchor));
    let mut dropdown = Dropdown::opened();

    let entries = menu.render_content(&store, &registry);
    let MenuEntry::Fill(fill) = &entries[0] else {
        panic!("fill should render first, got {:?}", entries[0]);
    };
    assert_eq!(fill.label, "Copy Anchor");
    assert_eq!(labels(&entries)[1], "Edit as HTML");

    menu.activate(fill, &mut store, &registry, &mut dropdown).unwrap();
    assert_eq!(store.calls, vec![Call::Select(ids[0])]);
    assert!(!dropdown.is_open());
}

// ============================================================================
// Single-block collaborators
// ============================================================================

#[test]
fn reusable_round_trip_through_menu() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH]);
    let menu = menu_for(&ids);
    let mut dropdown = Dropdown::opened();

    let add = find(&menu.render_content(&store, &registry), "Add to Reusable Blocks").unwrap();
    assert!(add.closes_menu);
    menu.activate(&add, &mut store, &registry, &mut dropdown).unwrap();
    assert!(!dropdown.is_open());
    assert_eq!(store.calls, vec![Call::ToReusable(ids[0])]);

    let instance = store.inner.order(None)[0];
    let menu = menu_for(&[instance]);
    let entries = menu.render_content(&store, &registry);
    assert_eq!(
        labels(&entries),
        vec![
            "Duplicate",
            "Convert to Regular Block",
            "---",
            "Remove from Reusable Blocks",
            "Remove Block"
        ]
    );

    let delete = find(&entries, "Remove from Reusable Blocks").unwrap();
    dropdown.open();
    menu.activate(&delete, &mut store, &registry, &mut dropdown).unwrap();
    assert!(matches!(store.calls.last(), Some(Call::DeleteReusable(_))));
    assert!(store.inner.is_empty());
}

#[test]
fn convert_freeform_replaces_block() {
    let registry = BlockRegistry::with_core_types();
    let freeform = BlockRecord::new(names::FREEFORM).with_attribute("content", "first\n\nsecond");
    let id = freeform.id;
    let mut store = RecordingStore::new(MemoryStore::from_blocks(vec![freeform]).unwrap());
    let menu = menu_for(&[id]);
    let mut dropdown = Dropdown::opened();

    let convert = find(&menu.render_content(&store, &registry), "Convert to Blocks").unwrap();
    menu.activate(&convert, &mut store, &registry, &mut dropdown).unwrap();

    assert_eq!(store.calls, vec![Call::Replace(vec![id])]);
    let blocks = store.inner.blocks(None);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].attribute_str("content"), Some("first"));
    assert!(!dropdown.is_open());
}

#[test]
fn duplicate_and_remove_items_leave_popover_alone() {
    let registry = BlockRegistry::with_core_types();
    let (mut store, ids) = doc(&[names::PARAGRAPH]);
    let menu = menu_for(&ids);
    let mut dropdown = Dropdown::opened();

    let duplicate = find(&menu.render_content(&store, &registry), "Duplicate").unwrap();
    assert_eq!(duplicate.shortcut.as_deref(), Some("Ctrl+Shift+D"));
    menu.activate(&duplicate, &mut store, &registry, &mut dropdown).unwrap();
    assert!(dropdown.is_open());
    assert_eq!(store.inner.block_count(), 2);
}
