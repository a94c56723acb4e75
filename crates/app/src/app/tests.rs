use std::fs;
use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};
use tempfile::TempDir;

use noteit_buffer::{TextWidget, FOUND_TAG};
use noteit_clipboard::{ClipboardProvider, MemoryClipboard};
use noteit_config::Config;
use noteit_keyboard::{toolbar, Action};
use noteit_layout::arrange;
use noteit_modal::{ActiveModal, FileDialogModal};
use noteit_ui_render::{screen_layout, toolbar_layout};

use super::App;
use crate::state::{Continuation, PendingAction, READY};

fn app() -> App {
    App::new(Config::default(), Box::new(MemoryClipboard::new()))
}

fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    app.handle_key_event(KeyEvent::new(code, modifiers)).unwrap();
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), KeyModifiers::NONE);
    }
}

fn click(app: &mut App, column: u16, row: u16) {
    app.handle_mouse_event(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
    .unwrap();
}

fn text(app: &App) -> String {
    app.state.active_panel().buffer.text()
}

fn modal_message(app: &App) -> Option<String> {
    match app.state.active_modal.as_ref()? {
        ActiveModal::Info(m) => Some(m.message().to_string()),
        ActiveModal::Confirm(m) => Some(m.message().to_string()),
        _ => None,
    }
}

/// Swap the picker the app opened for one rooted in `dir`.
fn retarget_picker(app: &mut App, dialog: FileDialogModal) {
    assert!(matches!(app.state.active_modal, Some(ActiveModal::FileDialog(_))));
    app.state.active_modal = Some(ActiveModal::FileDialog(Box::new(dialog)));
}

// ---- search ----

#[test]
fn test_find_tags_every_match_and_moves_cursor() {
    let mut app = app();
    let buffer = &mut app.state.active_panel_mut().buffer;
    buffer.set_text("XabcXabcXabc");
    buffer.move_doc_end(false);

    assert_eq!(app.find_text("abc"), 3);

    let buffer = &app.state.active_panel().buffer;
    assert_eq!(buffer.tag_ranges(FOUND_TAG), &[1..4, 5..8, 9..12]);
    assert_eq!(buffer.cursor(), 1);
    assert_eq!(buffer.pending_see(), Some(1));
    assert_eq!(app.state.status_message(), "Found 3 match(es)");
}

#[test]
fn test_find_from_start_of_text() {
    let mut app = app();
    app.state.active_panel_mut().buffer.set_text("abcXabcXabc");

    assert_eq!(app.find_text("abc"), 3);
    let buffer = &app.state.active_panel().buffer;
    assert_eq!(buffer.tag_ranges(FOUND_TAG), &[0..3, 4..7, 8..11]);
    assert_eq!(buffer.cursor(), 0);
}

#[test]
fn test_find_matches_do_not_overlap() {
    let mut app = app();
    app.state.active_panel_mut().buffer.set_text("aaaa");

    assert_eq!(app.find_text("aa"), 2);
    assert_eq!(
        app.state.active_panel().buffer.tag_ranges(FOUND_TAG),
        &[0..2, 2..4]
    );
}

#[test]
fn test_find_replaces_previous_highlights() {
    let mut app = app();
    app.state.active_panel_mut().buffer.set_text("one two one");

    app.find_text("one");
    assert_eq!(app.find_text("two"), 1);
    assert_eq!(
        app.state.active_panel().buffer.tag_ranges(FOUND_TAG),
        &[4..7]
    );
    assert_eq!(app.find_text("zzz"), 0);
    assert!(app.state.active_panel().buffer.tag_ranges(FOUND_TAG).is_empty());
}

#[test]
fn test_find_dialog_stays_open_between_searches() {
    let mut app = app();
    app.state.active_panel_mut().buffer.set_text("ab ab");

    press(&mut app, KeyCode::Char('f'), KeyModifiers::CONTROL);
    type_text(&mut app, "ab");
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

    match app.state.active_modal.as_ref() {
        Some(ActiveModal::Find(m)) => assert_eq!(m.feedback(), Some("Found 2 match(es)")),
        other => panic!("find dialog closed: {other:?}"),
    }
    assert_eq!(app.state.active_panel().buffer.text(), "ab ab");

    press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
    assert!(!app.state.has_modal());
    assert!(app.state.pending_action.is_none());
}

// ---- dirty flag and title ----

#[test]
fn test_dirty_flag_and_title() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    assert_eq!(app.window_title(), "Untitled - Simply Note It");

    type_text(&mut app, "hi");
    assert!(app.state.active_panel().document.dirty);
    assert_eq!(app.window_title(), "Untitled* - Simply Note It");

    assert!(app.write_active(dir.path().join("note.txt"), true));
    assert!(!app.state.active_panel().document.dirty);
    assert_eq!(app.window_title(), "note.txt - Simply Note It");

    press(&mut app, KeyCode::Backspace, KeyModifiers::NONE);
    assert_eq!(app.window_title(), "note.txt* - Simply Note It");
}

#[test]
fn test_title_shows_panel_position() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    app.execute(Action::SplitHorizontal);
    app.execute(Action::SplitVertical);
    app.execute(Action::PreviousPanel);
    assert_eq!(app.state.panels.active_index(), 1);

    assert!(app.write_active(dir.path().join("note.txt"), false));
    type_text(&mut app, "x");
    assert_eq!(app.window_title(), "note.txt* - Simply Note It (Panel 2/3)");
}

#[test]
fn test_clipboard_and_history_edits_mark_dirty() {
    let mut app = app();
    app.state.clipboard.set_text("pasted").unwrap();

    press(&mut app, KeyCode::Char('v'), KeyModifiers::CONTROL);
    assert_eq!(text(&app), "pasted");
    assert!(app.state.active_panel().document.dirty);

    app.state.active_panel_mut().mark_clean();
    press(&mut app, KeyCode::Char('z'), KeyModifiers::CONTROL);
    assert_eq!(text(&app), "");
    assert!(app.state.active_panel().document.dirty);

    app.state.active_panel_mut().mark_clean();
    press(&mut app, KeyCode::Char('a'), KeyModifiers::CONTROL);
    assert!(!app.state.active_panel().document.dirty);
}

#[test]
fn test_empty_history_is_ignored() {
    let mut app = app();
    app.execute(Action::Undo);
    app.execute(Action::Redo);
    assert!(!app.state.has_modal());
    assert!(!app.state.active_panel().document.dirty);
}

#[test]
fn test_cut_copy_select_all() {
    let mut app = app();
    type_text(&mut app, "hello");
    app.execute(Action::SelectAll);
    assert_eq!(app.state.active_panel().buffer.cursor(), 0);

    app.execute(Action::Copy);
    assert_eq!(app.state.clipboard.get_text().as_deref(), Some("hello"));

    app.execute(Action::Cut);
    assert_eq!(text(&app), "");
    app.execute(Action::Paste);
    assert_eq!(text(&app), "hello");
}

// ---- panels ----

#[test]
fn test_split_limit_shows_info_dialog() {
    let mut app = app();
    for _ in 0..3 {
        app.execute(Action::SplitVertical);
    }
    assert_eq!(app.state.panels.len(), 4);
    assert_eq!(app.state.panels.active_index(), 3);
    assert_eq!(app.state.status_message(), "Split vertically");

    app.execute(Action::SplitHorizontal);
    assert_eq!(app.state.panels.len(), 4);
    assert_eq!(
        modal_message(&app).as_deref(),
        Some("Maximum of 4 panels allowed")
    );
}

#[test]
fn test_split_gives_each_panel_its_own_buffer() {
    let mut app = app();
    type_text(&mut app, "first");
    app.execute(Action::SplitHorizontal);
    assert_eq!(app.state.status_message(), "Split horizontally");
    assert_eq!(text(&app), "");

    type_text(&mut app, "second");
    assert_eq!(app.state.panels.get(0).unwrap().buffer.text(), "first");
    assert_eq!(app.state.panels.get(1).unwrap().buffer.text(), "second");
}

#[test]
fn test_close_split_with_single_panel() {
    let mut app = app();
    app.execute(Action::CloseSplit);
    assert_eq!(modal_message(&app).as_deref(), Some("No split to close"));
    assert_eq!(app.state.status_message(), READY);
}

#[test]
fn test_close_split_removes_focused_panel() {
    let mut app = app();
    app.execute(Action::SplitVertical);
    app.execute(Action::SplitVertical);
    app.state.panels.set_active(1);

    app.execute(Action::CloseSplit);
    assert_eq!(app.state.panels.len(), 2);
    assert_eq!(app.state.panels.active_index(), 1);
    assert_eq!(app.state.status_message(), "Split closed");
}

#[test]
fn test_close_split_keeps_first_panel() {
    let mut app = app();
    app.execute(Action::SplitVertical);
    app.state.panels.set_active(0);

    app.execute(Action::CloseSplit);
    assert_eq!(app.state.panels.len(), 2);
    assert_eq!(app.state.panels.active_index(), 0);
    assert_eq!(app.state.status_message(), "Split closed");
    assert!(!app.state.has_modal());
}

#[test]
fn test_panel_cycling() {
    let mut app = app();
    app.execute(Action::NextPanel);
    assert_eq!(app.state.status_message(), READY);

    app.execute(Action::SplitVertical);
    app.execute(Action::SplitVertical);
    press(&mut app, KeyCode::Tab, KeyModifiers::CONTROL);
    assert_eq!(app.state.panels.active_index(), 0);
    assert_eq!(app.state.status_message(), "Switched to panel 1");

    press(&mut app, KeyCode::BackTab, KeyModifiers::CONTROL | KeyModifiers::SHIFT);
    assert_eq!(app.state.panels.active_index(), 2);
    assert_eq!(app.state.status_message(), "Switched to panel 3");
}

#[test]
fn test_split_shortcut_with_uppercase_char() {
    let mut app = app();
    press(&mut app, KeyCode::Char('H'), KeyModifiers::CONTROL | KeyModifiers::SHIFT);
    assert_eq!(app.state.panels.len(), 2);
    assert_eq!(text(&app), "");
}

// ---- files ----

#[test]
fn test_new_file_on_clean_document() {
    let mut app = app();
    app.execute(Action::NewFile);
    assert!(!app.state.has_modal());
    assert_eq!(app.state.status_message(), "New file created");
}

#[test]
fn test_new_file_discarding_changes() {
    let mut app = app();
    type_text(&mut app, "draft");

    app.execute(Action::NewFile);
    assert_eq!(modal_message(&app).as_deref(), Some("Save current file?"));
    press(&mut app, KeyCode::Char('n'), KeyModifiers::NONE);

    assert_eq!(text(&app), "");
    assert!(!app.state.active_panel().document.dirty);
    assert!(!app.state.active_panel().buffer.can_undo());
    assert_eq!(app.state.status_message(), "New file created");
}

#[test]
fn test_new_file_escape_aborts() {
    let mut app = app();
    type_text(&mut app, "draft");

    app.execute(Action::NewFile);
    press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(text(&app), "draft");
    assert!(app.state.active_panel().document.dirty);
    assert!(!app.state.has_modal());
}

#[test]
fn test_new_file_saving_bound_document_first() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("keep.txt");
    let mut app = app();
    app.write_active(path.clone(), true);
    type_text(&mut app, "kept");

    app.execute(Action::NewFile);
    press(&mut app, KeyCode::Char('y'), KeyModifiers::NONE);

    assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
    assert_eq!(text(&app), "");
    assert!(app.state.active_panel().file_path().is_none());
}

#[test]
fn test_open_through_picker() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "line one\r\nline two").unwrap();
    let mut app = app();

    app.execute(Action::OpenFile);
    assert_eq!(app.state.pending_action, Some(PendingAction::OpenFile));
    retarget_picker(&mut app, FileDialogModal::open(dir.path()));
    type_text(&mut app, "a.txt");
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

    assert!(!app.state.has_modal());
    assert_eq!(text(&app), "line one\r\nline two");
    assert_eq!(app.state.active_panel().buffer.cursor(), 0);
    assert!(!app.state.active_panel().document.dirty);
    assert_eq!(app.state.status_message(), "Opened: a.txt");
    assert_eq!(app.window_title(), "a.txt - Simply Note It");
}

#[test]
fn test_open_cancel_is_noop() {
    let mut app = app();
    type_text(&mut app, "x");
    app.state.active_panel_mut().mark_clean();

    app.execute(Action::OpenFile);
    press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
    assert_eq!(text(&app), "x");
    assert!(!app.state.has_modal());
}

#[test]
fn test_open_failure_shows_error_and_keeps_state() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    type_text(&mut app, "unchanged");

    assert!(!app.load_into_active(dir.path().join("missing.txt")));
    let message = modal_message(&app).unwrap();
    assert!(message.starts_with("Could not open file: "), "{message}");
    assert_eq!(text(&app), "unchanged");
    assert!(app.state.active_panel().file_path().is_none());
}

#[test]
fn test_save_untitled_opens_picker_and_appends_extension() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    type_text(&mut app, "body");

    press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert_eq!(
        app.state.pending_action,
        Some(PendingAction::SaveAs { then: None })
    );
    retarget_picker(&mut app, FileDialogModal::save(dir.path(), None));
    type_text(&mut app, "notes");
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

    let written = dir.path().join("notes.txt");
    assert_eq!(fs::read_to_string(&written).unwrap(), "body");
    assert_eq!(app.state.status_message(), "Saved as: notes.txt");
    assert!(!app.state.active_panel().document.dirty);
    assert_eq!(app.window_title(), "notes.txt - Simply Note It");
}

#[test]
fn test_save_bound_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doc.py");
    let mut app = app();
    app.write_active(path.clone(), true);
    type_text(&mut app, "print()");

    press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL);
    assert!(!app.state.has_modal());
    assert_eq!(fs::read_to_string(&path).unwrap(), "print()");
    assert_eq!(app.state.status_message(), "Saved: doc.py");
}

#[test]
fn test_saving_twice_keeps_bytes_and_stays_clean() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("utf8.txt");
    let content = "héllo 日本語\r\n🎉\rx\n";
    fs::write(&path, content).unwrap();

    let mut app = app();
    assert!(app.load_into_active(path.clone()));
    assert_eq!(text(&app), content);

    app.execute(Action::SaveFile);
    app.execute(Action::SaveFile);

    assert!(!app.state.has_modal());
    assert_eq!(fs::read(&path).unwrap(), content.as_bytes());
    assert!(!app.state.active_panel().document.dirty);
    assert_eq!(app.state.status_message(), "Saved: utf8.txt");
}

#[test]
fn test_save_failure_keeps_dirty() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    type_text(&mut app, "x");

    assert!(!app.write_active(dir.path().join("no/such/dir.txt"), false));
    let message = modal_message(&app).unwrap();
    assert!(message.starts_with("Could not save file: "), "{message}");
    assert!(app.state.active_panel().document.dirty);
    assert!(app.state.active_panel().file_path().is_none());
}

// ---- exit ----

#[test]
fn test_exit_when_clean() {
    let mut app = app();
    press(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert!(app.state.should_quit);
}

#[test]
fn test_exit_without_saving() {
    let mut app = app();
    type_text(&mut app, "x");

    app.execute(Action::Exit);
    assert_eq!(modal_message(&app).as_deref(), Some("Save before exiting?"));
    press(&mut app, KeyCode::Char('n'), KeyModifiers::NONE);
    assert!(app.state.should_quit);
}

#[test]
fn test_exit_escape_stays() {
    let mut app = app();
    type_text(&mut app, "x");

    app.execute(Action::Exit);
    press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
    assert!(!app.state.should_quit);
    assert!(!app.state.has_modal());
}

#[test]
fn test_exit_save_cancelled_does_not_quit() {
    let mut app = app();
    type_text(&mut app, "x");

    app.execute(Action::Exit);
    press(&mut app, KeyCode::Char('y'), KeyModifiers::NONE);
    assert_eq!(
        app.state.pending_action,
        Some(PendingAction::SaveAs {
            then: Some(Continuation::Exit)
        })
    );

    press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
    assert!(!app.state.should_quit);
    assert!(app.state.active_panel().document.dirty);
}

#[test]
fn test_exit_after_saving_as() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    type_text(&mut app, "bye");

    app.execute(Action::Exit);
    press(&mut app, KeyCode::Char('y'), KeyModifiers::NONE);
    retarget_picker(&mut app, FileDialogModal::save(dir.path(), None));
    type_text(&mut app, "last.txt");
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

    assert_eq!(fs::read_to_string(dir.path().join("last.txt")).unwrap(), "bye");
    assert!(app.state.should_quit);
}

#[test]
fn test_exit_save_failure_does_not_quit() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    let path = dir.path().join("gone").join("a.txt");
    app.state.active_panel_mut().document.file_path = Some(path);
    type_text(&mut app, "x");

    app.execute(Action::Exit);
    press(&mut app, KeyCode::Char('y'), KeyModifiers::NONE);
    assert!(!app.state.should_quit);
    assert!(modal_message(&app).unwrap().starts_with("Could not save file: "));
}

// ---- font ----

#[test]
fn test_font_size_applies_to_all_panels() {
    let mut app = app();
    app.execute(Action::SplitVertical);
    app.execute(Action::ChangeFontSize(16));
    assert!(app.state.panels.iter().all(|p| p.font.size == 16));
    assert!(app.state.panels.iter().all(|p| p.font.family == "Consolas"));

    app.set_font_size_str("large");
    assert_eq!(app.state.font_size(), 16);
    app.set_font_size_str("18");
    assert_eq!(app.state.font_size(), 18);

    app.execute(Action::SplitVertical);
    assert_eq!(app.state.panels.active().font.size, 18);
}

#[test]
fn test_font_size_select() {
    let mut app = app();
    app.execute(Action::ChooseFontSize);
    assert!(matches!(app.state.active_modal, Some(ActiveModal::Select(_))));

    press(&mut app, KeyCode::Down, KeyModifiers::NONE);
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
    assert!(!app.state.has_modal());
    assert_eq!(app.state.font_size(), 14);
}

// ---- status ----

#[test]
fn test_status_reverts_on_tick() {
    let mut app = app();
    app.execute(Action::SplitVertical);
    assert!(!app.tick(Instant::now()));
    assert!(app.tick(Instant::now() + Duration::from_secs(4)));
    assert_eq!(app.state.status_message(), READY);
}

// ---- menu and mouse ----

#[test]
fn test_menu_keyboard_navigation() {
    let mut app = app();
    press(&mut app, KeyCode::F(10), KeyModifiers::NONE);
    assert_eq!(app.state.menu.open, Some(0));

    // View menu, first entry is Split Horizontal
    press(&mut app, KeyCode::Left, KeyModifiers::NONE);
    assert_eq!(app.state.menu.open, Some(2));
    press(&mut app, KeyCode::Down, KeyModifiers::NONE);
    press(&mut app, KeyCode::Enter, KeyModifiers::NONE);

    assert!(!app.state.is_menu_open());
    assert_eq!(app.state.panels.len(), 2);
}

#[test]
fn test_menu_escape_closes_without_typing() {
    let mut app = app();
    press(&mut app, KeyCode::F(10), KeyModifiers::NONE);
    press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
    assert!(!app.state.is_menu_open());
    assert_eq!(text(&app), "");
}

#[test]
fn test_toolbar_click_runs_action() {
    let mut app = app();
    let screen = screen_layout(Rect::new(0, 0, 80, 24));
    let layout = toolbar_layout(&toolbar(), screen.toolbar, 12);
    let (_, rect) = layout
        .iter()
        .find(|(item, _)| item.action() == Some(Action::SplitVertical))
        .copied()
        .unwrap();

    click(&mut app, rect.x, rect.y);
    assert_eq!(app.state.panels.len(), 2);
}

#[test]
fn test_click_focuses_panel() {
    let mut app = app();
    app.execute(Action::SplitVertical);
    app.state.panels.set_active(0);

    let screen = screen_layout(Rect::new(0, 0, 80, 24));
    let regions = arrange(2, screen.content);
    click(&mut app, regions[1].x + 2, regions[1].y + 1);
    assert_eq!(app.state.panels.active_index(), 1);
}

#[test]
fn test_render_shows_title_and_status() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();

    let buf = terminal.backend().buffer();
    let row = |y: u16| -> String { (0..80u16).map(|x| buf[(x, y)].symbol().to_string()).collect() };
    assert!(row(0).contains("Untitled - Simply Note It"));
    assert!(row(23).contains(READY));
}
