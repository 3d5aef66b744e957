//! End-to-end window lifecycle through the public manager API.

use ratatui::layout::Rect;
use term_desk::window::{WindowManager, WindowOptions};

fn spawn(wm: &mut WindowManager, title: &str) -> term_desk::window::WindowId {
    wm.create_window(title, 40, 12, WindowOptions::default(), |_, _| {})
}

#[test]
fn create_cascade_and_focus_protocol() {
    let mut wm = WindowManager::new();
    let a = spawn(&mut wm, "first");
    let b = spawn(&mut wm, "second");
    assert_eq!(wm.bounds(a).unwrap(), Rect::new(4, 2, 40, 12));
    assert_eq!(wm.bounds(b).unwrap(), Rect::new(6, 4, 40, 12));
    assert_eq!(wm.active_window(), Some(b));
    wm.focus_window(a);
    assert_eq!(wm.active_window(), Some(a));
    assert_eq!(wm.ordered_by_z(), vec![b, a]);
}

#[test]
fn minimize_restore_cycle_keeps_geometry() {
    let mut wm = WindowManager::new();
    let a = spawn(&mut wm, "win");
    let before = wm.bounds(a).unwrap();
    wm.minimize_window(a);
    assert!(wm.is_minimized(a));
    assert_eq!(wm.active_window(), None);
    wm.restore_window(a);
    assert_eq!(wm.bounds(a).unwrap(), before);
    assert_eq!(wm.active_window(), Some(a));
}

#[test]
fn maximize_survives_a_minimize_round_trip() {
    let mut wm = WindowManager::new();
    let a = spawn(&mut wm, "win");
    let normal = wm.bounds(a).unwrap();
    wm.maximize_window(a);
    wm.minimize_window(a);
    wm.restore_window(a);
    assert!(wm.is_maximized(a));
    assert_eq!(wm.bounds(a).unwrap(), wm.desktop_area());
    wm.maximize_window(a);
    assert_eq!(wm.bounds(a).unwrap(), normal);
}

#[test]
fn closing_never_reassigns_focus_or_reuses_ids() {
    let mut wm = WindowManager::new();
    let a = spawn(&mut wm, "a");
    let b = spawn(&mut wm, "b");
    wm.close_window(b);
    assert_eq!(wm.active_window(), None);
    let c = spawn(&mut wm, "c");
    assert_ne!(c, a);
    assert_ne!(c, b);
    // stale ids stay dead
    wm.focus_window(b);
    assert_eq!(wm.active_window(), Some(c));
    wm.close_window(b);
    assert_eq!(wm.window_count(), 2);
}

#[test]
fn taskbar_tracks_every_window_exactly_once() {
    let mut wm = WindowManager::new();
    let a = spawn(&mut wm, "one");
    let b = spawn(&mut wm, "two");
    assert_eq!(wm.taskbar().entries().len(), 2);
    wm.minimize_window(a);
    let entries = wm.taskbar().entries();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].minimized);
    assert!(!entries[0].active);
    assert!(entries[1].active);
    wm.close_window(b);
    assert_eq!(wm.taskbar().entries().len(), 1);
}

#[test]
fn dialog_options_pin_the_window() {
    let mut wm = WindowManager::new();
    let d = wm.create_window("dialog", 40, 10, WindowOptions::dialog(), |_, _| {});
    wm.maximize_window(d);
    assert!(!wm.is_maximized(d));
    // minimize still works through the API even when the button is hidden
    wm.minimize_window(d);
    assert!(wm.is_minimized(d));
}
