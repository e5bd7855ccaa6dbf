//! Keyboard and pointer handling.
//!
//! Free-fly movement and pointer look only apply while the camera is free
//! and the menu is closed. Scroll, picking and deselecting are suspended
//! while the menu is open; Escape, Tab and the time shortcuts always work.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::camera::{FlyCamera, Movement};
use crate::orrery::Orrery;
use crate::picking::pick_at_center;
use crate::selection::{CameraMode, Selection};
use crate::types::{FrameSet, SimulationClock, TIME_SCALE_STEP};
use crate::ui::UiState;

/// Pixels per scroll line for high-resolution wheels and touchpads.
const PIXELS_PER_LINE: f32 = 16.0;

/// Key bindings for free-fly movement.
pub static MOVEMENT_KEYS: [(KeyCode, Movement); 6] = [
    (KeyCode::KeyW, Movement::Forward),
    (KeyCode::KeyS, Movement::Backward),
    (KeyCode::KeyA, Movement::Left),
    (KeyCode::KeyD, Movement::Right),
    (KeyCode::Space, Movement::Up),
    (KeyCode::ShiftLeft, Movement::Down),
];

/// What Escape does in the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeAction {
    /// Leave follow mode and drop the selection.
    StopFollowing,
    /// Close the application.
    Quit,
}

/// Escape stops following first and quits only from free mode.
pub fn escape_action(selection: &Selection) -> EscapeAction {
    match selection.camera_mode() {
        CameraMode::Following => EscapeAction::StopFollowing,
        CameraMode::Free => EscapeAction::Quit,
    }
}

/// Apply Escape to the selection: while following, the followed body is
/// deselected and the camera is freed. Returns what the key did.
pub fn press_escape(selection: &mut Selection) -> EscapeAction {
    let action = escape_action(selection);
    if action == EscapeAction::StopFollowing {
        selection.clear();
    }
    action
}

/// Drops the first pointer delta after the cursor is grabbed again, which
/// carries the jump from wherever the free cursor was left.
#[derive(Debug, Default)]
pub struct LookResync {
    pending: bool,
}

impl LookResync {
    pub fn cursor_regrabbed(&mut self) {
        self.pending = true;
    }

    /// Delta to apply to the camera, if any.
    pub fn filter(&mut self, delta: Vec2) -> Option<Vec2> {
        if delta == Vec2::ZERO {
            return None;
        }
        if std::mem::take(&mut self.pending) {
            return None;
        }
        Some(delta)
    }
}

/// Movements whose keys are held.
pub fn held_movements(keys: &ButtonInput<KeyCode>) -> impl Iterator<Item = Movement> + '_ {
    MOVEMENT_KEYS
        .iter()
        .filter(|(key, _)| keys.pressed(*key))
        .map(|(_, movement)| *movement)
}

/// Scroll amount in lines regardless of the device's unit.
pub fn scroll_lines(unit: MouseScrollUnit, delta_y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta_y,
        MouseScrollUnit::Pixel => delta_y / PIXELS_PER_LINE,
    }
}

/// Cursor state for the menu: released and visible while it is open,
/// locked and hidden while it is closed.
pub fn cursor_state(menu_open: bool) -> (CursorGrabMode, bool) {
    if menu_open {
        (CursorGrabMode::None, true)
    } else {
        (CursorGrabMode::Locked, false)
    }
}

/// Plugin providing keyboard and pointer handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Selection>()
            .init_resource::<UiState>()
            .add_systems(Startup, apply_cursor_state)
            .add_systems(
                Update,
                (
                    toggle_menu,
                    apply_cursor_state.run_if(resource_changed::<UiState>),
                    handle_escape,
                    time_shortcuts,
                    fly_controls,
                    mouse_look,
                    scroll_zoom,
                    pick_body,
                    deselect_body,
                )
                    .chain()
                    .in_set(FrameSet::Input),
            );
    }
}

fn toggle_menu(keys: Res<ButtonInput<KeyCode>>, mut ui_state: ResMut<UiState>) {
    if keys.just_pressed(KeyCode::Tab) {
        ui_state.menu_open = !ui_state.menu_open;
        debug!("Menu {}", if ui_state.menu_open { "opened" } else { "closed" });
    }
}

fn apply_cursor_state(
    ui_state: Res<UiState>,
    mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursors.single_mut() else {
        return;
    };
    let (grab_mode, visible) = cursor_state(ui_state.menu_open);
    cursor.grab_mode = grab_mode;
    cursor.visible = visible;
}

fn handle_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut selection: ResMut<Selection>,
    mut exit: MessageWriter<AppExit>,
) {
    if !keys.just_pressed(KeyCode::Escape) {
        return;
    }

    match press_escape(&mut selection) {
        EscapeAction::StopFollowing => {
            info!("Stopped following; selection cleared");
        }
        EscapeAction::Quit => {
            info!("Exit requested");
            exit.write(AppExit::Success);
        }
    }
}

/// `=` and `-` change the time scale, `P` pauses.
fn time_shortcuts(keys: Res<ButtonInput<KeyCode>>, mut clock: ResMut<SimulationClock>) {
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        clock.adjust_scale(TIME_SCALE_STEP);
        info!("Time scale: {:.2}x", clock.scale);
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        clock.adjust_scale(-TIME_SCALE_STEP);
        info!("Time scale: {:.2}x", clock.scale);
    }
    if keys.just_pressed(KeyCode::KeyP) {
        clock.paused = !clock.paused;
        info!("Simulation {}", if clock.paused { "paused" } else { "running" });
    }
}

fn fly_controls(
    keys: Res<ButtonInput<KeyCode>>,
    ui_state: Res<UiState>,
    selection: Res<Selection>,
    time: Res<Time>,
    mut fly: ResMut<FlyCamera>,
) {
    if ui_state.menu_open || selection.camera_mode() != CameraMode::Free {
        return;
    }
    let dt = time.delta_secs();
    for movement in held_movements(&keys) {
        fly.process_movement(movement, dt);
    }
}

fn mouse_look(
    motion: Res<AccumulatedMouseMotion>,
    ui_state: Res<UiState>,
    selection: Res<Selection>,
    mut fly: ResMut<FlyCamera>,
    mut resync: Local<LookResync>,
) {
    if ui_state.is_changed() && !ui_state.menu_open {
        resync.cursor_regrabbed();
    }
    if ui_state.menu_open || selection.camera_mode() != CameraMode::Free {
        return;
    }
    let Some(delta) = resync.filter(motion.delta) else {
        return;
    };
    // Screen y grows downward; pushing the pointer up looks up
    fly.process_look(delta.x, -delta.y);
}

fn scroll_zoom(
    scroll: Res<AccumulatedMouseScroll>,
    ui_state: Res<UiState>,
    mut fly: ResMut<FlyCamera>,
) {
    if ui_state.menu_open || scroll.delta.y == 0.0 {
        return;
    }
    fly.process_scroll(scroll_lines(scroll.unit, scroll.delta.y));
}

/// Left click picks the body under the crosshair.
fn pick_body(
    mouse: Res<ButtonInput<MouseButton>>,
    ui_state: Res<UiState>,
    windows: Query<&Window, With<PrimaryWindow>>,
    fly: Res<FlyCamera>,
    orrery: Res<Orrery>,
    mut selection: ResMut<Selection>,
) {
    if ui_state.menu_open || !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    if window.height() <= 0.0 {
        return;
    }
    let aspect = window.width() / window.height();

    let hit = pick_at_center(&fly, aspect, &orrery);
    if selection.apply_pick(hit.map(|h| h.body)) {
        if let Some(body) = hit.and_then(|h| orrery.get(h.body)) {
            info!("Selected {}", body.name);
        }
    } else if hit.is_none() {
        debug!("Pick missed");
    }
}

/// Right click drops the selection.
fn deselect_body(
    mouse: Res<ButtonInput<MouseButton>>,
    ui_state: Res<UiState>,
    mut selection: ResMut<Selection>,
) {
    if ui_state.menu_open || !mouse.just_pressed(MouseButton::Right) {
        return;
    }
    if selection.clear() {
        info!("Selection cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orrery::BodyId;

    #[test]
    fn test_escape_stops_following_before_quitting() {
        let mut selection = Selection::default();
        selection.select_and_follow(BodyId(2));
        assert_eq!(escape_action(&selection), EscapeAction::StopFollowing);

        assert_eq!(press_escape(&mut selection), EscapeAction::StopFollowing);
        assert_eq!(selection.body(), None);
        assert!(!selection.is_following());
        assert_eq!(escape_action(&selection), EscapeAction::Quit);
    }

    #[test]
    fn test_escape_quits_with_unfollowed_selection() {
        let mut selection = Selection::default();
        selection.select_and_follow(BodyId(4));
        selection.set_following(false);

        assert_eq!(press_escape(&mut selection), EscapeAction::Quit);
        assert_eq!(selection.body(), Some(BodyId(4)));
    }

    #[test]
    fn test_first_delta_after_regrab_is_dropped() {
        let mut resync = LookResync::default();
        assert_eq!(resync.filter(Vec2::new(3.0, 1.0)), Some(Vec2::new(3.0, 1.0)));

        resync.cursor_regrabbed();
        // Idle frames keep the pending skip for the first real motion
        assert_eq!(resync.filter(Vec2::ZERO), None);
        assert_eq!(resync.filter(Vec2::new(400.0, -250.0)), None);
        assert_eq!(resync.filter(Vec2::new(2.0, 0.0)), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_held_movements() {
        let mut keys = ButtonInput::<KeyCode>::default();
        keys.press(KeyCode::KeyW);
        keys.press(KeyCode::ShiftLeft);

        let held: Vec<_> = held_movements(&keys).collect();
        assert_eq!(held, vec![Movement::Forward, Movement::Down]);
    }

    #[test]
    fn test_no_movement_without_keys() {
        let keys = ButtonInput::<KeyCode>::default();
        assert_eq!(held_movements(&keys).count(), 0);
    }

    #[test]
    fn test_scroll_units() {
        assert_eq!(scroll_lines(MouseScrollUnit::Line, 2.0), 2.0);
        assert_eq!(scroll_lines(MouseScrollUnit::Pixel, 32.0), 2.0);
    }

    #[test]
    fn test_cursor_follows_menu() {
        assert_eq!(cursor_state(true), (CursorGrabMode::None, true));
        assert_eq!(cursor_state(false), (CursorGrabMode::Locked, false));
    }
}
