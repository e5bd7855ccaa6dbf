//! Selected body and follow mode.

use bevy::prelude::*;

use crate::orrery::BodyId;

/// Camera control mode derived from the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    /// Keyboard and pointer drive the camera.
    Free,
    /// The camera tracks the selected body.
    Following,
}

/// Currently selected body and whether the camera follows it.
///
/// Following always implies a selection; the fields are private so the
/// two can only change together.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct Selection {
    body: Option<BodyId>,
    following: bool,
}

impl Selection {
    pub fn body(&self) -> Option<BodyId> {
        self.body
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    pub fn camera_mode(&self) -> CameraMode {
        if self.following {
            CameraMode::Following
        } else {
            CameraMode::Free
        }
    }

    /// Select `body` and start following it.
    pub fn select_and_follow(&mut self, body: BodyId) {
        self.body = Some(body);
        self.following = true;
    }

    /// Apply a pick result. A hit selects and follows; a miss leaves the
    /// current selection untouched. Returns whether anything changed.
    pub fn apply_pick(&mut self, hit: Option<BodyId>) -> bool {
        match hit {
            Some(body) => {
                let changed = self.body != Some(body) || !self.following;
                self.select_and_follow(body);
                changed
            }
            None => false,
        }
    }

    /// Drop the selection and stop following. Returns whether a body was
    /// selected.
    pub fn clear(&mut self) -> bool {
        let had_selection = self.body.is_some();
        self.body = None;
        self.following = false;
        had_selection
    }

    /// Turn follow mode on or off. Turning it on without a selection is
    /// refused. Returns the resulting follow state.
    pub fn set_following(&mut self, follow: bool) -> bool {
        self.following = follow && self.body.is_some();
        self.following
    }
}
