//! Data-driven scene description.
//!
//! A [`SceneLayout`] is a JSON list of named entities. Each entity gets a
//! pose and optionally a group, a centered box collider, sensor behaviour and
//! any number of controllers. Controllers refer to other entities by name;
//! `game::spawn_scene` resolves the names after every entity exists.
//!
//! ```json
//! {
//!   "entities": [
//!     { "name": "lift", "position": [0, 0, 0], "rotation": 0,
//!       "controllers": [
//!         { "type": "waypoint_traveler", "waypoints": [[0, 4, 0], [0, 0, 0]],
//!           "move_speed": 2.0, "wait_time": 1.0 }
//!       ] }
//!   ]
//! }
//! ```

use bevy_ecs::prelude::Resource;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::components::actuator::Orientation;
use crate::components::axismover::Axis;
use crate::components::axistoggletrigger::AxisAction;
use crate::components::multiaxismover::AxisSettings;

fn one() -> f32 {
    1.0
}

fn three() -> f32 {
    3.0
}

fn tilt_speed() -> f32 {
    0.1
}

fn half() -> f32 {
    0.5
}

fn yes() -> bool {
    true
}

#[derive(Resource, Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SceneLayout {
    pub entities: Vec<SceneEntity>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneEntity {
    pub name: String,
    #[serde(default)]
    pub position: Vec3,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default)]
    pub group: Option<String>,
    /// Width and height of a box collider centered on the position.
    #[serde(default)]
    pub collider: Option<[f32; 2]>,
    /// Turns the collider into a trigger volume.
    #[serde(default)]
    pub sensor: bool,
    /// Attach a `Signals` component.
    #[serde(default)]
    pub signals: bool,
    #[serde(default)]
    pub controllers: Vec<ControllerSpec>,
}

impl SceneEntity {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
            rotation: 0.0,
            group: None,
            collider: None,
            sensor: false,
            signals: false,
            controllers: Vec::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControllerSpec {
    WaypointTraveler {
        #[serde(default)]
        waypoints: Vec<Vec3>,
        #[serde(default = "one")]
        move_speed: f32,
        #[serde(default = "three")]
        wait_time: f32,
        #[serde(default = "tilt_speed")]
        tilt_speed: f32,
        #[serde(default)]
        target_rotation: f32,
    },
    MultiAxisMover {
        #[serde(default)]
        x: AxisSettings,
        #[serde(default)]
        y: AxisSettings,
        #[serde(default)]
        z: AxisSettings,
    },
    Actuator {
        #[serde(default)]
        orientation: Orientation,
        #[serde(default = "one")]
        length: f32,
        #[serde(default = "one")]
        moving_speed: f32,
        #[serde(default = "half")]
        hide_depth: f32,
        #[serde(default)]
        boomerang: bool,
        #[serde(default = "one")]
        hide_delay: f32,
        #[serde(default)]
        targets: Vec<String>,
        #[serde(default)]
        cue: Option<String>,
        #[serde(default)]
        actor_tag: Option<String>,
    },
    Toggle {
        #[serde(default = "yes")]
        active: bool,
        #[serde(default)]
        settle_time: f32,
    },
    AxisToggle {
        target: String,
        axis: Axis,
        #[serde(default)]
        action: AxisAction,
        #[serde(default)]
        actor_tag: Option<String>,
    },
    TiltTrigger {
        traveler: String,
        #[serde(default)]
        actor_tag: Option<String>,
    },
    Handwheel {
        traveler: String,
        #[serde(default)]
        turn_off: Vec<String>,
        #[serde(default)]
        turn_on: Vec<String>,
        #[serde(default)]
        cue: Option<String>,
        #[serde(default)]
        actor_tag: Option<String>,
    },
    PresenceDetector {
        #[serde(default)]
        actor_tag: Option<String>,
    },
    Scroller {
        speed: f32,
        span: f32,
    },
}

impl SceneLayout {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let layout: SceneLayout = serde_json::from_str(&file_content)?;
        Ok(layout)
    }

    pub fn find(&self, name: &str) -> Option<&SceneEntity> {
        self.entities.iter().find(|e| e.name == name)
    }
}
