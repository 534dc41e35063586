//! Session setup: world resources, the per-tick schedule and scene spawning.
//!
//! The headless runner and the integration tests both build their world
//! through [`setup_world`] and [`build_schedule`] and advance it with
//! [`tick`], so the system order is defined in exactly one place.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::{info, warn};
use rustc_hash::FxHashMap;

use crate::components::actuator::{HideShowActuator, Orientation};
use crate::components::axismover::Axis;
use crate::components::axistoggletrigger::{AxisAction, AxisToggleTrigger};
use crate::components::boxcollider::BoxCollider;
use crate::components::group::Group;
use crate::components::handwheel::Handwheel;
use crate::components::mapposition::MapPosition;
use crate::components::multiaxismover::{AxisSettings, MultiAxisMover};
use crate::components::presencedetector::PresenceDetector;
use crate::components::rotation::Rotation;
use crate::components::scroller::Scroller;
use crate::components::sensor::Sensor;
use crate::components::signals::Signals;
use crate::components::switchable::Toggle;
use crate::components::tilttrigger::TiltTrigger;
use crate::components::waypointtraveler::WaypointTraveler;
use crate::events::cue::CueMessage;
use crate::resources::cuepool::CuePool;
use crate::resources::input::InputState;
use crate::resources::jitter::Jitter;
use crate::resources::scenelayout::{ControllerSpec, SceneEntity, SceneLayout};
use crate::resources::simconfig::SimConfig;
use crate::resources::worldtime::WorldTime;
use crate::systems::actuator::{actuator_input_system, actuator_system};
use crate::systems::cue::{cue_release_system, update_cue_messages};
use crate::systems::handwheel::handwheel_system;
use crate::systems::input::update_input_state;
use crate::systems::multiaxismover::multi_axis_mover_system;
use crate::systems::scroller::scroller_system;
use crate::systems::sensor::sensor_detector;
use crate::systems::time::update_world_time;
use crate::systems::toggle::toggle_system;
use crate::systems::triggers::{register_trigger_observers, tilt_trigger_straighten_system};
use crate::systems::waypointtraveler::waypoint_traveler_system;

/// Insert every session resource and register the trigger observers.
pub fn setup_world(world: &mut World, config: &SimConfig) {
    world.insert_resource(WorldTime::default().with_time_scale(config.time_scale));
    world.insert_resource(InputState::default());
    world.insert_resource(Jitter::new(config.seed));
    world.insert_resource(CuePool::new(config.cue_voices, config.cue_length));
    world.insert_resource(Messages::<CueMessage>::default());
    world.insert_resource(config.clone());

    register_trigger_observers(world);
    // Observers must exist before the first sensor edge is triggered.
    world.flush();
}

/// The per-tick schedule.
///
/// Presence is resolved first so input and controllers see this tick's
/// sensor edges; actuators and handwheels run before travelers so a tilt
/// they request starts on the same tick.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            sensor_detector,
            actuator_input_system,
            actuator_system,
            handwheel_system,
            waypoint_traveler_system,
            tilt_trigger_straighten_system,
            multi_axis_mover_system,
            scroller_system,
            toggle_system,
            cue_release_system,
            update_cue_messages,
        )
            .chain(),
    );
    update
}

/// Advance the clock and input, run the schedule once and reset change
/// tracking.
pub fn tick(world: &mut World, schedule: &mut Schedule, dt: f32, use_pressed: bool) {
    update_world_time(world, dt);
    update_input_state(world, use_pressed);
    schedule.run(world);
    world.clear_trackers();
}

/// Spawn every entity of `layout` and attach its controllers.
///
/// Names are resolved after all entities exist, so controllers may refer to
/// entities declared later. A reference to an unknown name is logged and
/// skipped. Duplicate names are an error and nothing is spawned.
pub fn spawn_scene(
    world: &mut World,
    layout: &SceneLayout,
    player_tag: &str,
) -> Result<FxHashMap<String, Entity>, String> {
    let mut names: FxHashMap<String, Entity> = FxHashMap::default();
    for scene_entity in &layout.entities {
        if names.contains_key(&scene_entity.name) {
            return Err(format!("Duplicate entity name '{}' in scene", scene_entity.name));
        }
        names.insert(scene_entity.name.clone(), Entity::PLACEHOLDER);
    }

    for scene_entity in &layout.entities {
        let entity = spawn_base(world, scene_entity);
        names.insert(scene_entity.name.clone(), entity);
    }

    for scene_entity in &layout.entities {
        let entity = names[&scene_entity.name];
        for controller in &scene_entity.controllers {
            attach_controller(world, entity, &scene_entity.name, controller, &names, player_tag);
        }
    }

    info!("Spawned scene with {} entities", names.len());
    Ok(names)
}

fn spawn_base(world: &mut World, scene_entity: &SceneEntity) -> Entity {
    let mut entity = world.spawn((
        MapPosition::from_vec3(scene_entity.position),
        Rotation::new(scene_entity.rotation),
    ));
    if let Some(group) = &scene_entity.group {
        entity.insert(Group::new(group.as_str()));
    }
    if let Some([w, h]) = scene_entity.collider {
        entity.insert(BoxCollider::centered(w, h));
    }
    if scene_entity.sensor {
        entity.insert(Sensor::new());
    }
    if scene_entity.signals {
        entity.insert(Signals::default());
    }
    entity.id()
}

fn resolve(names: &FxHashMap<String, Entity>, owner: &str, name: &str) -> Option<Entity> {
    let found = names.get(name).copied();
    if found.is_none() {
        warn!("'{}' refers to unknown entity '{}', skipping", owner, name);
    }
    found
}

fn attach_controller(
    world: &mut World,
    entity: Entity,
    owner: &str,
    controller: &ControllerSpec,
    names: &FxHashMap<String, Entity>,
    player_tag: &str,
) {
    let tag = |actor_tag: &Option<String>| actor_tag.clone().unwrap_or_else(|| player_tag.to_string());
    match controller {
        ControllerSpec::WaypointTraveler {
            waypoints,
            move_speed,
            wait_time,
            tilt_speed,
            target_rotation,
        } => {
            world.entity_mut(entity).insert(
                WaypointTraveler::new(waypoints.clone())
                    .with_move_speed(*move_speed)
                    .with_wait_time(*wait_time)
                    .with_tilt(*tilt_speed, *target_rotation),
            );
        }
        ControllerSpec::MultiAxisMover { x, y, z } => {
            world
                .entity_mut(entity)
                .insert(MultiAxisMover::new(x.clone(), y.clone(), z.clone()));
        }
        ControllerSpec::Actuator {
            orientation,
            length,
            moving_speed,
            hide_depth,
            boomerang,
            hide_delay,
            targets,
            cue,
            actor_tag,
        } => {
            let targets: Vec<Entity> = targets
                .iter()
                .filter_map(|name| resolve(names, owner, name))
                .collect();
            let mut actuator = HideShowActuator::new(*orientation, *length, tag(actor_tag))
                .with_targets(targets)
                .with_speed(*moving_speed)
                .with_hide_depth(*hide_depth)
                .with_boomerang(*boomerang, *hide_delay);
            actuator.cue = cue.clone();
            world.entity_mut(entity).insert(actuator);
        }
        ControllerSpec::Toggle {
            active,
            settle_time,
        } => {
            world
                .entity_mut(entity)
                .insert(Toggle::new(*active).with_settle_time(*settle_time));
        }
        ControllerSpec::AxisToggle {
            target,
            axis,
            action,
            actor_tag,
        } => {
            if let Some(target) = resolve(names, owner, target) {
                world
                    .entity_mut(entity)
                    .insert(AxisToggleTrigger::new(target, *axis, *action, tag(actor_tag)));
            }
        }
        ControllerSpec::TiltTrigger {
            traveler,
            actor_tag,
        } => {
            if let Some(traveler) = resolve(names, owner, traveler) {
                world
                    .entity_mut(entity)
                    .insert(TiltTrigger::new(traveler, tag(actor_tag)));
            }
        }
        ControllerSpec::Handwheel {
            traveler,
            turn_off,
            turn_on,
            cue,
            actor_tag,
        } => {
            if let Some(traveler) = resolve(names, owner, traveler) {
                let off: Vec<Entity> = turn_off
                    .iter()
                    .filter_map(|name| resolve(names, owner, name))
                    .collect();
                let on: Vec<Entity> = turn_on
                    .iter()
                    .filter_map(|name| resolve(names, owner, name))
                    .collect();
                let mut wheel = Handwheel::new(traveler, tag(actor_tag)).with_toggles(off, on);
                wheel.cue = cue.clone();
                world.entity_mut(entity).insert(wheel);
            }
        }
        ControllerSpec::PresenceDetector { actor_tag } => {
            world
                .entity_mut(entity)
                .insert(PresenceDetector::new(tag(actor_tag)));
        }
        ControllerSpec::Scroller { speed, span } => {
            world.entity_mut(entity).insert(Scroller::new(*speed, *span));
        }
    }
}

/// A small level exercising every controller.
///
/// The player walks right and back along the floor, passing a lever that
/// hides and tilts the lift, a pad that wakes the drifter's vertical axis
/// and a pad that tilts the lift again.
pub fn demo_scene(player_tag: &str) -> SceneLayout {
    let mut player = SceneEntity::new("player", Vec3::new(-8.0, 0.0, 0.0));
    player.group = Some(player_tag.to_string());
    player.collider = Some([1.0, 2.0]);
    player.controllers.push(ControllerSpec::WaypointTraveler {
        waypoints: vec![Vec3::new(8.0, 0.0, 0.0), Vec3::new(-8.0, 0.0, 0.0)],
        move_speed: 2.0,
        wait_time: 1.0,
        tilt_speed: 0.1,
        target_rotation: 0.0,
    });

    let mut lift = SceneEntity::new("lift", Vec3::new(0.0, -2.0, 0.0));
    lift.controllers.push(ControllerSpec::WaypointTraveler {
        waypoints: vec![Vec3::new(0.0, 3.0, 0.0), Vec3::new(0.0, -2.0, 0.0)],
        move_speed: 1.0,
        wait_time: 2.0,
        tilt_speed: 20.0,
        target_rotation: 15.0,
    });

    let mut lever = SceneEntity::new("lever", Vec3::new(-4.0, 0.0, 0.0));
    lever.collider = Some([1.0, 1.0]);
    lever.sensor = true;
    lever.controllers.push(ControllerSpec::Actuator {
        orientation: Orientation::VerticalDown,
        length: 1.0,
        moving_speed: 1.0,
        hide_depth: 0.5,
        boomerang: true,
        hide_delay: 1.0,
        targets: vec!["lift".into(), "gate".into()],
        cue: Some("switch_click".into()),
        actor_tag: None,
    });

    let mut gate = SceneEntity::new("gate", Vec3::new(10.0, 0.0, 0.0));
    gate.controllers.push(ControllerSpec::Toggle {
        active: true,
        settle_time: 0.5,
    });

    let mut drifter = SceneEntity::new("drifter", Vec3::new(0.0, 6.0, 0.0));
    drifter.signals = true;
    drifter.controllers.push(ControllerSpec::MultiAxisMover {
        x: AxisSettings::new(1.0, 2.0)
            .with_boomerang(true)
            .with_interval(0.5),
        y: AxisSettings::new(0.5, 1.0)
            .with_boomerang(true)
            .with_enabled(false),
        z: AxisSettings::default(),
    });

    let mut drift_pad = SceneEntity::new("drift_pad", Vec3::new(3.0, 0.0, 0.0));
    drift_pad.collider = Some([1.0, 1.0]);
    drift_pad.sensor = true;
    drift_pad.controllers.push(ControllerSpec::AxisToggle {
        target: "drifter".into(),
        axis: Axis::Y,
        action: AxisAction::Activate,
        actor_tag: None,
    });

    let mut tilt_pad = SceneEntity::new("tilt_pad", Vec3::new(6.0, 0.0, 0.0));
    tilt_pad.collider = Some([1.0, 1.0]);
    tilt_pad.sensor = true;
    tilt_pad.controllers.push(ControllerSpec::TiltTrigger {
        traveler: "lift".into(),
        actor_tag: None,
    });

    let mut wheel = SceneEntity::new("wheel", Vec3::new(-7.0, 0.0, 0.0));
    wheel.collider = Some([1.0, 1.0]);
    wheel.sensor = true;
    wheel.controllers.push(ControllerSpec::Handwheel {
        traveler: "lift".into(),
        turn_off: vec!["gate".into()],
        turn_on: Vec::new(),
        cue: Some("wheel_creak".into()),
        actor_tag: None,
    });

    let mut watch = SceneEntity::new("watch", Vec3::ZERO);
    watch.collider = Some([2.0, 2.0]);
    watch.sensor = true;
    watch
        .controllers
        .push(ControllerSpec::PresenceDetector { actor_tag: None });

    let mut backdrop = SceneEntity::new("backdrop", Vec3::new(0.0, 0.0, -1.0));
    backdrop
        .controllers
        .push(ControllerSpec::Scroller { speed: 0.5, span: 20.0 });

    SceneLayout {
        entities: vec![
            player, lift, lever, gate, drifter, drift_pad, tilt_pad, wheel, watch, backdrop,
        ],
    }
}
