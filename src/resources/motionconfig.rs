//! Motion tuning resource.
//!
//! Every tunable of the controllers lives here, loaded from an INI file.
//! Missing keys keep their defaults, so an empty file is a valid config.
//!
//! # Configuration File Format
//!
//! ```ini
//! [raycast]
//! skin_width = 0.015
//! ray_gap = 0.25
//! pass_through_delay = 0.5
//! pass_through_policy = fixed_delay
//!
//! [locomotion]
//! gravity = -50
//! run_speed = 6
//! ground_smooth_time = 0.1
//! air_smooth_time = 0.1
//!
//! [jump]
//! launch_speed = 20
//! release_speed = 10
//! max_jumps = 2
//!
//! [dash]
//! speed = 15
//! duration = 0.4
//! cooldown = 1
//!
//! [wall]
//! slide_speed = -3
//! stick_time = 0.15
//!
//! [ledge]
//! probe_distance = 0.2
//! grab_push_speed = 6
//! climb_speed = 3
//!
//! [ladder]
//! climb_speed = 5
//! snap_speed = 1
//! snap_distance_far = 1
//! snap_distance_near = 0.5
//! valid_distance = 0.02
//!
//! [camera]
//! focus_width = 3
//! focus_height = 5
//! look_ahead_distance = 4
//! horizontal_smooth_time = 0.5
//! vertical_smooth_time = 0.1
//!
//! [input]
//! jump_buffer_time = 0.1
//! ```

use std::path::{Path, PathBuf};

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use glam::Vec2;
use log::info;

use crate::components::raycaster::PassThroughPolicy;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct RaycastConfig {
    pub skin_width: f32,
    pub ray_gap: f32,
    pub pass_through_delay: f32,
    pub pass_through_policy: PassThroughPolicy,
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self {
            skin_width: 0.015,
            ray_gap: 0.25,
            pass_through_delay: 0.5,
            pass_through_policy: PassThroughPolicy::FixedDelay,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocomotionConfig {
    pub gravity: f32,
    pub run_speed: f32,
    pub ground_smooth_time: f32,
    pub air_smooth_time: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            gravity: -50.0,
            run_speed: 6.0,
            ground_smooth_time: 0.1,
            air_smooth_time: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JumpConfig {
    /// Vertical speed set when a jump starts.
    pub launch_speed: f32,
    /// Upper bound applied to vertical speed when the button is released.
    pub release_speed: f32,
    pub max_jumps: u32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            launch_speed: 20.0,
            release_speed: 10.0,
            max_jumps: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            speed: 15.0,
            duration: 0.4,
            cooldown: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WallConfig {
    /// Slowest fall speed while sliding (negative).
    pub slide_speed: f32,
    pub stick_time: f32,
    pub jump_toward: Vec2,
    pub jump_neutral: Vec2,
    pub jump_away: Vec2,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            slide_speed: -3.0,
            stick_time: 0.15,
            jump_toward: Vec2::new(10.0, 20.0),
            jump_neutral: Vec2::new(8.0, 8.0),
            jump_away: Vec2::new(16.0, 16.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LedgeConfig {
    pub probe_distance: f32,
    pub grab_push_speed: f32,
    pub climb_speed: f32,
}

impl Default for LedgeConfig {
    fn default() -> Self {
        Self {
            probe_distance: 0.2,
            grab_push_speed: 6.0,
            climb_speed: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LadderConfig {
    pub climb_speed: f32,
    pub snap_speed: f32,
    /// Snap reach when grounded and pressing up.
    pub snap_distance_far: f32,
    pub snap_distance_near: f32,
    /// Horizontal offset under which the actor grabs the ladder at once.
    pub valid_distance: f32,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            climb_speed: 5.0,
            snap_speed: 1.0,
            snap_distance_far: 1.0,
            snap_distance_near: 0.5,
            valid_distance: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub focus_size: Vec2,
    pub look_ahead_distance: f32,
    pub horizontal_smooth_time: f32,
    pub vertical_smooth_time: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            focus_size: Vec2::new(3.0, 5.0),
            look_ahead_distance: 4.0,
            horizontal_smooth_time: 0.5,
            vertical_smooth_time: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub jump_buffer_time: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            jump_buffer_time: 0.1,
        }
    }
}

/// Motion tuning resource.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct MotionConfig {
    pub raycast: RaycastConfig,
    pub locomotion: LocomotionConfig,
    pub jump: JumpConfig,
    pub dash: DashConfig,
    pub wall: WallConfig,
    pub ledge: LedgeConfig,
    pub ladder: LadderConfig,
    pub camera: CameraConfig,
    pub input: InputConfig,
}

fn read_f32(config: &Ini, section: &'static str, key: &'static str, target: &mut f32) -> Result<()> {
    match config.getfloat(section, key) {
        Ok(Some(v)) => *target = v as f32,
        Ok(None) => {}
        Err(_) => {
            return Err(Error::ConfigValue {
                section,
                key,
                value: config.get(section, key).unwrap_or_default(),
            });
        }
    }
    Ok(())
}

/// Fail with [`Error::ConfigValue`] unless `valid` holds for `value`.
fn ensure(valid: bool, section: &'static str, key: &'static str, value: f32) -> Result<()> {
    if valid {
        Ok(())
    } else {
        Err(Error::ConfigValue {
            section,
            key,
            value: value.to_string(),
        })
    }
}

fn read_u32(config: &Ini, section: &'static str, key: &'static str, target: &mut u32) -> Result<()> {
    let invalid = || Error::ConfigValue {
        section,
        key,
        value: config.get(section, key).unwrap_or_default(),
    };
    match config.getuint(section, key) {
        Ok(Some(v)) => *target = u32::try_from(v).map_err(|_| invalid())?,
        Ok(None) => {}
        Err(_) => return Err(invalid()),
    }
    Ok(())
}

impl MotionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an INI file on top of the defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path).map_err(|reason| Error::ConfigLoad {
            path: path.to_path_buf(),
            reason,
        })?;
        let config = Self::from_ini(&ini)?;
        info!("Loaded motion config from {:?}", path);
        Ok(config)
    }

    /// Parse INI text on top of the defaults.
    pub fn from_ini_str(text: &str) -> Result<Self> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(|reason| Error::ConfigLoad {
            path: PathBuf::new(),
            reason,
        })?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self> {
        let mut c = Self::default();

        // [raycast]
        read_f32(ini, "raycast", "skin_width", &mut c.raycast.skin_width)?;
        read_f32(ini, "raycast", "ray_gap", &mut c.raycast.ray_gap)?;
        read_f32(ini, "raycast", "pass_through_delay", &mut c.raycast.pass_through_delay)?;
        let r = &c.raycast;
        ensure(r.skin_width >= 0.0, "raycast", "skin_width", r.skin_width)?;
        // One ray per `ray_gap` along each edge.
        ensure(r.ray_gap > 0.0, "raycast", "ray_gap", r.ray_gap)?;
        ensure(
            r.pass_through_delay >= 0.0,
            "raycast",
            "pass_through_delay",
            r.pass_through_delay,
        )?;
        if let Some(policy) = ini.get("raycast", "pass_through_policy") {
            c.raycast.pass_through_policy =
                PassThroughPolicy::parse(&policy).ok_or(Error::ConfigValue {
                    section: "raycast",
                    key: "pass_through_policy",
                    value: policy.clone(),
                })?;
        }

        // [locomotion]
        read_f32(ini, "locomotion", "gravity", &mut c.locomotion.gravity)?;
        read_f32(ini, "locomotion", "run_speed", &mut c.locomotion.run_speed)?;
        read_f32(ini, "locomotion", "ground_smooth_time", &mut c.locomotion.ground_smooth_time)?;
        read_f32(ini, "locomotion", "air_smooth_time", &mut c.locomotion.air_smooth_time)?;

        // [jump]
        read_f32(ini, "jump", "launch_speed", &mut c.jump.launch_speed)?;
        read_f32(ini, "jump", "release_speed", &mut c.jump.release_speed)?;
        read_u32(ini, "jump", "max_jumps", &mut c.jump.max_jumps)?;

        // [dash]
        read_f32(ini, "dash", "speed", &mut c.dash.speed)?;
        read_f32(ini, "dash", "duration", &mut c.dash.duration)?;
        read_f32(ini, "dash", "cooldown", &mut c.dash.cooldown)?;

        // [wall]
        read_f32(ini, "wall", "slide_speed", &mut c.wall.slide_speed)?;
        read_f32(ini, "wall", "stick_time", &mut c.wall.stick_time)?;

        // [ledge]
        read_f32(ini, "ledge", "probe_distance", &mut c.ledge.probe_distance)?;
        read_f32(ini, "ledge", "grab_push_speed", &mut c.ledge.grab_push_speed)?;
        read_f32(ini, "ledge", "climb_speed", &mut c.ledge.climb_speed)?;

        // [ladder]
        read_f32(ini, "ladder", "climb_speed", &mut c.ladder.climb_speed)?;
        read_f32(ini, "ladder", "snap_speed", &mut c.ladder.snap_speed)?;
        read_f32(ini, "ladder", "snap_distance_far", &mut c.ladder.snap_distance_far)?;
        read_f32(ini, "ladder", "snap_distance_near", &mut c.ladder.snap_distance_near)?;
        read_f32(ini, "ladder", "valid_distance", &mut c.ladder.valid_distance)?;

        // [camera]
        read_f32(ini, "camera", "focus_width", &mut c.camera.focus_size.x)?;
        read_f32(ini, "camera", "focus_height", &mut c.camera.focus_size.y)?;
        read_f32(ini, "camera", "look_ahead_distance", &mut c.camera.look_ahead_distance)?;
        read_f32(ini, "camera", "horizontal_smooth_time", &mut c.camera.horizontal_smooth_time)?;
        read_f32(ini, "camera", "vertical_smooth_time", &mut c.camera.vertical_smooth_time)?;

        // [input]
        read_f32(ini, "input", "jump_buffer_time", &mut c.input.jump_buffer_time)?;

        Ok(c)
    }

    fn to_ini(&self) -> Ini {
        let mut ini = Ini::new();
        let mut set = |section: &str, key: &str, value: String| {
            ini.set(section, key, Some(value));
        };

        set("raycast", "skin_width", self.raycast.skin_width.to_string());
        set("raycast", "ray_gap", self.raycast.ray_gap.to_string());
        set("raycast", "pass_through_delay", self.raycast.pass_through_delay.to_string());
        set(
            "raycast",
            "pass_through_policy",
            self.raycast.pass_through_policy.as_str().to_string(),
        );

        set("locomotion", "gravity", self.locomotion.gravity.to_string());
        set("locomotion", "run_speed", self.locomotion.run_speed.to_string());
        set("locomotion", "ground_smooth_time", self.locomotion.ground_smooth_time.to_string());
        set("locomotion", "air_smooth_time", self.locomotion.air_smooth_time.to_string());

        set("jump", "launch_speed", self.jump.launch_speed.to_string());
        set("jump", "release_speed", self.jump.release_speed.to_string());
        set("jump", "max_jumps", self.jump.max_jumps.to_string());

        set("dash", "speed", self.dash.speed.to_string());
        set("dash", "duration", self.dash.duration.to_string());
        set("dash", "cooldown", self.dash.cooldown.to_string());

        set("wall", "slide_speed", self.wall.slide_speed.to_string());
        set("wall", "stick_time", self.wall.stick_time.to_string());

        set("ledge", "probe_distance", self.ledge.probe_distance.to_string());
        set("ledge", "grab_push_speed", self.ledge.grab_push_speed.to_string());
        set("ledge", "climb_speed", self.ledge.climb_speed.to_string());

        set("ladder", "climb_speed", self.ladder.climb_speed.to_string());
        set("ladder", "snap_speed", self.ladder.snap_speed.to_string());
        set("ladder", "snap_distance_far", self.ladder.snap_distance_far.to_string());
        set("ladder", "snap_distance_near", self.ladder.snap_distance_near.to_string());
        set("ladder", "valid_distance", self.ladder.valid_distance.to_string());

        set("camera", "focus_width", self.camera.focus_size.x.to_string());
        set("camera", "focus_height", self.camera.focus_size.y.to_string());
        set("camera", "look_ahead_distance", self.camera.look_ahead_distance.to_string());
        set(
            "camera",
            "horizontal_smooth_time",
            self.camera.horizontal_smooth_time.to_string(),
        );
        set("camera", "vertical_smooth_time", self.camera.vertical_smooth_time.to_string());

        set("input", "jump_buffer_time", self.input.jump_buffer_time.to_string());

        ini
    }

    /// Write every value to an INI file, creating it if needed.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_ini().write(path).map_err(|source| Error::ConfigSave {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved motion config to {:?}", path);
        Ok(())
    }

    /// The config rendered as INI text.
    pub fn to_ini_string(&self) -> String {
        self.to_ini().writes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = MotionConfig::new();
        assert_eq!(c.locomotion.gravity, -50.0);
        assert_eq!(c.jump.max_jumps, 2);
        assert_eq!(c.dash.duration, 0.4);
        assert_eq!(c.raycast.pass_through_policy, PassThroughPolicy::FixedDelay);
        assert_eq!(c.camera.focus_size, Vec2::new(3.0, 5.0));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let c = MotionConfig::from_ini_str(
            "[jump]\nmax_jumps = 3\n[raycast]\npass_through_policy = hold_while_overlapping\n",
        )
        .unwrap();
        assert_eq!(c.jump.max_jumps, 3);
        assert_eq!(c.jump.launch_speed, 20.0);
        assert_eq!(
            c.raycast.pass_through_policy,
            PassThroughPolicy::HoldWhileOverlapping
        );
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = MotionConfig::from_ini_str("[dash]\nspeed = fast\n").unwrap_err();
        assert!(matches!(
            err,
            Error::ConfigValue {
                section: "dash",
                key: "speed",
                ..
            }
        ));

        let err = MotionConfig::from_ini_str("[raycast]\npass_through_policy = sometimes\n")
            .unwrap_err();
        assert!(matches!(err, Error::ConfigValue { key: "pass_through_policy", .. }));
    }

    #[test]
    fn test_raycast_values_out_of_range_are_rejected() {
        for (text, bad_key) in [
            ("[raycast]\nray_gap = 0\n", "ray_gap"),
            ("[raycast]\nray_gap = -0.25\n", "ray_gap"),
            ("[raycast]\nskin_width = -1\n", "skin_width"),
            ("[raycast]\npass_through_delay = -0.5\n", "pass_through_delay"),
        ] {
            let err = MotionConfig::from_ini_str(text).unwrap_err();
            assert!(
                matches!(err, Error::ConfigValue { section: "raycast", key, .. } if key == bad_key),
                "{text:?} gave {err:?}"
            );
        }

        let c = MotionConfig::from_ini_str("[raycast]\nskin_width = 0\npass_through_delay = 0\n")
            .unwrap();
        assert_eq!(c.raycast.skin_width, 0.0);
    }

    #[test]
    fn test_ini_text_reloads_to_same_config() {
        let mut c = MotionConfig::new();
        c.dash.cooldown = 2.5;
        c.ladder.snap_distance_far = 1.5;
        let reloaded = MotionConfig::from_ini_str(&c.to_ini_string()).unwrap();
        assert_eq!(reloaded, c);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = MotionConfig::load_from_file("/nonexistent/motion.ini").unwrap_err();
        assert!(matches!(err, Error::ConfigLoad { .. }));
    }
}
