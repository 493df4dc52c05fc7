use bevy::prelude::*;
use constants::{asset_paths, camera, interaction, render_settings};
use serde::Deserialize;

use crate::engine::animation::tween::Easing;

/// Runtime viewer parameters as a Bevy asset. Mirrors `viewer_settings.json`.
/// Any field the file leaves out keeps its compiled-in default.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub environment_url: String,
    pub model_path: String,
    pub camera: CameraSettings,
    pub interaction: InteractionSettings,
    pub render: RenderSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
    pub max_pixel_ratio: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Full sweep in radians; each axis reaches half of it at the viewport edge.
    pub rotation_range: f32,
    pub tween_duration_secs: f32,
    pub easing: Easing,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub color_shift_amount: f32,
    pub color_shift_angle: f32,
    pub tone_mapping_exposure: f32,
    pub ambient_brightness: f32,
    pub environment_intensity: f32,
    pub specular_face_size: u32,
    pub diffuse_face_size: u32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            environment_url: asset_paths::ENVIRONMENT_URL.to_string(),
            model_path: asset_paths::MODEL_PATH.to_string(),
            camera: CameraSettings::default(),
            interaction: InteractionSettings::default(),
            render: RenderSettings::default(),
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: camera::FOV_DEGREES,
            near: camera::NEAR_PLANE,
            far: camera::FAR_PLANE,
            distance: camera::CAMERA_DISTANCE,
            max_pixel_ratio: camera::MAX_PIXEL_RATIO,
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            rotation_range: interaction::ROTATION_RANGE,
            tween_duration_secs: interaction::TWEEN_DURATION_SECS,
            easing: Easing::QuadOut,
        }
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            color_shift_amount: render_settings::COLOR_SHIFT_AMOUNT,
            color_shift_angle: render_settings::COLOR_SHIFT_ANGLE,
            tone_mapping_exposure: render_settings::TONE_MAPPING_EXPOSURE,
            ambient_brightness: render_settings::AMBIENT_BRIGHTNESS,
            environment_intensity: render_settings::ENVIRONMENT_INTENSITY,
            specular_face_size: render_settings::SPECULAR_FACE_SIZE,
            diffuse_face_size: render_settings::DIFFUSE_FACE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let settings: ViewerSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ViewerSettings::default());
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let settings: ViewerSettings = serde_json::from_str(
            r#"{
                "model_path": "models/Other.gltf",
                "interaction": { "tween_duration_secs": 0.5, "easing": "cubic_out" }
            }"#,
        )
        .unwrap();

        assert_eq!(settings.model_path, "models/Other.gltf");
        assert_eq!(settings.interaction.tween_duration_secs, 0.5);
        assert_eq!(settings.interaction.easing, Easing::CubicOut);
        assert_eq!(
            settings.interaction.rotation_range,
            interaction::ROTATION_RANGE
        );
        assert_eq!(settings.environment_url, asset_paths::ENVIRONMENT_URL);
        assert_eq!(settings.render, RenderSettings::default());
    }
}
