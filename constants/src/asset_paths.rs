/// Remote Radiance HDR panorama used as the scene's lighting environment.
pub const ENVIRONMENT_URL: &str =
    "https://dl.polyhaven.org/file/ph-assets/HDRIs/hdr/1k/pond_bridge_night_1k.hdr";

/// glTF model, relative to the asset root.
pub const MODEL_PATH: &str = "models/DamagedHelmet.gltf";

/// Optional runtime overrides, relative to the asset root.
pub const SETTINGS_PATH: &str = "viewer_settings.json";
