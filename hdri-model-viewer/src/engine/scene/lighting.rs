use bevy::pbr::environment_map::EnvironmentMapLight;
use bevy::prelude::*;

use crate::engine::assets::environment_map::EnvironmentCubemaps;

/// White ambient fill, added once the environment stage has resolved.
pub fn install_ambient_light(commands: &mut Commands, brightness: f32) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness,
        ..default()
    });
}

/// Upload the environment cubemaps and build the image based light that uses them.
pub fn create_environment_light(
    images: &mut Assets<Image>,
    cubemaps: &EnvironmentCubemaps,
    intensity: f32,
) -> EnvironmentMapLight {
    EnvironmentMapLight {
        diffuse_map: images.add(cubemaps.diffuse.to_cube_image()),
        specular_map: images.add(cubemaps.specular.to_mipmapped_cube_image()),
        intensity,
        ..default()
    }
}
