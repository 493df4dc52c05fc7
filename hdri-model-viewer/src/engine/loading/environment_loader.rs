use bevy::prelude::*;

use crate::engine::assets::environment_map::EnvironmentCubemaps;
use crate::engine::assets::fetch::{Mailbox, spawn_environment_job};
use crate::engine::assets::viewer_settings::ViewerSettings;
use crate::engine::camera::scene_camera::SceneCamera;
use crate::engine::loading::progress::{LoadingProgress, StageStatus};
use crate::engine::scene::lighting::{create_environment_light, install_ambient_light};
use crate::error::AssetResult;

/// Receives the outcome of the background environment fetch.
#[derive(Resource, Default)]
pub struct EnvironmentJob {
    pub mailbox: Mailbox<AssetResult<EnvironmentCubemaps>>,
}

pub fn start_environment_fetch(job: Res<EnvironmentJob>, settings: Res<ViewerSettings>) {
    info!("Fetching environment map: {}", settings.environment_url);
    spawn_environment_job(
        settings.environment_url.clone(),
        settings.render.specular_face_size,
        settings.render.diffuse_face_size,
        job.mailbox.clone(),
    );
}

// Install the environment lighting once the background job reports back
pub fn receive_environment(
    mut loading_progress: ResMut<LoadingProgress>,
    job: Res<EnvironmentJob>,
    settings: Res<ViewerSettings>,
    mut images: ResMut<Assets<Image>>,
    cameras: Query<Entity, With<SceneCamera>>,
    mut commands: Commands,
) {
    if loading_progress.environment.is_resolved() {
        return;
    }

    let Some(result) = job.mailbox.take() else {
        return;
    };

    match result {
        Ok(cubemaps) => {
            for camera in &cameras {
                let light = create_environment_light(
                    &mut images,
                    &cubemaps,
                    settings.render.environment_intensity,
                );
                commands.entity(camera).insert(light);
            }
            info!(
                "✓ Environment installed ({}px specular, {}px diffuse faces)",
                cubemaps.specular.size, cubemaps.diffuse.size
            );
            loading_progress.environment = StageStatus::Loaded;
        }
        Err(err) => {
            error!("Failed to load environment map: {}", err);
            loading_progress.environment = StageStatus::Failed;
        }
    }

    // Ambient fill goes in either way so a model is never left unlit
    install_ambient_light(&mut commands, settings.render.ambient_brightness);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::environment_map::{CubemapFaces, EquirectImage};
    use crate::error::AssetError;
    use bevy::pbr::environment_map::EnvironmentMapLight;

    fn test_app() -> (App, Entity) {
        let mut app = App::new();
        app.init_resource::<LoadingProgress>()
            .init_resource::<EnvironmentJob>()
            .init_resource::<ViewerSettings>()
            .init_resource::<Assets<Image>>()
            .add_systems(Update, receive_environment);
        let camera = app.world_mut().spawn(SceneCamera).id();
        (app, camera)
    }

    #[test]
    fn waits_until_the_job_reports() {
        let (mut app, _) = test_app();
        app.update();
        assert_eq!(
            app.world().resource::<LoadingProgress>().environment,
            StageStatus::Pending
        );
        assert!(app.world().get_resource::<AmbientLight>().is_none());
    }

    #[test]
    fn failure_is_recorded_and_ambient_light_still_added() {
        let (mut app, camera) = test_app();
        app.world()
            .resource::<EnvironmentJob>()
            .mailbox
            .post(Err(AssetError::Status {
                url: "https://example.invalid/sky.hdr".to_string(),
                status: 404,
            }));
        app.update();

        assert_eq!(
            app.world().resource::<LoadingProgress>().environment,
            StageStatus::Failed
        );
        assert!(app.world().get::<EnvironmentMapLight>(camera).is_none());
        assert_eq!(
            app.world().resource::<AmbientLight>().brightness,
            ViewerSettings::default().render.ambient_brightness
        );
    }

    #[test]
    fn success_attaches_environment_light_to_camera() {
        let (mut app, camera) = test_app();
        let panorama = EquirectImage::new(4, 2, vec![[0.25; 3]; 8]).unwrap();
        let cubemaps = EnvironmentCubemaps {
            specular: CubemapFaces::from_equirect(&panorama, 2),
            diffuse: CubemapFaces::from_equirect(&panorama, 1),
        };
        app.world()
            .resource::<EnvironmentJob>()
            .mailbox
            .post(Ok(cubemaps));
        app.update();

        assert_eq!(
            app.world().resource::<LoadingProgress>().environment,
            StageStatus::Loaded
        );
        let light = app.world().get::<EnvironmentMapLight>(camera).unwrap();
        assert_eq!(
            light.intensity,
            ViewerSettings::default().render.environment_intensity
        );
        assert_eq!(app.world().resource::<Assets<Image>>().len(), 2);
    }
}
