use bevy::prelude::*;
use bevy::window::CursorMoved;

use crate::engine::animation::tween::OrientationTween;
use crate::engine::assets::viewer_settings::ViewerSettings;
use crate::engine::interaction::orientation::target_rotation;
use crate::engine::scene::controller::SceneController;

/// Retarget the model's tween on every cursor move. No-op until a model is attached.
pub fn map_pointer_to_orientation(
    mut cursor_events: EventReader<CursorMoved>,
    controller: Res<SceneController>,
    settings: Res<ViewerSettings>,
    mut tweens: Query<&mut OrientationTween>,
) {
    let Some(model) = controller.model.get() else {
        cursor_events.clear();
        return;
    };

    let Ok(mut tween) = tweens.get_mut(model) else {
        cursor_events.clear();
        return;
    };

    for event in cursor_events.read() {
        if let Some(target) = target_rotation(
            event.position,
            controller.viewport,
            settings.interaction.rotation_range,
        ) {
            tween.retarget(target);
        }
    }
}
