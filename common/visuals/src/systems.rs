//! Systems that drive the components in this crate.
//! [`crate::Plugin`] registers them in `Update`.

use bevy::prelude::*;

use crate::{ColorFade, FadeEnd, RisingLoop};

/// Moves every [`RisingLoop`] entity.
/// The z coordinate is left alone.
pub fn rise(
    time: Res<Time>,
    mut query: Query<(&mut RisingLoop, &mut Transform)>,
) {
    for (mut rising, mut transform) in &mut query {
        rising.tick(time.delta());

        let position = rising.position();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
    }
}

/// Applies [`ColorFade`] to the entity's color material.
///
/// Each fading entity must own its material, otherwise entities sharing the
/// material fade together.
pub fn fade_color_materials(
    mut cmd: Commands,
    time: Res<Time>,
    mut materials: ResMut<Assets<ColorMaterial>>,

    mut query: Query<(Entity, &mut ColorFade, &Handle<ColorMaterial>)>,
) {
    for (entity, mut fade, material) in &mut query {
        fade.timer.tick(time.delta());

        if let Some(material) = materials.get_mut(material) {
            material.color.set_alpha(fade.alpha());
        }

        if !fade.timer.finished() {
            continue;
        }

        match fade.then {
            FadeEnd::Keep => {
                cmd.entity(entity).remove::<ColorFade>();
            }
            FadeEnd::Despawn => {
                trace!("Despawning faded out {entity:?}");
                cmd.entity(entity).despawn_recursive();
            }
        }
    }
}
