use super::{ArcTweenFinished, components::ArcTween};
use crate::display::components::SlotAnchors;
use bevy::prelude::*;

/// 推进所有飞行中的实体；本帧完成的发出 ArcTweenFinished
pub fn advance_arc_tweens(
    time: Res<Time>,
    anchors: Res<SlotAnchors>,
    mut tweens: Query<(Entity, &mut ArcTween, &mut Transform)>,
    mut finished: EventWriter<ArcTweenFinished>,
) {
    let dt = time.delta_secs();

    for (entity, mut tween, mut transform) in &mut tweens {
        if tween.motion.is_complete() {
            continue;
        }

        let target = tween.target.current_position(&anchors);
        let Some(sample) = tween.motion.advance(dt, target) else {
            continue;
        };

        transform.translation = sample.position.extend(transform.translation.z);
        transform.scale = Vec3::splat(sample.scale);

        if tween.motion.is_complete() {
            finished.write(ArcTweenFinished { entity });
        }
    }
}
