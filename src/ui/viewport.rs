use crate::animation::{BoneState, MeshInstance};
use crate::model::StructureKind;
use crate::settings::{ColorSettings, DisplaySettings};

use nalgebra_glm as glm;

/// Project a world point into `rect`. Points behind the camera yield `None`.
pub fn project(view_proj: &glm::Mat4, point: &glm::Vec3, rect: egui::Rect) -> Option<egui::Pos2> {
    let clip = view_proj * glm::vec4(point.x, point.y, point.z, 1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc_x = clip.x / clip.w;
    let ndc_y = clip.y / clip.w;
    Some(egui::pos2(
        rect.left() + (ndc_x + 1.0) * 0.5 * rect.width(),
        rect.top() + (1.0 - ndc_y) * 0.5 * rect.height(),
    ))
}

fn color(rgb: [f32; 3]) -> egui::Color32 {
    egui::Rgba::from_rgb(rgb[0], rgb[1], rgb[2]).into()
}

fn kind_color(kind: StructureKind, colors: &ColorSettings) -> egui::Color32 {
    match kind {
        StructureKind::Bone => color(colors.bone_color),
        StructureKind::Muscle => egui::Color32::from_rgb(200, 80, 80),
        StructureKind::Ligament => egui::Color32::from_rgb(220, 200, 120),
        StructureKind::Other => color(colors.label_color),
    }
}

/// Draw the posed skeleton and mesh labels behind the egui windows
pub fn paint_overlay(
    ctx: &egui::Context,
    view_proj: &glm::Mat4,
    bones: &[BoneState],
    meshes: &[MeshInstance],
    display: &DisplaySettings,
    colors: &ColorSettings,
) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let rect = ctx.viewport_rect();
    let bone_color = color(colors.bone_color);

    if display.show_skeleton {
        for bone in bones {
            let Some(head) = project(view_proj, &bone.abs_vector, rect) else {
                continue;
            };
            if let Some(parent) = bone.parent.and_then(|p| bones.get(p)) {
                if let Some(tail) = project(view_proj, &parent.abs_vector, rect) {
                    painter.line_segment([tail, head], egui::Stroke::new(2.0, bone_color));
                }
            }
            painter.circle_filled(head, 3.0, bone_color);
        }
    }

    if display.show_labels {
        let font = egui::FontId::proportional(12.0);
        for mesh in meshes {
            let Some(pos) = project(view_proj, &mesh.anchor(), rect) else {
                continue;
            };
            painter.text(
                pos + egui::vec2(6.0, 0.0),
                egui::Align2::LEFT_CENTER,
                &mesh.name,
                font.clone(),
                kind_color(mesh.kind, colors),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraState;

    #[test]
    fn camera_target_lands_mid_viewport() {
        let camera = CameraState::new(0.0, 0.0, 100.0, [0.0, 0.0, 10.0]);
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let view_proj = camera.view_proj(800.0 / 600.0, 1000.0);
        let pos = project(&view_proj, &glm::vec3(0.0, 0.0, 10.0), rect).unwrap();
        assert!((pos.x - 400.0).abs() < 0.01);
        assert!((pos.y - 300.0).abs() < 0.01);
    }

    #[test]
    fn points_behind_camera_are_skipped() {
        let camera = CameraState::new(0.0, 0.0, 100.0, [0.0, 0.0, 0.0]);
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let view_proj = camera.view_proj(800.0 / 600.0, 1000.0);
        // eye sits at +X, so +200 X is behind it
        assert!(project(&view_proj, &glm::vec3(200.0, 0.0, 0.0), rect).is_none());
    }

    #[test]
    fn higher_points_draw_higher_on_screen() {
        let camera = CameraState::new(0.0, 0.0, 100.0, [0.0, 0.0, 0.0]);
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(800.0, 600.0));
        let view_proj = camera.view_proj(800.0 / 600.0, 1000.0);
        let low = project(&view_proj, &glm::vec3(0.0, 0.0, 0.0), rect).unwrap();
        let high = project(&view_proj, &glm::vec3(0.0, 0.0, 20.0), rect).unwrap();
        assert!(high.y < low.y);
    }
}
