//! Built-in anatomy rigs.

use crate::model::animation::{AnimationClip, AnimationController, BoneTrack, Keyframe};
use crate::model::mesh::{Mesh, StructureKind};
use crate::model::model::Model;
use crate::model::skeleton::Bone;

pub const RIG_NAMES: [&str; 3] = ["ankle", "lowerback", "rotatorcuff"];

pub fn by_name(name: &str) -> Option<Model> {
    match name {
        "ankle" => Some(ankle()),
        "lowerback" => Some(lower_back()),
        "rotatorcuff" => Some(rotator_cuff()),
        _ => None,
    }
}

/// Quaternion `[x, y, z, w]` for a rotation of `degrees` about a unit axis.
fn rotation_about(axis: [f32; 3], degrees: f32) -> [f32; 4] {
    let half = degrees.to_radians() * 0.5;
    let s = half.sin();
    [axis[0] * s, axis[1] * s, axis[2] * s, half.cos()]
}

/// Rotates one bone from rest to `degrees` and back over `duration`.
fn swing(bone_id: u32, axis: [f32; 3], degrees: f32, duration: f32) -> BoneTrack {
    let rest = rotation_about(axis, 0.0);
    let peak = rotation_about(axis, degrees);
    BoneTrack {
        bone_id,
        rotation: Some(AnimationController::linear(vec![
            Keyframe::new(0.0, &rest),
            Keyframe::new(duration * 0.5, &peak),
            Keyframe::new(duration, &rest),
        ])),
        ..Default::default()
    }
}

const X_AXIS: [f32; 3] = [1.0, 0.0, 0.0];
const Y_AXIS: [f32; 3] = [0.0, 1.0, 0.0];

pub fn ankle() -> Model {
    let bones = vec![
        Bone::new("Tibia", 0, -1, [0.0, 0.0, 40.0]),
        Bone::new("Talus", 1, 0, [0.0, 0.0, 0.0]),
        Bone::new("Calcaneus", 2, 1, [0.0, -6.0, -4.0]),
        Bone::new("Toes", 3, 1, [0.0, 16.0, -6.0]),
    ];

    let meshes = vec![
        Mesh::new("Tibia", StructureKind::Bone, Some(0), "Main weight-bearing bone of the lower leg; forms the shin."),
        Mesh::new("Fibula", StructureKind::Bone, Some(0), "The slender lateral bone of the lower leg; contributes to ankle stability."),
        Mesh::new("Talus", StructureKind::Bone, Some(1), "Ankle bone that transmits weight from the tibia to the foot."),
        Mesh::new("Calcaneus", StructureKind::Bone, Some(2), "The heel bone; supports body weight and anchors the Achilles tendon."),
        Mesh::new("Toes", StructureKind::Bone, Some(3), "Distal part of the foot, essential for balance and push-off."),
        Mesh::new("TibialisAnterior", StructureKind::Muscle, Some(0), "The tibialis anterior dorsiflexes the foot."),
        Mesh::new("Gastrocnemius", StructureKind::Muscle, Some(0), "The gastrocnemius plantarflexes the foot."),
        Mesh::new("PeroneusLongus", StructureKind::Muscle, Some(0), "The peroneus longus everts the foot."),
        Mesh::new("AnteriorTalofibularLigament", StructureKind::Ligament, Some(1), "Connects the fibula to the talus; commonly injured in ankle sprains."),
        Mesh::new("CalcaneofibularLigament", StructureKind::Ligament, Some(2), "Connects the fibula to the calcaneus; resists excessive inversion."),
    ];

    let clips = vec![
        AnimationClip::new("Dorsiflexion", 2.0, vec![swing(1, X_AXIS, 20.0, 2.0)]),
        AnimationClip::new("Plantarflexion", 2.0, vec![swing(1, X_AXIS, -45.0, 2.0)]),
        AnimationClip::new("Eversion", 1.5, vec![swing(1, Y_AXIS, 15.0, 1.5)]),
        AnimationClip::new("Inversion", 1.5, vec![swing(1, Y_AXIS, -25.0, 1.5)]),
    ];

    Model {
        name: "Ankle".to_string(),
        bones,
        meshes,
        clips,
    }
}

pub fn lower_back() -> Model {
    let bones = vec![
        Bone::new("Pelvis", 0, -1, [0.0, 0.0, 0.0]),
        Bone::new("LumbarSpine", 1, 0, [0.0, 0.0, 10.0]),
        Bone::new("UpperBody", 2, 1, [0.0, 0.0, 25.0]),
    ];

    let meshes = vec![
        Mesh::new("LowerBody", StructureKind::Other, Some(0), "The sacrum and everything below it: pelvis, hips and legs."),
        Mesh::new("UpperBody", StructureKind::Other, Some(2), "Everything above the sacrum: spine, ribcage, shoulders, arms and head."),
        Mesh::new("LeftQuadratusLumborum", StructureKind::Muscle, Some(1), "Stabilizes the spine and assists in lateral flexion."),
        Mesh::new("RightQuadratusLumborum", StructureKind::Muscle, Some(1), "Stabilizes the spine and assists in lateral flexion."),
    ];

    let clips = vec![
        AnimationClip::new("Flexion", 3.0, vec![swing(1, X_AXIS, 40.0, 3.0)]),
        AnimationClip::new("Extension", 3.0, vec![swing(1, X_AXIS, -25.0, 3.0)]),
        AnimationClip::new("LeftLateralFlexion", 3.0, vec![swing(1, Y_AXIS, 30.0, 3.0)]),
        AnimationClip::new("RightLateralFlexion", 3.0, vec![swing(1, Y_AXIS, -30.0, 3.0)]),
    ];

    Model {
        name: "Lower Back".to_string(),
        bones,
        meshes,
        clips,
    }
}

/// Ships without clips; the viewer hides its animation controls for this rig.
pub fn rotator_cuff() -> Model {
    let bones = vec![
        Bone::new("Scapula", 0, -1, [0.0, 0.0, 0.0]),
        Bone::new("Clavicle", 1, 0, [8.0, 4.0, 6.0]),
        Bone::new("Humerus", 2, 0, [10.0, 0.0, 0.0]),
    ];

    let meshes = vec![
        Mesh::new("Scapula", StructureKind::Bone, Some(0), "The scapula stabilizes and moves the shoulder."),
        Mesh::new("Clavicle", StructureKind::Bone, Some(1), "The clavicle connects arm to body and stabilizes shoulder."),
        Mesh::new("Humerus", StructureKind::Bone, Some(2), "The humerus connects the shoulder to elbow."),
        Mesh::new("Supraspinatus", StructureKind::Muscle, Some(0), "The supraspinatus helps shoulder abduction."),
        Mesh::new("Infraspinatus", StructureKind::Muscle, Some(0), "The infraspinatus externally rotates the shoulder."),
        Mesh::new("Subscapularis", StructureKind::Muscle, Some(0), "The subscapularis internally rotates the arm."),
        Mesh::new("TeresMinor", StructureKind::Muscle, Some(0), "The teres minor assists with external rotation."),
    ];

    Model {
        name: "Rotator Cuff".to_string(),
        bones,
        meshes,
        clips: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_named_rig_resolves() {
        for name in RIG_NAMES {
            assert!(by_name(name).is_some(), "missing rig {name}");
        }
        assert!(by_name("knee").is_none());
    }

    #[test]
    fn mesh_bones_exist_in_skeleton() {
        for name in RIG_NAMES {
            let model = by_name(name).unwrap();
            for mesh in &model.meshes {
                if let Some(bone_id) = mesh.bone_id {
                    assert!(model.find_bone(bone_id).is_some(), "{}: {}", name, mesh.name);
                }
            }
        }
    }

    #[test]
    fn rotation_about_is_unit_length() {
        let q = rotation_about(X_AXIS, 73.0);
        let len = q.iter().map(|c| c * c).sum::<f32>().sqrt();
        assert!((len - 1.0).abs() < 1e-6);
    }
}
