use crate::model::animation::AnimationClip;
use crate::model::mesh::Mesh;
use crate::model::skeleton::Bone;

#[derive(Debug, Clone, Default)]
pub struct Model {
    pub name: String,
    pub bones: Vec<Bone>,
    pub meshes: Vec<Mesh>,
    pub clips: Vec<AnimationClip>,
}

impl Model {
    pub fn find_bone(&self, object_id: u32) -> Option<usize> {
        self.bones.iter().position(|b| b.object_id == object_id)
    }

    /// Center of the bind-pose pivots, used to aim the camera.
    pub fn center(&self) -> [f32; 3] {
        if self.bones.is_empty() {
            return [0.0, 0.0, 0.0];
        }
        let mut sum = [0.0f32; 3];
        for bone in &self.bones {
            for (s, p) in sum.iter_mut().zip(bone.pivot_point) {
                *s += p;
            }
        }
        let n = self.bones.len() as f32;
        [sum[0] / n, sum[1] / n, sum[2] / n]
    }
}
