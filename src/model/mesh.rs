/// What kind of anatomical structure a mesh represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Bone,
    Muscle,
    Ligament,
    Other,
}

/// A named sub-mesh of the anatomy model, skinned to a single skeleton bone.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub kind: StructureKind,
    pub bone_id: Option<u32>,
    pub info: String,
}

impl Mesh {
    pub fn new(name: &str, kind: StructureKind, bone_id: Option<u32>, info: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            bone_id,
            info: info.to_string(),
        }
    }
}
