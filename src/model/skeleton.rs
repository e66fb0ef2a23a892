#[derive(Debug, Clone)]
pub struct Bone {
    pub name: String,
    pub object_id: u32,
    pub parent_id: i32, // -1 means no parent
    pub pivot_point: [f32; 3],
}

impl Default for Bone {
    fn default() -> Self {
        Self {
            name: String::new(),
            object_id: 0,
            parent_id: -1,
            pivot_point: [0.0, 0.0, 0.0],
        }
    }
}

impl Bone {
    pub fn new(name: &str, object_id: u32, parent_id: i32, pivot_point: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            object_id,
            parent_id,
            pivot_point,
        }
    }
}
