// Transform helpers used by pose evaluation

use nalgebra_glm as glm;

/// Convert quaternion to rotation matrix
pub fn quaternion_to_matrix(q: &glm::Quat) -> glm::Mat3 {
    // Normalize quaternion
    let q = glm::quat_normalize(q);

    let x2 = q.i + q.i;
    let y2 = q.j + q.j;
    let z2 = q.k + q.k;

    let xx = q.i * x2;
    let xy = q.i * y2;
    let xz = q.i * z2;
    let yy = q.j * y2;
    let yz = q.j * z2;
    let zz = q.k * z2;
    let wx = q.w * x2;
    let wy = q.w * y2;
    let wz = q.w * z2;

    // glm::mat3 takes its arguments row by row
    glm::mat3(
        1.0 - (yy + zz),
        xy - wz,
        xz + wy,
        xy + wz,
        1.0 - (xx + zz),
        yz - wx,
        xz - wy,
        yz + wx,
        1.0 - (xx + yy),
    )
}

/// Multiply two 3x3 matrices
pub fn mul_matrices(a: &glm::Mat3, b: &glm::Mat3) -> glm::Mat3 {
    a * b
}

/// Apply scaling to rotation matrix - scales each column by corresponding scale component
pub fn apply_scaling_to_matrix(matrix: &glm::Mat3, scaling: &glm::Vec3) -> glm::Mat3 {
    matrix * glm::diagonal3x3(scaling)
}

/// World matrix of geometry skinned rigidly to a bone:
/// translate(bone position) * rotation/scale * translate(-rest pivot)
pub fn rigid_skin_matrix(abs_matrix: &glm::Mat3, abs_vector: &glm::Vec3, pivot: &glm::Vec3) -> glm::Mat4 {
    let rotation = glm::mat3_to_mat4(abs_matrix);
    let to_pivot = glm::translation(&(-pivot));
    let to_world = glm::translation(abs_vector);
    to_world * rotation * to_pivot
}
