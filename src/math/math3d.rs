/// Small vector and rotation helpers for the ray marcher.

use crate::engine::types::{Matrix3, Vec3D};

// ─── Vector operations ───────────────────────────────────────

#[inline(always)]
pub fn vec3d_add(a: &Vec3D, b: &Vec3D) -> Vec3D {
    Vec3D {
        x: a.x + b.x,
        y: a.y + b.y,
        z: a.z + b.z,
    }
}

#[inline(always)]
pub fn vec3d_scale(v: &Vec3D, s: f64) -> Vec3D {
    Vec3D {
        x: v.x * s,
        y: v.y * s,
        z: v.z * s,
    }
}

#[inline(always)]
pub fn vec3d_dot(a: &Vec3D, b: &Vec3D) -> f64 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

#[inline(always)]
pub fn vec3d_length(v: &Vec3D) -> f64 {
    vec3d_dot(v, v).sqrt()
}

/// Normalize in place; near-zero vectors are left untouched.
#[inline(always)]
pub fn vec3d_normalize(v: &mut Vec3D) {
    let len = vec3d_length(v);
    if len > 1e-30 {
        let inv = 1.0 / len;
        v.x *= inv;
        v.y *= inv;
        v.z *= inv;
    }
}

#[inline(always)]
pub fn vec3d_normalized(v: &Vec3D) -> Vec3D {
    let mut result = *v;
    vec3d_normalize(&mut result);
    result
}

// ─── Matrix operations ───────────────────────────────────────

/// result = M * v
#[inline]
pub fn mat3_mul_vec(m: &Matrix3, v: &Vec3D) -> Vec3D {
    Vec3D {
        x: m.m[0][0] * v.x + m.m[0][1] * v.y + m.m[0][2] * v.z,
        y: m.m[1][0] * v.x + m.m[1][1] * v.y + m.m[1][2] * v.z,
        z: m.m[2][0] * v.x + m.m[2][1] * v.y + m.m[2][2] * v.z,
    }
}

/// Transpose, which is also the inverse of a rotation.
pub fn mat3_transpose(m: &Matrix3) -> Matrix3 {
    Matrix3 {
        m: [
            [m.m[0][0], m.m[1][0], m.m[2][0]],
            [m.m[0][1], m.m[1][1], m.m[2][1]],
            [m.m[0][2], m.m[1][2], m.m[2][2]],
        ],
    }
}

/// Rotation from Euler angles in radians (X, then Y, then Z).
pub fn mat3_from_euler(rx: f64, ry: f64, rz: f64) -> Matrix3 {
    let (sx, cx) = rx.sin_cos();
    let (sy, cy) = ry.sin_cos();
    let (sz, cz) = rz.sin_cos();

    Matrix3 {
        m: [
            [cy * cz, -cy * sz, sy],
            [sx * sy * cz + cx * sz, -sx * sy * sz + cx * cz, -sx * cy],
            [-cx * sy * cz + sx * sz, cx * sy * sz + sx * cz, cx * cy],
        ],
    }
}
