/// ASCII ray marcher over point membership.
///
/// Marches fixed steps through a rotating sponge occupying `[-1, 1]^3`,
/// stops at the first solid sample, estimates a normal from central
/// differences of the membership test and maps Lambert luminance onto a
/// character ramp. No cells are enumerated, so any level is affordable.

use crate::engine::membership;
use crate::engine::rule::SurvivalRule;
use crate::engine::types::{Matrix3, Vec3D};
use crate::math::math3d;

/// Dark to bright.
pub const RAMP: &[u8] = b" .,-~:;=!*#$@";

const FOV: f64 = 1.15;
const STEP: f64 = 0.035;
const MAX_STEPS: u32 = 110;
const MAX_DEPTH: f64 = 5.0;
const NORMAL_EPS: f64 = 0.02;
const CAMERA_Z: f64 = 2.8;
const LIGHT: Vec3D = Vec3D { x: 0.6, y: 0.8, z: 0.3 };

#[derive(Clone, Debug)]
pub struct AsciiParams {
    pub width: u32,
    pub height: u32,
    pub level: u32,
    /// Animation time; rotation is `0.65 t` about X and `0.85 t` about Y
    pub t: f64,
    pub rule: SurvivalRule,
    pub factor: u32,
}

impl Default for AsciiParams {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            level: 2,
            t: 0.0,
            rule: SurvivalRule::Menger,
            factor: 3,
        }
    }
}

/// Result of one fixed-step march.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiHit {
    /// Hit position in the sponge's local frame
    pub local: Vec3D,
    pub depth: f64,
}

/// March one ray; `rotation` maps world to the sponge's local frame.
pub fn march_ray(
    origin: &Vec3D,
    direction: &Vec3D,
    rotation: &Matrix3,
    params: &AsciiParams,
) -> Option<AsciiHit> {
    let mut depth = 0.0;
    for _ in 0..MAX_STEPS {
        let p = math3d::vec3d_add(origin, &math3d::vec3d_scale(direction, depth));
        let local = math3d::mat3_mul_vec(rotation, &p);
        if sample(&local, params) > 0.0 {
            return Some(AsciiHit { local, depth });
        }
        depth += STEP;
        if depth > MAX_DEPTH {
            break;
        }
    }
    None
}

/// Membership of a local-frame point as 0 or 1.
fn sample(p: &Vec3D, params: &AsciiParams) -> f64 {
    if p.x.abs() > 1.0 || p.y.abs() > 1.0 || p.z.abs() > 1.0 {
        return 0.0;
    }
    let unit = Vec3D::new((p.x + 1.0) * 0.5, (p.y + 1.0) * 0.5, (p.z + 1.0) * 0.5);
    if membership::is_solid(&unit, params.level, params.rule, params.factor) {
        1.0
    } else {
        0.0
    }
}

/// Outward normal: the membership gradient points inward, so negate it.
fn estimate_normal(p: &Vec3D, params: &AsciiParams) -> Vec3D {
    let e = NORMAL_EPS;
    let d = |a: Vec3D, b: Vec3D| sample(&a, params) - sample(&b, params);
    let mut n = Vec3D::new(
        -d(Vec3D::new(p.x + e, p.y, p.z), Vec3D::new(p.x - e, p.y, p.z)),
        -d(Vec3D::new(p.x, p.y + e, p.z), Vec3D::new(p.x, p.y - e, p.z)),
        -d(Vec3D::new(p.x, p.y, p.z + e), Vec3D::new(p.x, p.y, p.z - e)),
    );
    math3d::vec3d_normalize(&mut n);
    n
}

/// Map luminance in `[0, 1]` to a ramp character.
#[inline]
pub fn shade(lum: f64) -> char {
    let i = (lum.clamp(0.0, 1.0) * (RAMP.len() - 1) as f64).floor() as usize;
    RAMP[i] as char
}

/// Render one frame as `height` lines of `width` characters.
pub fn render_frame(params: &AsciiParams) -> String {
    let w = params.width as usize;
    let h = params.height as usize;
    let mut out = String::with_capacity((w + 1) * h);
    if w == 0 || h == 0 {
        return out;
    }

    let aspect = w as f64 / h as f64;
    let rotation = math3d::mat3_from_euler(params.t * 0.65, params.t * 0.85, 0.0);
    let to_world = math3d::mat3_transpose(&rotation);
    let light = math3d::vec3d_normalized(&LIGHT);
    let origin = Vec3D::new(0.0, 0.0, CAMERA_Z);

    for py in 0..h {
        if py > 0 {
            out.push('\n');
        }
        for px in 0..w {
            let u = ((px as f64 + 0.5) / w as f64) * 2.0 - 1.0;
            let v = ((py as f64 + 0.5) / h as f64) * 2.0 - 1.0;
            let dir = math3d::vec3d_normalized(&Vec3D::new(u * aspect * FOV, -v * FOV, -1.4));

            let ch = match march_ray(&origin, &dir, &rotation, params) {
                Some(hit) => {
                    let n = math3d::mat3_mul_vec(&to_world, &estimate_normal(&hit.local, params));
                    shade(math3d::vec3d_dot(&n, &light))
                }
                None => ' ',
            };
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(level: u32, t: f64) -> AsciiParams {
        AsciiParams { width: 21, height: 11, level, t, ..Default::default() }
    }

    #[test]
    fn test_frame_shape() {
        let frame = render_frame(&params(1, 0.4));
        let lines: Vec<&str> = frame.split('\n').collect();
        assert_eq!(lines.len(), 11);
        assert!(lines.iter().all(|l| l.chars().count() == 21));
        assert!(render_frame(&AsciiParams { width: 0, ..Default::default() }).is_empty());
    }

    #[test]
    fn test_sponge_is_visible() {
        let frame = render_frame(&params(1, 0.6));
        assert!(frame.chars().any(|c| c != ' ' && c != '\n'));
        assert_eq!(frame, render_frame(&params(1, 0.6)));
    }

    #[test]
    fn test_center_ray_hits_cube_but_passes_tunnel() {
        let rotation = math3d::mat3_from_euler(0.0, 0.0, 0.0);
        let origin = Vec3D::new(0.0, 0.0, CAMERA_Z);
        let dir = Vec3D::new(0.0, 0.0, -1.0);
        assert!(march_ray(&origin, &dir, &rotation, &params(0, 0.0)).is_some());
        // the center column is carved out at level 1
        assert!(march_ray(&origin, &dir, &rotation, &params(1, 0.0)).is_none());
    }

    #[test]
    fn test_shade_ramp_ends() {
        assert_eq!(shade(-1.0), ' ');
        assert_eq!(shade(0.0), ' ');
        assert_eq!(shade(1.0), '@');
        assert_eq!(shade(2.0), '@');
    }
}
