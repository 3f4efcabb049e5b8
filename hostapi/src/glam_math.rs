//! `MathApi` backed by `glam`.

use glam::{Quat, Vec3};
use glam_bridge_schema::{QuatRecord, Vec3Record};

use crate::traits::MathApi;

/// Reference math for the host. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlamMath;

fn to_glam(v: Vec3Record) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

fn from_glam(v: Vec3) -> Vec3Record {
    Vec3Record::new(v.x, v.y, v.z)
}

impl MathApi for GlamMath {
    fn unit_z(&self) -> Vec3Record {
        from_glam(Vec3::Z)
    }

    fn normalize(&self, v: Vec3Record) -> Vec3Record {
        from_glam(to_glam(v).normalize_or_zero())
    }

    fn mul_vec3(&self, q: QuatRecord, v: Vec3Record) -> Vec3Record {
        let q = Quat::from_xyzw(q.x, q.y, q.z, q.w);
        from_glam(q.mul_vec3(to_glam(v)))
    }
}
