//! Perspective camera.

use orrery_config::schema::CameraConfig;

use crate::matrix::{self, Mat4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            target: config.target,
            fov_y_degrees: config.fov_degrees,
            near: config.near,
            far: config.far,
        }
    }

    pub fn view(&self) -> Mat4 {
        matrix::look_at(self.position, self.target, [0.0, 1.0, 0.0])
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        matrix::perspective(self.fov_y_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        matrix::mul(&self.projection(aspect), &self.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::transform_point;

    #[test]
    fn default_camera_looks_at_origin_from_z50() {
        let cam = Camera::default();
        assert_eq!(cam.position, [0.0, 0.0, 50.0]);
        let clip = transform_point(&cam.view_proj(1.0), [0.0, 0.0, 0.0]);
        assert!((clip[0] / clip[3]).abs() < 1e-6);
        assert!((clip[1] / clip[3]).abs() < 1e-6);
        let depth = clip[2] / clip[3];
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn points_right_of_origin_project_right() {
        let cam = Camera::default();
        let clip = transform_point(&cam.view_proj(1.0), [10.0, 0.0, 0.0]);
        assert!(clip[0] / clip[3] > 0.1);
    }
}
