//! Vector helpers on top of nalgebra

use nalgebra::Vector3;

use crate::error::GeometryError;

pub fn dot(a: &Vector3<f32>, b: &Vector3<f32>) -> f32 {
    a.dot(b)
}

pub fn cross(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a.cross(b)
}

pub fn sub(a: &Vector3<f32>, b: &Vector3<f32>) -> Vector3<f32> {
    a - b
}

pub fn length(v: &Vector3<f32>) -> f32 {
    v.norm()
}

/// Scale `v` to unit length.
///
/// Fails instead of producing NaN components when `v` has zero length
/// or contains non-finite values.
pub fn normalize(v: &Vector3<f32>) -> Result<Vector3<f32>, GeometryError> {
    let len = length(v);
    if len == 0.0 || !len.is_finite() {
        return Err(GeometryError::DegenerateVector);
    }
    Ok(v / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_of_axes() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(cross(&x, &y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(dot(&x, &y), 0.0);
    }

    #[test]
    fn test_normalize() {
        let v = normalize(&Vector3::new(3.0, 0.0, 4.0)).unwrap();
        assert!((length(&v) - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_vector_fails() {
        assert_eq!(
            normalize(&Vector3::zeros()),
            Err(GeometryError::DegenerateVector)
        );
        assert!(normalize(&Vector3::new(f32::NAN, 0.0, 1.0)).is_err());
    }

    #[test]
    fn test_sub() {
        let d = sub(&Vector3::new(1.0, 2.0, 3.0), &Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(d, Vector3::new(0.0, 1.0, 2.0));
    }
}
