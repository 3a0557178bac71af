//! Proptest strategies shared by unit tests.

/// Generates a proptest strategy returning a unit vector.
macro_rules! prop_unit_vector3 {
    ($name: ident) => {
        prop_compose! {
            fn $name()(
                x in -1.0..1.0f32,
                y in -1.0..1.0f32,
                z in -1.0..1.0f32,
            ) -> Vector3f {
                let v = Vector3f::new(x, y, z);
                if v.length_squared() < 1e-4 {
                    Vector3f::new(0.0, 0.0, 1.0)
                } else {
                    v.normalize()
                }
            }
        }
    };
}

/// Generates a proptest strategy returning a unit vector in the upper
/// hemisphere of the shading frame.
macro_rules! prop_hemisphere_vector3 {
    ($name: ident) => {
        prop_compose! {
            fn $name()(
                x in -1.0..1.0f32,
                y in -1.0..1.0f32,
                z in 0.05..1.0f32,
            ) -> Vector3f {
                Vector3f::new(x, y, z).normalize()
            }
        }
    };
}
