pub mod gltf;

pub use self::gltf::{compute_mesh_bounds, load_car_model, CarModel};
